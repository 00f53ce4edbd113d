use menu::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Menu schedule not found: {0}")]
    NotFound(String),

    #[error("Menu cycle '{cycle_id}' has no daily menu for cycle day {day}")]
    InvalidCycle { cycle_id: String, day: u32 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Catalog(#[from] CatalogError),
}
