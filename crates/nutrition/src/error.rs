use menu::CatalogError;
use scheduling::ScheduleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("Unknown age group: {0}")]
    UnknownAgeGroup(String),
}
