use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Menu cycle not found: {0}")]
    CycleNotFound(String),

    #[error("Dish not found: {0}")]
    DishNotFound(String),
}
