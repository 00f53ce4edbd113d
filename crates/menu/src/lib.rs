pub mod error;
pub mod store;
pub mod types;

pub use error::CatalogError;
pub use store::CatalogStore;
pub use types::{
    DailyMenu, Dish, FoodGroup, MealType, MenuCycle, NutritionFacts, Portion, Recipe,
};
