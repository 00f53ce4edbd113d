use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::types::{Dish, MenuCycle};

/// Read access to the dish and menu-cycle catalog.
///
/// The catalog is owned by the surrounding CRUD system; the engine only ever
/// reads from it, once per request. `get_dishes` is a batched lookup so a
/// large schedule costs one round trip, not one per dish.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_menu_cycle(&self, id: &str) -> Result<MenuCycle, CatalogError>;

    /// Fetch dishes by id in one read. Every requested id must resolve; a
    /// missing id is upstream data corruption, not an empty result.
    async fn get_dishes(&self, ids: &[String]) -> Result<HashMap<String, Dish>, CatalogError>;
}
