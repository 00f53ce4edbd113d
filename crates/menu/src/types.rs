use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The three meals a covered location serves on any given day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Snack,
}

/// Closed food-group classification of a dish, used for dietary-diversity
/// analysis.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FoodGroup {
    Protein,
    Grains,
    Vegetables,
    Fruits,
    Dairy,
    Other,
}

impl FoodGroup {
    /// The five groups a balanced menu is expected to cover. `Other` never
    /// counts toward adequacy scoring.
    pub fn is_expected(&self) -> bool {
        !matches!(self, FoodGroup::Other)
    }
}

/// Per-serving nutritional fact sheet of a dish.
///
/// Every field may be absent; aggregation treats absent as zero rather than
/// unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: Option<f64>,
    /// Grams per serving.
    pub protein: Option<f64>,
    /// Grams per serving.
    pub carbohydrates: Option<f64>,
    /// Grams per serving.
    pub fat: Option<f64>,
    /// Grams per serving.
    pub fiber: Option<f64>,
    /// Milligrams per serving.
    pub sodium: Option<f64>,
    /// Milligrams per serving.
    pub calcium: Option<f64>,
    /// Milligrams per serving.
    pub iron: Option<f64>,
    /// Milligrams per serving.
    pub vitamin_c: Option<f64>,
    /// International units per serving.
    pub vitamin_a: Option<f64>,
    pub photo_url: Option<String>,
}

/// One ingredient quantity in a dish recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portion {
    pub ingredient_id: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub ingredients: Vec<Portion>,
}

/// A dish from the catalog. The recipe is carried for completeness; the
/// engine only reads the fact sheet and the food-group classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub food_group: FoodGroup,
    #[serde(default)]
    pub recipe: Recipe,
    #[serde(default)]
    pub nutrition: NutritionFacts,
}

/// The dishes served on one cyclic day of a menu cycle, by meal.
///
/// `day` is the 1-based position within the cycle's repeating period, not a
/// calendar date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyMenu {
    pub day: u32,
    #[serde(default)]
    pub breakfast: Vec<String>,
    #[serde(default)]
    pub lunch: Vec<String>,
    #[serde(default)]
    pub snack: Vec<String>,
}

impl DailyMenu {
    pub fn meal(&self, meal_type: MealType) -> &[String] {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Snack => &self.snack,
        }
    }

    /// Dish ids across all three meals, in meal order.
    pub fn dish_ids(&self) -> impl Iterator<Item = &String> {
        self.breakfast
            .iter()
            .chain(self.lunch.iter())
            .chain(self.snack.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.breakfast.is_empty() && self.lunch.is_empty() && self.snack.is_empty()
    }
}

/// A repeating template of daily menus.
///
/// Catalog invariant (validated by the owning CRUD layer): every day index
/// 1..=duration_days appears exactly once in `daily_menus`, and every dish
/// reference exists in the dish catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCycle {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub duration_days: u32,
    pub daily_menus: Vec<DailyMenu>,
}

impl MenuCycle {
    /// Look up the template day for a 1-based cycle day index.
    pub fn daily_menu(&self, day: u32) -> Option<&DailyMenu> {
        self.daily_menus.iter().find(|dm| dm.day == day)
    }
}
