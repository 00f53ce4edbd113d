#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use menu::{
    CatalogError, CatalogStore, DailyMenu, Dish, FoodGroup, MenuCycle, NutritionFacts, Recipe,
};
use pae_menus::Engine;
use scheduling::{
    CoverageEntry, LocationType, MenuSchedule, ScheduleError, ScheduleFilter, ScheduleStore,
};

pub struct InMemoryCatalog {
    pub cycles: HashMap<String, MenuCycle>,
    pub dishes: HashMap<String, Dish>,
}

impl InMemoryCatalog {
    pub fn new(cycles: Vec<MenuCycle>, dishes: Vec<Dish>) -> Self {
        Self {
            cycles: cycles.into_iter().map(|c| (c.id.clone(), c)).collect(),
            dishes: dishes.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn get_menu_cycle(&self, id: &str) -> Result<MenuCycle, CatalogError> {
        self.cycles
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::CycleNotFound(id.to_string()))
    }

    async fn get_dishes(&self, ids: &[String]) -> Result<HashMap<String, Dish>, CatalogError> {
        let mut out = HashMap::new();
        for id in ids {
            let dish = self
                .dishes
                .get(id)
                .ok_or_else(|| CatalogError::DishNotFound(id.clone()))?;
            out.insert(id.clone(), dish.clone());
        }
        Ok(out)
    }
}

pub struct InMemoryScheduleStore {
    pub schedules: Vec<MenuSchedule>,
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn get_schedule(&self, id: &str) -> Result<MenuSchedule, ScheduleError> {
        self.schedules
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))
    }

    async fn list_schedules(
        &self,
        filter: &ScheduleFilter,
    ) -> Result<Vec<MenuSchedule>, ScheduleError> {
        Ok(self
            .schedules
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect())
    }
}

pub fn engine(cycles: Vec<MenuCycle>, dishes: Vec<Dish>, schedules: Vec<MenuSchedule>) -> Engine {
    Engine::new(
        Arc::new(InMemoryCatalog::new(cycles, dishes)),
        Arc::new(InMemoryScheduleStore { schedules }),
    )
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn created_on(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn campus(id: &str, name: &str) -> CoverageEntry {
    CoverageEntry {
        location_id: id.to_string(),
        location_type: LocationType::Campus,
        location_name: name.to_string(),
    }
}

pub fn dish(id: &str, name: &str, food_group: FoodGroup, nutrition: NutritionFacts) -> Dish {
    Dish {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(format!("{name} as served in the school restaurant")),
        food_group,
        recipe: Recipe::default(),
        nutrition,
    }
}

pub fn schedule(
    id: &str,
    cycle_id: &str,
    coverage: Vec<CoverageEntry>,
    start: NaiveDate,
    end: NaiveDate,
    created_at: DateTime<Utc>,
) -> MenuSchedule {
    MenuSchedule::new(id, cycle_id, coverage, start, end, created_at).unwrap()
}

/// Two-day cycle with a known nutritional profile:
///
/// day 1: rice (grains), chicken stew (protein), milk (dairy)
/// day 2: arepa (grains), bean stew (protein), mango (fruits)
pub fn two_day_cycle(cycle_id: &str) -> (MenuCycle, Vec<Dish>) {
    let dishes = vec![
        dish(
            "rice",
            "Rice",
            FoodGroup::Grains,
            NutritionFacts {
                calories: Some(200.0),
                protein: Some(4.0),
                carbohydrates: Some(45.0),
                fat: Some(1.0),
                fiber: Some(1.0),
                ..Default::default()
            },
        ),
        dish(
            "chicken-stew",
            "Chicken stew",
            FoodGroup::Protein,
            NutritionFacts {
                calories: Some(300.0),
                protein: Some(25.0),
                fat: Some(10.0),
                iron: Some(2.0),
                ..Default::default()
            },
        ),
        dish(
            "milk",
            "Milk",
            FoodGroup::Dairy,
            NutritionFacts {
                calories: Some(150.0),
                protein: Some(8.0),
                carbohydrates: Some(12.0),
                fat: Some(8.0),
                calcium: Some(300.0),
                ..Default::default()
            },
        ),
        dish(
            "arepa",
            "Arepa",
            FoodGroup::Grains,
            NutritionFacts {
                calories: Some(250.0),
                protein: Some(5.0),
                carbohydrates: Some(50.0),
                fat: Some(5.0),
                fiber: Some(2.0),
                ..Default::default()
            },
        ),
        dish(
            "bean-stew",
            "Bean stew",
            FoodGroup::Protein,
            NutritionFacts {
                calories: Some(350.0),
                protein: Some(22.0),
                carbohydrates: Some(60.0),
                fat: Some(2.0),
                iron: Some(4.0),
                ..Default::default()
            },
        ),
        dish(
            "mango",
            "Mango",
            FoodGroup::Fruits,
            NutritionFacts {
                calories: Some(100.0),
                protein: Some(1.0),
                carbohydrates: Some(25.0),
                vitamin_c: Some(36.0),
                vitamin_a: Some(1100.0),
                ..Default::default()
            },
        ),
    ];

    let cycle = MenuCycle {
        id: cycle_id.to_string(),
        name: "Two day pilot cycle".to_string(),
        description: None,
        duration_days: 2,
        daily_menus: vec![
            DailyMenu {
                day: 1,
                breakfast: vec!["rice".to_string(), "milk".to_string()],
                lunch: vec!["chicken-stew".to_string()],
                snack: Vec::new(),
            },
            DailyMenu {
                day: 2,
                breakfast: vec!["arepa".to_string()],
                lunch: vec!["bean-stew".to_string()],
                snack: vec!["mango".to_string()],
            },
        ],
    };

    (cycle, dishes)
}
