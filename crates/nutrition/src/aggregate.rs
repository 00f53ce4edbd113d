use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use menu::{Dish, FoodGroup, NutritionFacts};
use serde::{Deserialize, Serialize};

/// Total nutrients served to one citizen across a single day's meals.
///
/// Absent fact-sheet fields count as zero, not as unknown; the totals are
/// therefore lower bounds when the catalog is incomplete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayNutrients {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sodium: f64,
    pub calcium: f64,
    pub iron: f64,
    pub vitamin_c: f64,
    pub vitamin_a: f64,
}

impl DayNutrients {
    pub fn add_facts(&mut self, facts: &NutritionFacts) {
        self.calories += facts.calories.unwrap_or(0.0);
        self.protein += facts.protein.unwrap_or(0.0);
        self.carbohydrates += facts.carbohydrates.unwrap_or(0.0);
        self.fat += facts.fat.unwrap_or(0.0);
        self.fiber += facts.fiber.unwrap_or(0.0);
        self.sodium += facts.sodium.unwrap_or(0.0);
        self.calcium += facts.calcium.unwrap_or(0.0);
        self.iron += facts.iron.unwrap_or(0.0);
        self.vitamin_c += facts.vitamin_c.unwrap_or(0.0);
        self.vitamin_a += facts.vitamin_a.unwrap_or(0.0);
    }

    pub fn accumulate(&mut self, other: &DayNutrients) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbohydrates += other.carbohydrates;
        self.fat += other.fat;
        self.fiber += other.fiber;
        self.sodium += other.sodium;
        self.calcium += other.calcium;
        self.iron += other.iron;
        self.vitamin_c += other.vitamin_c;
        self.vitamin_a += other.vitamin_a;
    }

    pub fn divided_by(&self, days: f64) -> DayNutrients {
        DayNutrients {
            calories: self.calories / days,
            protein: self.protein / days,
            carbohydrates: self.carbohydrates / days,
            fat: self.fat / days,
            fiber: self.fiber / days,
            sodium: self.sodium / days,
            calcium: self.calcium / days,
            iron: self.iron / days,
            vitamin_c: self.vitamin_c / days,
            vitamin_a: self.vitamin_a / days,
        }
    }
}

/// Contribution of one food group to a day or to an averaged period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodGroupPortion {
    pub food_group: FoodGroup,
    /// One portion per dish instance; a per-day average in period reports.
    pub portions: f64,
    /// Dish instances contributing to this group.
    pub dish_count: usize,
    /// Distinct contributing dish names, sorted, for report readability.
    pub dish_names: Vec<String>,
}

/// Nutrient and food-group totals for one day's dishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayTotals {
    pub nutrients: DayNutrients,
    pub food_groups: Vec<FoodGroupPortion>,
    pub total_dishes: usize,
}

/// One day of a schedule, placed on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAnalysis {
    pub date: NaiveDate,
    pub cycle_day: u32,
    pub nutrients: DayNutrients,
    pub food_groups: Vec<FoodGroupPortion>,
    pub total_dishes: usize,
}

/// Sums nutritional fields and food-group portions across the dishes of a
/// single day.
pub struct NutrientAggregator;

impl NutrientAggregator {
    /// Aggregate every dish served on one day, across all three meals. An
    /// empty day yields all-zero totals, not an error.
    pub fn aggregate_day<'a, I>(dishes: I) -> DayTotals
    where
        I: IntoIterator<Item = &'a Dish>,
    {
        let mut nutrients = DayNutrients::default();
        let mut groups: BTreeMap<FoodGroup, (f64, usize, BTreeSet<String>)> = BTreeMap::new();
        let mut total_dishes = 0;

        for dish in dishes {
            nutrients.add_facts(&dish.nutrition);
            total_dishes += 1;

            let entry = groups.entry(dish.food_group).or_default();
            entry.0 += 1.0;
            entry.1 += 1;
            entry.2.insert(dish.name.clone());
        }

        let food_groups = groups
            .into_iter()
            .map(|(food_group, (portions, dish_count, names))| FoodGroupPortion {
                food_group,
                portions,
                dish_count,
                dish_names: names.into_iter().collect(),
            })
            .collect();

        DayTotals {
            nutrients,
            food_groups,
            total_dishes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu::Recipe;

    fn dish(id: &str, name: &str, group: FoodGroup, nutrition: NutritionFacts) -> Dish {
        Dish {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            food_group: group,
            recipe: Recipe::default(),
            nutrition,
        }
    }

    #[test]
    fn empty_day_is_all_zero_not_an_error() {
        let dishes: Vec<Dish> = Vec::new();
        let totals = NutrientAggregator::aggregate_day(&dishes);

        assert_eq!(totals.nutrients, DayNutrients::default());
        assert!(totals.food_groups.is_empty());
        assert_eq!(totals.total_dishes, 0);
    }

    #[test]
    fn sums_nutrients_treating_absent_fields_as_zero() {
        let dishes = vec![
            dish(
                "d1",
                "Rice",
                FoodGroup::Grains,
                NutritionFacts {
                    calories: Some(200.0),
                    protein: Some(4.0),
                    carbohydrates: Some(45.0),
                    ..Default::default()
                },
            ),
            dish(
                "d2",
                "Chicken stew",
                FoodGroup::Protein,
                NutritionFacts {
                    calories: Some(350.0),
                    protein: Some(30.0),
                    iron: Some(2.5),
                    ..Default::default()
                },
            ),
        ];

        let totals = NutrientAggregator::aggregate_day(&dishes);

        assert_eq!(totals.nutrients.calories, 550.0);
        assert_eq!(totals.nutrients.protein, 34.0);
        assert_eq!(totals.nutrients.carbohydrates, 45.0);
        assert_eq!(totals.nutrients.iron, 2.5);
        assert_eq!(totals.nutrients.calcium, 0.0);
        assert_eq!(totals.total_dishes, 2);
    }

    #[test]
    fn food_groups_count_portions_per_dish_instance() {
        let dishes = vec![
            dish("d1", "Rice", FoodGroup::Grains, NutritionFacts::default()),
            dish("d2", "Arepa", FoodGroup::Grains, NutritionFacts::default()),
            dish("d3", "Rice", FoodGroup::Grains, NutritionFacts::default()),
            dish("d4", "Mango", FoodGroup::Fruits, NutritionFacts::default()),
        ];

        let totals = NutrientAggregator::aggregate_day(&dishes);

        assert_eq!(totals.food_groups.len(), 2);
        let grains = totals
            .food_groups
            .iter()
            .find(|fg| fg.food_group == FoodGroup::Grains)
            .unwrap();
        assert_eq!(grains.portions, 3.0);
        assert_eq!(grains.dish_count, 3);
        // Distinct names only, sorted.
        assert_eq!(grains.dish_names, vec!["Arepa".to_string(), "Rice".to_string()]);
    }

    #[test]
    fn averaging_round_trips_through_accumulate_and_divide() {
        let mut total = DayNutrients::default();
        let day1 = DayNutrients {
            calories: 1200.0,
            protein: 40.0,
            ..Default::default()
        };
        let day2 = DayNutrients {
            calories: 1800.0,
            protein: 50.0,
            ..Default::default()
        };
        total.accumulate(&day1);
        total.accumulate(&day2);

        let avg = total.divided_by(2.0);
        assert!((avg.calories - 1500.0).abs() < 1e-9);
        assert!((avg.protein - 45.0).abs() < 1e-9);
    }
}
