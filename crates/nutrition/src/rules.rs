use menu::FoodGroup;
use serde::{Deserialize, Serialize};

use crate::aggregate::{DayNutrients, FoodGroupPortion};
use crate::policy::RecommendationThresholds;

/// The averaged figures a recommendation rule may inspect.
pub struct AnalysisFigures<'a> {
    pub average_nutrients: &'a DayNutrients,
    pub average_food_groups: &'a [FoodGroupPortion],
    pub food_group_diversity: usize,
}

impl AnalysisFigures<'_> {
    pub fn has_group(&self, group: FoodGroup) -> bool {
        self.average_food_groups
            .iter()
            .any(|fg| fg.food_group == group)
    }
}

/// Which projection a recommendation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Nutrients,
    FoodGroups,
    General,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub rule: String,
    pub category: RuleCategory,
    pub message: String,
}

/// One row of the recommendation table: a trigger predicate and its canned
/// message. Rules are data so the set can grow without touching aggregation.
pub struct RecommendationRule {
    pub name: &'static str,
    pub category: RuleCategory,
    pub message: &'static str,
    pub trigger: fn(&AnalysisFigures, &RecommendationThresholds) -> bool,
}

/// The built-in rule table, in emission order.
pub fn default_rules() -> Vec<RecommendationRule> {
    vec![
        RecommendationRule {
            name: "low_calories",
            category: RuleCategory::Nutrients,
            message: "Consider increasing portion sizes or adding more calorie-dense foods to meet energy needs",
            trigger: |f, t| f.average_nutrients.calories < t.min_calories,
        },
        RecommendationRule {
            name: "low_protein",
            category: RuleCategory::Nutrients,
            message: "Include more protein-rich foods such as legumes, dairy, eggs, or meat",
            trigger: |f, t| f.average_nutrients.protein < t.min_protein,
        },
        RecommendationRule {
            name: "low_calcium",
            category: RuleCategory::Nutrients,
            message: "Add more dairy products or calcium-rich foods like cheese, yogurt, or fortified foods",
            trigger: |f, t| f.average_nutrients.calcium < t.min_calcium,
        },
        RecommendationRule {
            name: "low_iron",
            category: RuleCategory::Nutrients,
            message: "Include iron-rich foods such as red meat, beans, or fortified cereals",
            trigger: |f, t| f.average_nutrients.iron < t.min_iron,
        },
        RecommendationRule {
            name: "low_fiber",
            category: RuleCategory::Nutrients,
            message: "Increase fiber intake with more fruits, vegetables, and whole grains",
            trigger: |f, t| f.average_nutrients.fiber < t.min_fiber,
        },
        RecommendationRule {
            name: "missing_fruits",
            category: RuleCategory::FoodGroups,
            message: "Add fresh fruits to provide vitamins, minerals, and fiber",
            trigger: |f, _| !f.has_group(FoodGroup::Fruits),
        },
        RecommendationRule {
            name: "missing_vegetables",
            category: RuleCategory::FoodGroups,
            message: "Include more vegetables for essential vitamins and minerals",
            trigger: |f, _| !f.has_group(FoodGroup::Vegetables),
        },
        RecommendationRule {
            name: "missing_dairy",
            category: RuleCategory::FoodGroups,
            message: "Include dairy products for calcium and protein",
            trigger: |f, _| !f.has_group(FoodGroup::Dairy),
        },
        RecommendationRule {
            name: "low_diversity",
            category: RuleCategory::FoodGroups,
            message: "Increase food group diversity to ensure balanced nutrition",
            trigger: |f, t| f.food_group_diversity < t.min_diversity,
        },
    ]
}

/// Message emitted when no rule fires.
pub const BALANCED_MESSAGE: &str =
    "The menu shows good nutritional balance. Continue with current planning";

/// Evaluate the table in declaration order; each rule fires at most once per
/// report. A report that triggers nothing gets the balanced fallback.
pub fn evaluate(
    rules: &[RecommendationRule],
    figures: &AnalysisFigures,
    thresholds: &RecommendationThresholds,
) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = rules
        .iter()
        .filter(|rule| (rule.trigger)(figures, thresholds))
        .map(|rule| Recommendation {
            rule: rule.name.to_string(),
            category: rule.category,
            message: rule.message.to_string(),
        })
        .collect();

    if out.is_empty() {
        out.push(Recommendation {
            rule: "balanced".to_string(),
            category: RuleCategory::General,
            message: BALANCED_MESSAGE.to_string(),
        });
    }

    out
}
