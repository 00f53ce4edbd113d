use std::collections::BTreeMap;

use chrono::NaiveDate;
use menu::FoodGroup;
use serde::{Deserialize, Serialize};

use crate::aggregate::{DayAnalysis, DayNutrients, FoodGroupPortion};
use crate::policy::{CompliancePolicy, ComplianceStatus};
use crate::requirements::AgeGroupRequirement;
use crate::rules::{Recommendation, RuleCategory};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Share of average calories attributable to each macronutrient, normalized
/// to sum to 100 whenever any macronutrient is non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacronutrientDistribution {
    pub protein_percent: f64,
    pub carbohydrate_percent: f64,
    pub fat_percent: f64,
}

impl MacronutrientDistribution {
    const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
    const CARBOHYDRATE_KCAL_PER_GRAM: f64 = 4.0;
    const FAT_KCAL_PER_GRAM: f64 = 9.0;

    pub fn from_average(nutrients: &DayNutrients) -> Self {
        let protein = nutrients.protein * Self::PROTEIN_KCAL_PER_GRAM;
        let carbohydrate = nutrients.carbohydrates * Self::CARBOHYDRATE_KCAL_PER_GRAM;
        let fat = nutrients.fat * Self::FAT_KCAL_PER_GRAM;
        let total = protein + carbohydrate + fat;

        if total <= 0.0 {
            return Self::default();
        }

        Self {
            protein_percent: protein / total * 100.0,
            carbohydrate_percent: carbohydrate / total * 100.0,
            fat_percent: fat / total * 100.0,
        }
    }
}

/// Complete nutritional analysis of one schedule. The five endpoint shapes
/// are all projections of this one result, so their figures always agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionReport {
    pub schedule_id: String,
    pub menu_cycle_name: String,
    pub period: AnalysisPeriod,
    pub location_count: usize,
    pub total_days: usize,
    pub daily: Vec<DayAnalysis>,
    pub average_nutrients: DayNutrients,
    pub average_food_groups: Vec<FoodGroupPortion>,
    pub food_group_diversity: usize,
    pub macronutrient_distribution: MacronutrientDistribution,
    pub adequacy_score: f64,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodGroupAnalysis {
    pub schedule_id: String,
    pub menu_cycle_name: String,
    pub period: AnalysisPeriod,
    pub average_food_groups: Vec<FoodGroupPortion>,
    pub food_group_diversity: usize,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientAnalysis {
    pub schedule_id: String,
    pub menu_cycle_name: String,
    pub period: AnalysisPeriod,
    pub average_nutrients: DayNutrients,
    pub macronutrient_distribution: MacronutrientDistribution,
    pub adequacy_score: f64,
    pub recommendations: Vec<Recommendation>,
}

/// Compliance of the averaged intake against one age group's requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub schedule_id: String,
    pub requirements: AgeGroupRequirement,
    pub actual_intake: DayNutrients,
    pub calorie_compliance: f64,
    pub protein_compliance: f64,
    pub calcium_compliance: f64,
    pub iron_compliance: f64,
    pub vitamin_c_compliance: f64,
    pub vitamin_a_compliance: f64,
    pub overall_compliance: f64,
    pub compliance_status: ComplianceStatus,
    pub improvement_areas: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

/// Quick-overview projection for dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionSummary {
    pub schedule_id: String,
    pub menu_cycle_name: String,
    pub period: AnalysisPeriod,
    pub calories_per_day: f64,
    pub protein_per_day: f64,
    /// Percentage of all average portions contributed by each food group.
    pub food_group_distribution: BTreeMap<FoodGroup, f64>,
    pub balance_score: f64,
}

impl NutritionReport {
    fn recommendations_in(&self, category: RuleCategory) -> Vec<Recommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect()
    }

    pub fn food_group_analysis(&self) -> FoodGroupAnalysis {
        FoodGroupAnalysis {
            schedule_id: self.schedule_id.clone(),
            menu_cycle_name: self.menu_cycle_name.clone(),
            period: self.period,
            average_food_groups: self.average_food_groups.clone(),
            food_group_diversity: self.food_group_diversity,
            recommendations: self.recommendations_in(RuleCategory::FoodGroups),
        }
    }

    pub fn nutrient_analysis(&self) -> NutrientAnalysis {
        NutrientAnalysis {
            schedule_id: self.schedule_id.clone(),
            menu_cycle_name: self.menu_cycle_name.clone(),
            period: self.period,
            average_nutrients: self.average_nutrients,
            macronutrient_distribution: self.macronutrient_distribution,
            adequacy_score: self.adequacy_score,
            recommendations: self.recommendations_in(RuleCategory::Nutrients),
        }
    }

    /// Compare the averaged intake against one age group's daily targets.
    /// Improvement areas keep a fixed priority ordering.
    pub fn requirement_comparison(
        &self,
        requirements: AgeGroupRequirement,
        policy: &CompliancePolicy,
    ) -> ComplianceReport {
        let actual = self.average_nutrients;
        let per_nutrient = [
            (
                "Energy/Calories",
                policy.compliance_percent(actual.calories, requirements.daily_calories),
            ),
            (
                "Protein",
                policy.compliance_percent(actual.protein, requirements.daily_protein),
            ),
            (
                "Calcium",
                policy.compliance_percent(actual.calcium, requirements.daily_calcium),
            ),
            (
                "Iron",
                policy.compliance_percent(actual.iron, requirements.daily_iron),
            ),
            (
                "Vitamin C",
                policy.compliance_percent(actual.vitamin_c, requirements.daily_vitamin_c),
            ),
            (
                "Vitamin A",
                policy.compliance_percent(actual.vitamin_a, requirements.daily_vitamin_a),
            ),
        ];

        let overall_compliance =
            per_nutrient.iter().map(|(_, pct)| pct).sum::<f64>() / per_nutrient.len() as f64;
        let improvement_areas = per_nutrient
            .iter()
            .filter(|(_, pct)| *pct < policy.improvement_threshold)
            .map(|(name, _)| name.to_string())
            .collect();

        ComplianceReport {
            schedule_id: self.schedule_id.clone(),
            requirements,
            actual_intake: actual,
            calorie_compliance: per_nutrient[0].1,
            protein_compliance: per_nutrient[1].1,
            calcium_compliance: per_nutrient[2].1,
            iron_compliance: per_nutrient[3].1,
            vitamin_c_compliance: per_nutrient[4].1,
            vitamin_a_compliance: per_nutrient[5].1,
            overall_compliance,
            compliance_status: policy.classify(overall_compliance),
            improvement_areas,
            recommendations: self.recommendations.clone(),
        }
    }

    pub fn summary(&self) -> NutritionSummary {
        let total_portions: f64 = self.average_food_groups.iter().map(|fg| fg.portions).sum();
        let food_group_distribution = self
            .average_food_groups
            .iter()
            .filter(|_| total_portions > 0.0)
            .map(|fg| (fg.food_group, fg.portions / total_portions * 100.0))
            .collect();

        NutritionSummary {
            schedule_id: self.schedule_id.clone(),
            menu_cycle_name: self.menu_cycle_name.clone(),
            period: self.period,
            calories_per_day: self.average_nutrients.calories,
            protein_per_day: self.average_nutrients.protein,
            food_group_distribution,
            balance_score: self.adequacy_score,
        }
    }
}
