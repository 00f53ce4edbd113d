use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Tunable scoring and classification tables.
///
/// These are policy, not derived constants: deployments adjust them through
/// configuration without touching the aggregation code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisPolicy {
    #[serde(default)]
    pub adequacy: AdequacyPolicy,
    #[serde(default)]
    pub compliance: CompliancePolicy,
    #[serde(default)]
    pub recommendation: RecommendationThresholds,
}

/// Weights for the 0-100 adequacy score. Points are only ever added, so more
/// food groups and more non-zero micronutrients never lower the score.
#[derive(Debug, Clone, Deserialize)]
pub struct AdequacyPolicy {
    /// Points granted per expected food group present over the period.
    #[serde(default = "default_food_group_points")]
    pub food_group_points: f64,
    /// Points granted per core micronutrient with a non-zero daily average.
    #[serde(default = "default_micronutrient_points")]
    pub micronutrient_points: f64,
}

impl Default for AdequacyPolicy {
    fn default() -> Self {
        Self {
            food_group_points: default_food_group_points(),
            micronutrient_points: default_micronutrient_points(),
        }
    }
}

fn default_food_group_points() -> f64 {
    10.0
}

fn default_micronutrient_points() -> f64 {
    10.0
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Cap and bucket boundaries for requirement compliance.
#[derive(Debug, Clone, Deserialize)]
pub struct CompliancePolicy {
    /// Per-nutrient compliance is capped at this ratio of the requirement,
    /// so one oversupplied nutrient cannot mask deficiencies elsewhere.
    #[serde(default = "default_cap")]
    pub cap: f64,
    #[serde(default = "default_excellent_min")]
    pub excellent_min: f64,
    #[serde(default = "default_good_min")]
    pub good_min: f64,
    #[serde(default = "default_fair_min")]
    pub fair_min: f64,
    /// Nutrients below this compliance percentage are flagged as
    /// improvement areas.
    #[serde(default = "default_improvement_threshold")]
    pub improvement_threshold: f64,
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self {
            cap: default_cap(),
            excellent_min: default_excellent_min(),
            good_min: default_good_min(),
            fair_min: default_fair_min(),
            improvement_threshold: default_improvement_threshold(),
        }
    }
}

impl CompliancePolicy {
    /// Capped compliance percentage for one nutrient.
    pub fn compliance_percent(&self, actual: f64, required: f64) -> f64 {
        if required <= 0.0 {
            return self.cap * 100.0;
        }
        (actual / required).min(self.cap) * 100.0
    }

    pub fn classify(&self, overall_compliance: f64) -> ComplianceStatus {
        if overall_compliance >= self.excellent_min {
            ComplianceStatus::Excellent
        } else if overall_compliance >= self.good_min {
            ComplianceStatus::Good
        } else if overall_compliance >= self.fair_min {
            ComplianceStatus::Fair
        } else {
            ComplianceStatus::Poor
        }
    }
}

fn default_cap() -> f64 {
    2.0
}

fn default_excellent_min() -> f64 {
    90.0
}

fn default_good_min() -> f64 {
    70.0
}

fn default_fair_min() -> f64 {
    40.0
}

fn default_improvement_threshold() -> f64 {
    70.0
}

/// Trigger thresholds for the recommendation rule table.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationThresholds {
    #[serde(default = "default_min_calories")]
    pub min_calories: f64,
    #[serde(default = "default_min_protein")]
    pub min_protein: f64,
    #[serde(default = "default_min_calcium")]
    pub min_calcium: f64,
    #[serde(default = "default_min_iron")]
    pub min_iron: f64,
    #[serde(default = "default_min_fiber")]
    pub min_fiber: f64,
    #[serde(default = "default_min_diversity")]
    pub min_diversity: usize,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            min_calories: default_min_calories(),
            min_protein: default_min_protein(),
            min_calcium: default_min_calcium(),
            min_iron: default_min_iron(),
            min_fiber: default_min_fiber(),
            min_diversity: default_min_diversity(),
        }
    }
}

fn default_min_calories() -> f64 {
    1500.0
}

fn default_min_protein() -> f64 {
    40.0
}

fn default_min_calcium() -> f64 {
    800.0
}

fn default_min_iron() -> f64 {
    8.0
}

fn default_min_fiber() -> f64 {
    20.0
}

fn default_min_diversity() -> usize {
    4
}
