pub mod aggregate;
pub mod engine;
pub mod error;
pub mod policy;
pub mod report;
pub mod requirements;
pub mod rules;

pub use aggregate::{DayAnalysis, DayNutrients, DayTotals, FoodGroupPortion, NutrientAggregator};
pub use engine::NutritionalAnalysisEngine;
pub use error::AnalysisError;
pub use policy::{AnalysisPolicy, AdequacyPolicy, CompliancePolicy, ComplianceStatus, RecommendationThresholds};
pub use report::{
    AnalysisPeriod, ComplianceReport, FoodGroupAnalysis, MacronutrientDistribution,
    NutrientAnalysis, NutritionReport, NutritionSummary,
};
pub use requirements::{AgeGroup, AgeGroupRequirement};
pub use rules::{AnalysisFigures, Recommendation, RecommendationRule, RuleCategory};
