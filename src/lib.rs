pub mod config;
pub mod observability;

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;

pub use menu::{
    CatalogError, CatalogStore, DailyMenu, Dish, FoodGroup, MealType, MenuCycle, NutritionFacts,
};
pub use nutrition::{
    AgeGroup, AgeGroupRequirement, AnalysisError, AnalysisPolicy, ComplianceReport,
    ComplianceStatus, DayNutrients, FoodGroupAnalysis, NutrientAnalysis, NutritionReport,
    NutritionSummary, NutritionalAnalysisEngine,
};
pub use scheduling::{
    Cancellation, CitizenMenuView, CoverageEntry, CycleResolver, EffectiveMenuService,
    LocationType, MenuSchedule, ScheduleDetailView, ScheduleError, ScheduleIndex, ScheduleStatus,
    ScheduleStore,
};

pub use crate::config::Config;

/// The whole engine behind one value: schedule resolution plus nutritional
/// analysis, ready for an HTTP layer to wrap as endpoints.
///
/// Stateless and read-only; concurrent calls need no locking. "Now" is an
/// explicit parameter wherever a status depends on it.
pub struct Engine {
    menus: EffectiveMenuService,
    analysis: NutritionalAnalysisEngine,
}

impl Engine {
    pub fn new(catalog: Arc<dyn CatalogStore>, schedules: Arc<dyn ScheduleStore>) -> Self {
        Self::with_policy(catalog, schedules, AnalysisPolicy::default())
    }

    pub fn with_policy(
        catalog: Arc<dyn CatalogStore>,
        schedules: Arc<dyn ScheduleStore>,
        policy: AnalysisPolicy,
    ) -> Self {
        Self {
            menus: EffectiveMenuService::new(catalog.clone(), schedules.clone()),
            analysis: NutritionalAnalysisEngine::with_policy(catalog, schedules, policy),
        }
    }

    /// The menu in effect for a citizen at one location on one date. A
    /// missing menu is a normal empty answer, never an error. The location
    /// type arrives as its wire name ("campus" or "town"); anything else is
    /// a validation error.
    pub async fn citizen_menu(
        &self,
        location_id: &str,
        location_type: &str,
        date: NaiveDate,
    ) -> Result<CitizenMenuView, ScheduleError> {
        let location_type = LocationType::from_str(location_type).map_err(|_| {
            ScheduleError::Validation(format!("unknown location type: {location_type}"))
        })?;
        self.menus.citizen_menu(location_id, location_type, date).await
    }

    /// Full daily calendar of one schedule with dish details, status as of
    /// `today`.
    pub async fn detailed_schedule_view(
        &self,
        schedule_id: &str,
        today: NaiveDate,
    ) -> Result<ScheduleDetailView, ScheduleError> {
        self.menus.detailed_schedule_view(schedule_id, today).await
    }

    pub async fn nutritional_report(
        &self,
        schedule_id: &str,
    ) -> Result<NutritionReport, AnalysisError> {
        self.analysis.nutritional_report(schedule_id).await
    }

    pub async fn food_group_analysis(
        &self,
        schedule_id: &str,
    ) -> Result<FoodGroupAnalysis, AnalysisError> {
        self.analysis.food_group_analysis(schedule_id).await
    }

    pub async fn nutrient_analysis(
        &self,
        schedule_id: &str,
    ) -> Result<NutrientAnalysis, AnalysisError> {
        self.analysis.nutrient_analysis(schedule_id).await
    }

    /// Compliance of the schedule's average intake against one age group's
    /// daily targets. The age group arrives as its wire name; unknown values
    /// are a validation error, not a fallback.
    pub async fn requirement_comparison(
        &self,
        schedule_id: &str,
        age_group: &str,
    ) -> Result<ComplianceReport, AnalysisError> {
        let group = AgeGroup::from_str(age_group)
            .map_err(|_| AnalysisError::UnknownAgeGroup(age_group.to_string()))?;
        self.analysis.requirement_comparison(schedule_id, group).await
    }

    pub async fn nutritional_summary(
        &self,
        schedule_id: &str,
    ) -> Result<NutritionSummary, AnalysisError> {
        self.analysis.nutritional_summary(schedule_id).await
    }
}
