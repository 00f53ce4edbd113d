use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use menu::{CatalogStore, Dish, FoodGroup};
use scheduling::{CalendarEntry, EffectiveMenuService, ScheduleStore};

use crate::aggregate::{DayAnalysis, DayNutrients, FoodGroupPortion, NutrientAggregator};
use crate::error::AnalysisError;
use crate::policy::AnalysisPolicy;
use crate::report::{
    AnalysisPeriod, ComplianceReport, FoodGroupAnalysis, MacronutrientDistribution,
    NutrientAnalysis, NutritionReport, NutritionSummary,
};
use crate::requirements::AgeGroup;
use crate::rules::{self, AnalysisFigures, RecommendationRule};

/// Drives the day aggregator across a schedule's full date range and derives
/// averages, diversity, adequacy, compliance, and recommendations.
///
/// Stateless and side-effect-free: every report is recomputed from the
/// current schedule, cycle, and dish snapshot.
pub struct NutritionalAnalysisEngine {
    catalog: Arc<dyn CatalogStore>,
    schedules: Arc<dyn ScheduleStore>,
    policy: AnalysisPolicy,
    rules: Vec<RecommendationRule>,
}

impl NutritionalAnalysisEngine {
    pub fn new(catalog: Arc<dyn CatalogStore>, schedules: Arc<dyn ScheduleStore>) -> Self {
        Self::with_policy(catalog, schedules, AnalysisPolicy::default())
    }

    pub fn with_policy(
        catalog: Arc<dyn CatalogStore>,
        schedules: Arc<dyn ScheduleStore>,
        policy: AnalysisPolicy,
    ) -> Self {
        Self {
            catalog,
            schedules,
            policy,
            rules: rules::default_rules(),
        }
    }

    /// The single aggregation pass all five report shapes share.
    ///
    /// Dates are aggregated location-agnostically: every covered location
    /// serves the same cycle day, so one pass per distinct calendar date is
    /// both sufficient and cheaper.
    pub async fn analyze(&self, schedule_id: &str) -> Result<NutritionReport, AnalysisError> {
        let schedule = self.schedules.get_schedule(schedule_id).await?;
        let cycle = self.catalog.get_menu_cycle(&schedule.menu_cycle_id).await?;
        let calendar = EffectiveMenuService::materialize_calendar(&schedule, &cycle)?;

        // One batched dish read for the whole period.
        let dish_ids = collect_unique(&calendar);
        let dishes = self.catalog.get_dishes(&dish_ids).await?;

        let mut per_date: BTreeMap<NaiveDate, &CalendarEntry> = BTreeMap::new();
        for entry in &calendar {
            per_date.entry(entry.date).or_insert(entry);
        }

        let mut daily = Vec::with_capacity(per_date.len());
        for (date, entry) in per_date {
            let day_dishes: Vec<&Dish> = entry
                .breakfast
                .iter()
                .chain(entry.lunch.iter())
                .chain(entry.snack.iter())
                .filter_map(|id| dishes.get(id))
                .collect();
            let totals = NutrientAggregator::aggregate_day(day_dishes.into_iter());

            daily.push(DayAnalysis {
                date,
                cycle_day: entry.cycle_day,
                nutrients: totals.nutrients,
                food_groups: totals.food_groups,
                total_dishes: totals.total_dishes,
            });
        }

        // A schedule's range always holds at least one day.
        let day_count = daily.len();
        let mut nutrient_totals = DayNutrients::default();
        for day in &daily {
            nutrient_totals.accumulate(&day.nutrients);
        }
        let average_nutrients = nutrient_totals.divided_by(day_count as f64);
        let average_food_groups = average_food_groups(&daily, day_count as f64);
        let food_group_diversity = average_food_groups.len();

        let figures = AnalysisFigures {
            average_nutrients: &average_nutrients,
            average_food_groups: &average_food_groups,
            food_group_diversity,
        };
        let recommendations = rules::evaluate(&self.rules, &figures, &self.policy.recommendation);
        let adequacy_score = self.adequacy_score(&average_nutrients, &average_food_groups);

        tracing::debug!(
            schedule_id,
            days = day_count,
            locations = schedule.coverage.len(),
            adequacy = adequacy_score,
            "analyzed menu schedule"
        );

        Ok(NutritionReport {
            schedule_id: schedule_id.to_string(),
            menu_cycle_name: cycle.name.clone(),
            period: AnalysisPeriod {
                start_date: schedule.start_date,
                end_date: schedule.end_date,
            },
            location_count: schedule.coverage.len(),
            total_days: day_count,
            daily,
            macronutrient_distribution: MacronutrientDistribution::from_average(
                &average_nutrients,
            ),
            average_nutrients,
            average_food_groups,
            food_group_diversity,
            adequacy_score,
            recommendations,
        })
    }

    /// Weighted composite in [0, 100]: expected food groups covered on one
    /// side, core micronutrients with non-zero averages on the other.
    fn adequacy_score(
        &self,
        average_nutrients: &DayNutrients,
        average_food_groups: &[FoodGroupPortion],
    ) -> f64 {
        let adequacy = &self.policy.adequacy;

        let groups_present = average_food_groups
            .iter()
            .filter(|fg| fg.food_group.is_expected())
            .map(|fg| fg.food_group)
            .collect::<BTreeSet<FoodGroup>>()
            .len();

        let micronutrients = [
            average_nutrients.fiber,
            average_nutrients.calcium,
            average_nutrients.iron,
            average_nutrients.vitamin_c,
            average_nutrients.vitamin_a,
        ];
        let micronutrients_present = micronutrients.iter().filter(|v| **v > 0.0).count();

        let score = groups_present as f64 * adequacy.food_group_points
            + micronutrients_present as f64 * adequacy.micronutrient_points;
        score.min(100.0)
    }

    pub async fn nutritional_report(
        &self,
        schedule_id: &str,
    ) -> Result<NutritionReport, AnalysisError> {
        self.analyze(schedule_id).await
    }

    pub async fn food_group_analysis(
        &self,
        schedule_id: &str,
    ) -> Result<FoodGroupAnalysis, AnalysisError> {
        Ok(self.analyze(schedule_id).await?.food_group_analysis())
    }

    pub async fn nutrient_analysis(
        &self,
        schedule_id: &str,
    ) -> Result<NutrientAnalysis, AnalysisError> {
        Ok(self.analyze(schedule_id).await?.nutrient_analysis())
    }

    pub async fn requirement_comparison(
        &self,
        schedule_id: &str,
        age_group: AgeGroup,
    ) -> Result<ComplianceReport, AnalysisError> {
        Ok(self
            .analyze(schedule_id)
            .await?
            .requirement_comparison(age_group.requirement(), &self.policy.compliance))
    }

    pub async fn nutritional_summary(
        &self,
        schedule_id: &str,
    ) -> Result<NutritionSummary, AnalysisError> {
        Ok(self.analyze(schedule_id).await?.summary())
    }
}

fn collect_unique(calendar: &[CalendarEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for entry in calendar {
        for id in entry
            .breakfast
            .iter()
            .chain(entry.lunch.iter())
            .chain(entry.snack.iter())
        {
            if seen.insert(id.as_str()) {
                unique.push(id.clone());
            }
        }
    }
    unique
}

/// Period food groups: portions averaged over the distinct-date count,
/// dish counts and distinct names accumulated over the whole period.
fn average_food_groups(daily: &[DayAnalysis], day_count: f64) -> Vec<FoodGroupPortion> {
    let mut groups: BTreeMap<FoodGroup, (f64, usize, BTreeSet<String>)> = BTreeMap::new();

    for day in daily {
        for fg in &day.food_groups {
            let entry = groups.entry(fg.food_group).or_default();
            entry.0 += fg.portions;
            entry.1 += fg.dish_count;
            entry.2.extend(fg.dish_names.iter().cloned());
        }
    }

    groups
        .into_iter()
        .map(|(food_group, (portions, dish_count, names))| FoodGroupPortion {
            food_group,
            portions: portions / day_count,
            dish_count,
            dish_names: names.into_iter().collect(),
        })
        .collect()
}
