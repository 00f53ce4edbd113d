use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use menu::{CatalogStore, Dish, MealType, MenuCycle};
use serde::{Deserialize, Serialize};

use crate::cycle::CycleResolver;
use crate::error::ScheduleError;
use crate::index::ScheduleIndex;
use crate::schedule::{CoverageEntry, LocationType, MenuSchedule, ScheduleStatus};
use crate::store::{ScheduleFilter, ScheduleStore};

/// Abbreviated nutrition shown next to a dish in citizen-facing views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishNutritionSummary {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub nutrition: DishNutritionSummary,
}

impl From<&Dish> for DishSummary {
    fn from(dish: &Dish) -> Self {
        Self {
            id: dish.id.clone(),
            name: dish.name.clone(),
            description: dish.description.clone(),
            nutrition: DishNutritionSummary {
                calories: dish.nutrition.calories,
                protein: dish.nutrition.protein,
                photo_url: dish.nutrition.photo_url.clone(),
            },
        }
    }
}

/// Answer to "what menu applies here, on this date".
///
/// `is_available = false` is a normal outcome, not a fault: the meal lists
/// are empty and `message` explains why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitizenMenuView {
    pub location_id: String,
    pub location_name: Option<String>,
    pub location_type: LocationType,
    pub menu_date: NaiveDate,
    pub menu_cycle_name: Option<String>,
    pub breakfast: Vec<DishSummary>,
    pub lunch: Vec<DishSummary>,
    pub snack: Vec<DishSummary>,
    pub is_available: bool,
    pub message: Option<String>,
}

impl CitizenMenuView {
    fn unavailable(
        location_id: &str,
        location_type: LocationType,
        menu_date: NaiveDate,
        message: &str,
    ) -> Self {
        Self {
            location_id: location_id.to_string(),
            location_name: None,
            location_type,
            menu_date,
            menu_cycle_name: None,
            breakfast: Vec::new(),
            lunch: Vec::new(),
            snack: Vec::new(),
            is_available: false,
            message: Some(message.to_string()),
        }
    }
}

/// One (location, date) cell of a schedule's materialized calendar. Carries
/// dish ids only; views resolve them through one batched catalog read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub location: CoverageEntry,
    pub date: NaiveDate,
    pub cycle_day: u32,
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub snack: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMenuView {
    pub location: CoverageEntry,
    pub date: NaiveDate,
    pub cycle_day: u32,
    pub breakfast: Vec<DishSummary>,
    pub lunch: Vec<DishSummary>,
    pub snack: Vec<DishSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDetailView {
    pub id: String,
    pub menu_cycle_id: String,
    pub menu_cycle_name: String,
    pub coverage: Vec<CoverageEntry>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ScheduleStatus,
    pub daily_menus: Vec<DailyMenuView>,
}

const NO_SCHEDULE_MESSAGE: &str = "No menu schedule found for this location and date. \
     Please check if the date is within an active menu period.";

/// Composes the schedule index and the cycle resolver to answer citizen
/// queries and to materialize full schedule calendars.
pub struct EffectiveMenuService {
    catalog: Arc<dyn CatalogStore>,
    schedules: Arc<dyn ScheduleStore>,
}

impl EffectiveMenuService {
    pub fn new(catalog: Arc<dyn CatalogStore>, schedules: Arc<dyn ScheduleStore>) -> Self {
        Self { catalog, schedules }
    }

    /// The menu in effect for a citizen at one location on one date.
    pub async fn citizen_menu(
        &self,
        location_id: &str,
        location_type: LocationType,
        date: NaiveDate,
    ) -> Result<CitizenMenuView, ScheduleError> {
        let filter = ScheduleFilter::for_location_on(location_id, location_type, date);
        let candidates = self.schedules.list_schedules(&filter).await?;

        let Some(schedule) =
            ScheduleIndex::find_authoritative(&candidates, location_id, location_type, date)
        else {
            tracing::debug!(
                location_id,
                location_type = %location_type,
                date = %date,
                "no schedule covers the requested location and date"
            );
            return Ok(CitizenMenuView::unavailable(
                location_id,
                location_type,
                date,
                NO_SCHEDULE_MESSAGE,
            ));
        };

        let location_name = schedule
            .coverage
            .iter()
            .find(|c| c.location_id == location_id && c.location_type == location_type)
            .map(|c| c.location_name.clone());

        let cycle = self.catalog.get_menu_cycle(&schedule.menu_cycle_id).await?;
        let daily_menu = CycleResolver::resolve_day(&cycle, schedule.start_date, date)?;

        let ids = collect_unique(daily_menu.dish_ids());
        let dishes = self.catalog.get_dishes(&ids).await?;

        Ok(CitizenMenuView {
            location_id: location_id.to_string(),
            location_name,
            location_type,
            menu_date: date,
            menu_cycle_name: Some(cycle.name.clone()),
            breakfast: summaries(daily_menu.meal(MealType::Breakfast), &dishes),
            lunch: summaries(daily_menu.meal(MealType::Lunch), &dishes),
            snack: summaries(daily_menu.meal(MealType::Snack), &dishes),
            is_available: true,
            message: None,
        })
    }

    /// One entry per (coverage location × calendar date) over the schedule's
    /// inclusive range, location-major then date-ascending, so downstream
    /// reports are reproducible.
    pub fn materialize_calendar(
        schedule: &MenuSchedule,
        cycle: &MenuCycle,
    ) -> Result<Vec<CalendarEntry>, ScheduleError> {
        let mut entries =
            Vec::with_capacity(schedule.coverage.len() * schedule.duration_days() as usize);

        for location in &schedule.coverage {
            for date in schedule.dates() {
                let daily_menu = CycleResolver::resolve_day(cycle, schedule.start_date, date)?;
                entries.push(CalendarEntry {
                    location: location.clone(),
                    date,
                    cycle_day: daily_menu.day,
                    breakfast: daily_menu.breakfast.clone(),
                    lunch: daily_menu.lunch.clone(),
                    snack: daily_menu.snack.clone(),
                });
            }
        }

        Ok(entries)
    }

    /// Full calendar of a schedule with dish details resolved, plus metadata
    /// and the status computed as of `today`. Accepts schedules in any
    /// non-cancelled state and cancelled ones alike: history and future
    /// planning are inspectable here, unlike the citizen path.
    pub async fn detailed_schedule_view(
        &self,
        schedule_id: &str,
        today: NaiveDate,
    ) -> Result<ScheduleDetailView, ScheduleError> {
        let schedule = self.schedules.get_schedule(schedule_id).await?;
        let cycle = self.catalog.get_menu_cycle(&schedule.menu_cycle_id).await?;
        let calendar = Self::materialize_calendar(&schedule, &cycle)?;

        // One batched dish read for the whole calendar.
        let ids = collect_unique(calendar.iter().flat_map(|e| {
            e.breakfast.iter().chain(e.lunch.iter()).chain(e.snack.iter())
        }));
        let dishes = self.catalog.get_dishes(&ids).await?;

        let daily_menus = calendar
            .into_iter()
            .map(|entry| DailyMenuView {
                breakfast: summaries(&entry.breakfast, &dishes),
                lunch: summaries(&entry.lunch, &dishes),
                snack: summaries(&entry.snack, &dishes),
                location: entry.location,
                date: entry.date,
                cycle_day: entry.cycle_day,
            })
            .collect();

        Ok(ScheduleDetailView {
            id: schedule.id.clone(),
            menu_cycle_id: schedule.menu_cycle_id.clone(),
            menu_cycle_name: cycle.name.clone(),
            coverage: schedule.coverage.clone(),
            start_date: schedule.start_date,
            end_date: schedule.end_date,
            status: schedule.status_on(today),
            daily_menus,
        })
    }
}

fn collect_unique<'a, I: IntoIterator<Item = &'a String>>(ids: I) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for id in ids {
        if seen.insert(id.as_str()) {
            unique.push(id.clone());
        }
    }
    unique
}

fn summaries(ids: &[String], dishes: &HashMap<String, Dish>) -> Vec<DishSummary> {
    ids.iter()
        .filter_map(|id| dishes.get(id))
        .map(DishSummary::from)
        .collect()
}
