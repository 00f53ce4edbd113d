use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ScheduleError;
use crate::schedule::{LocationType, MenuSchedule};

/// Optional narrowing of a schedule listing. All criteria are ANDed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleFilter {
    pub location_id: Option<String>,
    pub location_type: Option<LocationType>,
    /// Inclusive range the schedule's own range must overlap.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl ScheduleFilter {
    /// Schedules covering one location on one date.
    pub fn for_location_on(
        location_id: impl Into<String>,
        location_type: LocationType,
        date: NaiveDate,
    ) -> Self {
        Self {
            location_id: Some(location_id.into()),
            location_type: Some(location_type),
            date_range: Some((date, date)),
        }
    }

    pub fn matches(&self, schedule: &MenuSchedule) -> bool {
        if let Some(id) = &self.location_id {
            let wanted_type = self.location_type;
            let covered = schedule.coverage.iter().any(|c| {
                c.location_id == *id && wanted_type.is_none_or(|t| c.location_type == t)
            });
            if !covered {
                return false;
            }
        }
        if let Some((from, to)) = self.date_range {
            if schedule.end_date < from || schedule.start_date > to {
                return false;
            }
        }
        true
    }
}

/// Read access to the schedule store owned by the surrounding CRUD system.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn get_schedule(&self, id: &str) -> Result<MenuSchedule, ScheduleError>;

    async fn list_schedules(
        &self,
        filter: &ScheduleFilter,
    ) -> Result<Vec<MenuSchedule>, ScheduleError>;
}
