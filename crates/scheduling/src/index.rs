use chrono::NaiveDate;

use crate::schedule::{LocationType, MenuSchedule, ScheduleStatus};

/// Precedence rules over the schedules covering a location.
pub struct ScheduleIndex;

impl ScheduleIndex {
    /// Resolve which schedule is authoritative for a (location, date) pair.
    ///
    /// Eligible schedules cover the location, contain the date, and are not
    /// cancelled. Overlaps are a configuration conflict the CRUD layer should
    /// prevent, but they must be tolerated here: the latest `created_at`
    /// wins, with descending id as the secondary key so repeated queries
    /// always agree.
    pub fn find_authoritative<'a>(
        schedules: &'a [MenuSchedule],
        location_id: &str,
        location_type: LocationType,
        date: NaiveDate,
    ) -> Option<&'a MenuSchedule> {
        schedules
            .iter()
            .filter(|s| {
                !s.is_cancelled() && s.contains_date(date) && s.covers(location_id, location_type)
            })
            .max_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            })
    }

    /// Schedules that would conflict with a proposed assignment: active or
    /// future as of `today`, overlapping the `[start, end]` range, and
    /// sharing at least one covered location. `exclude_id` lets an update
    /// check skip the schedule being edited.
    pub fn find_conflicts<'a>(
        schedules: &'a [MenuSchedule],
        location_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<&str>,
        today: NaiveDate,
    ) -> Vec<&'a MenuSchedule> {
        schedules
            .iter()
            .filter(|s| exclude_id != Some(s.id.as_str()))
            .filter(|s| {
                matches!(
                    s.status_on(today),
                    ScheduleStatus::Active | ScheduleStatus::Future
                )
            })
            .filter(|s| s.start_date <= end && s.end_date >= start)
            .filter(|s| {
                s.coverage
                    .iter()
                    .any(|c| location_ids.contains(&c.location_id))
            })
            .collect()
    }
}
