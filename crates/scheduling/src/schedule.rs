use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ScheduleError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Campus,
    Town,
}

/// One physical location a schedule applies to, with a denormalized display
/// name so views never need a location lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageEntry {
    pub location_id: String,
    pub location_type: LocationType,
    pub location_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cancellation {
    pub reason: Option<String>,
    pub cancelled_at: DateTime<Utc>,
}

/// Lifecycle of a schedule relative to a reference date.
///
/// Never stored: `future`/`active`/`completed` are recomputed from the date
/// range on every read, so resolution and analysis are always consistent with
/// "now". Only cancellation is recorded, and it is sticky.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Future,
    Active,
    Completed,
    Cancelled,
}

/// A binding of one menu cycle to an inclusive date range and a set of
/// locations.
///
/// Date range and coverage are immutable after construction; a correction is
/// modeled as cancel + recreate so resolution stays deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSchedule {
    pub id: String,
    pub menu_cycle_id: String,
    pub coverage: Vec<CoverageEntry>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cancellation: Option<Cancellation>,
    pub created_at: DateTime<Utc>,
}

impl MenuSchedule {
    pub fn new(
        id: impl Into<String>,
        menu_cycle_id: impl Into<String>,
        coverage: Vec<CoverageEntry>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ScheduleError> {
        if end_date < start_date {
            return Err(ScheduleError::Validation(format!(
                "end date {end_date} cannot be before start date {start_date}"
            )));
        }
        if coverage.is_empty() {
            return Err(ScheduleError::Validation(
                "at least one location must be covered".to_string(),
            ));
        }

        Ok(Self {
            id: id.into(),
            menu_cycle_id: menu_cycle_id.into(),
            coverage,
            start_date,
            end_date,
            cancellation: None,
            created_at,
        })
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_some()
    }

    /// Status as of `today`. `today` is always injected; the engine never
    /// reads a wall clock.
    pub fn status_on(&self, today: NaiveDate) -> ScheduleStatus {
        if self.is_cancelled() {
            ScheduleStatus::Cancelled
        } else if today < self.start_date {
            ScheduleStatus::Future
        } else if today > self.end_date {
            ScheduleStatus::Completed
        } else {
            ScheduleStatus::Active
        }
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn covers(&self, location_id: &str, location_type: LocationType) -> bool {
        self.coverage
            .iter()
            .any(|c| c.location_id == location_id && c.location_type == location_type)
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Every calendar date in the schedule, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |d| *d <= self.end_date)
    }

    /// Cancel the schedule. Rejected once the schedule has completed as of
    /// `now`, and when it is already cancelled.
    pub fn cancel(
        &mut self,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), ScheduleError> {
        match self.status_on(now.date_naive()) {
            ScheduleStatus::Cancelled => Err(ScheduleError::Validation(
                "schedule is already cancelled".to_string(),
            )),
            ScheduleStatus::Completed => Err(ScheduleError::Validation(
                "cannot cancel a completed schedule".to_string(),
            )),
            _ => {
                self.cancellation = Some(Cancellation {
                    reason,
                    cancelled_at: now,
                });
                Ok(())
            }
        }
    }

    /// Clear a cancellation; the status reverts to whatever the date range
    /// implies on the next read.
    pub fn uncancel(&mut self) -> Result<(), ScheduleError> {
        if self.cancellation.take().is_none() {
            return Err(ScheduleError::Validation(
                "only cancelled schedules can be uncancelled".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule() -> MenuSchedule {
        MenuSchedule::new(
            "s1",
            "c1",
            vec![CoverageEntry {
                location_id: "loc-1".to_string(),
                location_type: LocationType::Campus,
                location_name: "Central Campus".to_string(),
            }],
            date(2025, 7, 7),
            date(2025, 7, 15),
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_inverted_date_range() {
        let result = MenuSchedule::new(
            "s1",
            "c1",
            schedule().coverage,
            date(2025, 7, 15),
            date(2025, 7, 7),
            Utc::now(),
        );
        assert!(matches!(result, Err(ScheduleError::Validation(_))));
    }

    #[test]
    fn rejects_empty_coverage() {
        let result = MenuSchedule::new(
            "s1",
            "c1",
            Vec::new(),
            date(2025, 7, 7),
            date(2025, 7, 15),
            Utc::now(),
        );
        assert!(matches!(result, Err(ScheduleError::Validation(_))));
    }

    #[test]
    fn status_follows_the_date_range() {
        let s = schedule();
        assert_eq!(s.status_on(date(2025, 7, 6)), ScheduleStatus::Future);
        assert_eq!(s.status_on(date(2025, 7, 7)), ScheduleStatus::Active);
        assert_eq!(s.status_on(date(2025, 7, 15)), ScheduleStatus::Active);
        assert_eq!(s.status_on(date(2025, 7, 16)), ScheduleStatus::Completed);
    }

    #[test]
    fn cancellation_is_sticky_across_all_dates() {
        let mut s = schedule();
        s.cancel(
            Some("strike".to_string()),
            Utc.with_ymd_and_hms(2025, 7, 8, 9, 0, 0).unwrap(),
        )
        .unwrap();

        assert_eq!(s.status_on(date(2025, 7, 6)), ScheduleStatus::Cancelled);
        assert_eq!(s.status_on(date(2025, 7, 10)), ScheduleStatus::Cancelled);
        assert_eq!(s.status_on(date(2025, 8, 1)), ScheduleStatus::Cancelled);
    }

    #[test]
    fn cannot_cancel_twice_or_after_completion() {
        let mut s = schedule();
        let during = Utc.with_ymd_and_hms(2025, 7, 8, 9, 0, 0).unwrap();
        s.cancel(None, during).unwrap();
        assert!(s.cancel(None, during).is_err());

        let mut completed = schedule();
        let after = Utc.with_ymd_and_hms(2025, 7, 20, 9, 0, 0).unwrap();
        assert!(completed.cancel(None, after).is_err());
    }

    #[test]
    fn uncancel_restores_the_computed_status() {
        let mut s = schedule();
        s.cancel(None, Utc.with_ymd_and_hms(2025, 7, 8, 9, 0, 0).unwrap())
            .unwrap();
        s.uncancel().unwrap();

        assert_eq!(s.status_on(date(2025, 7, 10)), ScheduleStatus::Active);
        assert!(s.uncancel().is_err());
    }

    #[test]
    fn dates_iterates_the_inclusive_range() {
        let s = schedule();
        let dates: Vec<NaiveDate> = s.dates().collect();
        assert_eq!(dates.len(), 9);
        assert_eq!(dates[0], date(2025, 7, 7));
        assert_eq!(dates[8], date(2025, 7, 15));
        assert_eq!(s.duration_days(), 9);
    }
}
