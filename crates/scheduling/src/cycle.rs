use chrono::NaiveDate;
use menu::{DailyMenu, MenuCycle};

use crate::error::ScheduleError;

/// Maps calendar dates onto the repeating day sequence of a menu cycle.
pub struct CycleResolver;

impl CycleResolver {
    /// 1-based cycle day for `target`, anchored at `anchor` (the owning
    /// schedule's start date). The template repeats with period
    /// `duration_days` starting at the anchor.
    pub fn cycle_day_for(
        anchor: NaiveDate,
        target: NaiveDate,
        duration_days: u32,
    ) -> Result<u32, ScheduleError> {
        if duration_days == 0 {
            return Err(ScheduleError::Validation(
                "menu cycle duration must be at least one day".to_string(),
            ));
        }
        if target < anchor {
            return Err(ScheduleError::Validation(format!(
                "date {target} precedes the schedule start {anchor}"
            )));
        }

        let days_since_start = (target - anchor).num_days();
        Ok((days_since_start % i64::from(duration_days)) as u32 + 1)
    }

    /// The daily menu active on `target`. Fails with `InvalidCycle` when the
    /// computed day index has no template entry; the catalog invariant makes
    /// that unreachable, but a corrupted cycle must not panic the engine.
    pub fn resolve_day<'a>(
        cycle: &'a MenuCycle,
        anchor: NaiveDate,
        target: NaiveDate,
    ) -> Result<&'a DailyMenu, ScheduleError> {
        let day = Self::cycle_day_for(anchor, target, cycle.duration_days)?;
        cycle.daily_menu(day).ok_or_else(|| ScheduleError::InvalidCycle {
            cycle_id: cycle.id.clone(),
            day,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cycle_of(duration_days: u32) -> MenuCycle {
        MenuCycle {
            id: "c1".to_string(),
            name: "Test cycle".to_string(),
            description: None,
            duration_days,
            daily_menus: (1..=duration_days)
                .map(|day| DailyMenu {
                    day,
                    breakfast: vec![format!("dish-{day}")],
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn cycle_days_repeat_with_the_template_period() {
        let anchor = date(2025, 7, 7);
        let days: Vec<u32> = (0..9)
            .map(|offset| {
                let target = anchor.checked_add_days(Days::new(offset)).unwrap();
                CycleResolver::cycle_day_for(anchor, target, 3).unwrap()
            })
            .collect();

        assert_eq!(days, vec![1, 2, 3, 1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn whole_periods_land_on_the_anchor_menu() {
        let cycle = cycle_of(5);
        let anchor = date(2025, 3, 1);
        let anchored = CycleResolver::resolve_day(&cycle, anchor, anchor).unwrap();

        for k in 1..=4u64 {
            let target = anchor.checked_add_days(Days::new(k * 5)).unwrap();
            let resolved = CycleResolver::resolve_day(&cycle, anchor, target).unwrap();
            assert_eq!(resolved, anchored, "period {k}");
        }
    }

    #[test]
    fn rejects_dates_before_the_anchor() {
        let result = CycleResolver::cycle_day_for(date(2025, 7, 7), date(2025, 7, 6), 3);
        assert!(matches!(result, Err(ScheduleError::Validation(_))));
    }

    #[test]
    fn rejects_zero_length_cycles() {
        let result = CycleResolver::cycle_day_for(date(2025, 7, 7), date(2025, 7, 8), 0);
        assert!(matches!(result, Err(ScheduleError::Validation(_))));
    }

    #[test]
    fn missing_template_day_is_surfaced_as_corruption() {
        let mut cycle = cycle_of(3);
        cycle.daily_menus.retain(|dm| dm.day != 2);

        let result = CycleResolver::resolve_day(&cycle, date(2025, 7, 7), date(2025, 7, 8));
        assert!(matches!(
            result,
            Err(ScheduleError::InvalidCycle { day: 2, .. })
        ));
    }
}
