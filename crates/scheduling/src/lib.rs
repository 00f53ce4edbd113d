pub mod cycle;
pub mod error;
pub mod index;
pub mod schedule;
pub mod service;
pub mod store;

pub use cycle::CycleResolver;
pub use error::ScheduleError;
pub use index::ScheduleIndex;
pub use schedule::{Cancellation, CoverageEntry, LocationType, MenuSchedule, ScheduleStatus};
pub use service::{
    CalendarEntry, CitizenMenuView, DailyMenuView, DishNutritionSummary, DishSummary,
    EffectiveMenuService, ScheduleDetailView,
};
pub use store::{ScheduleFilter, ScheduleStore};
