//! Weekly schedule assembly.
//!
//! Pipeline: normalize the period catalog, merge each weekday's lessons into
//! it, slot grade-band special lessons into free time, then optionally fill
//! the remaining gaps with inferred breaks.

pub mod breaks;
pub mod catalog;
pub mod current;
pub mod merge;
pub mod progress;
pub mod special;

pub use breaks::insert_breaks;
pub use catalog::{
    COMPACT_PERIODS, FallbackCatalog, STANDARD_PERIODS, db_period_number, display_period_number,
    find_period, normalize, normalize_with, regular_periods, special_periods,
};
pub use current::{current_lesson, current_lesson_now};
pub use merge::{MatchTier, MergedSlot, SlotContent, merge_day, merge_week};
pub use progress::{DAY_SCHEDULE, DayWindow, RecentDay, day_progress, recent_school_days};
pub use special::{DaySelector, SpecialLesson, expand, merge_special_lessons, special_lessons_for_grade};

use chrono::NaiveDateTime;
use schoolday_config::ScheduleConfig;
use schoolday_models::{PeriodDefinition, ProcessedPeriod, SchoolDay, TimetableEntry};
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSchedule {
    periods: Vec<ProcessedPeriod>,
    slots: Vec<MergedSlot>,
}

impl WeekSchedule {
    #[instrument(skip_all, fields(definitions = defs.len(), entries = entries.len()))]
    pub fn build(
        defs: &[PeriodDefinition],
        entries: &[TimetableEntry],
        specials: &[SpecialLesson],
        config: &ScheduleConfig,
    ) -> Self {
        let periods = normalize_with(defs, config.fallback);

        let mut slots = Vec::new();
        for day in SchoolDay::ALL {
            let merged = merge_day(&periods, entries, day);
            slots.extend(merge_special_lessons(merged, specials, day));
        }
        if config.insert_breaks {
            slots = insert_breaks(&slots);
        }

        info!(
            periods = periods.len(),
            slots = slots.len(),
            lessons = slots.iter().filter(|s| s.is_lesson()).count(),
            "week schedule built"
        );
        Self { periods, slots }
    }

    pub fn periods(&self) -> &[ProcessedPeriod] {
        &self.periods
    }

    pub fn slots(&self) -> &[MergedSlot] {
        &self.slots
    }

    pub fn day(&self, day: SchoolDay) -> impl Iterator<Item = &MergedSlot> {
        self.slots.iter().filter(move |s| s.day == day)
    }

    pub fn current_lesson(&self, now: NaiveDateTime) -> Option<&MergedSlot> {
        current_lesson(&self.slots, now)
    }
}
