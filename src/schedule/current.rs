//! Current lesson resolution.

use chrono::{Local, NaiveDateTime};
use schoolday_models::{ClockTime, SchoolDay};

use super::merge::MergedSlot;

/// The slot of today whose `[start, end)` contains `now`, compared to the minute.
///
/// Weekends always yield `None`. If slots overlap the first one in list order
/// wins.
pub fn current_lesson(slots: &[MergedSlot], now: NaiveDateTime) -> Option<&MergedSlot> {
    let today = SchoolDay::of_date(&now)?;
    let at = ClockTime::from_time(&now);
    slots.iter().find(|slot| slot.day == today && slot.contains(at))
}

/// [`current_lesson`] at the local wall-clock time.
pub fn current_lesson_now(slots: &[MergedSlot]) -> Option<&MergedSlot> {
    current_lesson(slots, Local::now().naive_local())
}
