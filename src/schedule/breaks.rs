//! Break inference between consecutive slots.

use schoolday_models::{ClockTime, SchoolDay};
use tracing::debug;

use super::merge::MergedSlot;

/// Fill every gap between consecutive slots of a day with a "Nghỉ giữa giờ" break.
///
/// Days keep the order in which they first appear; within a day the result is
/// sorted by start time. A gap already covered by a slot with exactly that
/// interval gets no new break, so running this on its own output changes
/// nothing.
pub fn insert_breaks(slots: &[MergedSlot]) -> Vec<MergedSlot> {
    let mut days: Vec<SchoolDay> = Vec::new();
    for slot in slots {
        if !days.contains(&slot.day) {
            days.push(slot.day);
        }
    }

    let mut result = Vec::with_capacity(slots.len());
    for day in days {
        let mut day_slots: Vec<MergedSlot> =
            slots.iter().filter(|s| s.day == day).cloned().collect();
        day_slots.sort_by_key(|s| (s.start_time, s.end_time));

        let mut breaks = Vec::new();
        let mut covered_until: Option<ClockTime> = None;
        for slot in &day_slots {
            if let Some(gap_start) = covered_until
                && gap_start < slot.start_time
                && !occupied(&day_slots, gap_start, slot.start_time)
            {
                breaks.push(MergedSlot::break_between(day, gap_start, slot.start_time));
            }
            covered_until = Some(covered_until.map_or(slot.end_time, |c| c.max(slot.end_time)));
        }

        if !breaks.is_empty() {
            debug!(%day, count = breaks.len(), "inferred breaks");
        }
        day_slots.extend(breaks);
        day_slots.sort_by_key(|s| (s.start_time, s.end_time));
        result.extend(day_slots);
    }
    result
}

fn occupied(slots: &[MergedSlot], start: ClockTime, end: ClockTime) -> bool {
    slots.iter().any(|s| s.start_time == start && s.end_time == end)
}
