//! Grade-band special lessons.
//!
//! Primary grades have fixed non-teaching activities (breakfast, nap, snack)
//! that the backend does not model as periods. They are slotted into a day
//! only where the period catalog leaves room.

use schoolday_models::{ClockTime, SchoolDay};
use serde::Serialize;
use tracing::debug;

use super::merge::{MergedSlot, SlotContent};

/// Which school days a special lesson runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DaySelector {
    All,
    Day(SchoolDay),
}

impl DaySelector {
    pub fn includes(&self, day: SchoolDay) -> bool {
        match self {
            Self::All => true,
            Self::Day(d) => *d == day,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialLesson {
    pub name: String,
    pub day: DaySelector,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SpecialLesson {
    pub fn new(name: impl Into<String>, day: DaySelector, start: ClockTime, end: ClockTime) -> Self {
        Self {
            name: name.into(),
            day,
            start_time: start,
            end_time: end,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

const PRIMARY_DAILY: [(&str, ClockTime, ClockTime); 6] = [
    ("Ăn sáng", ClockTime::at(7, 30), ClockTime::at(7, 55)),
    ("Ra chơi", ClockTime::at(9, 41), ClockTime::at(9, 59)),
    ("Ăn trưa", ClockTime::at(11, 1), ClockTime::at(11, 40)),
    ("Ngủ trưa", ClockTime::at(11, 41), ClockTime::at(12, 40)),
    ("Ăn nhẹ", ClockTime::at(14, 0), ClockTime::at(14, 20)),
    ("Sinh hoạt lớp", ClockTime::at(16, 0), ClockTime::at(16, 15)),
];

/// Built-in special lessons for a grade.
///
/// Only grades 1 to 5 have any; secondary grades and unknown grades get none.
pub fn special_lessons_for_grade(grade: u8) -> Vec<SpecialLesson> {
    match grade {
        1..=5 => PRIMARY_DAILY
            .iter()
            .map(|&(name, start, end)| SpecialLesson::new(name, DaySelector::All, start, end))
            .collect(),
        _ => Vec::new(),
    }
}

/// Replicate every `All` lesson onto each school day.
pub fn expand(lessons: &[SpecialLesson]) -> Vec<SpecialLesson> {
    lessons
        .iter()
        .flat_map(|lesson| {
            SchoolDay::ALL
                .into_iter()
                .filter(|day| lesson.day.includes(*day))
                .map(|day| SpecialLesson {
                    day: DaySelector::Day(day),
                    ..lesson.clone()
                })
        })
        .collect()
}

/// Add the day's special lessons to `day_slots`.
///
/// A special lesson is dropped when it intersects any period slot already
/// present. The result is sorted by start time.
pub fn merge_special_lessons(
    mut day_slots: Vec<MergedSlot>,
    specials: &[SpecialLesson],
    day: SchoolDay,
) -> Vec<MergedSlot> {
    let additions: Vec<MergedSlot> = specials
        .iter()
        .filter(|lesson| lesson.day.includes(day))
        .filter(|lesson| {
            let clashes = day_slots
                .iter()
                .filter(|slot| slot.is_period())
                .any(|slot| slot.intersects(lesson.start_time, lesson.end_time));
            if clashes {
                debug!(name = %lesson.name, %day, "special lesson overlaps a period, skipped");
            }
            !clashes
        })
        .map(|lesson| MergedSlot {
            day,
            start_time: lesson.start_time,
            end_time: lesson.end_time,
            content: SlotContent::Special {
                lesson: lesson.clone(),
            },
        })
        .collect();

    day_slots.extend(additions);
    day_slots.sort_by_key(|slot| slot.start_time);
    day_slots
}
