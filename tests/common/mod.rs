use chrono::{NaiveDate, NaiveDateTime};
use schoolday_models::{
    ClockTime, PeriodDefinition, PeriodType, SchoolDay, Subject, Teacher, TimetableEntry,
};

#[allow(dead_code)]
pub fn t(value: &str) -> ClockTime {
    value.parse().unwrap()
}

pub fn regular(number: u32, start: &str, end: &str) -> PeriodDefinition {
    PeriodDefinition::new(number, t(start), t(end), PeriodType::Regular)
}

#[allow(dead_code)]
pub fn special(number: u32, start: &str, end: &str, period_type: PeriodType) -> PeriodDefinition {
    PeriodDefinition::new(number, t(start), t(end), period_type)
}

#[allow(dead_code)]
pub fn lesson(day: SchoolDay, start: &str, end: &str, subject: &str, teacher: &str) -> TimetableEntry {
    TimetableEntry::new(day, t(start), t(end), Subject::named(subject)).with_teacher(Teacher::named(teacher))
}

/// 2025-05-05 is a Monday; `day_offset` 5 and 6 land on the weekend.
#[allow(dead_code)]
pub fn week_instant(day_offset: u32, time: &str) -> NaiveDateTime {
    let clock = t(time);
    NaiveDate::from_ymd_opt(2025, 5, 5 + day_offset)
        .unwrap()
        .and_hms_opt(u32::from(clock.hour()), u32::from(clock.minute()), 0)
        .unwrap()
}

/// A realistic school-year period table, shuffled, with duplicate specials.
#[allow(dead_code)]
pub fn messy_definitions() -> Vec<PeriodDefinition> {
    vec![
        regular(9, "13:30", "14:00"),
        special(20, "11:05", "11:40", PeriodType::Lunch),
        regular(1, "08:00", "08:30"),
        regular(3, "09:10", "09:40"),
        special(20, "11:05", "11:40", PeriodType::Lunch).with_label("Ăn trưa bán trú"),
        regular(8, "12:55", "13:25"),
        special(21, "11:45", "12:45", PeriodType::Nap),
        regular(2, "08:35", "09:05"),
        special(22, "09:40", "10:00", PeriodType::Break),
        regular(4, "10:00", "10:30"),
        regular(5, "10:35", "11:05"),
        special(21, "11:50", "12:45", PeriodType::Nap),
    ]
}
