use schoolday::schedule::{MergedSlot, SlotContent};
use schoolday_core::labels;
use schoolday_models::{ProcessedPeriod, SchoolDay};

pub fn period_line(period: &ProcessedPeriod) -> String {
    let kind = if period.is_regular {
        String::new()
    } else {
        format!(" [{}]", period.source_type)
    };
    format!("{:<16} {}{}", period.label, period.time_range(), kind)
}

pub fn day_header(day: SchoolDay) -> String {
    format!("== {} ({}) ==", day.vietnamese_label(), day)
}

/// One schedule row. Positional matches are flagged with `?`.
pub fn slot_line(slot: &MergedSlot) -> String {
    let range = slot.time_range();
    match &slot.content {
        SlotContent::Lesson {
            period, matched_by, ..
        } => {
            let teachers = slot.teacher_names();
            let flag = if matched_by.is_low_confidence() { " ?" } else { "" };
            if teachers.is_empty() {
                format!("{range}  {:<10} {}{flag}", period.label, slot.title())
            } else {
                format!("{range}  {:<10} {} ({teachers}){flag}", period.label, slot.title())
            }
        }
        SlotContent::Empty { period } if period.is_regular => {
            format!("{range}  {:<10} -", period.label)
        }
        SlotContent::Empty { period } => format!("{range}  {}", period.label),
        SlotContent::Special { lesson } => format!("{range}  * {}", lesson.name),
        SlotContent::Break { label } => format!("{range}  ({label})"),
    }
}

pub fn current_line(slot: Option<&MergedSlot>) -> String {
    match slot {
        Some(slot) => format!("{}: {} {}", labels::IN_LESSON, slot.title(), slot.time_range()),
        None => labels::NO_LESSON.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolday::schedule::{merge_day, normalize};
    use schoolday_models::{ClockTime, Subject, Teacher, TimetableEntry};

    #[test]
    fn test_slot_lines() {
        let periods = normalize(&[]);
        let entries = vec![
            TimetableEntry::new(
                SchoolDay::Monday,
                ClockTime::at(7, 50),
                ClockTime::at(8, 35),
                Subject::named("Math"),
            )
            .with_teacher(Teacher::named("Ms. Lan")),
        ];
        let slots = merge_day(&periods, &entries, SchoolDay::Monday);
        assert_eq!(slot_line(&slots[1]), "07:50 – 08:35  Tiết 2     Math (Ms. Lan)");
        assert_eq!(slot_line(&slots[0]), "07:00 – 07:45  Tiết 1     -");
        assert_eq!(current_line(Some(&slots[1])), "Đang học: Math 07:50 – 08:35");
        assert_eq!(current_line(None), "Không có tiết học");
    }

    #[test]
    fn test_headers() {
        assert_eq!(day_header(SchoolDay::Wednesday), "== Thứ 4 (Wednesday) ==");
        let periods = normalize(&[]);
        assert_eq!(period_line(&periods[0]), "Tiết 1           07:00 – 07:45");
    }
}
