mod common;

use common::{lesson, messy_definitions, week_instant};
use schoolday::ingest::{parse_period_document, parse_timetable_document};
use schoolday::schedule::{
    MatchTier, SlotContent, WeekSchedule, current_lesson, insert_breaks, merge_day, normalize,
    special_lessons_for_grade,
};
use schoolday_config::{FallbackCatalog, ScheduleConfig};
use schoolday_models::SchoolDay;

fn no_breaks() -> ScheduleConfig {
    ScheduleConfig {
        insert_breaks: false,
        ..ScheduleConfig::default()
    }
}

#[test]
fn test_math_monday_end_to_end() {
    let periods = normalize(&[]);
    let entries = vec![lesson(SchoolDay::Monday, "07:50", "08:35", "Math", "Ms. Lan")];

    let monday = merge_day(&periods, &entries, SchoolDay::Monday);
    assert_eq!(monday.len(), 10);
    assert_eq!(monday.iter().filter(|s| s.is_lesson()).count(), 1);
    assert_eq!(
        monday.iter().filter(|s| matches!(s.content, SlotContent::Empty { .. })).count(),
        9
    );

    let current = current_lesson(&monday, week_instant(0, "08:10")).unwrap();
    assert_eq!(current.title(), "Math");
    assert_eq!(current.display_number(), Some(2));
    assert_eq!(current.teacher_names(), "Ms. Lan");
    assert_eq!(current.matched_by(), Some(MatchTier::ExactTime));
}

#[test]
fn test_week_schedule_pipeline() {
    let entries = vec![lesson(SchoolDay::Monday, "07:50", "08:35", "Math", "Ms. Lan")];

    let week = WeekSchedule::build(&[], &entries, &[], &no_breaks());
    assert_eq!(week.slots().len(), 50);
    assert_eq!(week.day(SchoolDay::Monday).count(), 10);
    assert_eq!(
        week.current_lesson(week_instant(0, "08:10")).map(|s| s.title()),
        Some("Math")
    );

    let with_breaks = WeekSchedule::build(&[], &entries, &[], &ScheduleConfig::default());
    assert_eq!(with_breaks.day(SchoolDay::Friday).count(), 19);
    assert_eq!(insert_breaks(with_breaks.slots()), with_breaks.slots());
}

#[test]
fn test_compact_fallback_pipeline() {
    let config = ScheduleConfig {
        fallback: FallbackCatalog::Compact,
        ..no_breaks()
    };
    let week = WeekSchedule::build(&[], &[], &[], &config);
    assert_eq!(week.periods().len(), 9);
    assert_eq!(week.day(SchoolDay::Thursday).count(), 9);
}

#[test]
fn test_primary_specials_fill_free_time() {
    let specials = special_lessons_for_grade(2);
    let week = WeekSchedule::build(&messy_definitions(), &[], &specials, &no_breaks());
    let monday: Vec<_> = week.day(SchoolDay::Monday).collect();
    let special_names: Vec<&str> = monday
        .iter()
        .filter(|s| matches!(s.content, SlotContent::Special { .. }))
        .map(|s| s.title())
        .collect();
    // Breakfast (07:30) and the afternoon snack and class meeting fit;
    // the rest collide with catalog periods.
    assert_eq!(special_names, vec!["Ăn sáng", "Ăn nhẹ", "Sinh hoạt lớp"]);
    assert!(monday.windows(2).all(|w| w[0].start_time <= w[1].start_time));
}

#[test]
fn test_json_documents_end_to_end() {
    let periods = parse_period_document(
        r#"{"data":[
            {"_id":"p2","periodNumber":2,"startTime":"08:35","endTime":"09:05","type":"regular"},
            {"_id":"p1","periodNumber":1,"startTime":"08:00","endTime":"08:30","type":"regular"},
            {"_id":"l","periodNumber":9,"startTime":"11:05","endTime":"11:40","type":"lunch","label":""},
            {"_id":"bad","periodNumber":3,"startTime":"","endTime":"10:00","type":"regular"}
        ]}"#,
    )
    .unwrap();
    assert_eq!(periods.len(), 3);

    let entries = parse_timetable_document(
        r#"[
            {"_id":"e1","periodNumber":2,"subject":{"name":"Tiếng Việt"},
             "timeSlot":{"dayOfWeek":"Thursday","startTime":"08:35:00","endTime":"09:05:00"},
             "teachers":[{"fullname":"Cô Mai"},{"fullname":"Thầy Tùng"}]},
            {"_id":"e2","subject":{"name":"Toán"},"dayOfWeek":"Thursday","startTime":"08:00","endTime":"08:30"},
            {"_id":"e3","dayOfWeek":"Thursday","startTime":"13:00","endTime":"13:30"}
        ]"#,
    )
    .unwrap();
    assert_eq!(entries.len(), 2);

    let week = WeekSchedule::build(&periods, &entries, &[], &no_breaks());
    let thursday: Vec<_> = week.day(SchoolDay::Thursday).collect();
    assert_eq!(thursday.len(), 3);
    assert_eq!(thursday[0].title(), "Toán");
    assert_eq!(thursday[1].title(), "Tiếng Việt");
    assert_eq!(thursday[1].matched_by(), Some(MatchTier::PeriodNumber));
    assert_eq!(thursday[1].teacher_names(), "Cô Mai / Thầy Tùng");
    assert_eq!(thursday[2].title(), "Ăn trưa");

    let now = week_instant(3, "08:40");
    assert_eq!(week.current_lesson(now).map(|s| s.title()), Some("Tiếng Việt"));
}

#[test]
fn test_slots_serialize_with_kind_tag() {
    let week = WeekSchedule::build(&[], &[], &[], &no_breaks());
    let value = serde_json::to_value(&week.slots()[0]).unwrap();
    assert_eq!(value["content"]["kind"], "empty");
    assert_eq!(value["startTime"], "07:00");
    assert_eq!(value["day"], "Monday");
}
