//! Timetable merging.
//!
//! Each processed period is paired with at most one lesson of the day, and
//! each lesson fills at most one period. Matching runs tier by tier over the
//! whole day so a strong match is never taken by a weaker tier of an earlier
//! period.

use schoolday_core::labels;
use schoolday_models::{ClockTime, ProcessedPeriod, SchoolDay, TimetableEntry};
use serde::Serialize;
use tracing::{debug, instrument};

use super::special::SpecialLesson;

/// How a lesson was linked to its period, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchTier {
    PeriodNumber,
    ExactTime,
    Position,
    Overlap,
}

impl MatchTier {
    /// Positional matches are a guess when period and lesson counts differ.
    pub fn is_low_confidence(&self) -> bool {
        matches!(self, Self::Position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SlotContent {
    Lesson {
        period: ProcessedPeriod,
        entry: TimetableEntry,
        matched_by: MatchTier,
    },
    Empty {
        period: ProcessedPeriod,
    },
    Special {
        lesson: SpecialLesson,
    },
    Break {
        label: String,
    },
}

/// One row of a day's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedSlot {
    pub day: SchoolDay,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub content: SlotContent,
}

impl MergedSlot {
    pub fn break_between(day: SchoolDay, start: ClockTime, end: ClockTime) -> Self {
        Self {
            day,
            start_time: start,
            end_time: end,
            content: SlotContent::Break {
                label: labels::BREAK_BETWEEN_LESSONS.to_string(),
            },
        }
    }

    pub fn period(&self) -> Option<&ProcessedPeriod> {
        match &self.content {
            SlotContent::Lesson { period, .. } | SlotContent::Empty { period } => Some(period),
            SlotContent::Special { .. } | SlotContent::Break { .. } => None,
        }
    }

    pub fn entry(&self) -> Option<&TimetableEntry> {
        match &self.content {
            SlotContent::Lesson { entry, .. } => Some(entry),
            _ => None,
        }
    }

    pub fn matched_by(&self) -> Option<MatchTier> {
        match &self.content {
            SlotContent::Lesson { matched_by, .. } => Some(*matched_by),
            _ => None,
        }
    }

    /// Whether this slot comes from the period catalog.
    pub fn is_period(&self) -> bool {
        self.period().is_some()
    }

    pub fn is_lesson(&self) -> bool {
        matches!(self.content, SlotContent::Lesson { .. })
    }

    pub fn is_break(&self) -> bool {
        matches!(self.content, SlotContent::Break { .. })
    }

    /// Subject name for lessons, otherwise the slot's own label.
    pub fn title(&self) -> &str {
        match &self.content {
            SlotContent::Lesson { entry, .. } => &entry.subject.name,
            SlotContent::Empty { period } => &period.label,
            SlotContent::Special { lesson } => &lesson.name,
            SlotContent::Break { label } => label,
        }
    }

    pub fn display_number(&self) -> Option<u32> {
        self.period().map(|p| p.display_number)
    }

    pub fn teacher_names(&self) -> String {
        self.entry().map(TimetableEntry::teacher_names).unwrap_or_default()
    }

    /// `"07:00 – 07:45"`
    pub fn time_range(&self) -> String {
        format!("{} – {}", self.start_time, self.end_time)
    }

    /// Half-open `[start, end)` intersection.
    pub fn intersects(&self, start: ClockTime, end: ClockTime) -> bool {
        self.start_time < end && start < self.end_time
    }

    /// `start <= at < end`
    pub fn contains(&self, at: ClockTime) -> bool {
        self.start_time <= at && at < self.end_time
    }
}

/// Lesson-to-period pairing built up tier by tier.
struct Assignment<'a> {
    lessons: Vec<&'a TimetableEntry>,
    matches: Vec<Option<(usize, MatchTier)>>,
    used: Vec<bool>,
}

impl<'a> Assignment<'a> {
    fn new(lessons: Vec<&'a TimetableEntry>, periods: usize) -> Self {
        let used = vec![false; lessons.len()];
        Self {
            lessons,
            matches: vec![None; periods],
            used,
        }
    }

    fn is_matched(&self, period_index: usize) -> bool {
        self.matches[period_index].is_some()
    }

    fn is_free(&self, lesson_index: usize) -> bool {
        lesson_index < self.lessons.len() && !self.used[lesson_index]
    }

    fn first_free(&self, predicate: impl Fn(&TimetableEntry) -> bool) -> Option<usize> {
        (0..self.lessons.len()).find(|&i| !self.used[i] && predicate(self.lessons[i]))
    }

    fn claim(&mut self, period_index: usize, lesson_index: usize, tier: MatchTier) {
        self.matches[period_index] = Some((lesson_index, tier));
        self.used[lesson_index] = true;
    }

    /// Run one tier over every still-unmatched period.
    fn run_tier(
        &mut self,
        periods: &[ProcessedPeriod],
        tier: MatchTier,
        predicate: impl Fn(&ProcessedPeriod, &TimetableEntry) -> bool,
    ) {
        for (pi, period) in periods.iter().enumerate() {
            if self.is_matched(pi) {
                continue;
            }
            if let Some(li) = self.first_free(|entry| predicate(period, entry)) {
                self.claim(pi, li, tier);
            }
        }
    }

    fn unused(&self) -> usize {
        self.used.iter().filter(|u| !**u).count()
    }
}

/// Merge one day's lessons into the period catalog.
///
/// Returns one slot per period, in catalog order. Unmatched periods become
/// [`SlotContent::Empty`]. Lessons for other days are ignored.
#[instrument(skip(periods, entries), fields(periods = periods.len()))]
pub fn merge_day(
    periods: &[ProcessedPeriod],
    entries: &[TimetableEntry],
    day: SchoolDay,
) -> Vec<MergedSlot> {
    let mut lessons: Vec<&TimetableEntry> =
        entries.iter().filter(|e| e.day_of_week == day).collect();
    lessons.sort_by_key(|e| (e.start_time, e.end_time));

    let mut assignment = Assignment::new(lessons, periods.len());

    // Lesson numbers refer to regular periods; specials may reuse them.
    assignment.run_tier(periods, MatchTier::PeriodNumber, |period, entry| {
        period.is_regular && entry.period_number == Some(period.source_number)
    });
    assignment.run_tier(periods, MatchTier::ExactTime, |period, entry| {
        entry.start_time == period.start_time && entry.end_time == period.end_time
    });

    let regular_indices: Vec<usize> = periods
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_regular)
        .map(|(i, _)| i)
        .collect();
    for (position, pi) in regular_indices.into_iter().enumerate() {
        if !assignment.is_matched(pi) && assignment.is_free(position) {
            assignment.claim(pi, position, MatchTier::Position);
        }
    }

    assignment.run_tier(periods, MatchTier::Overlap, |period, entry| {
        entry.touches(period.start_time, period.end_time)
    });

    let unused = assignment.unused();
    if unused > 0 {
        debug!(%day, unused, "lessons left without a period");
    }

    let Assignment { lessons, matches, .. } = assignment;
    periods
        .iter()
        .zip(matches)
        .map(|(period, matched)| {
            let content = match matched {
                Some((li, tier)) => SlotContent::Lesson {
                    period: period.clone(),
                    entry: lessons[li].clone(),
                    matched_by: tier,
                },
                None => SlotContent::Empty {
                    period: period.clone(),
                },
            };
            MergedSlot {
                day,
                start_time: period.start_time,
                end_time: period.end_time,
                content,
            }
        })
        .collect()
}

/// [`merge_day`] for Monday through Friday, concatenated in week order.
pub fn merge_week(periods: &[ProcessedPeriod], entries: &[TimetableEntry]) -> Vec<MergedSlot> {
    SchoolDay::ALL
        .into_iter()
        .flat_map(|day| merge_day(periods, entries, day))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::catalog::normalize;
    use schoolday_models::{PeriodType, Subject, Teacher};

    fn lesson(day: SchoolDay, start: &str, end: &str, subject: &str) -> TimetableEntry {
        TimetableEntry::new(day, start.parse().unwrap(), end.parse().unwrap(), Subject::named(subject))
    }

    fn period(display: u32, source: u32, start: &str, end: &str) -> ProcessedPeriod {
        ProcessedPeriod {
            display_number: display,
            source_number: source,
            label: labels::numbered_period(display),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            is_regular: true,
            source_type: PeriodType::Regular,
        }
    }

    #[test]
    fn test_no_lessons_gives_all_empty() {
        let periods = normalize(&[]);
        let slots = merge_day(&periods, &[], SchoolDay::Wednesday);
        assert_eq!(slots.len(), periods.len());
        assert!(slots.iter().all(|s| matches!(s.content, SlotContent::Empty { .. })));
        for (slot, period) in slots.iter().zip(&periods) {
            assert_eq!(slot.start_time, period.start_time);
            assert_eq!(slot.title(), period.label);
        }
    }

    #[test]
    fn test_period_number_beats_time() {
        let periods = vec![period(1, 7, "07:00", "07:45"), period(2, 8, "07:50", "08:35")];
        let entries = vec![
            lesson(SchoolDay::Monday, "07:00", "07:45", "Văn").with_period_number(8),
        ];
        let slots = merge_day(&periods, &entries, SchoolDay::Monday);
        assert!(!slots[0].is_lesson());
        assert_eq!(slots[1].title(), "Văn");
        assert_eq!(slots[1].matched_by(), Some(MatchTier::PeriodNumber));
    }

    #[test]
    fn test_period_number_ignores_special_with_same_number() {
        let mut assembly = period(1, 1, "06:45", "07:00");
        assembly.is_regular = false;
        assembly.source_type = PeriodType::Assembly;
        let periods = vec![assembly, period(1, 1, "07:00", "07:45")];
        let entries = vec![
            lesson(SchoolDay::Monday, "07:00", "07:45", "Math").with_period_number(1),
        ];
        let slots = merge_day(&periods, &entries, SchoolDay::Monday);
        assert!(!slots[0].is_lesson());
        assert_eq!(slots[1].title(), "Math");
        assert_eq!(slots[1].matched_by(), Some(MatchTier::PeriodNumber));
    }

    #[test]
    fn test_exact_time_beats_overlap() {
        let periods = vec![period(1, 1, "08:00", "08:45")];
        let entries = vec![
            lesson(SchoolDay::Monday, "07:30", "08:10", "Overlap"),
            lesson(SchoolDay::Monday, "08:00", "08:45", "Exact"),
        ];
        let slots = merge_day(&periods, &entries, SchoolDay::Monday);
        assert_eq!(slots[0].title(), "Exact");
        assert_eq!(slots[0].matched_by(), Some(MatchTier::ExactTime));
    }

    #[test]
    fn test_exact_match_not_stolen_by_position() {
        let periods = vec![period(1, 1, "07:00", "07:45"), period(2, 2, "07:50", "08:35")];
        let entries = vec![lesson(SchoolDay::Monday, "07:50", "08:35", "Math")];
        let slots = merge_day(&periods, &entries, SchoolDay::Monday);
        assert!(!slots[0].is_lesson());
        assert_eq!(slots[1].title(), "Math");
        assert_eq!(slots[1].display_number(), Some(2));
    }

    #[test]
    fn test_positional_fallback_is_low_confidence() {
        let periods = vec![period(1, 1, "07:00", "07:45"), period(2, 2, "07:50", "08:35")];
        let entries = vec![
            lesson(SchoolDay::Friday, "12:00", "12:40", "Lý"),
            lesson(SchoolDay::Friday, "13:00", "13:40", "Hoá"),
        ];
        let slots = merge_day(&periods, &entries, SchoolDay::Friday);
        assert_eq!(slots[0].title(), "Lý");
        assert_eq!(slots[1].title(), "Hoá");
        assert!(slots[0].matched_by().unwrap().is_low_confidence());
        assert_eq!(slots[0].start_time, periods[0].start_time);
    }

    #[test]
    fn test_overlap_is_inclusive() {
        let mut lunch = period(5, 5, "11:15", "12:00");
        lunch.is_regular = false;
        lunch.source_type = PeriodType::Lunch;
        let entries = vec![lesson(SchoolDay::Thursday, "12:00", "12:30", "Kỹ năng")];
        let slots = merge_day(&[lunch], &entries, SchoolDay::Thursday);
        assert_eq!(slots[0].matched_by(), Some(MatchTier::Overlap));
    }

    #[test]
    fn test_other_days_ignored() {
        let periods = vec![period(1, 1, "07:00", "07:45")];
        let entries = vec![lesson(SchoolDay::Tuesday, "07:00", "07:45", "Anh")];
        let slots = merge_day(&periods, &entries, SchoolDay::Monday);
        assert!(!slots[0].is_lesson());
    }

    #[test]
    fn test_lesson_slot_keeps_period_identity() {
        let periods = vec![period(3, 9, "08:40", "09:25")];
        let entries = vec![
            lesson(SchoolDay::Monday, "08:40", "09:25", "Sinh")
                .with_teacher(Teacher::named("Cô Hoa"))
                .with_teacher(Teacher::named("Thầy Nam")),
        ];
        let slots = merge_day(&periods, &entries, SchoolDay::Monday);
        assert_eq!(slots[0].display_number(), Some(3));
        assert_eq!(slots[0].period().unwrap().label, "Tiết 3");
        assert_eq!(slots[0].teacher_names(), "Cô Hoa / Thầy Nam");
    }

    #[test]
    fn test_merge_week_covers_five_days() {
        let periods = normalize(&[]);
        let entries = vec![lesson(SchoolDay::Friday, "16:30", "17:15", "Thể dục")];
        let week = merge_week(&periods, &entries);
        assert_eq!(week.len(), 50);
        assert_eq!(week.iter().filter(|s| s.is_lesson()).count(), 1);
        assert_eq!(week[49].day, SchoolDay::Friday);
        assert_eq!(week[49].title(), "Thể dục");
    }
}
