//! Timetable entry models.
//!
//! A [`TimetableEntry`] is a concrete lesson: one subject, taught by one or
//! more teachers, on one day in one time window, for one class.

use crate::ids::{EntryId, SubjectId, TeacherId, first_id};
use crate::value_types::{ClockTime, SchoolDay, ValueTypeError};
use schoolday_core::serde::{
    deserialize_null_as_empty, deserialize_optional_string, deserialize_optional_u32,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SubjectId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Subject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            code: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TeacherId>,
    pub fullname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Teacher {
    pub fn named(fullname: impl Into<String>) -> Self {
        Self {
            id: None,
            fullname: fullname.into(),
            avatar_url: None,
        }
    }
}

/// Canonical lesson record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    pub day_of_week: SchoolDay,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_number: Option<u32>,
    pub subject: Subject,
    #[serde(default)]
    pub teachers: Vec<Teacher>,
}

impl TimetableEntry {
    pub fn new(
        day_of_week: SchoolDay,
        start_time: ClockTime,
        end_time: ClockTime,
        subject: Subject,
    ) -> Self {
        Self {
            id: None,
            day_of_week,
            start_time,
            end_time,
            period_number: None,
            subject,
            teachers: Vec::new(),
        }
    }

    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    pub fn with_period_number(mut self, number: u32) -> Self {
        self.period_number = Some(number);
        self
    }

    /// Teacher names joined the way the lesson card shows them.
    pub fn teacher_names(&self) -> String {
        self.teachers
            .iter()
            .map(|t| t.fullname.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// Inclusive-bounds overlap used by the loosest matching tier.
    pub fn touches(&self, start: ClockTime, end: ClockTime) -> bool {
        self.start_time <= end && self.end_time >= start
    }
}

// ============================================================================
// Upstream shapes
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamSubject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamUserRef {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamTeacher {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub user: Option<UpstreamUserRef>,
}

impl UpstreamTeacher {
    /// Canonical teacher, or `None` when upstream sent no name.
    pub fn into_teacher(self) -> Option<Teacher> {
        let fullname = self.fullname?;
        Some(Teacher {
            id: first_id(self.id, self.mongo_id),
            fullname,
            avatar_url: self.avatar_url.or(self.user.and_then(|u| u.avatar_url)),
        })
    }
}

/// Day and window nested under `timeSlot` by some endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub day_of_week: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub end_time: Option<String>,
}

/// Timetable entry exactly as the backend sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamTimetableEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<String>,
    #[serde(default)]
    pub subject: Option<UpstreamSubject>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub teachers: Vec<UpstreamTeacher>,
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub day_of_week: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_u32")]
    pub period_number: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub label: Option<String>,
}

impl UpstreamTimetableEntry {
    pub fn display_id(&self) -> &str {
        self.id
            .as_deref()
            .or(self.mongo_id.as_deref())
            .unwrap_or("<no id>")
    }

    /// Nested `timeSlot` value if present, else the flat field.
    fn pick<'a>(
        slot: Option<&'a TimeSlot>,
        nested: impl Fn(&'a TimeSlot) -> Option<&'a String>,
        flat: Option<&'a String>,
    ) -> Option<&'a str> {
        slot.and_then(nested).or(flat).map(String::as_str)
    }
}

impl TryFrom<UpstreamTimetableEntry> for TimetableEntry {
    type Error = ValueTypeError;

    fn try_from(raw: UpstreamTimetableEntry) -> Result<Self, Self::Error> {
        let slot = raw.time_slot.as_ref();

        let day = UpstreamTimetableEntry::pick(
            slot,
            |s| s.day_of_week.as_ref(),
            raw.day_of_week.as_ref(),
        )
        .ok_or(ValueTypeError::MissingField("dayOfWeek"))?
        .parse::<SchoolDay>()?;
        let start_time = ClockTime::parse(
            UpstreamTimetableEntry::pick(slot, |s| s.start_time.as_ref(), raw.start_time.as_ref())
                .ok_or(ValueTypeError::MissingField("startTime"))?,
        )?;
        let end_time = ClockTime::parse(
            UpstreamTimetableEntry::pick(slot, |s| s.end_time.as_ref(), raw.end_time.as_ref())
                .ok_or(ValueTypeError::MissingField("endTime"))?,
        )?;
        if start_time >= end_time {
            return Err(ValueTypeError::EmptyInterval {
                start: start_time,
                end: end_time,
            });
        }

        let subject = match raw.subject {
            Some(UpstreamSubject {
                id,
                mongo_id,
                name: Some(name),
                code,
            }) => Subject {
                id: first_id(id, mongo_id),
                name,
                code,
            },
            _ => raw
                .name
                .or(raw.label)
                .map(Subject::named)
                .ok_or(ValueTypeError::MissingField("subject"))?,
        };

        let teachers = raw
            .teachers
            .into_iter()
            .filter_map(UpstreamTeacher::into_teacher)
            .collect();

        Ok(Self {
            id: first_id(raw.id, raw.mongo_id),
            day_of_week: day,
            start_time,
            end_time,
            period_number: raw.period_number,
            subject,
            teachers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upstream(value: serde_json::Value) -> UpstreamTimetableEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_nested_time_slot_wins() {
        let raw = upstream(json!({
            "_id": "e1",
            "subject": { "_id": "math", "name": "Toán" },
            "teachers": [{ "fullname": "Cô Lan", "user": { "avatarUrl": "/a.png" } }],
            "timeSlot": { "dayOfWeek": "Monday", "startTime": "07:50", "endTime": "08:35" },
            "startTime": "06:00",
            "endTime": "06:45"
        }));
        let entry = TimetableEntry::try_from(raw).unwrap();
        assert_eq!(entry.id, Some(EntryId::new("e1")));
        assert_eq!(entry.day_of_week, SchoolDay::Monday);
        assert_eq!(entry.start_time, ClockTime::at(7, 50));
        assert_eq!(entry.end_time, ClockTime::at(8, 35));
        assert_eq!(entry.subject.name, "Toán");
        assert_eq!(entry.teachers[0].avatar_url.as_deref(), Some("/a.png"));
    }

    #[test]
    fn test_flat_fields_used_without_time_slot() {
        let raw = upstream(json!({
            "id": "e2",
            "dayOfWeek": "Tuesday",
            "startTime": "13:00",
            "endTime": "13:45",
            "periodNumber": 6,
            "subject": { "name": "Tiếng Anh" },
            "teachers": null
        }));
        let entry = TimetableEntry::try_from(raw).unwrap();
        assert_eq!(entry.day_of_week, SchoolDay::Tuesday);
        assert_eq!(entry.period_number, Some(6));
        assert!(entry.teachers.is_empty());
    }

    #[test]
    fn test_partial_time_slot_falls_back_per_field() {
        let raw = upstream(json!({
            "timeSlot": { "dayOfWeek": "Friday" },
            "startTime": "09:40",
            "endTime": "10:25",
            "subject": { "name": "Văn" }
        }));
        let entry = TimetableEntry::try_from(raw).unwrap();
        assert_eq!(entry.day_of_week, SchoolDay::Friday);
        assert_eq!(entry.start_time, ClockTime::at(9, 40));
    }

    #[test]
    fn test_name_used_when_subject_missing() {
        let raw = upstream(json!({
            "dayOfWeek": "Monday",
            "startTime": "16:00",
            "endTime": "16:15",
            "name": "Sinh hoạt lớp"
        }));
        let entry = TimetableEntry::try_from(raw).unwrap();
        assert_eq!(entry.subject.name, "Sinh hoạt lớp");
    }

    #[test]
    fn test_missing_subject_rejected() {
        let raw = upstream(json!({
            "dayOfWeek": "Monday",
            "startTime": "16:00",
            "endTime": "16:15"
        }));
        assert_eq!(
            TimetableEntry::try_from(raw).unwrap_err(),
            ValueTypeError::MissingField("subject")
        );
    }

    #[test]
    fn test_weekend_day_rejected() {
        let raw = upstream(json!({
            "dayOfWeek": "Saturday",
            "startTime": "08:00",
            "endTime": "08:45",
            "subject": { "name": "Toán" }
        }));
        assert!(matches!(
            TimetableEntry::try_from(raw),
            Err(ValueTypeError::InvalidSchoolDay(_))
        ));
    }

    #[test]
    fn test_teacher_without_name_dropped() {
        let raw = upstream(json!({
            "dayOfWeek": "Monday",
            "startTime": "08:00",
            "endTime": "08:45",
            "subject": { "name": "Toán" },
            "teachers": [{ "fullname": "" }, { "fullname": "Thầy Minh" }]
        }));
        let entry = TimetableEntry::try_from(raw).unwrap();
        assert_eq!(entry.teachers.len(), 1);
        assert_eq!(entry.teacher_names(), "Thầy Minh");
    }

    #[test]
    fn test_teacher_names_joined() {
        let entry = TimetableEntry::new(
            SchoolDay::Monday,
            ClockTime::at(7, 0),
            ClockTime::at(7, 45),
            Subject::named("Toán"),
        )
        .with_teacher(Teacher::named("Cô Lan"))
        .with_teacher(Teacher::named("Mr. John"));
        assert_eq!(entry.teacher_names(), "Cô Lan / Mr. John");
    }

    #[test]
    fn test_touches_inclusive_bounds() {
        let entry = TimetableEntry::new(
            SchoolDay::Monday,
            ClockTime::at(7, 50),
            ClockTime::at(8, 35),
            Subject::named("Toán"),
        );
        assert!(entry.touches(ClockTime::at(7, 0), ClockTime::at(7, 50)));
        assert!(!entry.touches(ClockTime::at(7, 0), ClockTime::at(7, 49)));
        assert!(entry.touches(ClockTime::at(8, 35), ClockTime::at(9, 0)));
    }
}
