//! Period domain models.
//!
//! A period is an abstract time slot in the school day ("Tiết 3", "Ăn trưa"),
//! independent of what is taught in it. The backend sends a list of
//! [`PeriodDefinition`]s per school year; the normalizer turns them into an
//! ordered catalog of [`ProcessedPeriod`]s.

use crate::ids::{PeriodId, SchoolId, SchoolYearId, first_id};
use crate::value_types::{ClockTime, ValueTypeError};
use schoolday_core::labels;
use schoolday_core::serde::{deserialize_optional_string, deserialize_optional_u32};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of period. Unknown upstream kinds collapse into [`PeriodType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PeriodType {
    Regular,
    Lunch,
    Nap,
    Break,
    Assembly,
    Other,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Lunch => "lunch",
            Self::Nap => "nap",
            Self::Break => "break",
            Self::Assembly => "assembly",
            Self::Other => "other",
        }
    }

    /// Label shown when a special period has none of its own.
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Regular => labels::PERIOD_REGULAR,
            Self::Lunch => labels::PERIOD_LUNCH,
            Self::Nap => labels::PERIOD_NAP,
            Self::Break => labels::PERIOD_BREAK,
            Self::Assembly => labels::PERIOD_ASSEMBLY,
            Self::Other => labels::PERIOD_OTHER,
        }
    }

    #[inline]
    pub fn is_regular(&self) -> bool {
        matches!(self, Self::Regular)
    }
}

impl From<String> for PeriodType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for PeriodType {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "regular" => Self::Regular,
            "lunch" => Self::Lunch,
            "nap" => Self::Nap,
            "break" => Self::Break,
            "assembly" => Self::Assembly,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical period definition.
///
/// Invariant: `start_time < end_time`. Several definitions may share a
/// `period_number`; regular duplicates are distinct slots, special duplicates
/// are collapsed by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PeriodId>,
    pub period_number: u32,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub period_type: PeriodType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_year_id: Option<SchoolYearId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<SchoolId>,
}

impl PeriodDefinition {
    /// Definition with just the fields the scheduling core reads.
    pub fn new(
        period_number: u32,
        start_time: ClockTime,
        end_time: ClockTime,
        period_type: PeriodType,
    ) -> Self {
        Self {
            id: None,
            period_number,
            start_time,
            end_time,
            label: None,
            period_type,
            school_year_id: None,
            school_id: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label, if present and not blank.
    pub fn non_empty_label(&self) -> Option<&str> {
        self.label.as_deref().map(str::trim).filter(|l| !l.is_empty())
    }

    #[inline]
    pub fn is_regular(&self) -> bool {
        self.period_type.is_regular()
    }

    /// Whether the interval is well-formed.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start_time < self.end_time
    }
}

/// Period definition exactly as the backend sends it.
///
/// Every field is optional; [`PeriodDefinition::try_from`] decides what is usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamPeriodDefinition {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_u32")]
    pub period_number: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub label: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "deserialize_optional_string")]
    pub period_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub school_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub school: Option<String>,
}

impl UpstreamPeriodDefinition {
    /// Best identifier for log messages.
    pub fn display_id(&self) -> &str {
        self.id
            .as_deref()
            .or(self.mongo_id.as_deref())
            .unwrap_or("<no id>")
    }
}

impl TryFrom<UpstreamPeriodDefinition> for PeriodDefinition {
    type Error = ValueTypeError;

    /// A missing `type` is treated as regular, matching the timetable screens
    /// that list every untyped definition as a teaching period. Regular periods
    /// are renumbered by the catalog, so their `periodNumber` defaults to 0.
    fn try_from(raw: UpstreamPeriodDefinition) -> Result<Self, Self::Error> {
        let period_type = raw
            .period_type
            .as_deref()
            .map(PeriodType::from)
            .unwrap_or(PeriodType::Regular);
        let period_number = match (raw.period_number, period_type) {
            (Some(number), _) => number,
            (None, PeriodType::Regular) => 0,
            (None, _) => return Err(ValueTypeError::MissingField("periodNumber")),
        };
        let start_time = ClockTime::parse(
            raw.start_time
                .as_deref()
                .ok_or(ValueTypeError::MissingField("startTime"))?,
        )?;
        let end_time = ClockTime::parse(
            raw.end_time
                .as_deref()
                .ok_or(ValueTypeError::MissingField("endTime"))?,
        )?;
        if start_time >= end_time {
            return Err(ValueTypeError::EmptyInterval {
                start: start_time,
                end: end_time,
            });
        }

        Ok(Self {
            id: first_id(raw.id, raw.mongo_id),
            period_number,
            start_time,
            end_time,
            label: raw.label,
            period_type,
            school_year_id: raw.school_year.map(SchoolYearId::from),
            school_id: raw.school.map(SchoolId::from),
        })
    }
}

/// One entry of the normalized period catalog.
///
/// Regular periods get a dense 1..N `display_number` in start-time order;
/// special periods keep their upstream number. `source_number` always holds the
/// upstream `periodNumber` so lessons can still be linked by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPeriod {
    pub display_number: u32,
    pub source_number: u32,
    pub label: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub is_regular: bool,
    pub source_type: PeriodType,
}

impl ProcessedPeriod {
    /// `"07:00 – 07:45"`
    pub fn time_range(&self) -> String {
        format!("{} – {}", self.start_time, self.end_time)
    }

    /// Stable key for list rendering: `regular-3` or `special-5-lunch`.
    pub fn unique_key(&self) -> String {
        if self.is_regular {
            format!("regular-{}", self.display_number)
        } else {
            format!("special-{}-{}", self.display_number, self.source_type)
        }
    }

    /// Half-open `[start, end)` intersection with another interval.
    pub fn intersects(&self, start: ClockTime, end: ClockTime) -> bool {
        self.start_time < end && start < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_period_type_unknown_is_other() {
        let t: PeriodType = serde_json::from_value(json!("snack")).unwrap();
        assert_eq!(t, PeriodType::Other);
        let t: PeriodType = serde_json::from_value(json!("Lunch")).unwrap();
        assert_eq!(t, PeriodType::Lunch);
    }

    #[test]
    fn test_period_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(PeriodType::Assembly).unwrap(), json!("assembly"));
    }

    #[test]
    fn test_default_labels() {
        assert_eq!(PeriodType::Lunch.default_label(), "Ăn trưa");
        assert_eq!(PeriodType::Nap.default_label(), "Ngủ trưa");
        assert_eq!(PeriodType::Break.default_label(), "Giải lao");
        assert_eq!(PeriodType::Assembly.default_label(), "Chào cờ");
        assert_eq!(PeriodType::Other.default_label(), "Khác");
        assert_eq!(PeriodType::Regular.default_label(), "Tiết học");
    }

    #[test]
    fn test_upstream_conversion() {
        let raw: UpstreamPeriodDefinition = serde_json::from_value(json!({
            "_id": "p1",
            "periodNumber": 3,
            "startTime": "08:40",
            "endTime": "09:25",
            "type": "regular",
            "schoolYear": "sy-2025",
            "school": "wss"
        }))
        .unwrap();
        let def = PeriodDefinition::try_from(raw).unwrap();
        assert_eq!(def.id, Some(PeriodId::new("p1")));
        assert_eq!(def.period_number, 3);
        assert_eq!(def.start_time, ClockTime::at(8, 40));
        assert!(def.is_regular());
        assert_eq!(def.school_year_id, Some(SchoolYearId::new("sy-2025")));
    }

    #[test]
    fn test_upstream_missing_time_rejected() {
        let raw: UpstreamPeriodDefinition = serde_json::from_value(json!({
            "periodNumber": 1,
            "startTime": "07:00",
            "type": "lunch"
        }))
        .unwrap();
        assert_eq!(
            PeriodDefinition::try_from(raw).unwrap_err(),
            ValueTypeError::MissingField("endTime")
        );
    }

    #[test]
    fn test_upstream_regular_without_number_defaults() {
        let raw: UpstreamPeriodDefinition = serde_json::from_value(json!({
            "startTime": "07:00",
            "endTime": "07:45",
            "type": "regular"
        }))
        .unwrap();
        let def = PeriodDefinition::try_from(raw).unwrap();
        assert_eq!(def.period_number, 0);
        assert!(def.is_regular());

        let raw: UpstreamPeriodDefinition = serde_json::from_value(json!({
            "startTime": "11:00",
            "endTime": "11:40",
            "type": "lunch"
        }))
        .unwrap();
        assert_eq!(
            PeriodDefinition::try_from(raw).unwrap_err(),
            ValueTypeError::MissingField("periodNumber")
        );
    }

    #[test]
    fn test_upstream_inverted_interval_rejected() {
        let raw: UpstreamPeriodDefinition = serde_json::from_value(json!({
            "periodNumber": 1,
            "startTime": "09:00",
            "endTime": "08:00"
        }))
        .unwrap();
        assert!(matches!(
            PeriodDefinition::try_from(raw),
            Err(ValueTypeError::EmptyInterval { .. })
        ));
    }

    #[test]
    fn test_upstream_untyped_is_regular() {
        let raw: UpstreamPeriodDefinition = serde_json::from_value(json!({
            "periodNumber": "2",
            "startTime": "07:50",
            "endTime": "08:35",
            "label": ""
        }))
        .unwrap();
        let def = PeriodDefinition::try_from(raw).unwrap();
        assert!(def.is_regular());
        assert_eq!(def.period_number, 2);
        assert!(def.label.is_none());
    }

    #[test]
    fn test_non_empty_label() {
        let def = PeriodDefinition::new(5, ClockTime::at(11, 0), ClockTime::at(11, 40), PeriodType::Lunch)
            .with_label("  ");
        assert!(def.non_empty_label().is_none());
        let def = def.with_label("Ăn trưa bán trú");
        assert_eq!(def.non_empty_label(), Some("Ăn trưa bán trú"));
    }

    #[test]
    fn test_processed_period_keys() {
        let p = ProcessedPeriod {
            display_number: 5,
            source_number: 5,
            label: "Ăn trưa".into(),
            start_time: ClockTime::at(11, 15),
            end_time: ClockTime::at(12, 0),
            is_regular: false,
            source_type: PeriodType::Lunch,
        };
        assert_eq!(p.unique_key(), "special-5-lunch");
        assert_eq!(p.time_range(), "11:15 – 12:00");
        assert!(p.intersects(ClockTime::at(11, 59), ClockTime::at(12, 30)));
        assert!(!p.intersects(ClockTime::at(12, 0), ClockTime::at(12, 30)));
    }
}
