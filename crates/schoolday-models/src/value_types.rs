//! Strongly-typed value types with validation for domain primitives.
//!
//! - [`ClockTime`]: a wall-clock time of day at minute resolution
//! - [`SchoolDay`]: one of the five school weekdays
//!
//! # Example
//!
//! ```ignore
//! use schoolday_models::value_types::{ClockTime, SchoolDay};
//!
//! let t: ClockTime = "13:45".parse().unwrap();
//! assert!(t > ClockTime::at(13, 0));
//! assert_eq!(SchoolDay::from_weekday(chrono::Weekday::Sat), None);
//! ```

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use schoolday_core::labels;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error type for value type parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTypeError {
    /// The time of day is not `HH:MM` / `HH:MM:SS`.
    InvalidClockTime(String),
    /// The day name is not a school weekday.
    InvalidSchoolDay(String),
    /// The date is not `YYYY-MM-DD` (optionally followed by a time).
    InvalidDate(String),
    /// A required field is absent from an upstream record.
    MissingField(&'static str),
    /// A time interval does not end after it starts.
    EmptyInterval { start: ClockTime, end: ClockTime },
}

impl std::error::Error for ValueTypeError {}

impl fmt::Display for ValueTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidClockTime(msg) => write!(f, "Invalid time of day: {}", msg),
            Self::InvalidSchoolDay(msg) => write!(f, "Invalid school day: {}", msg),
            Self::InvalidDate(msg) => write!(f, "Invalid date: {}", msg),
            Self::MissingField(field) => write!(f, "Missing field: {}", field),
            Self::EmptyInterval { start, end } => {
                write!(f, "Interval {}–{} does not end after it starts", start, end)
            }
        }
    }
}

// ============================================================================
// ClockTime
// ============================================================================

/// A time of day at minute resolution, stored as minutes since midnight.
///
/// Ordering matches the lexicographic ordering of zero-padded `"HH:MM"`
/// strings, which is what the backend's period tables rely on.
///
/// # Example
///
/// ```ignore
/// use schoolday_models::value_types::ClockTime;
///
/// let t: ClockTime = "08:05:59".parse().unwrap();
/// assert_eq!(t.to_string(), "08:05"); // seconds are dropped
/// assert!("24:00".parse::<ClockTime>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// 00:00
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build a time from hour and minute.
    ///
    /// Panics if the values are out of range. Intended for constant tables;
    /// use [`ClockTime::from_hm`] for untrusted input.
    pub const fn at(hour: u8, minute: u8) -> Self {
        assert!(hour < 24 && minute < 60, "clock time out of range");
        Self(hour as u16 * 60 + minute as u16)
    }

    /// Build a time from hour and minute, returning `None` when out of range.
    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    /// Truncate any `chrono` time to minute resolution.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }

    #[inline]
    pub const fn minutes_since_midnight(&self) -> u16 {
        self.0
    }

    /// Parse `"HH:MM"` or `"HH:MM:SS"`; seconds are validated then discarded.
    pub fn parse(value: &str) -> Result<Self, ValueTypeError> {
        let invalid = || ValueTypeError::InvalidClockTime(format!("'{}'", value));
        let trimmed = value.trim();
        let mut parts = trimmed.split(':');

        let hour = parse_component(parts.next(), 23).ok_or_else(invalid)?;
        let minute = parse_component(parts.next(), 59).ok_or_else(invalid)?;
        if let Some(seconds) = parts.next() {
            parse_component(Some(seconds), 59).ok_or_else(invalid)?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

fn parse_component(part: Option<&str>, max: u8) -> Option<u8> {
    let part = part?;
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u8>().ok().filter(|v| *v <= max)
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({})", self)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ClockTime {
    type Error = ValueTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ValueTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Deserializes an optional time, mapping blank or malformed values to `None`.
pub fn deserialize_lenient_clock_time<'de, D>(deserializer: D) -> Result<Option<ClockTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| ClockTime::parse(&s).ok()))
}

// ============================================================================
// SchoolDay
// ============================================================================

/// A school weekday. Saturday and Sunday never carry lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SchoolDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl SchoolDay {
    /// All school days in week order.
    pub const ALL: [SchoolDay; 5] = [
        SchoolDay::Monday,
        SchoolDay::Tuesday,
        SchoolDay::Wednesday,
        SchoolDay::Thursday,
        SchoolDay::Friday,
    ];

    /// Map a calendar weekday, returning `None` on weekends.
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(Self::Monday),
            Weekday::Tue => Some(Self::Tuesday),
            Weekday::Wed => Some(Self::Wednesday),
            Weekday::Thu => Some(Self::Thursday),
            Weekday::Fri => Some(Self::Friday),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    /// School day of a calendar date, `None` on weekends.
    pub fn of_date<D: Datelike>(date: &D) -> Option<Self> {
        Self::from_weekday(date.weekday())
    }

    pub fn to_weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
        }
    }

    /// English day name as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
        }
    }

    pub fn vietnamese_label(&self) -> &'static str {
        day_label(self.to_weekday())
    }
}

impl fmt::Display for SchoolDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchoolDay {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValueTypeError::InvalidSchoolDay(format!("'{}'", s)))
    }
}

/// Vietnamese label for any weekday ("Thứ 2" .. "Chủ nhật").
pub fn day_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => labels::MONDAY,
        Weekday::Tue => labels::TUESDAY,
        Weekday::Wed => labels::WEDNESDAY,
        Weekday::Thu => labels::THURSDAY,
        Weekday::Fri => labels::FRIDAY,
        Weekday::Sat => labels::SATURDAY,
        Weekday::Sun => labels::SUNDAY,
    }
}

// ============================================================================
// Dates
// ============================================================================

/// Parse the `YYYY-MM-DD` prefix of a date or ISO-8601 timestamp.
pub fn parse_date_prefix(value: &str) -> Result<NaiveDate, ValueTypeError> {
    let trimmed = value.trim();
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| ValueTypeError::InvalidDate(format!("'{}'", value)))
}

/// Deserializes a date that upstream may send as a full timestamp.
pub fn deserialize_date_prefix<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_date_prefix(&s).map_err(serde::de::Error::custom)
}
