//! Attendance and leave request models.

use crate::value_types::{ClockTime, deserialize_date_prefix, deserialize_lenient_clock_time};
use chrono::NaiveDate;
use schoolday_core::labels;
use schoolday_core::serde::deserialize_optional_string;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Present => labels::STATUS_PRESENT,
            Self::Absent => labels::STATUS_ABSENT,
            Self::Late => labels::STATUS_LATE,
            Self::Excused => labels::STATUS_EXCUSED,
        }
    }

    /// Badge colour as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Present => "#10B981",
            Self::Absent => "#EF4444",
            Self::Late => "#F59E0B",
            Self::Excused => "#8B5CF6",
        }
    }

    /// Whether the student was physically in class.
    pub fn attended(&self) -> bool {
        matches!(self, Self::Present | Self::Late)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    FullDay,
    Morning,
    Afternoon,
}

impl LeaveType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullDay => labels::LEAVE_FULL_DAY,
            Self::Morning => labels::LEAVE_MORNING,
            Self::Afternoon => labels::LEAVE_AFTERNOON,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "fullname", alias = "className")]
    pub name: String,
}

/// One period's attendance mark for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<NamedRef>,
    #[serde(deserialize_with = "deserialize_date_prefix")]
    pub date: NaiveDate,
    pub period_number: u32,
    #[serde(default, deserialize_with = "deserialize_lenient_clock_time")]
    pub period_start_time: Option<ClockTime>,
    #[serde(default, deserialize_with = "deserialize_lenient_clock_time")]
    pub period_end_time: Option<ClockTime>,
    pub status: AttendanceStatus,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_clock_time")]
    pub check_in: Option<ClockTime>,
    #[serde(default, deserialize_with = "deserialize_lenient_clock_time")]
    pub check_out: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absence_type: Option<LeaveType>,
}

/// A parent's request to excuse a student over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<NamedRef>,
    pub reason: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_date_prefix")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_date_prefix")]
    pub end_date: NaiveDate,
    pub leave_type: LeaveType,
    pub status: LeaveStatus,
}

impl LeaveRequest {
    /// Inclusive date range check.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Gate check-in/check-out times for a student on one day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAttendance {
    pub student_code: String,
    #[serde(default, deserialize_with = "deserialize_lenient_clock_time")]
    pub check_in: Option<ClockTime>,
    #[serde(default, deserialize_with = "deserialize_lenient_clock_time")]
    pub check_out: Option<ClockTime>,
    #[serde(default)]
    pub total_check_ins: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attendance_record_from_upstream() {
        let record: AttendanceRecord = serde_json::from_value(json!({
            "_id": "a1",
            "subject": { "_id": "s", "name": "Toán" },
            "teacher": { "_id": "t", "fullname": "Cô Lan" },
            "date": "2025-05-07T00:00:00.000Z",
            "periodNumber": 2,
            "periodStartTime": "07:50",
            "periodEndTime": "08:35",
            "status": "late",
            "note": "",
            "checkIn": ""
        }))
        .unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 5, 7).unwrap());
        assert_eq!(record.status, AttendanceStatus::Late);
        assert_eq!(record.teacher.unwrap().name, "Cô Lan");
        assert_eq!(record.period_start_time, Some(ClockTime::at(7, 50)));
        assert!(record.note.is_none());
        assert!(record.check_in.is_none());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(AttendanceStatus::Present.label(), "Có mặt");
        assert_eq!(AttendanceStatus::Absent.label(), "Vắng mặt");
        assert_eq!(AttendanceStatus::Late.label(), "Đi muộn");
        assert_eq!(AttendanceStatus::Excused.label(), "Có phép");
        assert_eq!(AttendanceStatus::Excused.color(), "#8B5CF6");
    }

    #[test]
    fn test_leave_type_wire_names() {
        let t: LeaveType = serde_json::from_value(json!("full_day")).unwrap();
        assert_eq!(t, LeaveType::FullDay);
        assert_eq!(t.label(), "Cả ngày");
        assert_eq!(LeaveType::Afternoon.label(), "Buổi chiều");
    }

    #[test]
    fn test_leave_request_covers_inclusive() {
        let request: LeaveRequest = serde_json::from_value(json!({
            "_id": "l1",
            "reason": "sick",
            "startDate": "2025-05-05",
            "endDate": "2025-05-06T23:59:59.000Z",
            "leaveType": "full_day",
            "status": "approved"
        }))
        .unwrap();
        assert!(request.covers(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()));
        assert!(request.covers(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap()));
        assert!(!request.covers(NaiveDate::from_ymd_opt(2025, 5, 7).unwrap()));
    }
}
