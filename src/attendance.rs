//! Attendance and leave formatting.
//!
//! Builds the per-day attendance summary and the ordered list of rows the
//! attendance screen shows: gate check-in, each period, gate check-out.

use chrono::NaiveDate;
use schoolday_core::labels;
use schoolday_models::{
    AttendanceRecord, AttendanceStatus, ClockTime, LeaveRequest, PeriodDefinition, ProcessedPeriod,
};
use serde::Serialize;

use crate::schedule::catalog::{display_period_number, normalize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub date: NaiveDate,
    pub total_periods: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
    pub attendance_rate: u32,
}

impl AttendanceSummary {
    pub fn for_date(date: NaiveDate, records: &[AttendanceRecord]) -> Self {
        let count = |status: AttendanceStatus| records.iter().filter(|r| r.status == status).count();
        Self {
            date,
            total_periods: records.len(),
            present: count(AttendanceStatus::Present),
            absent: count(AttendanceStatus::Absent),
            late: count(AttendanceStatus::Late),
            excused: count(AttendanceStatus::Excused),
            attendance_rate: attendance_rate(records),
        }
    }
}

/// Share of records marked present, as a rounded percentage. `0` for no records.
pub fn attendance_rate(records: &[AttendanceRecord]) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let present = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    // present <= len, so the rounded value is at most 100.
    ((present as f64 / records.len() as f64) * 100.0).round() as u32
}

/// Human-readable leave reason, with the free-text description for "other".
pub fn format_leave_reason(request: &LeaveRequest) -> String {
    let reason = match request.reason.as_str() {
        "sick" => labels::REASON_SICK,
        "family" => labels::REASON_FAMILY,
        "bereavement" => labels::REASON_BEREAVEMENT,
        "other" => labels::REASON_OTHER,
        other => other,
    };
    match request.description.as_deref() {
        Some(description) if request.reason == "other" => format!("{reason}: {description}"),
        _ => reason.to_string(),
    }
}

/// First leave request whose date range includes `date`.
pub fn leave_request_for_date(requests: &[LeaveRequest], date: NaiveDate) -> Option<&LeaveRequest> {
    requests.iter().find(|r| r.covers(date))
}

/// `"Tiết N"` for a record, renumbered through the period definitions.
pub fn attendance_period_label(record: &AttendanceRecord, defs: &[PeriodDefinition]) -> String {
    labels::numbered_period(display_period_number(defs, record.period_number))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    CheckIn,
    Period,
    Special,
    CheckOut,
}

/// Status column of an attendance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Marked(AttendanceStatus),
    Special,
}

impl Serialize for ItemStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Marked(status) => status.serialize(serializer),
            Self::Special => serializer.serialize_str("special"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceItem {
    pub kind: ItemKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
    pub sort_order: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<ProcessedPeriod>,
}

const CHECK_IN_ORDER: u32 = 0;
const PERIOD_ORDER_BASE: u32 = 1000;
const CHECK_OUT_ORDER: u32 = 9999;

/// Rows for one student's day.
///
/// Check-in comes first and check-out last. In between, every regular period
/// that has a record and every special period appear in catalog order.
pub fn attendance_items(
    records: &[AttendanceRecord],
    check_in: Option<ClockTime>,
    check_out: Option<ClockTime>,
    defs: &[PeriodDefinition],
) -> Vec<AttendanceItem> {
    let mut items = Vec::new();

    if let Some(time) = check_in {
        items.push(gate_item(ItemKind::CheckIn, labels::CHECK_IN, time, CHECK_IN_ORDER));
    }

    let mut sorted: Vec<&AttendanceRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.period_number);

    for period in normalize(defs) {
        let sort_order = PERIOD_ORDER_BASE.saturating_add(period.display_number);
        if period.is_regular {
            let Some(record) = sorted
                .iter()
                .find(|r| display_period_number(defs, r.period_number) == period.display_number)
            else {
                continue;
            };
            let time = record
                .status
                .attended()
                .then(|| record.period_start_time.map(|t| t.to_string()))
                .flatten();
            let note = match record.status {
                AttendanceStatus::Excused => Some(labels::NOTE_EXCUSED),
                AttendanceStatus::Absent => Some(labels::NOTE_UNEXCUSED),
                AttendanceStatus::Present | AttendanceStatus::Late => None,
            };
            items.push(AttendanceItem {
                kind: ItemKind::Period,
                label: period.label.clone(),
                time,
                status: ItemStatus::Marked(record.status),
                note,
                sort_order,
                period: Some(period),
            });
        } else {
            items.push(AttendanceItem {
                kind: ItemKind::Special,
                label: period.label.clone(),
                time: Some(period.time_range()),
                status: ItemStatus::Special,
                note: None,
                sort_order,
                period: Some(period),
            });
        }
    }

    if let Some(time) = check_out {
        items.push(gate_item(ItemKind::CheckOut, labels::CHECK_OUT, time, CHECK_OUT_ORDER));
    }

    items.sort_by_key(|item| item.sort_order);
    items
}

fn gate_item(kind: ItemKind, label: &str, time: ClockTime, sort_order: u32) -> AttendanceItem {
    AttendanceItem {
        kind,
        label: label.to_string(),
        time: Some(time.to_string()),
        status: ItemStatus::Marked(AttendanceStatus::Present),
        note: None,
        sort_order,
        period: None,
    }
}
