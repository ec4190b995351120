//! Ingestion boundary.
//!
//! Every upstream document shape the portal accepts is mapped here into the
//! canonical records of [`schoolday_models`], so the scheduling core never
//! branches on shape. A single bad record is logged and skipped; only a
//! document that is not JSON, or not any accepted envelope, is an error.

use schoolday_core::AppError;
use schoolday_models::{
    ClassInfo, PeriodDefinition, TimetableEntry, UpstreamPeriodDefinition, UpstreamTimetableEntry,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
}

impl IngestError {
    /// Lift into the application error with [`ErrorKind::InvalidPayload`](schoolday_core::ErrorKind).
    pub fn into_app_error(self) -> AppError {
        AppError::invalid_payload(self)
    }
}

const PERIOD_KEYS: [&str; 2] = ["data", "periods"];
const TIMETABLE_KEYS: [&str; 3] = ["data", "timetable", "entries"];

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Unwrap a bare array or an object holding the array under one of `keys`.
///
/// Envelopes may nest one level, as in `{ "data": { "periods": [...] } }`.
fn unwrap_records(value: Value, keys: &[&str], expected: &'static str) -> Result<Vec<Value>, IngestError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            for key in keys {
                if let Some(inner) = map.remove(*key) {
                    return match inner {
                        Value::Array(items) => Ok(items),
                        nested @ Value::Object(_) => unwrap_records(nested, keys, expected),
                        other => Err(IngestError::UnexpectedShape {
                            expected,
                            found: kind_of(&other),
                        }),
                    };
                }
            }
            Err(IngestError::UnexpectedShape {
                expected,
                found: "an object without a record list",
            })
        }
        other => Err(IngestError::UnexpectedShape {
            expected,
            found: kind_of(&other),
        }),
    }
}

/// Convert raw records, skipping the ones that fail with a warning.
fn convert_all<R, T, E>(
    records: Vec<Value>,
    what: &'static str,
    display_id: impl Fn(&R) -> String,
) -> Vec<T>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = E>,
    E: std::fmt::Display,
{
    let total = records.len();
    let converted: Vec<T> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let raw: R = match serde_json::from_value(value) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed {what} record");
                    return None;
                }
            };
            let id = display_id(&raw);
            match T::try_from(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(index, id = %id, error = %e, "skipping unusable {what} record");
                    None
                }
            }
        })
        .collect();
    debug!(total, kept = converted.len(), "{what} records ingested");
    converted
}

pub fn period_definitions_from_value(value: Value) -> Result<Vec<PeriodDefinition>, IngestError> {
    let records = unwrap_records(value, &PERIOD_KEYS, "a period list")?;
    Ok(convert_all(records, "period", |raw: &UpstreamPeriodDefinition| {
        raw.display_id().to_string()
    }))
}

pub fn timetable_entries_from_value(value: Value) -> Result<Vec<TimetableEntry>, IngestError> {
    let records = unwrap_records(value, &TIMETABLE_KEYS, "a timetable list")?;
    Ok(convert_all(records, "timetable", |raw: &UpstreamTimetableEntry| {
        raw.display_id().to_string()
    }))
}

/// Parse a period definition document.
#[instrument(skip(json), fields(bytes = json.len()))]
pub fn parse_period_document(json: &str) -> Result<Vec<PeriodDefinition>, IngestError> {
    period_definitions_from_value(serde_json::from_str(json)?)
}

/// Parse a timetable document.
#[instrument(skip(json), fields(bytes = json.len()))]
pub fn parse_timetable_document(json: &str) -> Result<Vec<TimetableEntry>, IngestError> {
    timetable_entries_from_value(serde_json::from_str(json)?)
}

/// Parse a class document, bare or under `data`.
pub fn parse_class_document(json: &str) -> Result<ClassInfo, IngestError> {
    let value: Value = serde_json::from_str(json)?;
    let value = match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    if !value.is_object() {
        return Err(IngestError::UnexpectedShape {
            expected: "a class object",
            found: kind_of(&value),
        });
    }
    Ok(serde_json::from_value(value)?)
}
