use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDateTime};
use schoolday::ingest::{parse_class_document, parse_period_document, parse_timetable_document};
use schoolday::schedule::{SpecialLesson, special_lessons_for_grade};
use schoolday_models::{PeriodDefinition, TimetableEntry};
use tracing::{info, warn};

/// Period definitions from `path`.
///
/// No path, or a path that does not exist, yields an empty list so the
/// schedule falls back to the built-in catalog.
pub fn load_periods(path: Option<&Path>) -> Result<Vec<PeriodDefinition>> {
    let Some(path) = path else {
        info!("no period file given, using fallback catalog");
        return Ok(Vec::new());
    };
    if !path.exists() {
        warn!(path = %path.display(), "period file not found, using fallback catalog");
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read period file {}", path.display()))?;
    let defs = parse_period_document(&json)
        .with_context(|| format!("Failed to parse period file {}", path.display()))?;
    info!(path = %path.display(), count = defs.len(), "loaded period definitions");
    Ok(defs)
}

pub fn load_timetable(path: &Path) -> Result<Vec<TimetableEntry>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read timetable file {}", path.display()))?;
    let entries = parse_timetable_document(&json)
        .with_context(|| format!("Failed to parse timetable file {}", path.display()))?;
    info!(path = %path.display(), count = entries.len(), "loaded timetable entries");
    Ok(entries)
}

/// Special lessons for an explicit grade, else the grade of a class document.
pub fn load_specials(grade: Option<u8>, class_file: Option<&Path>) -> Result<Vec<SpecialLesson>> {
    let grade = match (grade, class_file) {
        (Some(grade), _) => Some(grade),
        (None, Some(path)) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read class file {}", path.display()))?;
            let class = parse_class_document(&json)
                .with_context(|| format!("Failed to parse class file {}", path.display()))?;
            class.grade_level()
        }
        (None, None) => None,
    };
    Ok(grade.map(special_lessons_for_grade).unwrap_or_default())
}

/// `--at` value, or the local time when absent.
pub fn parse_at(value: Option<&str>) -> Result<NaiveDateTime> {
    let Some(value) = value else {
        return Ok(Local::now().naive_local());
    };
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(value.trim(), format) {
            return Ok(at);
        }
    }
    bail!("Invalid --at value '{value}', expected YYYY-MM-DD HH:MM")
}
