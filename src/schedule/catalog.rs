//! Period catalog normalization.
//!
//! Turns the raw, possibly duplicated list of period definitions for a school
//! year into the ordered catalog every screen renders: regular periods
//! renumbered 1..N by start time, special periods deduplicated by number.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use schoolday_core::labels;
use schoolday_models::{ClockTime, PeriodDefinition, PeriodType, ProcessedPeriod};
use tracing::{debug, instrument, warn};

pub use schoolday_config::FallbackCatalog;

/// `(start, end)` of each fallback period, in order.
pub type FallbackTable = [(ClockTime, ClockTime)];

/// Ten periods spanning 07:00 to 17:15.
pub const STANDARD_PERIODS: [(ClockTime, ClockTime); 10] = [
    (ClockTime::at(7, 0), ClockTime::at(7, 45)),
    (ClockTime::at(7, 50), ClockTime::at(8, 35)),
    (ClockTime::at(8, 40), ClockTime::at(9, 25)),
    (ClockTime::at(9, 40), ClockTime::at(10, 25)),
    (ClockTime::at(10, 30), ClockTime::at(11, 15)),
    (ClockTime::at(13, 0), ClockTime::at(13, 45)),
    (ClockTime::at(13, 50), ClockTime::at(14, 35)),
    (ClockTime::at(14, 40), ClockTime::at(15, 25)),
    (ClockTime::at(15, 40), ClockTime::at(16, 25)),
    (ClockTime::at(16, 30), ClockTime::at(17, 15)),
];

/// Nine periods spanning 08:00 to 16:15.
pub const COMPACT_PERIODS: [(ClockTime, ClockTime); 9] = [
    (ClockTime::at(8, 0), ClockTime::at(8, 45)),
    (ClockTime::at(8, 50), ClockTime::at(9, 35)),
    (ClockTime::at(9, 40), ClockTime::at(10, 25)),
    (ClockTime::at(10, 30), ClockTime::at(11, 15)),
    (ClockTime::at(11, 20), ClockTime::at(12, 5)),
    (ClockTime::at(13, 0), ClockTime::at(13, 45)),
    (ClockTime::at(13, 50), ClockTime::at(14, 35)),
    (ClockTime::at(14, 40), ClockTime::at(15, 25)),
    (ClockTime::at(15, 30), ClockTime::at(16, 15)),
];

pub fn fallback_table(catalog: FallbackCatalog) -> &'static FallbackTable {
    match catalog {
        FallbackCatalog::Standard => &STANDARD_PERIODS,
        FallbackCatalog::Compact => &COMPACT_PERIODS,
    }
}

/// The fallback table as regular period definitions numbered from 1.
pub fn fallback_definitions(catalog: FallbackCatalog) -> Vec<PeriodDefinition> {
    (1u32..)
        .zip(fallback_table(catalog))
        .map(|(number, &(start, end))| {
            PeriodDefinition::new(number, start, end, PeriodType::Regular)
                .with_label(labels::numbered_period(number))
        })
        .collect()
}

/// [`normalize_with`] using the standard fallback table.
pub fn normalize(defs: &[PeriodDefinition]) -> Vec<ProcessedPeriod> {
    normalize_with(defs, FallbackCatalog::Standard)
}

/// Build the processed catalog.
///
/// Invalid definitions (`start >= end`) are skipped. When nothing usable
/// remains the chosen fallback table is returned instead, so the result is
/// never empty. The output does not depend on the order of `defs`.
#[instrument(skip(defs), fields(definitions = defs.len()))]
pub fn normalize_with(defs: &[PeriodDefinition], fallback: FallbackCatalog) -> Vec<ProcessedPeriod> {
    let valid: Vec<&PeriodDefinition> = defs
        .iter()
        .filter(|def| {
            if !def.is_valid() {
                warn!(
                    period_number = def.period_number,
                    start = %def.start_time,
                    end = %def.end_time,
                    "skipping period definition with empty interval"
                );
            }
            def.is_valid()
        })
        .collect();

    if valid.is_empty() {
        debug!(%fallback, "no usable period definitions, using fallback catalog");
        return fallback_table(fallback)
            .iter()
            .zip(1u32..)
            .map(|(&(start, end), number)| regular(number, number, start, end))
            .collect();
    }

    let (mut regulars, specials): (Vec<&PeriodDefinition>, Vec<&PeriodDefinition>) =
        valid.into_iter().partition(|def| def.is_regular());

    regulars.sort_by_key(|def| regular_order(def));

    let mut by_number: BTreeMap<u32, &PeriodDefinition> = BTreeMap::new();
    for def in specials {
        let replace = by_number
            .get(&def.period_number)
            .is_none_or(|kept| special_preference(def) < special_preference(kept));
        if replace {
            by_number.insert(def.period_number, def);
        } else {
            debug!(period_number = def.period_number, "dropping duplicate special period");
        }
    }

    let mut processed: Vec<ProcessedPeriod> = regulars
        .iter()
        .zip(1u32..)
        .map(|(def, display)| regular(display, def.period_number, def.start_time, def.end_time))
        .chain(by_number.values().map(|def| special(def)))
        .collect();

    processed.sort_by_key(|p| p.start_time);
    processed
}

fn regular(display: u32, source: u32, start: ClockTime, end: ClockTime) -> ProcessedPeriod {
    ProcessedPeriod {
        display_number: display,
        source_number: source,
        label: labels::numbered_period(display),
        start_time: start,
        end_time: end,
        is_regular: true,
        source_type: PeriodType::Regular,
    }
}

fn special(def: &PeriodDefinition) -> ProcessedPeriod {
    ProcessedPeriod {
        display_number: def.period_number,
        source_number: def.period_number,
        label: def
            .non_empty_label()
            .map(str::to_string)
            .unwrap_or_else(|| def.period_type.default_label().to_string()),
        start_time: def.start_time,
        end_time: def.end_time,
        is_regular: false,
        source_type: def.period_type,
    }
}

fn regular_order(def: &PeriodDefinition) -> (ClockTime, ClockTime, u32) {
    (def.start_time, def.end_time, def.period_number)
}

/// Smaller wins: labelled first, then earlier start, earlier end.
fn special_preference(def: &PeriodDefinition) -> (Reverse<bool>, ClockTime, ClockTime, &str, PeriodType) {
    let label = def.non_empty_label();
    (
        Reverse(label.is_some()),
        def.start_time,
        def.end_time,
        label.unwrap_or(""),
        def.period_type,
    )
}

pub fn regular_periods(periods: &[ProcessedPeriod]) -> impl Iterator<Item = &ProcessedPeriod> {
    periods.iter().filter(|p| p.is_regular)
}

pub fn special_periods(periods: &[ProcessedPeriod]) -> impl Iterator<Item = &ProcessedPeriod> {
    periods.iter().filter(|p| !p.is_regular)
}

pub fn find_period(
    periods: &[ProcessedPeriod],
    display_number: u32,
    is_regular: bool,
) -> Option<&ProcessedPeriod> {
    periods
        .iter()
        .find(|p| p.display_number == display_number && p.is_regular == is_regular)
}

fn sorted_regular_definitions(defs: &[PeriodDefinition]) -> Vec<&PeriodDefinition> {
    let mut regulars: Vec<&PeriodDefinition> =
        defs.iter().filter(|d| d.is_regular() && d.is_valid()).collect();
    regulars.sort_by_key(|def| regular_order(def));
    regulars
}

/// The "Tiết N" number shown for an upstream `periodNumber`.
///
/// Returns `db_number` unchanged when no regular definition carries it.
pub fn display_period_number(defs: &[PeriodDefinition], db_number: u32) -> u32 {
    sorted_regular_definitions(defs)
        .iter()
        .position(|def| def.period_number == db_number)
        .and_then(|index| u32::try_from(index + 1).ok())
        .unwrap_or(db_number)
}

/// Inverse of [`display_period_number`]; out-of-range input is returned unchanged.
pub fn db_period_number(defs: &[PeriodDefinition], display_number: u32) -> u32 {
    let regulars = sorted_regular_definitions(defs);
    display_number
        .checked_sub(1)
        .and_then(|index| regulars.get(index as usize))
        .map(|def| def.period_number)
        .unwrap_or(display_number)
}
