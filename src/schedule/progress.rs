//! School-day progress and recent-day helpers for the home screen.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use schoolday_models::{ClockTime, CommunicationBook, SchoolDay};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl DayWindow {
    /// Window the progress bar spans.
    pub const PROGRESS: DayWindow = DayWindow {
        start: ClockTime::at(8, 0),
        end: ClockTime::at(16, 15),
    };
}

/// Overall bounds of a school day and the part of it the timeline shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySchedule {
    pub start: ClockTime,
    pub end: ClockTime,
    pub display_start: ClockTime,
    pub display_end: ClockTime,
}

pub const DAY_SCHEDULE: DaySchedule = DaySchedule {
    start: ClockTime::at(7, 0),
    end: ClockTime::at(17, 15),
    display_start: ClockTime::at(7, 0),
    display_end: ClockTime::at(16, 15),
};

/// Percentage (0 to 100) of `window` elapsed at `now`, with second precision.
pub fn day_progress(now: NaiveDateTime, window: DayWindow) -> f64 {
    let seconds = |t: ClockTime| f64::from(t.minutes_since_midnight()) * 60.0;
    let start = seconds(window.start);
    let end = seconds(window.end);
    let current = f64::from(now.num_seconds_from_midnight());

    if current <= start || end <= start {
        return 0.0;
    }
    if current >= end {
        return 100.0;
    }
    ((current - start) / (end - start) * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentDay {
    pub date: NaiveDate,
    /// `"07/5"`: two-digit day, unpadded month.
    pub display: String,
}

/// The `count` most recent school days ending at `today`, newest first.
pub fn recent_school_days(today: NaiveDate, count: usize) -> Vec<RecentDay> {
    let mut days = Vec::with_capacity(count);
    let mut date = today;
    while days.len() < count {
        if SchoolDay::of_date(&date).is_some() {
            days.push(RecentDay {
                date,
                display: format!("{:02}/{}", date.day(), date.month()),
            });
        }
        match date.checked_sub_signed(Duration::days(1)) {
            Some(previous) => date = previous,
            None => break,
        }
    }
    days
}

/// Distinct dates that have a communication entry, newest first.
pub fn communication_dates(books: &[CommunicationBook]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = books.iter().map(|b| b.date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();
    dates
}
