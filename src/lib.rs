//! # Schoolday
//!
//! Timetable reconciliation for the school parent portal.
//!
//! ## Overview
//!
//! The backend sends two loosely-shaped lists: abstract period definitions
//! ("Tiết 3 runs 08:40–09:25", "lunch at 11:15") and concrete timetable
//! entries (which subject and teacher sit in which slot). This crate turns
//! them into one merged weekly schedule and answers "what is on right now".
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── ingest.rs         # Upstream JSON shapes -> canonical records
//! ├── schedule/         # The scheduling core (pure, synchronous)
//! │   ├── catalog.rs   # Period catalog normalization, fallback tables
//! │   ├── merge.rs     # Period/lesson matching cascade
//! │   ├── special.rs   # Grade-band special lessons
//! │   ├── breaks.rs    # Break inference between slots
//! │   ├── current.rs   # Current lesson resolution
//! │   └── progress.rs  # Day progress, recent school days
//! ├── session.rs        # Explicit session context (parent, active student)
//! ├── fetch_guard.rs    # Drop responses for superseded contexts
//! └── attendance.rs     # Attendance summary and row formatting
//! ```
//!
//! Supporting crates:
//!
//! - `schoolday-core`: `AppError`, display labels, lenient serde helpers
//! - `schoolday-models`: canonical records, IDs, `ClockTime`, `SchoolDay`
//! - `schoolday-config`: environment-driven configuration
//! - `schoolday-observability`: console logging setup
//!
//! ## Example
//!
//! ```ignore
//! use schoolday::ingest::{parse_period_document, parse_timetable_document};
//! use schoolday::schedule::WeekSchedule;
//! use schoolday_config::ScheduleConfig;
//!
//! let defs = parse_period_document(&periods_json)?;
//! let entries = parse_timetable_document(&timetable_json)?;
//! let week = WeekSchedule::build(&defs, &entries, &[], &ScheduleConfig::from_env());
//! if let Some(slot) = week.current_lesson(now) {
//!     println!("{} {}", slot.title(), slot.time_range());
//! }
//! ```

pub mod attendance;
pub mod fetch_guard;
pub mod ingest;
pub mod schedule;
pub mod session;

pub use fetch_guard::{FetchGuard, FetchTicket};
pub use ingest::IngestError;
pub use schedule::{MergedSlot, SlotContent, WeekSchedule};
pub use schoolday_observability::init_basic_console_logging;
pub use session::SessionContext;
