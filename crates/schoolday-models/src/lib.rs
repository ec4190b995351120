//! # Schoolday Models
//!
//! Domain models and upstream DTOs for the parent portal.
//!
//! Canonical records are what the scheduling core works with. The `Upstream*`
//! types mirror the loosely-shaped JSON the school backend returns and are
//! converted into canonical records at the ingestion boundary.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed string identifiers
//! - [`value_types`]: Validated primitives (`ClockTime`, `SchoolDay`)
//! - [`periods`]: Period definitions and the processed catalog entry
//! - [`timetable`]: Concrete lessons with subject and teachers
//! - [`attendance`]: Attendance records and leave requests
//! - [`students`]: Parent, student and class information
//! - [`communication`]: Communication log entries
//!
//! # Example
//!
//! ```ignore
//! use schoolday_models::value_types::{ClockTime, SchoolDay};
//!
//! let start: ClockTime = "07:50".parse().unwrap();
//! assert_eq!(start.to_string(), "07:50");
//! assert_eq!(SchoolDay::Monday.vietnamese_label(), "Thứ 2");
//! ```

pub mod attendance;
pub mod communication;
pub mod ids;
pub mod periods;
pub mod students;
pub mod timetable;
pub mod value_types;

// Re-export commonly used types at crate root for convenience
pub use attendance::{
    AttendanceRecord, AttendanceStatus, LeaveRequest, LeaveStatus, LeaveType, TimeAttendance,
};
pub use communication::CommunicationBook;
pub use periods::{PeriodDefinition, PeriodType, ProcessedPeriod, UpstreamPeriodDefinition};
pub use students::{ClassInfo, GradeLevelRef, Parent, SchoolYearRef, Student};
pub use timetable::{Subject, Teacher, TimeSlot, TimetableEntry, UpstreamTimetableEntry};
pub use value_types::{ClockTime, SchoolDay, ValueTypeError};
