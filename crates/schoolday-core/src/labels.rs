//! Vietnamese display strings for the parent portal.
//!
//! Centralized so the schedule, attendance and CLI layers render the same
//! wording. Keep these in sync with what parents see in the mobile app.

// =============================================================================
// Period types
// =============================================================================

/// Regular teaching period
pub const PERIOD_REGULAR: &str = "Tiết học";
/// Lunch
pub const PERIOD_LUNCH: &str = "Ăn trưa";
/// Nap time
pub const PERIOD_NAP: &str = "Ngủ trưa";
/// Short break
pub const PERIOD_BREAK: &str = "Giải lao";
/// Flag salute / assembly
pub const PERIOD_ASSEMBLY: &str = "Chào cờ";
/// Anything else
pub const PERIOD_OTHER: &str = "Khác";

/// Prefix for numbered periods ("Tiết 3").
pub const PERIOD_PREFIX: &str = "Tiết";

// =============================================================================
// Schedule
// =============================================================================

/// Inferred gap between two lessons
pub const BREAK_BETWEEN_LESSONS: &str = "Nghỉ giữa giờ";
/// Description attached to inferred breaks
pub const BREAK_DESCRIPTION: &str = "Nghỉ giải lao giữa các tiết";
/// Shown while a lesson is running
pub const IN_LESSON: &str = "Đang học";
/// Shown when nothing is scheduled right now
pub const NO_LESSON: &str = "Không có tiết học";

// =============================================================================
// Days
// =============================================================================

pub const MONDAY: &str = "Thứ 2";
pub const TUESDAY: &str = "Thứ 3";
pub const WEDNESDAY: &str = "Thứ 4";
pub const THURSDAY: &str = "Thứ 5";
pub const FRIDAY: &str = "Thứ 6";
pub const SATURDAY: &str = "Thứ 7";
pub const SUNDAY: &str = "Chủ nhật";

// =============================================================================
// Attendance
// =============================================================================

pub const STATUS_PRESENT: &str = "Có mặt";
pub const STATUS_ABSENT: &str = "Vắng mặt";
pub const STATUS_LATE: &str = "Đi muộn";
pub const STATUS_EXCUSED: &str = "Có phép";

pub const NOTE_EXCUSED: &str = "Vắng có phép";
pub const NOTE_UNEXCUSED: &str = "Vắng không phép";

pub const CHECK_IN: &str = "Checkin";
pub const CHECK_OUT: &str = "Checkout";

// =============================================================================
// Leave requests
// =============================================================================

pub const LEAVE_FULL_DAY: &str = "Cả ngày";
pub const LEAVE_MORNING: &str = "Buổi sáng";
pub const LEAVE_AFTERNOON: &str = "Buổi chiều";

pub const REASON_SICK: &str = "Con bị ốm";
pub const REASON_FAMILY: &str = "Gia đình có việc bận";
pub const REASON_BEREAVEMENT: &str = "Gia đình có việc hiếu";
pub const REASON_OTHER: &str = "Lý do khác";

/// Format a numbered period label.
pub fn numbered_period(number: u32) -> String {
    format!("{} {}", PERIOD_PREFIX, number)
}
