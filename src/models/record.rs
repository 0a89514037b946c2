//! Attendance record model.
//!
//! This module contains the [`AttendanceRecord`] type produced by the
//! engine for each employee-day, along with its status and shift-type
//! classifications.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The classification label for an attendance record.
///
/// This is a pure classification recomputed from scratch on every engine
/// run, not a workflow state; there are no transitions between statuses.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceStatus;
///
/// let status = AttendanceStatus::Late;
/// assert_eq!(serde_json::to_string(&status).unwrap(), "\"late\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Employee attended and worked the expected hours.
    Present,
    /// Employee did not clock in on an expected workday.
    Absent,
    /// Employee clocked in after the grace period.
    Late,
    /// Employee worked less than half the standard daily hours.
    HalfDay,
    /// The day could not be fully classified: no resolvable shift, or a
    /// check-in without a matching check-out awaiting manual resolution.
    Pending,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Late => write!(f, "late"),
            AttendanceStatus::HalfDay => write!(f, "half-day"),
            AttendanceStatus::Pending => write!(f, "pending"),
        }
    }
}

/// Day or night classification of the worked shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// A daytime shift.
    Day,
    /// A night shift (overnight or starting in the evening).
    Night,
}

/// The attendance record derived for one employee on one date.
///
/// Records are recomputable artifacts, not sources of truth: re-running
/// the engine with identical inputs produces an identical record. The
/// three category overtime fields are mutually exclusive (a day is
/// holiday, weekend, or weekday, never more than one), and
/// `night_overtime_hours` is a view into the populated category, never
/// exceeding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: i64,
    /// The attendance date. For overnight shifts this is the day the
    /// shift started, even when the check-out fell on the next day.
    pub date: NaiveDate,
    /// The shift the day was classified against, if one resolved.
    pub shift_id: Option<i64>,
    /// The overtime rule applied, if one was selected.
    pub rule_id: Option<i64>,
    /// Normalized check-in timestamp.
    pub check_in: Option<NaiveDateTime>,
    /// Normalized check-out timestamp.
    pub check_out: Option<NaiveDateTime>,
    /// The derived status classification.
    pub status: AttendanceStatus,
    /// Whether the date was a holiday for this employee.
    pub is_holiday: bool,
    /// Whether the date was a weekend day for this employee.
    pub is_weekend: bool,
    /// Hours worked, excluding breaks.
    pub work_hours: Decimal,
    /// Break time in hours, detected or taken from the shift default.
    pub break_duration: Decimal,
    /// Total hours between check-in and check-out, including breaks.
    pub total_duration: Decimal,
    /// Minutes late past the shift start plus grace period.
    pub late_minutes: i64,
    /// Day or night classification of the shift.
    pub shift_type: ShiftType,
    /// Weekday overtime hours.
    pub regular_overtime_hours: Decimal,
    /// Weekend overtime hours.
    pub weekend_overtime_hours: Decimal,
    /// Holiday overtime hours.
    pub holiday_overtime_hours: Decimal,
    /// Overtime hours falling inside the rule's night window; a sub-view
    /// of the populated category, never additive to it.
    pub night_overtime_hours: Decimal,
    /// Sum of the three category overtime fields.
    pub overtime_hours: Decimal,
    /// The selected rule's multiplier for the day's class, surfaced for
    /// the payroll caller; 1.0 when no rule applied.
    pub overtime_rate: Decimal,
}

impl AttendanceRecord {
    /// Builds an empty record for an employee-day with the given status.
    ///
    /// Used for absent and pending days where no durations exist.
    pub fn empty(employee_id: i64, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            employee_id,
            date,
            shift_id: None,
            rule_id: None,
            check_in: None,
            check_out: None,
            status,
            is_holiday: false,
            is_weekend: false,
            work_hours: Decimal::ZERO,
            break_duration: Decimal::ZERO,
            total_duration: Decimal::ZERO,
            late_minutes: 0,
            shift_type: ShiftType::Day,
            regular_overtime_hours: Decimal::ZERO,
            weekend_overtime_hours: Decimal::ZERO,
            holiday_overtime_hours: Decimal::ZERO,
            night_overtime_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            overtime_rate: Decimal::ONE,
        }
    }
}
