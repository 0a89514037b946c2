//! Employee model.
//!
//! This module defines the Employee struct used to resolve shifts,
//! weekend-day overrides, and overtime eligibility during record
//! computation.

use serde::{Deserialize, Serialize};

/// Represents an employee whose attendance is computed by the engine.
///
/// Weekend days are encoded as weekday indices with 0 = Monday through
/// 6 = Sunday. An employee-level `weekend_days` override takes precedence
/// over the shift-level set and the system default.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Employee;
///
/// let employee = Employee {
///     id: 1,
///     name: "Amira Hassan".to_string(),
///     department: Some("Production".to_string()),
///     current_shift_id: Some(2),
///     weekend_days: Some(vec![4, 5]),
///     eligible_for_weekday_overtime: true,
///     eligible_for_weekend_overtime: true,
///     eligible_for_holiday_overtime: false,
///     is_active: true,
/// };
/// assert!(employee.weekend_days.unwrap().contains(&4));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: i64,
    /// The employee's display name.
    pub name: String,
    /// The department the employee belongs to, if any.
    pub department: Option<String>,
    /// Fallback shift when no dated assignment covers a date.
    pub current_shift_id: Option<i64>,
    /// Employee-level weekend override (0 = Monday .. 6 = Sunday).
    pub weekend_days: Option<Vec<u8>>,
    /// Whether weekday overtime may be credited to this employee.
    #[serde(default = "default_true")]
    pub eligible_for_weekday_overtime: bool,
    /// Whether weekend overtime may be credited to this employee.
    #[serde(default = "default_true")]
    pub eligible_for_weekend_overtime: bool,
    /// Whether holiday overtime may be credited to this employee.
    #[serde(default = "default_true")]
    pub eligible_for_holiday_overtime: bool,
    /// Whether the employee is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
