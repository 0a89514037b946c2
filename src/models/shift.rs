//! Shift definition and assignment models.
//!
//! This module defines the ShiftDefinition and ShiftAssignment structs for
//! representing scheduled work patterns and their dated allocation to
//! employees.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a scheduled shift pattern.
///
/// An overnight shift is one whose end time-of-day is earlier than its
/// start time-of-day and therefore spans midnight. `weekend_days` uses
/// weekday indices with 0 = Monday through 6 = Sunday.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ShiftDefinition;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let shift = ShiftDefinition {
///     id: 1,
///     name: "Night A".to_string(),
///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
///     is_overnight: true,
///     break_duration: Decimal::ONE,
///     grace_period_minutes: 15,
///     weekend_days: None,
///     is_active: true,
/// };
/// assert_eq!(shift.duration_hours(), Decimal::from(8));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    /// Unique identifier for the shift.
    pub id: i64,
    /// The shift's display name.
    pub name: String,
    /// Scheduled start time-of-day.
    pub start_time: NaiveTime,
    /// Scheduled end time-of-day.
    pub end_time: NaiveTime,
    /// Whether the shift crosses midnight (end time before start time).
    pub is_overnight: bool,
    /// Default break duration in hours when no break punches exist.
    pub break_duration: Decimal,
    /// Tolerance in minutes after the scheduled start before lateness counts.
    pub grace_period_minutes: i64,
    /// Shift-level weekend override (0 = Monday .. 6 = Sunday).
    pub weekend_days: Option<Vec<u8>>,
    /// Whether the shift is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl ShiftDefinition {
    /// Validates the shift's time range.
    ///
    /// A definition is structurally invalid when its start equals its end,
    /// when it is not flagged overnight but its end precedes its start, or
    /// when it is flagged overnight but does not actually wrap midnight.
    /// Invalid definitions are configuration errors surfaced to the
    /// caller, never silently coerced.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShift`] naming the offending
    /// definition.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_time == self.end_time {
            return Err(EngineError::InvalidShift {
                shift_id: self.id,
                message: "start time equals end time".to_string(),
            });
        }
        if !self.is_overnight && self.end_time < self.start_time {
            return Err(EngineError::InvalidShift {
                shift_id: self.id,
                message: "end time precedes start time but shift is not overnight".to_string(),
            });
        }
        if self.is_overnight && self.end_time > self.start_time {
            return Err(EngineError::InvalidShift {
                shift_id: self.id,
                message: "shift is flagged overnight but does not cross midnight".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the scheduled shift length in hours.
    ///
    /// Overnight shifts gain 24 hours so that a 22:00-06:00 shift reports
    /// 8 hours.
    pub fn duration_hours(&self) -> Decimal {
        let mut minutes = (self.end_time - self.start_time).num_minutes();
        if self.is_overnight {
            minutes += 24 * 60;
        }
        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    }
}

/// Represents a dated allocation of a shift to an employee.
///
/// An assignment with no `end_date` is open-ended. When multiple active
/// assignments cover the same date, the resolver picks the one with the
/// latest `start_date`, tie-broken by highest id (most recently created
/// wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// Unique identifier for the assignment.
    pub id: i64,
    /// The employee the shift is assigned to.
    pub employee_id: i64,
    /// The assigned shift.
    pub shift_id: i64,
    /// First date the assignment applies to (inclusive).
    pub start_date: NaiveDate,
    /// Last date the assignment applies to (inclusive); open-ended if None.
    pub end_date: Option<NaiveDate>,
    /// Whether the assignment is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl ShiftAssignment {
    /// Returns true if this assignment covers the given date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.is_none_or(|end| date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn day_shift() -> ShiftDefinition {
        ShiftDefinition {
            id: 1,
            name: "Day".to_string(),
            start_time: time(8, 0),
            end_time: time(17, 0),
            is_overnight: false,
            break_duration: Decimal::ONE,
            grace_period_minutes: 15,
            weekend_days: None,
            is_active: true,
        }
    }

    /// SH-001: day shift duration
    #[test]
    fn test_day_shift_duration() {
        assert_eq!(day_shift().duration_hours(), Decimal::from(9));
    }

    /// SH-002: overnight shift duration gains 24 hours
    #[test]
    fn test_overnight_shift_duration() {
        let shift = ShiftDefinition {
            id: 2,
            name: "Night".to_string(),
            start_time: time(22, 0),
            end_time: time(6, 0),
            is_overnight: true,
            break_duration: Decimal::ONE,
            grace_period_minutes: 10,
            weekend_days: None,
            is_active: true,
        };
        assert_eq!(shift.duration_hours(), Decimal::from(8));
    }

    /// SH-003: fractional duration
    #[test]
    fn test_fractional_duration() {
        let mut shift = day_shift();
        shift.end_time = time(16, 30);
        assert_eq!(shift.duration_hours(), Decimal::new(85, 1)); // 8.5
    }

    /// SH-004: start equals end is invalid
    #[test]
    fn test_validate_rejects_zero_length_shift() {
        let mut shift = day_shift();
        shift.end_time = shift.start_time;

        let result = shift.validate();
        assert!(matches!(
            result,
            Err(EngineError::InvalidShift { shift_id: 1, .. })
        ));
    }

    /// SH-005: reversed range without overnight flag is invalid
    #[test]
    fn test_validate_rejects_reversed_non_overnight_shift() {
        let mut shift = day_shift();
        shift.start_time = time(22, 0);
        shift.end_time = time(6, 0);

        let result = shift.validate();
        assert!(matches!(result, Err(EngineError::InvalidShift { .. })));
    }

    /// SH-006: overnight flag without midnight crossing is invalid
    #[test]
    fn test_validate_rejects_overnight_flag_on_forward_range() {
        let mut shift = day_shift();
        shift.is_overnight = true;

        let result = shift.validate();
        assert!(matches!(result, Err(EngineError::InvalidShift { .. })));
    }

    #[test]
    fn test_validate_accepts_well_formed_shifts() {
        assert!(day_shift().validate().is_ok());

        let night = ShiftDefinition {
            id: 2,
            name: "Night".to_string(),
            start_time: time(22, 0),
            end_time: time(6, 0),
            is_overnight: true,
            break_duration: Decimal::ONE,
            grace_period_minutes: 10,
            weekend_days: None,
            is_active: true,
        };
        assert!(night.validate().is_ok());
    }

    #[test]
    fn test_assignment_covers_inclusive_range() {
        let assignment = ShiftAssignment {
            id: 1,
            employee_id: 1,
            shift_id: 1,
            start_date: date("2025-03-01"),
            end_date: Some(date("2025-03-31")),
            is_active: true,
        };

        assert!(assignment.covers(date("2025-03-01")));
        assert!(assignment.covers(date("2025-03-15")));
        assert!(assignment.covers(date("2025-03-31")));
        assert!(!assignment.covers(date("2025-02-28")));
        assert!(!assignment.covers(date("2025-04-01")));
    }

    #[test]
    fn test_open_ended_assignment_covers_any_later_date() {
        let assignment = ShiftAssignment {
            id: 2,
            employee_id: 1,
            shift_id: 1,
            start_date: date("2025-01-01"),
            end_date: None,
            is_active: true,
        };

        assert!(assignment.covers(date("2030-06-01")));
        assert!(!assignment.covers(date("2024-12-31")));
    }

    #[test]
    fn test_shift_serialization_round_trip() {
        let shift = day_shift();
        let json = serde_json::to_string(&shift).unwrap();
        let deserialized: ShiftDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(shift, deserialized);
    }

    #[test]
    fn test_shift_deserialization() {
        let json = r#"{
            "id": 3,
            "name": "Evening",
            "start_time": "14:00:00",
            "end_time": "22:00:00",
            "is_overnight": false,
            "break_duration": "0.5",
            "grace_period_minutes": 10,
            "weekend_days": [5, 6]
        }"#;

        let shift: ShiftDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(shift.name, "Evening");
        assert_eq!(shift.break_duration, Decimal::new(5, 1));
        assert_eq!(shift.weekend_days, Some(vec![5, 6]));
        assert!(shift.is_active);
    }
}
