//! Reference-data snapshot types.
//!
//! This module contains the system defaults and the immutable snapshot of
//! employees, shifts, assignments, rules, and holidays that every
//! computation reads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Employee, Holiday, OvertimeRule, PunchEvent, ShiftAssignment, ShiftDefinition};

/// System-wide defaults applied when no employee- or shift-level setting
/// overrides them.
///
/// Weekend days use weekday indices with 0 = Monday through 6 = Sunday;
/// the default set is Saturday and Sunday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDefaults {
    /// Default weekend-day set (0 = Monday .. 6 = Sunday).
    #[serde(default = "default_weekend_days")]
    pub weekend_days: Vec<u8>,
    /// Standard daily work hours when neither rule nor shift supplies one.
    #[serde(default = "default_standard_hours")]
    pub standard_daily_hours: Decimal,
    /// Lower clamp for detected break durations, in minutes.
    #[serde(default = "default_minimum_break")]
    pub minimum_break_minutes: i64,
    /// Upper clamp for detected break durations, in minutes.
    #[serde(default = "default_maximum_break")]
    pub maximum_break_minutes: i64,
    /// Shift applied when neither an assignment nor the employee's own
    /// fallback shift resolves.
    #[serde(default)]
    pub default_shift_id: Option<i64>,
    /// How far before the scheduled shift start punches still qualify.
    #[serde(default = "default_lookback")]
    pub punch_lookback_minutes: i64,
    /// How far after the scheduled shift end punches still qualify.
    #[serde(default = "default_trailing")]
    pub punch_trailing_minutes: i64,
    /// Same-direction punches closer together than this collapse into one.
    #[serde(default = "default_duplicate_window")]
    pub duplicate_punch_seconds: i64,
}

fn default_weekend_days() -> Vec<u8> {
    vec![5, 6]
}

fn default_standard_hours() -> Decimal {
    Decimal::from(8)
}

fn default_minimum_break() -> i64 {
    15
}

fn default_maximum_break() -> i64 {
    300
}

fn default_lookback() -> i64 {
    120
}

fn default_trailing() -> i64 {
    240
}

fn default_duplicate_window() -> i64 {
    120
}

impl Default for SystemDefaults {
    fn default() -> Self {
        Self {
            weekend_days: default_weekend_days(),
            standard_daily_hours: default_standard_hours(),
            minimum_break_minutes: default_minimum_break(),
            maximum_break_minutes: default_maximum_break(),
            default_shift_id: None,
            punch_lookback_minutes: default_lookback(),
            punch_trailing_minutes: default_trailing(),
            duplicate_punch_seconds: default_duplicate_window(),
        }
    }
}

/// The immutable reference-data snapshot a computation reads.
///
/// Holds everything the engine needs besides the punches themselves.
/// Snapshots are plain values: the caller fetches them once and may share
/// one snapshot across any number of concurrent employee-day
/// computations.
///
/// # Example
///
/// ```
/// use attendance_engine::config::{ReferenceData, SystemDefaults};
///
/// let snapshot = ReferenceData::new(
///     vec![],
///     vec![],
///     vec![],
///     vec![],
///     vec![],
///     SystemDefaults::default(),
/// );
/// assert!(snapshot.shift(1).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// All known employees.
    pub employees: Vec<Employee>,
    /// All shift definitions.
    pub shifts: Vec<ShiftDefinition>,
    /// All dated shift assignments.
    pub assignments: Vec<ShiftAssignment>,
    /// All overtime rules.
    pub rules: Vec<OvertimeRule>,
    /// All holiday calendar entries.
    pub holidays: Vec<Holiday>,
    /// System-wide defaults.
    pub defaults: SystemDefaults,
}

impl ReferenceData {
    /// Creates a snapshot from its component parts.
    pub fn new(
        employees: Vec<Employee>,
        shifts: Vec<ShiftDefinition>,
        assignments: Vec<ShiftAssignment>,
        rules: Vec<OvertimeRule>,
        holidays: Vec<Holiday>,
        defaults: SystemDefaults,
    ) -> Self {
        Self {
            employees,
            shifts,
            assignments,
            rules,
            holidays,
            defaults,
        }
    }

    /// Looks up an employee by id.
    pub fn employee(&self, id: i64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Looks up a shift definition by id.
    pub fn shift(&self, id: i64) -> Option<&ShiftDefinition> {
        self.shifts.iter().find(|s| s.id == id)
    }

    /// Validates every shift definition and overtime rule in the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::error::EngineError::InvalidShift`] or
    /// [`crate::error::EngineError::InvalidRule`] encountered.
    pub fn validate(&self) -> EngineResult<()> {
        for shift in &self.shifts {
            shift.validate()?;
        }
        for rule in &self.rules {
            rule.validate()?;
        }
        Ok(())
    }

    /// Filters a punch list down to a single employee's events.
    pub fn punches_for<'a>(
        &self,
        punches: &'a [PunchEvent],
        employee_id: i64,
    ) -> Vec<&'a PunchEvent> {
        punches
            .iter()
            .filter(|p| p.employee_id == employee_id)
            .collect()
    }
}
