//! Shift resolution logic.
//!
//! This module determines which shift definition applies to an employee
//! on a given date from possibly overlapping dated assignments, with a
//! documented deterministic tie-break and a fallback chain through the
//! employee's own shift and the system default.

use chrono::NaiveDate;

use crate::config::ReferenceData;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, ShiftDefinition};

/// Which source supplied the resolved shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftSource {
    /// A dated shift assignment covering the date.
    Assignment,
    /// The employee's `current_shift_id` fallback.
    EmployeeDefault,
    /// The system-wide default shift.
    SystemDefault,
}

/// The result of resolving a shift for an employee-day.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedShift<'a> {
    /// The shift definition that applies.
    pub definition: &'a ShiftDefinition,
    /// Which fallback level supplied it.
    pub source: ShiftSource,
}

/// Resolves the shift applying to an employee on a date.
///
/// Active assignments whose date range covers `date` are considered
/// first. If several overlap, the one with the latest `start_date` wins,
/// tie-broken by highest id: most recently created wins, a resolved
/// ambiguity rather than an arbitrary pick, so repeated calls always
/// agree. With no covering assignment the employee's `current_shift_id`
/// applies, then the system default shift, then `None`: the day cannot be
/// classified against a shift and the record is flagged pending.
///
/// # Errors
///
/// Returns [`EngineError::UnknownShift`] when an assignment or fallback
/// references a shift id missing from the snapshot; dangling references
/// are configuration errors, not data anomalies.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::resolve_shift;
/// use attendance_engine::config::{ReferenceData, SystemDefaults};
/// use attendance_engine::models::Employee;
/// use chrono::NaiveDate;
///
/// let snapshot = ReferenceData::new(
///     vec![],
///     vec![],
///     vec![],
///     vec![],
///     vec![],
///     SystemDefaults::default(),
/// );
/// let employee = Employee {
///     id: 1,
///     name: "Amira Hassan".to_string(),
///     department: None,
///     current_shift_id: None,
///     weekend_days: None,
///     eligible_for_weekday_overtime: true,
///     eligible_for_weekend_overtime: true,
///     eligible_for_holiday_overtime: true,
///     is_active: true,
/// };
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// assert!(resolve_shift(&snapshot, &employee, date).unwrap().is_none());
/// ```
pub fn resolve_shift<'a>(
    snapshot: &'a ReferenceData,
    employee: &Employee,
    date: NaiveDate,
) -> EngineResult<Option<ResolvedShift<'a>>> {
    let winning_assignment = snapshot
        .assignments
        .iter()
        .filter(|a| a.employee_id == employee.id && a.is_active && a.covers(date))
        .max_by_key(|a| (a.start_date, a.id));

    if let Some(assignment) = winning_assignment {
        let definition =
            snapshot
                .shift(assignment.shift_id)
                .ok_or(EngineError::UnknownShift {
                    shift_id: assignment.shift_id,
                })?;
        return Ok(Some(ResolvedShift {
            definition,
            source: ShiftSource::Assignment,
        }));
    }

    if let Some(shift_id) = employee.current_shift_id {
        let definition = snapshot
            .shift(shift_id)
            .ok_or(EngineError::UnknownShift { shift_id })?;
        return Ok(Some(ResolvedShift {
            definition,
            source: ShiftSource::EmployeeDefault,
        }));
    }

    if let Some(shift_id) = snapshot.defaults.default_shift_id {
        let definition = snapshot
            .shift(shift_id)
            .ok_or(EngineError::UnknownShift { shift_id })?;
        return Ok(Some(ResolvedShift {
            definition,
            source: ShiftSource::SystemDefault,
        }));
    }

    Ok(None)
}
