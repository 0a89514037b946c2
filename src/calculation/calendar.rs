//! Day classification logic.
//!
//! This module determines whether a date is a holiday or a weekend day
//! for a given employee and folds the two flags into a single
//! [`DayClass`] with the documented precedence: holiday over weekend over
//! weekday.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::SystemDefaults;
use crate::models::{Employee, Holiday, ShiftDefinition};

/// The classification of a date for overtime purposes.
///
/// Exactly one class applies to any date: holiday takes precedence over
/// weekend, which takes precedence over weekday.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{classify_day, DayClass};
///
/// assert_eq!(classify_day(true, true), DayClass::Holiday);
/// assert_eq!(classify_day(false, true), DayClass::Weekend);
/// assert_eq!(classify_day(false, false), DayClass::Weekday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClass {
    /// An ordinary working day.
    Weekday,
    /// A weekend day for the employee in question.
    Weekend,
    /// A holiday, global or employee-specific.
    Holiday,
}

impl std::fmt::Display for DayClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayClass::Weekday => write!(f, "Weekday"),
            DayClass::Weekend => write!(f, "Weekend"),
            DayClass::Holiday => write!(f, "Holiday"),
        }
    }
}

/// Returns the weekday index of a date (0 = Monday .. 6 = Sunday).
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Returns true if any holiday entry makes `date` a holiday for the
/// employee.
///
/// An entry matches on its exact date, or on month and day ignoring the
/// year when recurring, and must either be global or scoped to this
/// employee. No matching entry simply means "not a holiday".
pub fn is_holiday(holidays: &[Holiday], employee_id: i64, date: NaiveDate) -> bool {
    holidays.iter().any(|h| h.matches(employee_id, date))
}

/// Returns true if `date` falls on a weekend day for the employee.
///
/// The weekend-day set is taken from the first non-null source in
/// priority order: the employee's own override, the resolved shift's
/// override, then the system default.
pub fn is_weekend(
    employee: &Employee,
    shift: Option<&ShiftDefinition>,
    defaults: &SystemDefaults,
    date: NaiveDate,
) -> bool {
    let weekend_days: &[u8] = if let Some(days) = &employee.weekend_days {
        days
    } else if let Some(days) = shift.and_then(|s| s.weekend_days.as_ref()) {
        days
    } else {
        &defaults.weekend_days
    };

    weekend_days.contains(&weekday_index(date))
}

/// Folds the holiday and weekend flags into a [`DayClass`].
pub fn classify_day(is_holiday: bool, is_weekend: bool) -> DayClass {
    if is_holiday {
        DayClass::Holiday
    } else if is_weekend {
        DayClass::Weekend
    } else {
        DayClass::Weekday
    }
}
