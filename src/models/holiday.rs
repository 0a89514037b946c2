//! Holiday calendar model.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Represents a holiday calendar entry.
///
/// A recurring holiday matches its month and day every year. An entry
/// with an `employee_id` applies to that employee only; otherwise it is
/// global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    /// Unique identifier for the holiday entry.
    pub id: i64,
    /// The holiday's display name.
    pub name: String,
    /// The calendar date of the holiday.
    pub date: NaiveDate,
    /// Whether the holiday recurs every year on the same month and day.
    #[serde(default)]
    pub is_recurring: bool,
    /// Employee scope; None means the holiday applies to everyone.
    pub employee_id: Option<i64>,
}

impl Holiday {
    /// Returns true if this entry makes `date` a holiday for the employee.
    pub fn matches(&self, employee_id: i64, date: NaiveDate) -> bool {
        let scope_matches = self.employee_id.is_none_or(|scoped| scoped == employee_id);
        if !scope_matches {
            return false;
        }
        if self.date == date {
            return true;
        }
        self.is_recurring && self.date.month() == date.month() && self.date.day() == date.day()
    }
}
