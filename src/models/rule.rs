//! Overtime rule model.
//!
//! This module defines the OvertimeRule struct describing when and how
//! overtime is credited: day-class applicability, department scope,
//! thresholds, multipliers, night window, caps, priority, and validity.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a configurable overtime rule.
///
/// Rules are prioritized: a **lower** `priority` value takes precedence.
/// Ties are broken by lowest id, i.e. the first-configured rule wins.
/// A rule with no `departments` scope applies to every department.
///
/// The night window (`night_window_start`..`night_window_end`) may wrap
/// midnight, e.g. 22:00-06:00. Hours of overtime falling inside it are
/// additionally recorded as night overtime.
///
/// # Example
///
/// ```
/// use attendance_engine::models::OvertimeRule;
/// use chrono::NaiveDate;
///
/// let rule = OvertimeRule::sample(1);
/// assert!(rule.is_in_effect(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
/// assert!(rule.applies_to_department(Some("Production")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeRule {
    /// Unique identifier for the rule.
    pub id: i64,
    /// The rule's display name.
    pub name: String,
    /// Whether the rule credits overtime on weekdays.
    pub apply_on_weekday: bool,
    /// Whether the rule credits overtime on weekend days.
    pub apply_on_weekend: bool,
    /// Whether the rule credits overtime on holidays.
    pub apply_on_holiday: bool,
    /// Departments the rule is scoped to; None means all departments.
    pub departments: Option<Vec<String>>,
    /// Standard work hours per day before weekday overtime accrues.
    pub daily_regular_hours: Decimal,
    /// Multiplier for weekday overtime.
    pub weekday_multiplier: Decimal,
    /// Multiplier for weekend overtime.
    pub weekend_multiplier: Decimal,
    /// Multiplier for holiday overtime.
    pub holiday_multiplier: Decimal,
    /// Start of the night window, if the rule defines one.
    pub night_window_start: Option<NaiveTime>,
    /// End of the night window, if the rule defines one.
    pub night_window_end: Option<NaiveTime>,
    /// Additional multiplier for overtime inside the night window.
    pub night_multiplier: Decimal,
    /// Maximum overtime hours credited per day; None means uncapped.
    pub max_daily_overtime: Option<Decimal>,
    /// Maximum overtime hours per week, surfaced for the caller.
    pub max_weekly_overtime: Option<Decimal>,
    /// Maximum overtime hours per month, surfaced for the caller.
    pub max_monthly_overtime: Option<Decimal>,
    /// Rule precedence; lower value wins.
    pub priority: i32,
    /// Whether the rule is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// First date the rule is in effect (inclusive); open if None.
    pub valid_from: Option<NaiveDate>,
    /// Last date the rule is in effect (inclusive); open if None.
    pub valid_until: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

impl OvertimeRule {
    /// Returns true if the rule is active and its validity range covers
    /// the given date.
    pub fn is_in_effect(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.valid_from.is_none_or(|from| from <= date)
            && self.valid_until.is_none_or(|until| date <= until)
    }

    /// Returns true if the rule's department scope matches.
    ///
    /// A rule without a scope matches any department, including employees
    /// with no department. Matching is case-insensitive and ignores
    /// surrounding whitespace, the way the scope lists are entered.
    pub fn applies_to_department(&self, department: Option<&str>) -> bool {
        match &self.departments {
            None => true,
            Some(scoped) => match department {
                None => false,
                Some(dept) => scoped
                    .iter()
                    .any(|d| d.trim().eq_ignore_ascii_case(dept.trim())),
            },
        }
    }

    /// Returns true if the rule defines a night window.
    pub fn has_night_window(&self) -> bool {
        self.night_window_start.is_some() && self.night_window_end.is_some()
    }

    /// Validates the rule's date and time ranges.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRule`] when `valid_until` precedes
    /// `valid_from` or the night window is zero-length.
    pub fn validate(&self) -> EngineResult<()> {
        if let (Some(from), Some(until)) = (self.valid_from, self.valid_until) {
            if until < from {
                return Err(EngineError::InvalidRule {
                    rule_id: self.id,
                    message: "valid_until precedes valid_from".to_string(),
                });
            }
        }
        if let (Some(start), Some(end)) = (self.night_window_start, self.night_window_end) {
            if start == end {
                return Err(EngineError::InvalidRule {
                    rule_id: self.id,
                    message: "night window start equals end".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Builds a representative rule for documentation and tests.
    pub fn sample(id: i64) -> Self {
        Self {
            id,
            name: format!("Standard overtime {id}"),
            apply_on_weekday: true,
            apply_on_weekend: true,
            apply_on_holiday: true,
            departments: None,
            daily_regular_hours: Decimal::from(8),
            weekday_multiplier: Decimal::new(15, 1),
            weekend_multiplier: Decimal::from(2),
            holiday_multiplier: Decimal::new(25, 1),
            night_window_start: Some(NaiveTime::from_hms_opt(22, 0, 0).expect("valid time")),
            night_window_end: Some(NaiveTime::from_hms_opt(6, 0, 0).expect("valid time")),
            night_multiplier: Decimal::new(12, 1),
            max_daily_overtime: Some(Decimal::from(4)),
            max_weekly_overtime: Some(Decimal::from(15)),
            max_monthly_overtime: Some(Decimal::from(36)),
            priority: 10,
            is_active: true,
            valid_from: None,
            valid_until: None,
        }
    }
}
