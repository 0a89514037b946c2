//! Overtime rule selection logic.
//!
//! This module picks the single overtime rule in effect for a department
//! and day classification on a date. Rules are filtered on activity,
//! validity range, department scope, and day-class applicability; the
//! survivor with the lowest priority value wins, tie-broken by lowest id
//! (the first-configured rule).

use chrono::NaiveDate;
use tracing::debug;

use crate::models::OvertimeRule;

use super::calendar::DayClass;

/// Returns true if the rule credits overtime on the given day class.
pub fn rule_applies_on(rule: &OvertimeRule, day_class: DayClass) -> bool {
    match day_class {
        DayClass::Weekday => rule.apply_on_weekday,
        DayClass::Weekend => rule.apply_on_weekend,
        DayClass::Holiday => rule.apply_on_holiday,
    }
}

/// Returns the rule's overtime multiplier for the given day class.
pub fn multiplier_for(rule: &OvertimeRule, day_class: DayClass) -> rust_decimal::Decimal {
    match day_class {
        DayClass::Weekday => rule.weekday_multiplier,
        DayClass::Weekend => rule.weekend_multiplier,
        DayClass::Holiday => rule.holiday_multiplier,
    }
}

/// Selects the highest-precedence overtime rule for an employee-day.
///
/// No surviving rule is not an error: the day simply accrues no overtime.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{select_rule, DayClass};
/// use attendance_engine::models::OvertimeRule;
/// use chrono::NaiveDate;
///
/// let mut high = OvertimeRule::sample(1);
/// high.priority = 5;
/// let low = OvertimeRule::sample(2); // priority 10
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
/// let rules = [low, high];
/// let selected = select_rule(&rules, Some("Production"), DayClass::Weekday, date);
/// assert_eq!(selected.unwrap().id, 1);
/// ```
pub fn select_rule<'a>(
    rules: &'a [OvertimeRule],
    department: Option<&str>,
    day_class: DayClass,
    date: NaiveDate,
) -> Option<&'a OvertimeRule> {
    let selected = rules
        .iter()
        .filter(|r| {
            r.is_in_effect(date)
                && r.applies_to_department(department)
                && rule_applies_on(r, day_class)
        })
        .min_by_key(|r| (r.priority, r.id));

    match selected {
        Some(rule) => debug!(
            rule_id = rule.id,
            priority = rule.priority,
            %day_class,
            "selected overtime rule"
        ),
        None => debug!(%day_class, "no overtime rule in effect"),
    }

    selected
}
