//! Overtime splitting logic.
//!
//! This module splits a day's worked hours into the mutually exclusive
//! overtime categories (weekday, weekend, holiday) and derives the night
//! sub-split: the portion of the credited overtime falling inside the
//! rule's night window. Night hours are a view into the same worked time,
//! never additive to the category total.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::models::{Employee, OvertimeRule};

use super::calendar::DayClass;
use super::rule_selector::{multiplier_for, rule_applies_on};

/// Per-category overtime eligibility for an employee-day.
///
/// Effective eligibility is the AND of the employee's own flags and any
/// department-level flags the caller carries. Ineligible hours stay in
/// the record's work hours; they are simply never credited to an
/// overtime bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvertimeEligibility {
    /// Whether weekday overtime may be credited.
    pub weekday: bool,
    /// Whether weekend overtime may be credited.
    pub weekend: bool,
    /// Whether holiday overtime may be credited.
    pub holiday: bool,
}

impl OvertimeEligibility {
    /// Eligibility taken from the employee's own flags.
    pub fn for_employee(employee: &Employee) -> Self {
        Self {
            weekday: employee.eligible_for_weekday_overtime,
            weekend: employee.eligible_for_weekend_overtime,
            holiday: employee.eligible_for_holiday_overtime,
        }
    }

    /// Intersects with department-level flags.
    pub fn and_department(self, weekday: bool, weekend: bool, holiday: bool) -> Self {
        Self {
            weekday: self.weekday && weekday,
            weekend: self.weekend && weekend,
            holiday: self.holiday && holiday,
        }
    }

    /// Returns true if the given day class may accrue overtime.
    pub fn allows(&self, day_class: DayClass) -> bool {
        match day_class {
            DayClass::Weekday => self.weekday,
            DayClass::Weekend => self.weekend,
            DayClass::Holiday => self.holiday,
        }
    }
}

impl Default for OvertimeEligibility {
    fn default() -> Self {
        Self {
            weekday: true,
            weekend: true,
            holiday: true,
        }
    }
}

/// The result of splitting a day's worked hours into overtime categories.
///
/// Exactly one of the three category fields can be non-zero, matching the
/// day's single classification. `uncapped_hours` preserves the figure
/// before the rule's daily cap so callers can report the excess; the cap
/// limits what is credited, it never raises pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvertimeSplit {
    /// Weekday overtime hours credited.
    pub regular: Decimal,
    /// Weekend overtime hours credited.
    pub weekend: Decimal,
    /// Holiday overtime hours credited.
    pub holiday: Decimal,
    /// Credited overtime falling inside the rule's night window.
    pub night: Decimal,
    /// Overtime before the daily cap was applied.
    pub uncapped_hours: Decimal,
    /// The rule's multiplier for the day class; 1 when nothing accrued.
    pub rate: Decimal,
}

impl OvertimeSplit {
    /// A split crediting no overtime at all.
    pub fn zero() -> Self {
        Self {
            regular: Decimal::ZERO,
            weekend: Decimal::ZERO,
            holiday: Decimal::ZERO,
            night: Decimal::ZERO,
            uncapped_hours: Decimal::ZERO,
            rate: Decimal::ONE,
        }
    }

    /// Total overtime credited across the three categories.
    pub fn total(&self) -> Decimal {
        self.regular + self.weekend + self.holiday
    }
}

/// Splits worked hours into overtime categories under a rule.
///
/// On a holiday or weekend all worked hours are overtime, attributed to
/// that single category; on a weekday only the hours beyond the rule's
/// `daily_regular_hours` are. The credited amount is capped at
/// `max_daily_overtime` when the rule sets one. The night field then
/// records how much of the credited overtime overlaps the rule's night
/// window, clamped so it never exceeds the category total.
///
/// `worked` is the actual check-in/check-out interval (check-out already
/// adjusted past midnight for overnight shifts); it is only used for the
/// night-window overlap.
pub fn split_overtime(
    work_hours: Decimal,
    worked: Option<(NaiveDateTime, NaiveDateTime)>,
    day_class: DayClass,
    rule: &OvertimeRule,
    eligibility: &OvertimeEligibility,
) -> OvertimeSplit {
    if !rule_applies_on(rule, day_class) || !eligibility.allows(day_class) {
        return OvertimeSplit::zero();
    }

    let earned = match day_class {
        DayClass::Holiday | DayClass::Weekend => work_hours,
        DayClass::Weekday => (work_hours - rule.daily_regular_hours).max(Decimal::ZERO),
    };

    if earned <= Decimal::ZERO {
        return OvertimeSplit::zero();
    }

    let credited = match rule.max_daily_overtime {
        Some(cap) => earned.min(cap),
        None => earned,
    };

    let night = match (worked, rule.night_window_start, rule.night_window_end) {
        (Some((start, end)), Some(window_start), Some(window_end)) => {
            night_overlap_hours(start, end, window_start, window_end).min(credited)
        }
        _ => Decimal::ZERO,
    };

    let mut split = OvertimeSplit {
        regular: Decimal::ZERO,
        weekend: Decimal::ZERO,
        holiday: Decimal::ZERO,
        night,
        uncapped_hours: earned,
        rate: multiplier_for(rule, day_class),
    };
    match day_class {
        DayClass::Weekday => split.regular = credited,
        DayClass::Weekend => split.weekend = credited,
        DayClass::Holiday => split.holiday = credited,
    }
    split
}

/// Measures how many hours of the worked interval fall inside the night
/// window, handling windows that wrap midnight (e.g. 22:00-06:00).
///
/// The window is anchored on every calendar day the worked interval
/// touches; anchored instances are disjoint, so summing their overlaps is
/// exact.
fn night_overlap_hours(
    start: NaiveDateTime,
    end: NaiveDateTime,
    window_start: NaiveTime,
    window_end: NaiveTime,
) -> Decimal {
    if end <= start {
        return Decimal::ZERO;
    }

    let mut overlap_minutes = 0i64;
    let mut anchor = start.date() - Duration::days(1);
    let last = end.date();
    while anchor <= last {
        let night_start = anchor.and_time(window_start);
        let night_end = if window_end <= window_start {
            (anchor + Duration::days(1)).and_time(window_end)
        } else {
            anchor.and_time(window_end)
        };

        let overlap_start = night_start.max(start);
        let overlap_end = night_end.min(end);
        if overlap_end > overlap_start {
            overlap_minutes += (overlap_end - overlap_start).num_minutes();
        }

        anchor += Duration::days(1);
    }

    Decimal::new(overlap_minutes, 0) / Decimal::new(60, 0)
}
