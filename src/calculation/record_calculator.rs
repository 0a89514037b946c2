//! Attendance record computation.
//!
//! This module orchestrates the calendar, shift resolver, punch
//! normalizer, rule selector, and overtime split into the single derived
//! [`AttendanceRecord`] for one employee-day. The computation is a pure
//! function of its inputs: identical snapshots and punches always produce
//! an identical record.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;

use crate::config::ReferenceData;
use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, AttendanceStatus, Employee, PunchEvent, ShiftDefinition, ShiftType,
};

use super::calendar::{classify_day, is_holiday, is_weekend};
use super::overtime_split::{split_overtime, OvertimeEligibility, OvertimeSplit};
use super::punch_normalizer::{normalize, punch_window, NormalizedPunches};
use super::rule_selector::select_rule;
use super::shift_resolver::resolve_shift;

/// Computes the attendance record for one employee-day.
///
/// Returns `Ok(None)` when the day carries no attendance expectation and
/// none was given: a holiday or weekend without any punches produces no
/// record at all rather than an absent one.
///
/// Data anomalies (no punches on a workday, a check-in without a
/// check-out, no resolvable shift) become status values, `Absent` or
/// `Pending`, never errors. Only structurally invalid reference data
/// (a malformed shift definition, a dangling shift id) fails, and such a
/// failure is scoped to this employee-day.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidShift`] or
/// [`crate::error::EngineError::UnknownShift`] for broken reference data.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::compute_record;
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
///
/// // Monday with no punches and no shift: an absent record.
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let record = compute_record(&snapshot, &employee, date, &[]).unwrap().unwrap();
/// assert_eq!(record.status.to_string(), "absent");
/// ```
pub fn compute_record(
    snapshot: &ReferenceData,
    employee: &Employee,
    date: NaiveDate,
    punches: &[PunchEvent],
) -> EngineResult<Option<AttendanceRecord>> {
    let defaults = &snapshot.defaults;

    let resolved = resolve_shift(snapshot, employee, date)?;
    if let Some(resolved) = &resolved {
        resolved.definition.validate()?;
    }
    let shift = resolved.as_ref().map(|r| r.definition);

    let window = punch_window(date, shift, defaults);
    let normalized = normalize(punches, &window, defaults);

    let holiday = is_holiday(&snapshot.holidays, employee.id, date);
    let weekend = is_weekend(employee, shift, defaults, date);

    let Some(check_in) = normalized.check_in else {
        // No attendance expectation on holidays and weekends: skip
        // entirely instead of marking the employee absent.
        if holiday || weekend {
            return Ok(None);
        }
        let mut record = AttendanceRecord::empty(employee.id, date, AttendanceStatus::Absent);
        record.shift_id = shift.map(|s| s.id);
        record.shift_type = shift.map_or(ShiftType::Day, shift_type_of);
        return Ok(Some(record));
    };

    let record = match shift {
        Some(shift) => with_shift(
            snapshot, employee, date, shift, &normalized, check_in, holiday, weekend,
        ),
        None => without_shift(employee, date, &normalized, check_in, holiday, weekend),
    };

    Ok(Some(record))
}

/// Builds the record when a shift definition resolved.
#[allow(clippy::too_many_arguments)]
fn with_shift(
    snapshot: &ReferenceData,
    employee: &Employee,
    date: NaiveDate,
    shift: &ShiftDefinition,
    normalized: &NormalizedPunches,
    check_in: NaiveDateTime,
    holiday: bool,
    weekend: bool,
) -> AttendanceRecord {
    let defaults = &snapshot.defaults;

    let grace_deadline =
        date.and_time(shift.start_time) + Duration::minutes(shift.grace_period_minutes);
    let late_minutes = (check_in - grace_deadline).num_minutes().max(0);

    let mut record = AttendanceRecord::empty(employee.id, date, AttendanceStatus::Pending);
    record.shift_id = Some(shift.id);
    record.check_in = Some(check_in);
    record.check_out = normalized.check_out;
    record.is_holiday = holiday;
    record.is_weekend = weekend;
    record.late_minutes = late_minutes;
    record.shift_type = shift_type_of(shift);

    // A check-in without a check-out is a reportable anomaly, not an
    // error: work hours stay at zero pending manual resolution. The same
    // holds for a reversed pair on a non-overnight shift.
    let Some(check_out) = normalized.check_out else {
        return record;
    };
    let adjusted_out = if check_out < check_in {
        if shift.is_overnight {
            check_out + Duration::days(1)
        } else {
            return record;
        }
    } else {
        check_out
    };

    let total_duration = hours_between(check_in, adjusted_out);
    let requested_break = match normalized.break_hours {
        Some(detected) => clamp_break(detected, defaults),
        None => shift.break_duration,
    };
    let break_duration = requested_break.min(total_duration);
    let work_hours = total_duration - break_duration;

    let day_class = classify_day(holiday, weekend);
    let rule = select_rule(
        &snapshot.rules,
        employee.department.as_deref(),
        day_class,
        date,
    );
    let eligibility = OvertimeEligibility::for_employee(employee);
    let split = rule.map_or_else(OvertimeSplit::zero, |rule| {
        split_overtime(
            work_hours,
            Some((check_in, adjusted_out)),
            day_class,
            rule,
            &eligibility,
        )
    });

    let standard_hours = rule.map_or_else(|| shift.duration_hours(), |r| r.daily_regular_hours);
    record.status = if late_minutes > 0 {
        AttendanceStatus::Late
    } else if work_hours < standard_hours / Decimal::from(2) {
        AttendanceStatus::HalfDay
    } else {
        AttendanceStatus::Present
    };

    record.total_duration = total_duration;
    record.break_duration = break_duration;
    record.work_hours = work_hours;
    record.rule_id = rule.map(|r| r.id);
    record.regular_overtime_hours = split.regular;
    record.weekend_overtime_hours = split.weekend;
    record.holiday_overtime_hours = split.holiday;
    record.night_overtime_hours = split.night;
    record.overtime_hours = split.total();
    record.overtime_rate = split.rate;
    record
}

/// Builds the record when no shift could be resolved: the day cannot be
/// classified and stays pending, but the normalized punch times and
/// durations are preserved for manual resolution.
fn without_shift(
    employee: &Employee,
    date: NaiveDate,
    normalized: &NormalizedPunches,
    check_in: NaiveDateTime,
    holiday: bool,
    weekend: bool,
) -> AttendanceRecord {
    let mut record = AttendanceRecord::empty(employee.id, date, AttendanceStatus::Pending);
    record.check_in = Some(check_in);
    record.check_out = normalized.check_out;
    record.is_holiday = holiday;
    record.is_weekend = weekend;
    record.shift_type = if check_in.hour() >= 18 || check_in.hour() < 5 {
        ShiftType::Night
    } else {
        ShiftType::Day
    };

    if let Some(check_out) = normalized.check_out {
        if check_out > check_in {
            let total_duration = hours_between(check_in, check_out);
            let break_duration = normalized
                .break_hours
                .unwrap_or(Decimal::ZERO)
                .min(total_duration);
            record.total_duration = total_duration;
            record.break_duration = break_duration;
            record.work_hours = total_duration - break_duration;
        }
    }

    record
}

/// Classifies a shift as day or night work.
fn shift_type_of(shift: &ShiftDefinition) -> ShiftType {
    let start_hour = shift.start_time.hour();
    if shift.is_overnight || start_hour >= 18 || start_hour < 5 {
        ShiftType::Night
    } else {
        ShiftType::Day
    }
}

/// Hours between two timestamps as an exact decimal.
fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    Decimal::new((end - start).num_minutes(), 0) / Decimal::new(60, 0)
}

/// Clamps a detected break duration to the system-wide bounds.
fn clamp_break(detected: Decimal, defaults: &crate::config::SystemDefaults) -> Decimal {
    let minimum = Decimal::new(defaults.minimum_break_minutes, 0) / Decimal::new(60, 0);
    let maximum = Decimal::new(defaults.maximum_break_minutes, 0) / Decimal::new(60, 0);
    detected.clamp(minimum, maximum)
}
