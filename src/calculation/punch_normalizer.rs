//! Punch normalization logic.
//!
//! This module reduces raw, possibly duplicated or out-of-order punch
//! events for an employee-day to at most one check-in and one check-out,
//! and detects break intervals from intermediate out/in pairs. For
//! overnight shifts the qualifying window extends past midnight so a
//! check-out on the next calendar day still belongs to the day the shift
//! started.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;

use crate::config::SystemDefaults;
use crate::models::{PunchEvent, PunchKind, ShiftDefinition};

/// Break gaps shorter than this are treated as badge noise, not breaks.
const MIN_BREAK_GAP_MINUTES: i64 = 5;

/// Break gaps longer than this are treated as missing punches, not breaks.
const MAX_BREAK_GAP_MINUTES: i64 = 300;

/// The inclusive window of timestamps that qualify for an employee-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PunchWindow {
    /// Earliest qualifying timestamp.
    pub start: NaiveDateTime,
    /// Latest qualifying timestamp.
    pub end: NaiveDateTime,
}

impl PunchWindow {
    /// Returns true if the timestamp falls inside the window.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// A break detected between a check-out and a subsequent check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DetectedBreak {
    start: NaiveDateTime,
    end: NaiveDateTime,
    minutes: i64,
}

impl DetectedBreak {
    /// Scores how strongly this gap looks like the day's primary break:
    /// gaps inside the 11:00-14:00 lunch band score highest, then gaps
    /// whose length is close to one hour.
    fn score(&self) -> i32 {
        let in_lunch_band = |t: NaiveDateTime| (11..=14).contains(&t.hour());
        let lunch_score = if in_lunch_band(self.start) && in_lunch_band(self.end) {
            3
        } else if in_lunch_band(self.start) || in_lunch_band(self.end) {
            1
        } else {
            0
        };

        let off_hour = (self.minutes - 60).abs();
        let duration_score = if off_hour < 6 {
            3
        } else if off_hour < 15 {
            2
        } else if off_hour < 30 {
            1
        } else {
            0
        };

        lunch_score + duration_score
    }
}

/// The result of normalizing an employee-day's raw punches.
///
/// `check_in` is the earliest qualifying in-punch and `check_out` the
/// latest qualifying out-punch; either may be absent. Detected breaks are
/// summed into `break_hours`, with the primary break's bounds surfaced.
/// The counters report how many punches were collapsed as duplicates or
/// ignored (outside the window or of unrecognized kind); neither is an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPunches {
    /// Earliest qualifying clock-in, if any.
    pub check_in: Option<NaiveDateTime>,
    /// Latest qualifying clock-out, if any.
    pub check_out: Option<NaiveDateTime>,
    /// Total detected break time in hours; None when no break was seen.
    pub break_hours: Option<Decimal>,
    /// Start of the primary detected break.
    pub break_start: Option<NaiveDateTime>,
    /// End of the primary detected break.
    pub break_end: Option<NaiveDateTime>,
    /// Punches collapsed as duplicates of a neighbour.
    pub duplicates_collapsed: usize,
    /// Punches outside the window or of unrecognized kind.
    pub ignored: usize,
}

/// Builds the qualifying punch window for an employee-day.
///
/// With a shift, the window runs from the scheduled start minus the
/// lookback buffer to the scheduled end (pushed to the next calendar day
/// for overnight shifts) plus the trailing buffer. Without a shift the
/// whole calendar day plus the trailing buffer qualifies.
pub fn punch_window(
    date: NaiveDate,
    shift: Option<&ShiftDefinition>,
    defaults: &SystemDefaults,
) -> PunchWindow {
    match shift {
        Some(shift) => {
            let scheduled_start = date.and_time(shift.start_time);
            let scheduled_end = if shift.is_overnight {
                (date + Duration::days(1)).and_time(shift.end_time)
            } else {
                date.and_time(shift.end_time)
            };
            PunchWindow {
                start: scheduled_start - Duration::minutes(defaults.punch_lookback_minutes),
                end: scheduled_end + Duration::minutes(defaults.punch_trailing_minutes),
            }
        }
        None => PunchWindow {
            start: date.and_hms_opt(0, 0, 0).expect("midnight is valid"),
            end: (date + Duration::days(1))
                .and_hms_opt(0, 0, 0)
                .expect("midnight is valid")
                + Duration::minutes(defaults.punch_trailing_minutes),
        },
    }
}

/// Normalizes raw punches for one employee-day.
///
/// Punches outside the window or of unrecognized kind are ignored.
/// Same-direction punches closer together than
/// `defaults.duplicate_punch_seconds` collapse to the first of the run
/// (repeated badge taps). The reduction is pure and idempotent:
/// normalizing the same punch set twice yields the same result.
///
/// Intermediate out→in gaps strictly between 5 minutes and 5 hours count
/// as breaks; all such gaps sum into `break_hours` while the
/// best-scoring one becomes the primary break.
pub fn normalize(
    punches: &[PunchEvent],
    window: &PunchWindow,
    defaults: &SystemDefaults,
) -> NormalizedPunches {
    let mut qualifying: Vec<&PunchEvent> = punches
        .iter()
        .filter(|p| p.kind != PunchKind::Unknown && window.contains(p.timestamp))
        .collect();
    let ignored = punches.len() - qualifying.len();

    qualifying.sort_by_key(|p| (p.timestamp, p.id));

    // Collapse runs of same-direction punches within the duplicate window.
    let mut collapsed: Vec<&PunchEvent> = Vec::with_capacity(qualifying.len());
    let mut duplicates_collapsed = 0;
    for punch in qualifying {
        match collapsed.last() {
            Some(last)
                if last.kind == punch.kind
                    && (punch.timestamp - last.timestamp)
                        <= Duration::seconds(defaults.duplicate_punch_seconds) =>
            {
                duplicates_collapsed += 1;
            }
            _ => collapsed.push(punch),
        }
    }

    let check_in = collapsed
        .iter()
        .filter(|p| p.kind == PunchKind::In)
        .map(|p| p.timestamp)
        .min();
    let check_out = collapsed
        .iter()
        .filter(|p| p.kind == PunchKind::Out)
        .map(|p| p.timestamp)
        .max();

    let breaks = detect_breaks(&collapsed);
    let total_minutes: i64 = breaks.iter().map(|b| b.minutes).sum();
    let primary = breaks
        .iter()
        .max_by_key(|b| (b.score(), b.minutes, std::cmp::Reverse(b.start)));

    NormalizedPunches {
        check_in,
        check_out,
        break_hours: if breaks.is_empty() {
            None
        } else {
            Some(Decimal::new(total_minutes, 0) / Decimal::new(60, 0))
        },
        break_start: primary.map(|b| b.start),
        break_end: primary.map(|b| b.end),
        duplicates_collapsed,
        ignored,
    }
}

/// Scans consecutive out→in pairs for break-sized gaps.
fn detect_breaks(collapsed: &[&PunchEvent]) -> Vec<DetectedBreak> {
    let mut breaks = Vec::new();
    for pair in collapsed.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if prev.kind == PunchKind::Out && next.kind == PunchKind::In {
            let minutes = (next.timestamp - prev.timestamp).num_minutes();
            if minutes > MIN_BREAK_GAP_MINUTES && minutes < MAX_BREAK_GAP_MINUTES {
                breaks.push(DetectedBreak {
                    start: prev.timestamp,
                    end: next.timestamp,
                    minutes,
                });
            }
        }
    }
    breaks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn punch(id: i64, s: &str, kind: PunchKind) -> PunchEvent {
        PunchEvent {
            id,
            employee_id: 1,
            device_id: Some(1),
            timestamp: ts(s),
            kind,
            is_processed: false,
        }
    }

    fn day_shift() -> ShiftDefinition {
        ShiftDefinition {
            id: 1,
            name: "Day".to_string(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            is_overnight: false,
            break_duration: Decimal::ONE,
            grace_period_minutes: 15,
            weekend_days: None,
            is_active: true,
        }
    }

    fn night_shift() -> ShiftDefinition {
        ShiftDefinition {
            id: 2,
            name: "Night".to_string(),
            start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            is_overnight: true,
            break_duration: Decimal::new(5, 1),
            grace_period_minutes: 10,
            weekend_days: None,
            is_active: true,
        }
    }

    // ==========================================================================
    // PN-001: window spans lookback to trailing buffer for a day shift
    // ==========================================================================
    #[test]
    fn test_pn_001_day_shift_window() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), Some(&day_shift()), &defaults);

        assert_eq!(window.start, ts("2025-03-10 06:00:00"));
        assert_eq!(window.end, ts("2025-03-10 21:00:00"));
    }

    // ==========================================================================
    // PN-002: overnight shift window extends into the next day
    // ==========================================================================
    #[test]
    fn test_pn_002_overnight_window_crosses_midnight() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), Some(&night_shift()), &defaults);

        assert_eq!(window.start, ts("2025-03-10 20:00:00"));
        assert_eq!(window.end, ts("2025-03-11 10:00:00"));
    }

    // ==========================================================================
    // PN-003: earliest in and latest out win
    // ==========================================================================
    #[test]
    fn test_pn_003_earliest_in_latest_out() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), Some(&day_shift()), &defaults);
        let punches = vec![
            punch(1, "2025-03-10 07:58:00", PunchKind::In),
            punch(2, "2025-03-10 08:10:00", PunchKind::In),
            punch(3, "2025-03-10 17:01:00", PunchKind::Out),
            punch(4, "2025-03-10 17:20:00", PunchKind::Out),
        ];

        let normalized = normalize(&punches, &window, &defaults);
        assert_eq!(normalized.check_in, Some(ts("2025-03-10 07:58:00")));
        assert_eq!(normalized.check_out, Some(ts("2025-03-10 17:20:00")));
    }

    // ==========================================================================
    // PN-004: duplicate taps collapse and the collapse is idempotent
    // ==========================================================================
    #[test]
    fn test_pn_004_duplicates_collapse_idempotently() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), Some(&day_shift()), &defaults);
        let punches = vec![
            punch(1, "2025-03-10 08:00:00", PunchKind::In),
            punch(2, "2025-03-10 08:00:30", PunchKind::In),
            punch(3, "2025-03-10 08:01:00", PunchKind::In),
            punch(4, "2025-03-10 17:00:00", PunchKind::Out),
        ];

        let first = normalize(&punches, &window, &defaults);
        let second = normalize(&punches, &window, &defaults);

        assert_eq!(first, second);
        assert_eq!(first.duplicates_collapsed, 2);
        assert_eq!(first.check_in, Some(ts("2025-03-10 08:00:00")));
    }

    // ==========================================================================
    // PN-005: out-of-window and unknown punches are ignored, not errors
    // ==========================================================================
    #[test]
    fn test_pn_005_out_of_window_and_unknown_ignored() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), Some(&day_shift()), &defaults);
        let punches = vec![
            punch(1, "2025-03-10 03:00:00", PunchKind::In), // before lookback
            punch(2, "2025-03-10 08:00:00", PunchKind::In),
            punch(3, "2025-03-10 12:00:00", PunchKind::Unknown),
            punch(4, "2025-03-10 17:00:00", PunchKind::Out),
            punch(5, "2025-03-10 23:30:00", PunchKind::Out), // past trailing buffer
        ];

        let normalized = normalize(&punches, &window, &defaults);
        assert_eq!(normalized.ignored, 3);
        assert_eq!(normalized.check_in, Some(ts("2025-03-10 08:00:00")));
        assert_eq!(normalized.check_out, Some(ts("2025-03-10 17:00:00")));
    }

    // ==========================================================================
    // PN-006: missing in or out punches leave the side as None
    // ==========================================================================
    #[test]
    fn test_pn_006_missing_sides() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), Some(&day_shift()), &defaults);

        let only_out = vec![punch(1, "2025-03-10 17:00:00", PunchKind::Out)];
        let normalized = normalize(&only_out, &window, &defaults);
        assert_eq!(normalized.check_in, None);
        assert_eq!(normalized.check_out, Some(ts("2025-03-10 17:00:00")));

        let only_in = vec![punch(1, "2025-03-10 08:00:00", PunchKind::In)];
        let normalized = normalize(&only_in, &window, &defaults);
        assert_eq!(normalized.check_in, Some(ts("2025-03-10 08:00:00")));
        assert_eq!(normalized.check_out, None);

        let normalized = normalize(&[], &window, &defaults);
        assert_eq!(normalized.check_in, None);
        assert_eq!(normalized.check_out, None);
        assert_eq!(normalized.break_hours, None);
    }

    // ==========================================================================
    // PN-007: overnight check-out next day attributes to the shift's date
    // ==========================================================================
    #[test]
    fn test_pn_007_overnight_checkout_attributed() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), Some(&night_shift()), &defaults);
        let punches = vec![
            punch(1, "2025-03-10 21:55:00", PunchKind::In),
            punch(2, "2025-03-11 06:05:00", PunchKind::Out),
        ];

        let normalized = normalize(&punches, &window, &defaults);
        assert_eq!(normalized.check_in, Some(ts("2025-03-10 21:55:00")));
        assert_eq!(normalized.check_out, Some(ts("2025-03-11 06:05:00")));
    }

    // ==========================================================================
    // PN-008: lunch-hour break detected and summed
    // ==========================================================================
    #[test]
    fn test_pn_008_break_detection() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), Some(&day_shift()), &defaults);
        let punches = vec![
            punch(1, "2025-03-10 08:00:00", PunchKind::In),
            punch(2, "2025-03-10 12:00:00", PunchKind::Out),
            punch(3, "2025-03-10 13:00:00", PunchKind::In),
            punch(4, "2025-03-10 17:00:00", PunchKind::Out),
        ];

        let normalized = normalize(&punches, &window, &defaults);
        assert_eq!(normalized.break_hours, Some(dec("1")));
        assert_eq!(normalized.break_start, Some(ts("2025-03-10 12:00:00")));
        assert_eq!(normalized.break_end, Some(ts("2025-03-10 13:00:00")));
    }

    // ==========================================================================
    // PN-009: multiple breaks all count; lunch break is primary
    // ==========================================================================
    #[test]
    fn test_pn_009_multiple_breaks_summed_lunch_primary() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), Some(&day_shift()), &defaults);
        let punches = vec![
            punch(1, "2025-03-10 08:00:00", PunchKind::In),
            punch(2, "2025-03-10 10:00:00", PunchKind::Out),
            punch(3, "2025-03-10 10:15:00", PunchKind::In),
            punch(4, "2025-03-10 12:30:00", PunchKind::Out),
            punch(5, "2025-03-10 13:30:00", PunchKind::In),
            punch(6, "2025-03-10 17:00:00", PunchKind::Out),
        ];

        let normalized = normalize(&punches, &window, &defaults);
        // 15 minutes + 60 minutes = 1.25 hours
        assert_eq!(normalized.break_hours, Some(dec("1.25")));
        assert_eq!(normalized.break_start, Some(ts("2025-03-10 12:30:00")));
        assert_eq!(normalized.break_end, Some(ts("2025-03-10 13:30:00")));
    }

    // ==========================================================================
    // PN-010: gaps too short or too long are not breaks
    // ==========================================================================
    #[test]
    fn test_pn_010_gap_bounds() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), Some(&day_shift()), &defaults);
        let punches = vec![
            punch(1, "2025-03-10 08:00:00", PunchKind::In),
            // 4-minute gap: badge noise, below the duplicate window anyway
            punch(2, "2025-03-10 09:00:00", PunchKind::Out),
            punch(3, "2025-03-10 09:04:00", PunchKind::In),
            punch(4, "2025-03-10 17:00:00", PunchKind::Out),
        ];

        let normalized = normalize(&punches, &window, &defaults);
        assert_eq!(normalized.break_hours, None);
    }

    #[test]
    fn test_window_without_shift_covers_calendar_day() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), None, &defaults);

        assert_eq!(window.start, ts("2025-03-10 00:00:00"));
        assert_eq!(window.end, ts("2025-03-11 04:00:00"));
    }

    #[test]
    fn test_unsorted_input_is_normalized_identically() {
        let defaults = SystemDefaults::default();
        let window = punch_window(date("2025-03-10"), Some(&day_shift()), &defaults);
        let sorted = vec![
            punch(1, "2025-03-10 08:00:00", PunchKind::In),
            punch(2, "2025-03-10 12:00:00", PunchKind::Out),
            punch(3, "2025-03-10 13:00:00", PunchKind::In),
            punch(4, "2025-03-10 17:00:00", PunchKind::Out),
        ];
        let mut shuffled = sorted.clone();
        shuffled.swap(0, 3);
        shuffled.swap(1, 2);

        assert_eq!(
            normalize(&sorted, &window, &defaults),
            normalize(&shuffled, &window, &defaults)
        );
    }
}
