//! Calculation logic for the Attendance Record Computation Engine.
//!
//! This module contains all the computation functions for deriving
//! attendance records, including day classification, shift resolution
//! with deterministic tie-breaks, punch normalization with break
//! detection, prioritized overtime rule selection, category/night
//! overtime splitting, the per-employee-day record calculator, and the
//! bounded-concurrency batch executor.

mod batch;
mod calendar;
mod overtime_split;
mod punch_normalizer;
mod record_calculator;
mod rule_selector;
mod shift_resolver;

pub use batch::{process_batch, BatchFailure, BatchOutcome, EmployeeDay};
pub use calendar::{classify_day, is_holiday, is_weekend, weekday_index, DayClass};
pub use overtime_split::{split_overtime, OvertimeEligibility, OvertimeSplit};
pub use punch_normalizer::{normalize, punch_window, NormalizedPunches, PunchWindow};
pub use record_calculator::compute_record;
pub use rule_selector::{multiplier_for, rule_applies_on, select_rule};
pub use shift_resolver::{resolve_shift, ResolvedShift, ShiftSource};
