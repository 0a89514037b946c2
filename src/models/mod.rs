//! Core data models for the Attendance Record Computation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod holiday;
mod punch;
mod record;
mod rule;
mod shift;

pub use employee::Employee;
pub use holiday::Holiday;
pub use punch::{PunchEvent, PunchKind};
pub use record::{AttendanceRecord, AttendanceStatus, ShiftType};
pub use rule::OvertimeRule;
pub use shift::{ShiftAssignment, ShiftDefinition};
