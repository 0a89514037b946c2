//! Punch event model.
//!
//! This module defines the PunchEvent struct for raw clock events as
//! delivered by a punch source (biometric device, RFID reader, manual
//! entry) before normalization.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The direction of a punch event.
///
/// Punch sources occasionally deliver event types the engine does not
/// recognize; those deserialize to [`PunchKind::Unknown`] and are ignored
/// during normalization rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    /// A clock-in event.
    In,
    /// A clock-out event.
    Out,
    /// An event type the engine does not recognize.
    #[serde(other)]
    Unknown,
}

/// Represents a raw clock event for an employee.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{PunchEvent, PunchKind};
/// use chrono::NaiveDateTime;
///
/// let punch = PunchEvent {
///     id: 100,
///     employee_id: 1,
///     device_id: Some(3),
///     timestamp: NaiveDateTime::parse_from_str("2025-03-10 07:58:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     kind: PunchKind::In,
///     is_processed: false,
/// };
/// assert_eq!(punch.kind, PunchKind::In);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// Unique identifier for the punch.
    pub id: i64,
    /// The employee who punched.
    pub employee_id: i64,
    /// The device the punch came from, if known.
    pub device_id: Option<i64>,
    /// When the punch occurred.
    pub timestamp: NaiveDateTime,
    /// The punch direction.
    pub kind: PunchKind,
    /// Whether a previous engine run has consumed this punch. The engine
    /// reads this flag but never mutates it; marking punches processed is
    /// the punch source's concern.
    #[serde(default)]
    pub is_processed: bool,
}
