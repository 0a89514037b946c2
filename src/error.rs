//! Error types for the Attendance Record Computation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only structurally invalid reference data produces an error; data
//! anomalies such as missing punches or overlapping assignments are
//! resolved by documented fallbacks and surface as status values instead.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance Record Computation Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A shift definition was invalid or contained inconsistent data.
    #[error("Invalid shift definition {shift_id}: {message}")]
    InvalidShift {
        /// The id of the invalid shift definition.
        shift_id: i64,
        /// A description of what made the definition invalid.
        message: String,
    },

    /// An overtime rule was invalid or contained inconsistent data.
    #[error("Invalid overtime rule {rule_id}: {message}")]
    InvalidRule {
        /// The id of the invalid rule.
        rule_id: i64,
        /// A description of what made the rule invalid.
        message: String,
    },

    /// A shift id was referenced but no definition exists in the snapshot.
    #[error("Shift {shift_id} is referenced but missing from the reference data")]
    UnknownShift {
        /// The dangling shift id.
        shift_id: i64,
    },

    /// An employee id was referenced but no employee exists in the snapshot.
    #[error("Employee {employee_id} is missing from the reference data")]
    UnknownEmployee {
        /// The dangling employee id.
        employee_id: i64,
    },

    /// A computation for a specific employee-day failed.
    #[error("Computation failed for employee {employee_id} on {date}: {message}")]
    ComputationFailed {
        /// The employee whose record could not be computed.
        employee_id: i64,
        /// The date of the failed computation.
        date: NaiveDate,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
