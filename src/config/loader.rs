//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for building a
//! [`ReferenceData`] snapshot from a directory of YAML files.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Holiday, OvertimeRule, ShiftAssignment, ShiftDefinition};

use super::types::{ReferenceData, SystemDefaults};

/// File wrapper for `employees.yaml`.
#[derive(Debug, Deserialize)]
struct EmployeesFile {
    employees: Vec<Employee>,
}

/// File wrapper for `shifts.yaml`.
#[derive(Debug, Deserialize)]
struct ShiftsFile {
    shifts: Vec<ShiftDefinition>,
}

/// File wrapper for `assignments.yaml`.
#[derive(Debug, Deserialize)]
struct AssignmentsFile {
    assignments: Vec<ShiftAssignment>,
}

/// File wrapper for `rules.yaml`.
#[derive(Debug, Deserialize)]
struct RulesFile {
    rules: Vec<OvertimeRule>,
}

/// File wrapper for `holidays.yaml`.
#[derive(Debug, Deserialize)]
struct HolidaysFile {
    holidays: Vec<Holiday>,
}

/// Loads reference data from a directory of YAML files.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── defaults.yaml     # System-wide defaults
/// ├── employees.yaml
/// ├── shifts.yaml
/// ├── assignments.yaml
/// ├── rules.yaml
/// └── holidays.yaml
/// ```
///
/// Shift definitions and overtime rules are validated eagerly so that
/// structurally invalid reference data is rejected at load time rather
/// than surfacing mid-batch.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let snapshot = loader.snapshot();
/// println!("{} shifts loaded", snapshot.shifts.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    snapshot: ReferenceData,
}

impl ConfigLoader {
    /// Loads reference data from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any required file is missing ([`EngineError::ConfigNotFound`])
    /// - Any file contains invalid YAML ([`EngineError::ConfigParseError`])
    /// - Any shift or rule definition is structurally invalid
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let defaults = Self::load_yaml::<SystemDefaults>(&path.join("defaults.yaml"))?;
        let employees = Self::load_yaml::<EmployeesFile>(&path.join("employees.yaml"))?.employees;
        let shifts = Self::load_yaml::<ShiftsFile>(&path.join("shifts.yaml"))?.shifts;
        let assignments =
            Self::load_yaml::<AssignmentsFile>(&path.join("assignments.yaml"))?.assignments;
        let rules = Self::load_yaml::<RulesFile>(&path.join("rules.yaml"))?.rules;
        let holidays = Self::load_yaml::<HolidaysFile>(&path.join("holidays.yaml"))?.holidays;

        let snapshot = ReferenceData::new(employees, shifts, assignments, rules, holidays, defaults);
        snapshot.validate()?;

        Ok(Self { snapshot })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded reference-data snapshot.
    pub fn snapshot(&self) -> &ReferenceData {
        &self.snapshot
    }

    /// Consumes the loader, returning the owned snapshot.
    pub fn into_snapshot(self) -> ReferenceData {
        self.snapshot
    }
}
