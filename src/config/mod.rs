//! Configuration and reference-data snapshots for the engine.
//!
//! The engine never queries live configuration; every computation reads
//! an immutable [`ReferenceData`] snapshot supplied by the caller. The
//! [`ConfigLoader`] builds such a snapshot from a directory of YAML files
//! for callers that keep reference data on disk.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ReferenceData, SystemDefaults};
