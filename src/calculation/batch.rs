//! Bounded-concurrency batch execution.
//!
//! Record computation is embarrassingly parallel: invocations share no
//! mutable state, so a batch runs one task per employee-day over a
//! read-only snapshot, bounded by a caller-supplied concurrency limit.
//! A failed employee-day never blocks or corrupts the others; failures
//! are collected and reported as a list.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ReferenceData;
use crate::error::EngineError;
use crate::models::{AttendanceRecord, PunchEvent};

use super::record_calculator::compute_record;

/// One unit of batch work: recompute a single employee-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeDay {
    /// The employee to compute.
    pub employee_id: i64,
    /// The date to compute.
    pub date: NaiveDate,
}

/// A single employee-day that could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The employee whose record failed.
    pub employee_id: i64,
    /// The date that failed.
    pub date: NaiveDate,
    /// The failure, rendered for reporting.
    pub message: String,
}

/// The outcome of a batch run.
///
/// `records` and `failures` are sorted by employee and date so that two
/// runs over the same inputs produce the same outcome apart from the
/// run id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Identifier stamped on this run for log correlation.
    pub run_id: Uuid,
    /// Successfully computed records.
    pub records: Vec<AttendanceRecord>,
    /// Employee-days skipped because no attendance was expected.
    pub skipped: usize,
    /// Employee-days that failed, with context to fix the data.
    pub failures: Vec<BatchFailure>,
}

enum JobResult {
    Record(Box<AttendanceRecord>),
    Skipped,
    Failed(BatchFailure),
}

/// Computes a batch of employee-days concurrently.
///
/// `punches_by_employee` holds the pre-fetched punch events for every
/// employee in the batch; computation never performs I/O of its own.
/// `concurrency` bounds the number of in-flight computations (values
/// below 1 are treated as 1). The engine emits exactly one record per
/// successful employee-day and nothing for skipped days; writing records
/// out, including serializing concurrent writes per employee-day, is
/// the output sink's concern.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{process_batch, EmployeeDay};
/// use attendance_engine::config::{ReferenceData, SystemDefaults};
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let snapshot = Arc::new(ReferenceData::new(
///     vec![],
///     vec![],
///     vec![],
///     vec![],
///     vec![],
///     SystemDefaults::default(),
/// ));
/// let outcome = process_batch(snapshot, Arc::new(HashMap::new()), vec![], 4).await;
/// assert!(outcome.records.is_empty());
/// # }
/// ```
pub async fn process_batch(
    snapshot: Arc<ReferenceData>,
    punches_by_employee: Arc<HashMap<i64, Vec<PunchEvent>>>,
    jobs: Vec<EmployeeDay>,
    concurrency: usize,
) -> BatchOutcome {
    let run_id = Uuid::new_v4();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    debug!(%run_id, jobs = jobs.len(), concurrency, "starting batch run");

    for job in jobs {
        let snapshot = Arc::clone(&snapshot);
        let punches_by_employee = Arc::clone(&punches_by_employee);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("batch semaphore is never closed");

            let Some(employee) = snapshot.employee(job.employee_id) else {
                return JobResult::Failed(BatchFailure {
                    employee_id: job.employee_id,
                    date: job.date,
                    message: EngineError::UnknownEmployee {
                        employee_id: job.employee_id,
                    }
                    .to_string(),
                });
            };

            let punches = punches_by_employee
                .get(&job.employee_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            match compute_record(&snapshot, employee, job.date, punches) {
                Ok(Some(record)) => JobResult::Record(Box::new(record)),
                Ok(None) => JobResult::Skipped,
                Err(error) => JobResult::Failed(BatchFailure {
                    employee_id: job.employee_id,
                    date: job.date,
                    message: error.to_string(),
                }),
            }
        });
    }

    let mut records = Vec::new();
    let mut failures = Vec::new();
    let mut skipped = 0;

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(JobResult::Record(record)) => records.push(*record),
            Ok(JobResult::Skipped) => skipped += 1,
            Ok(JobResult::Failed(failure)) => {
                warn!(
                    %run_id,
                    employee_id = failure.employee_id,
                    date = %failure.date,
                    message = %failure.message,
                    "employee-day computation failed"
                );
                failures.push(failure);
            }
            Err(join_error) => {
                warn!(%run_id, error = %join_error, "batch task panicked");
            }
        }
    }

    records.sort_by_key(|r| (r.employee_id, r.date));
    failures.sort_by_key(|f| (f.employee_id, f.date));

    debug!(
        %run_id,
        records = records.len(),
        skipped,
        failures = failures.len(),
        "batch run finished"
    );

    BatchOutcome {
        run_id,
        records,
        skipped,
        failures,
    }
}
