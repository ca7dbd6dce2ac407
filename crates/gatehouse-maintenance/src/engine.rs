//! Generic repeated-batch maintenance engine.
//!
//! One run repeatedly invokes a pluggable "process one slice" strategy,
//! accumulating totals and error counts, and emits one summary telemetry
//! event when the run did anything. The engine never propagates a
//! failure out of a run: a thrown failure would unschedule future runs,
//! which is exactly what the maintenance jobs must survive.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use gatehouse_core::telemetry::{TelemetryEvent, TelemetrySink};

/// Errors in accumulation after which a run gives up.
const MAX_ERRORS: u32 = 3;

/// A failure processing one slice.
#[derive(Debug, Error)]
pub enum JobError {
    /// The backing repository failed.
    #[error("repository failure: {0}")]
    Repository(String),
}

/// One pluggable maintenance strategy.
///
/// A strategy processes one bounded slice of records per call and
/// returns the count processed. The backing query must reflect only
/// currently-stale records, so repeated calls make progress as records
/// are remediated.
#[async_trait]
pub trait BatchProcessor: Send + Sync {
    /// Telemetry event name prefix for this job.
    fn name(&self) -> &'static str;

    /// Processes one slice, returning the number of records processed.
    async fn process_batch(&self) -> Result<u32, JobError>;
}

/// Accumulated state of one maintenance run.
///
/// Created at the start of one invocation, mutated once per iteration,
/// and discarded at the end; nothing is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Lifetime processed count across all iterations of the run.
    pub total: u32,
    /// Count from the most recent successful iteration.
    pub processed: u32,
    /// Number of failed iterations.
    pub error_count: u32,
    /// Whether the most recent iteration failed.
    pub last_run_failed: bool,
}

impl BatchOutcome {
    /// Records one successful iteration.
    fn record_success(&mut self, count: u32) {
        self.processed = count;
        self.total += count;
        self.last_run_failed = false;
    }

    /// Records one failed iteration.
    fn record_failure(&mut self) {
        self.error_count += 1;
        self.last_run_failed = true;
    }

    /// Whether this run did anything worth reporting.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        self.total > 0 || self.error_count > 0
    }
}

/// Drives maintenance strategies to completion, one run at a time.
///
/// Shared across jobs; the stopping rule and error threshold live here
/// so they are not duplicated per job.
pub struct BatchEngine {
    batch_size: u32,
    sink: Arc<dyn TelemetrySink>,
}

impl BatchEngine {
    /// Creates an engine with the given slice size and telemetry sink.
    #[must_use]
    pub fn new(batch_size: u32, sink: Arc<dyn TelemetrySink>) -> Self {
        Self { batch_size, sink }
    }

    /// Runs one job until its stopping rule fires.
    ///
    /// Keeps iterating while the last slice was full (more work likely
    /// remains) or the last attempt failed (worth one more try), giving
    /// up after three accumulated errors. Failures are logged and
    /// counted, never propagated.
    pub async fn run(&self, job: &dyn BatchProcessor) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        loop {
            match job.process_batch().await {
                Ok(count) => outcome.record_success(count),
                Err(err) => {
                    warn!(job = job.name(), error = %err, "maintenance slice failed");
                    outcome.record_failure();
                }
            }

            let keep_going = (outcome.processed >= self.batch_size || outcome.last_run_failed)
                && outcome.error_count < MAX_ERRORS;
            if !keep_going {
                break;
            }
        }

        if outcome.is_reportable() {
            self.sink.track(
                TelemetryEvent::new(format!("{}Finished", job.name()))
                    .property("total", outcome.total.to_string())
                    .property("errors", outcome.error_count.to_string()),
            );
        }

        outcome
    }
}
