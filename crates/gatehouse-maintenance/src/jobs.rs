//! Concrete maintenance jobs.
//!
//! Each job supplies only its per-slice strategy and telemetry name; the
//! iterate/stop/report logic lives in the engine. Thresholds come from
//! configuration (90 days to disable, 1 year to delete).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::engine::{BatchProcessor, JobError};

/// Store operations over stale local accounts.
///
/// Each call processes at most one page of records and returns the count
/// actually mutated. Queries reflect only currently-stale records, so
/// repeated calls make progress.
#[async_trait]
pub trait StaleAccountRepository: Send + Sync {
    /// Disables one page of enabled accounts that have not logged in
    /// since `inactive_before`. Returns the number disabled.
    async fn disable_inactive_batch(
        &self,
        inactive_before: DateTime<Utc>,
    ) -> Result<u32, JobError>;

    /// Deletes one page of disabled accounts unused since
    /// `unused_before`. Returns the number deleted.
    async fn delete_disabled_batch(&self, unused_before: DateTime<Utc>) -> Result<u32, JobError>;
}

/// Disables accounts that have been inactive past the threshold.
pub struct DisableInactiveJob {
    repository: Arc<dyn StaleAccountRepository>,
    threshold: Duration,
}

impl DisableInactiveJob {
    /// Creates the job with the given inactivity threshold.
    #[must_use]
    pub fn new(repository: Arc<dyn StaleAccountRepository>, threshold: Duration) -> Self {
        Self {
            repository,
            threshold,
        }
    }
}

#[async_trait]
impl BatchProcessor for DisableInactiveJob {
    fn name(&self) -> &'static str {
        "DisableInactiveAuthUsers"
    }

    async fn process_batch(&self) -> Result<u32, JobError> {
        let cutoff = Utc::now() - self.threshold;
        self.repository.disable_inactive_batch(cutoff).await
    }
}

/// Deletes accounts that have stayed disabled past the threshold.
pub struct DeleteDisabledJob {
    repository: Arc<dyn StaleAccountRepository>,
    threshold: Duration,
}

impl DeleteDisabledJob {
    /// Creates the job with the given unused threshold.
    #[must_use]
    pub fn new(repository: Arc<dyn StaleAccountRepository>, threshold: Duration) -> Self {
        Self {
            repository,
            threshold,
        }
    }
}

#[async_trait]
impl BatchProcessor for DeleteDisabledJob {
    fn name(&self) -> &'static str {
        "DeleteDisabledAuthUsers"
    }

    async fn process_batch(&self) -> Result<u32, JobError> {
        let cutoff = Utc::now() - self.threshold;
        self.repository.delete_disabled_batch(cutoff).await
    }
}
