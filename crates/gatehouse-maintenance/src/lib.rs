//! # gatehouse-maintenance
//!
//! Scheduled account maintenance for Gatehouse.
//!
//! A generic repeated-batch engine drives pluggable per-slice strategies
//! (disable dormant accounts, delete long-disabled ones). The engine
//! tolerates partial failure: a failing slice is counted and retried,
//! never propagated, so one bad run cannot unschedule future runs.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod engine;
pub mod jobs;

pub use engine::{BatchEngine, BatchOutcome, BatchProcessor, JobError};
pub use jobs::{DeleteDisabledJob, DisableInactiveJob, StaleAccountRepository};
