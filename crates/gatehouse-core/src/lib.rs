//! # gatehouse-core
//!
//! Core utilities, configuration, error handling, and telemetry for
//! Gatehouse.
//!
//! This crate provides foundational types used across all other Gatehouse
//! crates. Gatehouse reconciles user identity across four systems of
//! record (the local credential store, the prison management system, the
//! probation case management system, and a directory federation provider)
//! behind one authentication contract.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::Config;
pub use error::{Error, Result};
pub use telemetry::{TelemetryEvent, TelemetrySink};
