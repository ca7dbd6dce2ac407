//! Configuration management for Gatehouse.
//!
//! Supports loading configuration from environment variables or files via
//! serde. All settings have working defaults so a bare instance starts
//! with the probation integration disabled and conservative maintenance
//! thresholds.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main configuration structure for Gatehouse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Probation integration configuration.
    pub probation: ProbationConfig,
    /// Account maintenance configuration.
    pub maintenance: MaintenanceConfig,
}

/// Configuration for the remote probation identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbationConfig {
    /// Whether the probation integration is enabled.
    ///
    /// When disabled, probation lookups return empty results without
    /// attempting any network I/O.
    pub enabled: bool,

    /// Base URL of the remote probation service.
    pub endpoint_url: String,

    /// Connection timeout for the remote service.
    #[serde(with = "humantime_serde")]
    pub connection_timeout: Duration,

    /// Read timeout for the remote service.
    #[serde(with = "humantime_serde")]
    pub read_timeout: Duration,

    /// Remote role name to local authority names, as loaded.
    ///
    /// Keys are normalized (uppercased, `.` replaced with `_`) when the
    /// mapping table is built, not here.
    pub role_mappings: HashMap<String, Vec<String>>,
}

impl Default for ProbationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint_url: "http://localhost:8099".to_string(),
            connection_timeout: Duration::from_secs(2),
            read_timeout: Duration::from_secs(5),
            role_mappings: HashMap::new(),
        }
    }
}

/// Configuration for the scheduled account maintenance jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Fixed page size returned by one batch slice.
    pub batch_size: u32,

    /// Inactivity threshold after which accounts are disabled.
    #[serde(with = "humantime_serde")]
    pub disable_inactivity_threshold: Duration,

    /// Inactivity threshold after which disabled accounts are deleted.
    #[serde(with = "humantime_serde")]
    pub delete_inactivity_threshold: Duration,
}

impl MaintenanceConfig {
    /// 90 days.
    const DEFAULT_DISABLE_THRESHOLD: Duration = Duration::from_secs(90 * 24 * 60 * 60);
    /// 1 year.
    const DEFAULT_DELETE_THRESHOLD: Duration = Duration::from_secs(365 * 24 * 60 * 60);
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            disable_inactivity_threshold: Self::DEFAULT_DISABLE_THRESHOLD,
            delete_inactivity_threshold: Self::DEFAULT_DELETE_THRESHOLD,
        }
    }
}
