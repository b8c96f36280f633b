//! Monitor settings loaded from a config file with environment overrides.
//!
//! ```toml
//! server_uri = "http://localhost:8080"
//! snapshot_file = "snapshot.json"
//! refresh_secs = 2
//!
//! [thresholds]
//! heap_warning_mb = 512
//! ```
//!
//! Environment variables prefixed with `PULSEWATCH` override file values,
//! e.g. `PULSEWATCH_SERVER_URI=http://staging:8080`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::Thresholds;

/// Settings for a monitoring session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Base URI of the monitored server.
    pub server_uri: String,

    /// JSON file polled for snapshots, when file delivery is used.
    pub snapshot_file: Option<PathBuf>,

    /// Poll cadence in seconds for file delivery.
    pub refresh_secs: u64,

    /// Health grading thresholds.
    pub thresholds: Thresholds,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            server_uri: "http://localhost:8080".to_string(),
            snapshot_file: None,
            refresh_secs: 1,
            thresholds: Thresholds::default(),
        }
    }
}

impl MonitorSettings {
    /// Load settings from a file, applying `PULSEWATCH_*` environment
    /// overrides on top.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("PULSEWATCH"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
