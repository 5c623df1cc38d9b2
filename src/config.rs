//! Engine configuration
//!
//! TOML-backed configuration for a reconciliation run: the conflict policy
//! and the logging setup. Absent fields fall back to defaults, so an empty
//! file is a valid configuration.

use crate::logging::LoggingConfig;
use crate::reconcile::ReconcileMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid logging directive: {0}")]
    Directive(String),
}

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Conflict policy for reconciliation runs. Callers choosing `lenient`
    /// accept that structurally inconsistent records are skipped with a log
    /// entry instead of aborting the batch.
    #[serde(default)]
    pub mode: ReconcileMode,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}
