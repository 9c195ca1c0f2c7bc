//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default prediction service address
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";
/// Default prediction endpoint path
pub const DEFAULT_PREDICT_PATH: &str = "/api/predict";
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment override for the service address
const SERVICE_URL_ENV: &str = "CARDIO_SERVICE_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// Base URL of the prediction service
    pub service_url: Option<String>,
    /// Prediction endpoint path
    pub predict_path: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Check form completeness before sending
    pub enforce_validation: Option<bool>,
}

impl ClientConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "cardio", "cardio-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from the user config file, then apply env overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(SERVICE_URL_ENV) {
            config.service_url = Some(url);
        }
        Ok(config)
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    pub fn service_url(&self) -> &str {
        self.service_url.as_deref().unwrap_or(DEFAULT_SERVICE_URL)
    }

    pub fn predict_path(&self) -> &str {
        self.predict_path.as_deref().unwrap_or(DEFAULT_PREDICT_PATH)
    }

    /// Full URL of the prediction endpoint
    pub fn endpoint(&self) -> String {
        let base = self.service_url().trim_end_matches('/');
        let path = self.predict_path();
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn enforce_validation(&self) -> bool {
        self.enforce_validation.unwrap_or(true)
    }
}
