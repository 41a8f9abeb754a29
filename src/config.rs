//! Configuration handling for the wizard

use crate::persistence::{FileProgressStore, SnapshotPolicy};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the relay endpoint
pub const RELAY_URL_ENV: &str = "QUOTE_WIZARD_RELAY_URL";
/// Environment variable overriding the request recipient
pub const RECIPIENT_ENV: &str = "QUOTE_WIZARD_RECIPIENT";

const DEFAULT_RECIPIENT: &str = "orcamentos@example.com";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// User configuration for the wizard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WizardConfig {
    /// Address that receives quote requests
    pub recipient: Option<String>,
    /// Copy recipient passed to the relay
    pub cc: Option<String>,
    /// Relay endpoint; defaults to the hosted relay for `recipient`
    pub relay_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    /// Open the mail client when the relay fails
    pub mail_fallback: Option<bool>,
    /// Snapshot file location
    pub snapshot_path: Option<PathBuf>,
    pub snapshot_policy: Option<SnapshotPolicy>,
}

impl WizardConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("br", "quote-wizard", "quote-wizard")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config at {}", path.display()))?;
        Ok(config)
    }

    /// Overlay values found by `lookup` (normally the process environment)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(url) = non_empty(RELAY_URL_ENV) {
            self.relay_url = Some(url);
        }
        if let Some(recipient) = non_empty(RECIPIENT_ENV) {
            self.recipient = Some(recipient);
        }
    }

    pub fn recipient(&self) -> &str {
        self.recipient.as_deref().unwrap_or(DEFAULT_RECIPIENT)
    }

    pub fn cc(&self) -> Option<&str> {
        self.cc.as_deref().filter(|cc| !cc.trim().is_empty())
    }

    pub fn relay_url(&self) -> String {
        self.relay_url
            .clone()
            .unwrap_or_else(|| format!("https://formsubmit.co/{}", self.recipient()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn mail_fallback(&self) -> bool {
        self.mail_fallback.unwrap_or(true)
    }

    pub fn snapshot_policy(&self) -> SnapshotPolicy {
        self.snapshot_policy.unwrap_or(SnapshotPolicy::Reject)
    }

    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot_path
            .clone()
            .or_else(FileProgressStore::default_path)
    }

    /// Log file inside the data directory
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("quote-wizard.log"))
    }
}
