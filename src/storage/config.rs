//! Configuration handling
//!
//! Configuration is stored in `.rota/config.toml` (project) and
//! `~/.config/rota/config.toml` (global). Project values win.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Settings for the assignment lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssignmentConfig {
    /// Minutes a pending assignment stays open before the sweeper
    /// expires it
    pub pending_expiry_minutes: u32,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            pending_expiry_minutes: 10,
        }
    }
}

/// Settings for the expiry sweeper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweeperConfig {
    /// Seconds between sweep runs in `rota sweep --watch`
    pub interval_seconds: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
        }
    }
}

/// Merged project + global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub assignment: AssignmentConfig,
    pub sweeper: SweeperConfig,
}

impl Config {
    /// How long a new pending assignment stays open
    pub fn pending_for(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.assignment.pending_expiry_minutes))
    }

    /// Sweep interval for watch mode
    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweeper.interval_seconds)
    }

    /// Loads configuration for a project, overlaying the project file
    /// on top of the global one
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let mut config = Self::load_global()?.unwrap_or_default();

        let project_path = project_root.join(".rota").join("config.toml");
        if let Some(project) = Self::load_file(&project_path)? {
            config = project;
        }

        config.validate()?;
        Ok(config)
    }

    /// Path to the global config file, if a home directory exists
    pub fn global_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "rota").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn load_global() -> Result<Option<Self>> {
        match Self::global_path() {
            Some(path) => Self::load_file(&path),
            None => Ok(None),
        }
    }

    fn load_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(Some(config))
    }

    fn validate(&self) -> Result<()> {
        if self.assignment.pending_expiry_minutes == 0 {
            return Err(
                ConfigError::Invalid("pending_expiry_minutes must be at least 1".to_string())
                    .into(),
            );
        }
        if self.sweeper.interval_seconds == 0 {
            return Err(
                ConfigError::Invalid("interval_seconds must be at least 1".to_string()).into(),
            );
        }
        Ok(())
    }

    /// Finds the project root by walking up from the current directory
    pub fn find_project_root() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            if dir.join(".rota").is_dir() {
                return Some(dir);
            }
            if !dir.pop() {
                return None;
            }
        }
    }
}

/// Default contents written to `.rota/config.toml` on init
pub const DEFAULT_CONFIG: &str = r#"# rota configuration

[assignment]
# Minutes a pending assignment stays open before it expires
pending_expiry_minutes = 10

[sweeper]
# Seconds between sweep runs in watch mode
interval_seconds = 60
"#;
