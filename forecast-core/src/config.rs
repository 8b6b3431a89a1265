use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::{ForecastRequest, Units};

/// Helper-level defaults stored on disk as TOML.
///
/// The config never supplies an API key: a request that arrives without one
/// is rejected rather than completed with borrowed credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Provider endpoint override, e.g. a self-hosted gateway.
    pub base_url: Option<String>,

    /// Units used when the inbound payload does not name any.
    pub units: Option<Units>,

    /// Forecast language used when the inbound payload does not name one.
    pub language: Option<String>,
}

impl Config {
    /// Fill the fields the payload left unset. Payload values always win.
    pub fn fill_defaults(&self, request: &mut ForecastRequest) {
        if request.units.is_none() {
            request.units = self.units;
        }
        if request.language.is_none() {
            request.language = self.language.clone();
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "mirror-forecast", "forecast-helper")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
