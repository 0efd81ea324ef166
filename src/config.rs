//! Configuration persistence for the tracker.

use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::calendar;

/// Application configuration that persists between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The currently selected theme name.
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Reference timezone for day boundaries (streaks, quota, heatmap), as
    /// minutes east of UTC. One fixed offset for the whole app.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_utc_offset() -> i32 {
    calendar::DEFAULT_UTC_OFFSET_MINUTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            utc_offset_minutes: default_utc_offset(),
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("leetcycle")
            .join("config.toml")
    }

    pub fn reference_offset(&self) -> FixedOffset {
        calendar::offset_from_minutes(self.utc_offset_minutes)
    }

    /// Load config from disk, returning default if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "default");
        assert_eq!(
            config.utc_offset_minutes,
            calendar::DEFAULT_UTC_OFFSET_MINUTES
        );
    }

    #[test]
    fn reference_offset_builds_from_minutes() {
        let config = Config {
            utc_offset_minutes: -300,
            ..Default::default()
        };
        assert_eq!(config.reference_offset().local_minus_utc(), -300 * 60);
    }
}
