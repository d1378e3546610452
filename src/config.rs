//! Configuration loading and management
//!
//! Handles parsing of `tasklist.toml` configuration files.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::date::DEFAULT_DATE_FORMAT;
use crate::error::{Error, Result};

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "tasklist.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rendering configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Task store configuration
    #[serde(default)]
    pub tasks: TasksConfig,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// strftime pattern for due dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Class attached to rows of completed tasks
    #[serde(default = "default_completed_class")]
    pub completed_class: String,

    /// Text shown when a due date cannot be parsed
    #[serde(default = "default_invalid_date")]
    pub invalid_date: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_completed_class() -> String {
    "completed".to_string()
}

fn default_invalid_date() -> String {
    "Invalid date".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            completed_class: default_completed_class(),
            invalid_date: default_invalid_date(),
        }
    }
}

/// Task store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasksConfig {
    /// How new task ids are generated
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

/// Id generation strategy for new tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Monotonic counter starting at 1.
    #[default]
    Sequential,
    /// Lowercase ULID strings.
    Ulid,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration for a session.
    ///
    /// An explicit path must load cleanly. Otherwise `tasklist.toml` in `dir`
    /// and then the user config file are tried, falling back to defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidates = [Some(dir.join(CONFIG_FILE)), user_config_path()];
        for path in candidates.into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            return match Self::load(&path) {
                Ok(config) => Ok(config),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring config");
                    Ok(Self::default())
                }
            };
        }
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.display.validate()
    }
}

impl DisplayConfig {
    fn validate(&self) -> Result<()> {
        if self.date_format.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "display.date_format cannot be empty".to_string(),
            ));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidConfig(format!(
                "display.date_format is not a valid strftime pattern: {}",
                self.date_format
            )));
        }
        // Time and offset specifiers parse but cannot format a calendar date.
        let sample = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap_or_default();
        let mut rendered = String::new();
        if write!(rendered, "{}", sample.format(&self.date_format)).is_err() {
            return Err(Error::InvalidConfig(format!(
                "display.date_format must only use date fields: {}",
                self.date_format
            )));
        }
        let class = self.completed_class.trim();
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(Error::InvalidConfig(
                "display.completed_class must be a single non-empty word".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-user config file, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tasklist").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        Config::default().validate().expect("valid defaults");
    }

    #[test]
    fn default_date_format_matches_renderer_default() {
        assert_eq!(Config::default().display.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(
            crate::render::RenderOptions::default().date_format,
            DEFAULT_DATE_FORMAT
        );
    }

    #[test]
    fn rejects_broken_strftime_pattern() {
        let mut config = Config::default();
        config.display.date_format = "%Q %d".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_time_fields_in_date_pattern() {
        let mut config = Config::default();
        for pattern in ["%b %d, %Y %H:%M", "%Y-%m-%d %z"] {
            config.display.date_format = pattern.to_string();
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "{pattern}"
            );
        }
    }

    #[test]
    fn rejects_multi_word_completed_class() {
        let mut config = Config::default();
        config.display.completed_class = "is done".to_string();
        assert!(config.validate().is_err());
    }
}
