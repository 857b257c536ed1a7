//! Configuration management for the constituency dashboard.
//!
//! Handles loading and saving configuration from JSONC files.
//! Manages the active role, table paging, data and log locations, and
//! per-report view presets.

use crate::report::{Report, Role};
use crate::table::{FilterSet, SortSpec};
use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "constituency-tui";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Role whose reports are shown
    pub role: Role,
    /// Table rows per page
    pub page_size: usize,
    /// Directory with `<report>.json` overrides (relative to config dir or absolute)
    pub data_dir: Option<String>,
    /// Log level: trace, debug, info, warn or error
    pub log_level: String,
    /// Log directory (relative to config dir or absolute)
    pub log_dir: String,
    /// Tab opened at startup
    pub default_report: Option<Report>,
    /// Initial filters and sort per report
    pub views: BTreeMap<Report, ViewPreset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            role: Role::default(),
            page_size: 10,
            data_dir: None,
            log_level: "info".to_string(),
            log_dir: "logs".to_string(),
            default_report: None,
            views: BTreeMap::new(),
        }
    }
}

/// Initial query of a report table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewPreset {
    /// Field key -> value or "all"
    pub filters: FilterSet,
    pub sort: Option<SortSpec>,
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Reads `$XDG_CONFIG_HOME/constituency-tui/config.jsonc` by default.
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_line_comments(&content))
            .with_context(|| format!("Failed to deserialize config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Save configuration to file.
    ///
    /// # Details
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, json)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(app_config_dir()?.join("config.jsonc"))
    }

    /// Resolved data directory, if one is configured.
    pub fn data_dir_path(&self) -> Result<Option<PathBuf>> {
        self.data_dir.as_deref().map(resolve).transpose()
    }

    /// Resolved log directory.
    pub fn log_dir_path(&self) -> Result<PathBuf> {
        resolve(&self.log_dir)
    }

    /// Preset for a report, or an empty one.
    pub fn view(&self, report: Report) -> ViewPreset {
        self.views.get(&report).cloned().unwrap_or_default()
    }
}

fn app_config_dir() -> Result<PathBuf> {
    let config_dir =
        config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
    Ok(config_dir.join(APP_DIR))
}

/// Absolute paths as-is; relative ones under the app config directory.
fn resolve(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(app_config_dir()?.join(path))
    }
}

/// Strip `//` comments outside of string literals.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut in_string = false;
            let mut escaped = false;
            let bytes = line.as_bytes();
            for i in 0..bytes.len() {
                match bytes[i] {
                    _ if escaped => escaped = false,
                    b'\\' if in_string => escaped = true,
                    b'"' => in_string = !in_string,
                    b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => {
                        return line[..i].trim_end();
                    }
                    _ => {}
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
