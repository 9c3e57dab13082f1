//! Configuration system for yptr.
//!
//! Settings are read from a TOML file; every field is optional and falls back
//! to its default.
//!
//! # Example
//!
//! ```
//! use yptr::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.indent_size, 4);
//! assert!(!config.create_backup);
//!
//! let custom = Config {
//!     indent_size: 2,
//!     ..Config::default()
//! };
//! assert_eq!(custom.log_level, "warn");
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the yptr command line tool.
///
/// # Fields
///
/// * `indent_size` - Spaces per indentation level when writing YAML (default: 4)
/// * `create_backup` - Create .bak files before overwriting (default: false)
/// * `log_level` - Log filter used when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces per indentation level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,

    /// Log filter, e.g. "info" or "yptr=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_indent_size() -> usize {
    4
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            create_backup: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yptr/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yptr");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string).context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.indent_size, 4);
        assert!(!config.create_backup);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_config_path_ends_with_app_dir() {
        if let Some(path) = Config::config_path() {
            assert!(path.ends_with(".config/yptr/config.toml"));
        }
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let config = Config::load_from(Path::new("/nonexistent/yptr/config.toml"));
        assert_eq!(config, Config::default());
    }
}
