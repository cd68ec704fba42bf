// SPDX-License-Identifier: Apache-2.0

//! Configuration management for the retro CLI.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `RETRO_`)
//! 2. Config file: `~/.config/retro/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Override the report cadence via environment variable
//! RETRO_REPORT__CADENCE=weekly retro
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::RetroError;

/// Largest page size the GitHub search API accepts.
pub const MAX_PER_PAGE: u8 = 100;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Report defaults.
    pub report: ReportConfig,
    /// GitHub API settings.
    pub github: GitHubConfig,
}

/// Report defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Default user to report on (skip username discovery).
    pub user: Option<String>,
    /// Default cadence name, e.g. "weekly".
    pub cadence: Option<String>,
    /// Always produce the detailed breakdown.
    pub detailed: bool,
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Search page size.
    pub per_page: u8,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            per_page: MAX_PER_PAGE,
        }
    }
}

impl GitHubConfig {
    /// Configured page size, clamped to what the search API accepts.
    #[must_use]
    pub fn page_size(&self) -> u8 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}

/// Returns the retro configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/retro`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("retro");
    }
    dirs::home_dir()
        .expect("Could not determine home directory - is HOME set?")
        .join(".config")
        .join("retro")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `RETRO_` and double underscore
/// for nested keys (e.g., `RETRO_REPORT__CADENCE`).
///
/// # Errors
///
/// Returns `RetroError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, RetroError> {
    let config_path = config_file_path();

    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("RETRO")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
