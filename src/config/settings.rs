//! Application settings loaded from `config.toml`.
//!
//! The file is optional. Every field has a default matching the values the
//! legacy spreadsheet import hard-coded, so a missing file or a missing table
//! yields a working configuration.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the settings file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Database URL; `DATABASE_URL` and the CLI flag take precedence
    pub database_url: Option<String>,
    /// Bulk import defaults
    pub import: ImportConfig,
}

/// Values the spreadsheets do not carry and the importer must fill in
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ImportConfig {
    /// Worker count given to every imported workshop
    pub workshop_worker_count: i32,
    /// Worker count given to every imported product/workshop assignment
    pub assignment_worker_count: i32,
    /// `parameter1` of every imported product
    pub default_parameter1: Decimal,
    /// `parameter2` of every imported product
    pub default_parameter2: Decimal,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            workshop_worker_count: 5,
            assignment_worker_count: 3,
            default_parameter1: Decimal::ONE,
            default_parameter2: Decimal::ONE,
        }
    }
}

/// Parses settings from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file, falling back to defaults when the file
/// does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    debug!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

/// Loads settings from the default location (./config.toml)
pub fn load_default_config() -> Result<AppConfig> {
    load_config(DEFAULT_CONFIG_PATH)
}
