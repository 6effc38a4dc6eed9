//! Main application configuration
//!
//! This module defines the top-level configuration for the courtside CLI,
//! including TOML file loading, environment variable overrides and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub snapshot: SnapshotSettings,
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where the users/matches snapshot comes from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSettings {
    /// JSON file with `users` and `matches` arrays
    pub path: Option<PathBuf>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "courtside".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Snapshot settings
        if let Ok(path) = env::var("SNAPSHOT_PATH") {
            self.snapshot.path = Some(PathBuf::from(path));
        }

        // Rating settings
        if let Ok(k) = env::var("RATING_K_FACTOR") {
            self.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_K_FACTOR value: {}", k))?;
        }
        if let Ok(minimum) = env::var("RATING_MINIMUM_MATCHES") {
            self.rating.minimum_qualifying_matches = minimum
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_MINIMUM_MATCHES value: {}", minimum))?;
        }
        if let Ok(excluded) = env::var("RATING_EXCLUDED_PLAYERS") {
            self.rating.excluded_player_ids = parse_id_list(&excluded)
                .map_err(|_| anyhow!("Invalid RATING_EXCLUDED_PLAYERS value: {}", excluded))?;
        }
        if let Ok(boundary) = env::var("RATING_SEASON_BOUNDARY") {
            self.rating.season_boundary = Some(
                boundary
                    .parse::<DateTime<Utc>>()
                    .map_err(|_| anyhow!("Invalid RATING_SEASON_BOUNDARY value: {}", boundary))?,
            );
        }
        if let Ok(enabled) = env::var("RATING_SEASON1_ENABLED") {
            self.rating.season1_enabled = enabled
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_SEASON1_ENABLED value: {}", enabled))?;
        }
        if let Ok(enabled) = env::var("RATING_SEASON2_ENABLED") {
            self.rating.season2_enabled = enabled
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_SEASON2_ENABLED value: {}", enabled))?;
        }

        Ok(())
    }
}

/// Parse a comma separated list of player ids, ignoring blanks
fn parse_id_list(value: &str) -> std::result::Result<Vec<i64>, std::num::ParseIntError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()?;

    Ok(())
}
