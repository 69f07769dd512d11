//! Configuration structures
//!
//! Loaded by `shiftline-infra::config` from environment variables or a
//! TOML/JSON file. Every section has defaults so a partial file is valid.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_HISTORY_PAGE_SIZE,
    DEFAULT_POSITION_ACCURACY, DEFAULT_TICK_INTERVAL_MS,
};
use crate::errors::{Result, ShiftlineError};
use crate::types::Position;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub position: PositionConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
}

impl Config {
    /// Validate cross-field constraints.
    ///
    /// # Errors
    /// Returns `ShiftlineError::Config` on the first invalid section.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.position.validate()?;
        self.tracker.validate()
    }
}

/// Remote store connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin, e.g. `https://shifts.example.com`; endpoint paths are
    /// appended verbatim.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_seconds: default_timeout() }
    }
}

impl ApiConfig {
    /// Base URL without a trailing slash.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(self.base_url.trim()).map_err(|err| {
            ShiftlineError::Config(format!("api.base_url '{}' is not a URL: {err}", self.base_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ShiftlineError::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(ShiftlineError::Config("api.timeout_seconds must be positive".into()));
        }
        Ok(())
    }
}

/// Session token persistence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where the token is persisted; platform config dir when unset.
    #[serde(default)]
    pub token_path: Option<String>,
}

/// Fixed device position used when no positioning hardware is available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionConfig {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self { latitude: None, longitude: None, accuracy: default_accuracy() }
    }
}

impl PositionConfig {
    /// The configured position, if both coordinates are set.
    pub fn position(&self) -> Option<Position> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                Some(Position::new(latitude, longitude, self.accuracy))
            }
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(latitude) = self.latitude {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(ShiftlineError::Config(format!(
                    "position.latitude out of range: {latitude}"
                )));
            }
        }
        if let Some(longitude) = self.longitude {
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(ShiftlineError::Config(format!(
                    "position.longitude out of range: {longitude}"
                )));
            }
        }
        if self.accuracy < 0.0 {
            return Err(ShiftlineError::Config("position.accuracy must not be negative".into()));
        }
        Ok(())
    }
}

/// Tracker behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Live timer refresh period.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_page_size")]
    pub history_page_size: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { tick_interval_ms: default_tick_interval(), history_page_size: default_page_size() }
    }
}

impl TrackerConfig {
    fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(ShiftlineError::Config("tracker.tick_interval_ms must be positive".into()));
        }
        if self.history_page_size == 0 {
            return Err(ShiftlineError::Config(
                "tracker.history_page_size must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_API_TIMEOUT_SECS
}

fn default_accuracy() -> f64 {
    DEFAULT_POSITION_ACCURACY
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_page_size() -> u32 {
    DEFAULT_HISTORY_PAGE_SIZE
}
