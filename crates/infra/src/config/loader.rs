//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `SHIFTLINE_API_URL` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SHIFTLINE_API_URL`: Backend base URL (required for the env path)
//! - `SHIFTLINE_API_TIMEOUT`: Request timeout in seconds
//! - `SHIFTLINE_TOKEN_PATH`: Where the session token is persisted
//! - `SHIFTLINE_LATITUDE` / `SHIFTLINE_LONGITUDE`: Fixed device position
//! - `SHIFTLINE_ACCURACY`: Accuracy of the fixed position, in meters
//! - `SHIFTLINE_TICK_MS`: Live timer refresh period
//! - `SHIFTLINE_PAGE_SIZE`: History page size
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./shiftline.{toml,json}` or `./config.{toml,json}` (current working
//!    directory)
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use shiftline_domain::{
    ApiConfig, Config, PositionConfig, Result, SessionConfig, ShiftlineError, TrackerConfig,
};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["shiftline.toml", "shiftline.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL is not
/// set there, falls back to loading from a config file.
///
/// # Errors
/// Returns `ShiftlineError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A value is out of range
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Like [`load`], but falls back to built-in defaults when neither the
/// environment nor any probed file provides a configuration.
///
/// A file that exists but cannot be parsed is still an error.
///
/// # Errors
/// Returns `ShiftlineError::Config` for invalid environment values or an
/// invalid config file.
pub fn load_or_default() -> Result<Config> {
    if std::env::var_os("SHIFTLINE_API_URL").is_some() {
        return load_from_env();
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No configuration found; using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `SHIFTLINE_API_URL` must be present; every other variable is optional and
/// falls back to its default.
///
/// # Errors
/// Returns `ShiftlineError::Config` if the base URL is missing or a value
/// cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let api = ApiConfig {
        base_url: env_var("SHIFTLINE_API_URL")?,
        timeout_seconds: env_parse("SHIFTLINE_API_TIMEOUT")?
            .unwrap_or(defaults.api.timeout_seconds),
    };

    let session = SessionConfig { token_path: env_opt("SHIFTLINE_TOKEN_PATH") };

    let position = PositionConfig {
        latitude: env_parse("SHIFTLINE_LATITUDE")?,
        longitude: env_parse("SHIFTLINE_LONGITUDE")?,
        accuracy: env_parse("SHIFTLINE_ACCURACY")?.unwrap_or(defaults.position.accuracy),
    };

    let tracker = TrackerConfig {
        tick_interval_ms: env_parse("SHIFTLINE_TICK_MS")?
            .unwrap_or(defaults.tracker.tick_interval_ms),
        history_page_size: env_parse("SHIFTLINE_PAGE_SIZE")?
            .unwrap_or(defaults.tracker.history_page_size),
    };

    let config = Config { api, session, position, tracker };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ShiftlineError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A value is out of range
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ShiftlineError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ShiftlineError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ShiftlineError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `ShiftlineError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ShiftlineError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ShiftlineError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ShiftlineError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent and grandparent, then
/// the executable's directory, trying every name in [`CONFIG_FILE_NAMES`]
/// in each.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut directories = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        directories.extend(cwd.ancestors().take(3).map(Path::to_path_buf));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            directories.push(exe_dir.to_path_buf());
        }
    }

    directories
        .iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Get required environment variable
///
/// # Errors
/// Returns `ShiftlineError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        ShiftlineError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Parse an optional environment variable.
///
/// # Errors
/// Returns `ShiftlineError::Config` if the variable is set but unparsable.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| ShiftlineError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
