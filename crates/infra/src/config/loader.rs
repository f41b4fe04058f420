//! Configuration loader
//!
//! Loads client settings from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the credentials are not in the environment, falls back to a file
//! 3. Probes the working directory and the executable's directory
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `GTTX_APP_ID`: Application id (required)
//! - `GTTX_SECRET_KEY`: Secret key (required)
//! - `GTTX_HOST`: Provider host, default `cloud.gttx.com`
//! - `GTTX_PROTOCOL`: `http` or `https`, default `https`
//! - `GTTX_UNAUTHORIZED_RETRY`: Retries on authorization rejection, default 0
//! - `GTTX_TIMEOUT_SECS`: Per-request timeout, default 30
//! - `GTTX_INVALIDATE_REJECTED_TOKEN`: Evict a rejected token before retrying
//!   (true/false)
//!
//! ## File Locations
//! The loader probes `gttx.json`, `gttx.toml`, `config.json` and
//! `config.toml`, first in the current working directory, then next to the
//! executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use gttx_domain::{ClientConfig, Credentials, GttxError, Protocol, Result, Settings};

pub const ENV_APP_ID: &str = "GTTX_APP_ID";
pub const ENV_SECRET_KEY: &str = "GTTX_SECRET_KEY";
pub const ENV_HOST: &str = "GTTX_HOST";
pub const ENV_PROTOCOL: &str = "GTTX_PROTOCOL";
pub const ENV_UNAUTHORIZED_RETRY: &str = "GTTX_UNAUTHORIZED_RETRY";
pub const ENV_TIMEOUT_SECS: &str = "GTTX_TIMEOUT_SECS";
pub const ENV_INVALIDATE_REJECTED_TOKEN: &str = "GTTX_INVALIDATE_REJECTED_TOKEN";

const CONFIG_FILE_NAMES: [&str; 4] = ["gttx.json", "gttx.toml", "config.json", "config.toml"];

/// Load settings with automatic fallback strategy
///
/// Uses the environment when both credential variables are set, otherwise
/// falls back to a config file. Once the credentials come from the
/// environment, a bad optional variable is an error rather than a reason to
/// read a file.
///
/// # Errors
/// Returns `GttxError::Config` if settings cannot be loaded from either
/// source, a file is malformed, or an optional variable has a bad value.
pub fn load() -> Result<Settings> {
    if env_opt(ENV_APP_ID).is_some() && env_opt(ENV_SECRET_KEY).is_some() {
        let settings = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(settings);
    }

    tracing::debug!("Credentials not set in environment, trying file");
    load_from_file(None)
}

/// Load settings from environment variables
///
/// # Errors
/// Returns `GttxError::Config` if a required variable is missing or an
/// optional one cannot be parsed.
pub fn load_from_env() -> Result<Settings> {
    let credentials = Credentials::new(env_var(ENV_APP_ID)?, env_var(ENV_SECRET_KEY)?);

    let defaults = ClientConfig::default();
    let client = ClientConfig {
        host: env_opt(ENV_HOST).unwrap_or(defaults.host),
        protocol: env_parse(ENV_PROTOCOL, defaults.protocol, Protocol::from_str)?,
        unauthorized_retry: env_parse(ENV_UNAUTHORIZED_RETRY, defaults.unauthorized_retry, |s| {
            s.parse::<u32>().map_err(|e| e.to_string())
        })?,
        timeout_secs: env_parse(ENV_TIMEOUT_SECS, defaults.timeout_secs, |s| {
            s.parse::<u64>().map_err(|e| e.to_string())
        })?,
        invalidate_rejected_token: env_bool(
            ENV_INVALIDATE_REJECTED_TOKEN,
            defaults.invalidate_rejected_token,
        )?,
        user_agent: defaults.user_agent,
    };

    Ok(Settings { credentials, client })
}

/// Load settings from a file
///
/// If `path` is `None`, probes the standard locations. Format is detected
/// by extension.
///
/// # Errors
/// Returns `GttxError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Settings> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(GttxError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            GttxError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| GttxError::Config(format!("Failed to read config file: {e}")))?;

    parse_settings(&contents, &config_path)
}

fn parse_settings(contents: &str, path: &Path) -> Result<Settings> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| GttxError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| GttxError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(GttxError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the standard locations, if any
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    probe_dirs(&dirs)
}

fn probe_dirs(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        GttxError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Set and non-blank value of `key`
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn env_parse<T, F>(key: &str, default: T, parse: F) -> Result<T>
where
    F: FnOnce(&str) -> std::result::Result<T, String>,
{
    match env_opt(key) {
        Some(raw) => {
            parse(&raw).map_err(|e| GttxError::Config(format!("Invalid value for {key}: {e}")))
        }
        None => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> Result<bool> {
    env_parse(key, default, |s| match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got {other:?}")),
    })
}
