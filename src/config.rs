//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
    #[error("no config directory available; set CATERING_SESSION_FILE")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Site origin; `/api` is appended per request.
    pub base_url: String,
    /// Where the session token is persisted.
    pub session_file: PathBuf,
    /// `None` keeps the HTTP client's default (no timeout).
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `CATERING_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `CATERING_SESSION_FILE`: default `<config dir>/catering/session.json`
    /// - `CATERING_REQUEST_TIMEOUT_SECS`: unset means no timeout
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed timeout or when no default session
    /// path can be derived.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("CATERING_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
            .trim()
            .trim_end_matches('/')
            .to_owned();

        let session_file = match lookup("CATERING_SESSION_FILE").filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_session_file().ok_or(ConfigError::NoConfigDir)?,
        };

        let request_timeout = lookup("CATERING_REQUEST_TIMEOUT_SECS")
            .map(|raw| parse_timeout(&raw))
            .transpose()?;

        Ok(Self { base_url, session_file, request_timeout })
    }
}

/// Parse a whole number of seconds greater than zero.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for anything else.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue { var: "CATERING_REQUEST_TIMEOUT_SECS", value: raw.to_owned() }),
    }
}

/// `<platform config dir>/catering/session.json`.
#[must_use]
pub fn default_session_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("catering").join(SESSION_FILE_NAME))
}
