//! Server configuration parsed from environment variables.
//!
//! Variables may come from a `.env` file loaded by `main` via `dotenvy`.
//! Parsing goes through a lookup function so tests can supply values without
//! touching the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

use session::api::DEFAULT_API_BASE_URL;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be a boolean (true/false/1/0/yes/no/on/off), got '{value}'")]
    InvalidBool { key: &'static str, value: String },
    #[error("AUTH_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// AuthAPI base URL without a trailing slash.
    pub auth_api_url: String,
    pub auth_timeout: Duration,
    /// Ask the AuthAPI to confirm tokens before rendering protected pages.
    pub validate_tokens: bool,
    /// Mark cookies written by the server `Secure`.
    pub cookie_secure: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            auth_api_url: DEFAULT_API_BASE_URL.to_owned(),
            auth_timeout: Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS),
            validate_tokens: false,
            cookie_secure: false,
        }
    }
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `AUTH_API_URL`: default `http://localhost:5000/api`
    /// - `AUTH_TIMEOUT_SECS`: default 10
    /// - `VALIDATE_TOKENS`: default false
    /// - `COOKIE_SECURE`: default false
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for values that are present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => defaults.port,
        };
        let auth_api_url = lookup("AUTH_API_URL")
            .map(|raw| raw.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.auth_api_url);
        let timeout_secs: u64 = match lookup("AUTH_TIMEOUT_SECS") {
            Some(raw) => parse_number("AUTH_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_AUTH_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let validate_tokens = match lookup("VALIDATE_TOKENS") {
            Some(raw) => parse_bool("VALIDATE_TOKENS", &raw)?,
            None => defaults.validate_tokens,
        };
        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool("COOKIE_SECURE", &raw)?,
            None => defaults.cookie_secure,
        };

        Ok(Self {
            port,
            auth_api_url,
            auth_timeout: Duration::from_secs(timeout_secs),
            validate_tokens,
            cookie_secure,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber { key, value: raw.to_owned() })
}

pub(crate) fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value: raw.to_owned() }),
    }
}
