//! Environment-driven client configuration.

use std::time::Duration;

use crate::error::TiingoError;

pub const TOKEN_VAR: &str = "TIINGO_API_TOKEN";
pub const BASE_URL_VAR: &str = "TIINGO_BASE_URL";
pub const TIMEOUT_VAR: &str = "TIINGO_TIMEOUT_SECS";

/// Settings needed to build a [`TiingoClient`](crate::TiingoClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub token: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            base_url: tiingo_api::DEFAULT_BASE_URL.to_string(),
            timeout: tiingo_api::DEFAULT_TIMEOUT,
        }
    }

    /// Reads `TIINGO_API_TOKEN`, `TIINGO_BASE_URL` and `TIINGO_TIMEOUT_SECS`.
    ///
    /// The token is required; the other two fall back to the production URL
    /// and a 30 second timeout.
    pub fn from_env() -> Result<Self, TiingoError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TiingoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                TiingoError::InvalidInput(format!("{} is not set", TOKEN_VAR))
            })?;

        let mut config = Self::new(&token);
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                TiingoError::InvalidInput(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    TIMEOUT_VAR, raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}
