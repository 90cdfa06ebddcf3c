//! Error types for the library layer.

use std::fmt;

/// Errors surfaced to callers of [`TiingoClient`](crate::TiingoClient).
///
/// Per-ticker fetch failures never appear here; they are logged and the
/// ticker is dropped from the result.
#[derive(Debug)]
pub enum TiingoError {
    /// An error from the underlying API client.
    Api(tiingo_api::Error),
    /// The resample frequency is not one Tiingo accepts.
    InvalidFrequency(String),
    /// Tiingo rejected the API token.
    InvalidToken(String),
    /// User-provided input or configuration failed validation.
    InvalidInput(String),
}

impl fmt::Display for TiingoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::InvalidFrequency(freq) => write!(
                f,
                "Invalid resample frequency '{}'. Valid values: daily, weekly, monthly, annually (end of day) or <n>min, <n>hour (intraday, e.g. 5min, 1hour)",
                freq
            ),
            Self::InvalidToken(msg) => write!(f, "Tiingo rejected the API token: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for TiingoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tiingo_api::Error> for TiingoError {
    fn from(e: tiingo_api::Error) -> Self {
        Self::Api(e)
    }
}
