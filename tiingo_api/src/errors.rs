//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or a URL that could not be built).
    #[error("Request failed")]
    RequestFailed,
    /// The API rejected the token (HTTP 401 or 403).
    #[error("Unauthorized: Tiingo rejected the API token")]
    Unauthorized,
    /// The requested ticker or resource does not exist (HTTP 404).
    #[error("Resource not found")]
    NotFound,
    /// HTTP 429, or Tiingo's HTTP 200 plain-text rate limit message.
    #[error("Rate limited by Tiingo API")]
    RateLimited,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body did not deserialize into the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}
