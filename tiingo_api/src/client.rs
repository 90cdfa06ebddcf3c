//! HTTP client for the Tiingo REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{PriceQuery, Query, QuoteQuery},
    types::{Metadata, PriceRecord, Quote, TestResponse},
    Error,
};

/// Default request timeout for Tiingo API calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.tiingo.com";

/// HTTP client for the Tiingo REST API.
///
/// Holds one `reqwest::Client` (and so one connection pool) for its whole
/// lifetime and sends the token as `Authorization: Token <token>` on every
/// request.
pub struct Client {
    http: reqwest::Client,
    token: String,
    /// Base URL for the API. Defaults to `https://api.tiingo.com`.
    base_api_url: String,
}

impl Client {
    /// Creates a new client pointing at the production Tiingo API.
    pub fn new(token: &str) -> Result<Self, Error> {
        Self::with_timeout(DEFAULT_BASE_URL, token, DEFAULT_TIMEOUT)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT)
    }

    /// Creates a new client with a custom base URL and request timeout.
    pub fn with_timeout(base_url: &str, token: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            token: token.to_string(),
            base_api_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The API root this client sends requests to.
    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, segments: &[&str], query: Option<&impl Query>) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::RequestFailed
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", self.base_api_url);
                Error::RequestFailed
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, segments: &[&str], query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(segments, query)?;
        tracing::debug!("GET {}", url.path());

        let resp = self
            .http
            .get(url)
            .header("content-type", "application/json")
            .header("authorization", format!("Token {}", self.token))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                return Err(Error::Unauthorized)
            }
            reqwest::StatusCode::NOT_FOUND => return Err(Error::NotFound),
            reqwest::StatusCode::TOO_MANY_REQUESTS => return Err(Error::RateLimited),
            _ => {}
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::warn!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        // Tiingo answers rate-limited requests with HTTP 200 and a plain-text body.
        if content_type.contains("text/plain") || content_type.contains("text/html") {
            let lower = body.to_lowercase();
            if lower.contains("rate limit") || lower.contains("too many requests") {
                return Err(Error::RateLimited);
            }
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::warn!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Parse(e.to_string())
        })
    }

    /// Calls `/api/test`, which echoes a message for any well-formed request.
    pub async fn test_token(&self) -> Result<TestResponse, Error> {
        self.get::<TestResponse, QuoteQuery>(&["api", "test"], None)
            .await
    }

    /// Fetches descriptive metadata for one ticker.
    pub async fn get_metadata(&self, ticker: &str) -> Result<Metadata, Error> {
        self.get::<Metadata, QuoteQuery>(&["tiingo", "daily", ticker], None)
            .await
    }

    /// Fetches the end-of-day price series for one ticker.
    pub async fn get_daily_prices(
        &self,
        ticker: &str,
        query: &PriceQuery,
    ) -> Result<Vec<PriceRecord>, Error> {
        self.get::<Vec<PriceRecord>, PriceQuery>(&["tiingo", "daily", ticker, "prices"], Some(query))
            .await
    }

    /// Fetches the intraday IEX price series for one ticker.
    pub async fn get_iex_prices(
        &self,
        ticker: &str,
        query: &PriceQuery,
    ) -> Result<Vec<PriceRecord>, Error> {
        self.get::<Vec<PriceRecord>, PriceQuery>(&["iex", ticker, "prices"], Some(query))
            .await
    }

    /// Fetches the latest IEX quotes for every ticker in the query in one call.
    pub async fn get_quotes(&self, query: &QuoteQuery) -> Result<Vec<Quote>, Error> {
        self.get::<Vec<Quote>, QuoteQuery>(&["iex", ""], Some(query))
            .await
    }

    /// Fetches the latest IEX quote for a single ticker.
    ///
    /// The tickers in `query` are ignored; the path selects the instrument.
    pub async fn get_quote(&self, ticker: &str, query: &QuoteQuery) -> Result<Vec<Quote>, Error> {
        let query = QuoteQuery {
            common: query.common.clone(),
            tickers: Vec::new(),
        };
        self.get::<Vec<Quote>, QuoteQuery>(&["iex", ticker], Some(&query))
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 500;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
