//! Descriptive records: ticker metadata and the token test endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ticker metadata returned by `/tiingo/daily/<ticker>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Ticker symbol as Tiingo reports it.
    pub ticker: String,

    /// Full instrument name.
    #[serde(default)]
    pub name: Option<String>,

    /// Long-form description. Tiingo sends an empty string for some ETFs.
    #[serde(default)]
    pub description: Option<String>,

    /// Listing exchange code, e.g. `NYSE ARCA`.
    #[serde(default)]
    pub exchange_code: Option<String>,

    /// First date with end-of-day data.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Last date with end-of-day data.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Body of `/api/test`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResponse {
    pub message: String,
}
