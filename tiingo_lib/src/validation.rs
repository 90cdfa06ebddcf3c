//! Input validation and sanitization, applied before any request is sent.
//!
//! Every function here is pure: inputs are borrowed and filtered copies are
//! returned, so callers' lists are never mutated.

use tiingo_api::types::Frequency;

use crate::error::TiingoError;

pub const MAX_TICKER_LENGTH: usize = 20;

/// Resample frequencies served by the end-of-day endpoint.
pub const EOD_FREQUENCIES: &[&str] = &["daily", "weekly", "monthly", "annually"];

/// Columns of the end-of-day price endpoint.
pub const EOD_COLUMNS: &[&str] = &[
    "open",
    "high",
    "low",
    "close",
    "volume",
    "adjOpen",
    "adjHigh",
    "adjLow",
    "adjClose",
    "adjVolume",
    "divCash",
    "splitFactor",
];

/// Columns of the IEX intraday price endpoint.
pub const IEX_HISTORICAL_COLUMNS: &[&str] = &["open", "high", "low", "close", "volume"];

/// Columns of the IEX latest-quote endpoint.
pub const IEX_LAST_COLUMNS: &[&str] = &[
    "timestamp",
    "quoteTimestamp",
    "lastSaleTimestamp",
    "last",
    "lastSize",
    "tngoLast",
    "prevClose",
    "open",
    "high",
    "low",
    "mid",
    "volume",
    "bidSize",
    "bidPrice",
    "askSize",
    "askPrice",
];

/// Which endpoint a column list is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSet {
    EndOfDay,
    IexHistorical,
    IexLast,
}

impl ColumnSet {
    /// The allowed column names, in the endpoint's canonical order.
    pub fn allowed(&self) -> &'static [&'static str] {
        match self {
            ColumnSet::EndOfDay => EOD_COLUMNS,
            ColumnSet::IexHistorical => IEX_HISTORICAL_COLUMNS,
            ColumnSet::IexLast => IEX_LAST_COLUMNS,
        }
    }

    /// The column set for a historical request at `frequency`.
    pub fn for_frequency(frequency: Frequency) -> Self {
        if frequency.is_intraday() {
            ColumnSet::IexHistorical
        } else {
            ColumnSet::EndOfDay
        }
    }
}

/// Outcome of column validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Columns to send as the `columns` filter. Empty means "send no filter".
    pub requested: Vec<&'static str>,
    /// Columns the result table will carry.
    pub output: Vec<&'static str>,
}

/// Parse a resample frequency string. Case-sensitive, like the API.
pub fn parse_frequency(input: &str) -> Result<Frequency, TiingoError> {
    input
        .parse::<Frequency>()
        .map_err(|_| TiingoError::InvalidFrequency(input.to_string()))
}

/// Keep only the columns the endpoint knows, dropping unknown names and repeats.
///
/// When nothing valid remains (including an empty request) the filter is left
/// empty and the output falls back to the endpoint's full column set.
pub fn resolve_columns(set: ColumnSet, columns: &[String]) -> ResolvedColumns {
    let allowed = set.allowed();
    let mut requested: Vec<&'static str> = Vec::new();
    for column in columns {
        match allowed.iter().find(|name| **name == column.trim()) {
            Some(name) if !requested.contains(name) => requested.push(*name),
            Some(_) => {}
            None => tracing::warn!(
                "column name \"{}\" is invalid and was removed from the list of columns",
                column
            ),
        }
    }

    if requested.is_empty() {
        if !columns.is_empty() {
            tracing::warn!("no valid columns requested, returning all available columns");
        }
        return ResolvedColumns {
            requested,
            output: allowed.to_vec(),
        };
    }
    ResolvedColumns {
        output: requested.clone(),
        requested,
    }
}

/// Validate one ticker symbol: trim, uppercase, check length and characters.
pub fn validate_ticker(input: &str) -> Result<String, TiingoError> {
    let ticker = input.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(TiingoError::InvalidInput("ticker is empty".to_string()));
    }
    if ticker.len() > MAX_TICKER_LENGTH {
        return Err(TiingoError::InvalidInput(format!(
            "ticker '{}' exceeds maximum length of {} bytes",
            input, MAX_TICKER_LENGTH
        )));
    }
    if !ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '^' | '='))
    {
        return Err(TiingoError::InvalidInput(format!(
            "ticker '{}' contains invalid characters",
            input
        )));
    }
    Ok(ticker)
}

/// Normalize a ticker list: validate each, drop rejects and case-insensitive
/// duplicates, keep first-seen order.
pub fn normalize_tickers(tickers: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tickers.len());
    for raw in tickers {
        match validate_ticker(raw) {
            Ok(ticker) => {
                if !out.contains(&ticker) {
                    out.push(ticker);
                }
            }
            Err(e) => tracing::warn!("dropping ticker: {}", e),
        }
    }
    out
}

/// Treat empty date strings as absent; everything else is forwarded as-is.
pub fn optional_date(input: Option<&str>) -> Option<String> {
    input
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
