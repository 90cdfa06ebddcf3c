//! Batch operations over the raw API client.
//!
//! Each operation validates its inputs up front, then attempts every ticker
//! independently and keeps only the ones that succeeded. A failing ticker is
//! logged and dropped; it never aborts the batch.

use tiingo_api::types::{Metadata, PriceRecord, Quote};
use tiingo_api::{Client, PriceQuery, Query, QuoteQuery};

use crate::config::ClientConfig;
use crate::error::TiingoError;
use crate::table::ResultTable;
use crate::validation::{self, ColumnSet};

/// Message `/api/test` returns for a token it does not recognize.
const BAD_TOKEN_MESSAGE: &str = "Auth Token was not correct";

/// Tiingo client exposing metadata, historical and latest-price lookups.
///
/// The token is bound to this instance; requests go out one ticker at a time
/// over a single shared connection pool.
pub struct TiingoClient {
    inner: Client,
}

impl TiingoClient {
    /// Creates a client for the production API. Performs no I/O.
    pub fn new(token: &str) -> Result<Self, TiingoError> {
        Ok(Self {
            inner: Client::new(token)?,
        })
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self, TiingoError> {
        Ok(Self {
            inner: Client::with_base_url(base_url, token)?,
        })
    }

    /// Creates a client using the config's token, base URL and request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TiingoError> {
        Ok(Self {
            inner: Client::with_timeout(&config.base_url, &config.token, config.timeout)?,
        })
    }

    /// Checks the token against `/api/test`.
    pub async fn verify_token(&self) -> Result<(), TiingoError> {
        match self.inner.test_token().await {
            Ok(resp) if resp.message == BAD_TOKEN_MESSAGE => {
                Err(TiingoError::InvalidToken(resp.message))
            }
            Ok(_) => Ok(()),
            Err(tiingo_api::Error::Unauthorized) => Err(TiingoError::InvalidToken(
                "HTTP 401/403 from /api/test".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetches metadata for each ticker, dropping tickers whose request fails.
    pub async fn get_stock_metadata(&self, tickers: &[String]) -> ResultTable {
        let tickers = validation::normalize_tickers(tickers);
        let mut attempts: Vec<(String, Result<Metadata, tiingo_api::Error>)> =
            Vec::with_capacity(tickers.len());
        for ticker in tickers {
            let result = self.inner.get_metadata(&ticker).await;
            attempts.push((ticker, result));
        }
        ResultTable::from_metadata(keep_successes(attempts))
    }

    /// Fetches a price series per ticker at `frequency`.
    ///
    /// Fails with [`TiingoError::InvalidFrequency`] before any request when the
    /// frequency is unknown. Unknown column names are dropped; dates are
    /// forwarded unvalidated, with empty strings treated as absent.
    pub async fn get_stock_historical(
        &self,
        tickers: &[String],
        frequency: &str,
        columns: &[String],
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<ResultTable, TiingoError> {
        let frequency = validation::parse_frequency(frequency)?;
        let resolved = validation::resolve_columns(ColumnSet::for_frequency(frequency), columns);
        let tickers = validation::normalize_tickers(tickers);

        let mut query = PriceQuery::default().with_resample_freq(frequency);
        query.start_date = validation::optional_date(start);
        query.end_date = validation::optional_date(end);
        for column in &resolved.requested {
            query = query.with_column(column);
        }

        let mut attempts: Vec<(String, Result<Vec<PriceRecord>, tiingo_api::Error>)> =
            Vec::with_capacity(tickers.len());
        for ticker in tickers {
            let result = if frequency.is_intraday() {
                self.inner.get_iex_prices(&ticker, &query).await
            } else {
                self.inner.get_daily_prices(&ticker, &query).await
            };
            attempts.push((ticker, result));
        }

        Ok(ResultTable::from_prices(
            &resolved.output,
            keep_successes(attempts),
        ))
    }

    /// Fetches the latest IEX quote for each ticker in one batch request.
    ///
    /// Tickers missing from the batch response are dropped. If the batch call
    /// is rejected in a way one bad symbol could cause (404, other 4xx, an
    /// unparseable body), each ticker is fetched on its own endpoint instead.
    /// Rate limiting, auth and transport failures end the call with an empty
    /// table.
    pub async fn get_stock_last(&self, tickers: &[String], columns: &[String]) -> ResultTable {
        let resolved = validation::resolve_columns(ColumnSet::IexLast, columns);
        let tickers = validation::normalize_tickers(tickers);
        if tickers.is_empty() {
            return ResultTable::new(resolved.output.as_slice());
        }

        let mut query = QuoteQuery::default().with_tickers(&tickers);
        for column in &resolved.requested {
            query = query.with_column(column);
        }
        // The latest-quote key is the timestamp, so keep it in any filtered request.
        if !query.common.columns.is_empty() && !resolved.requested.contains(&"timestamp") {
            query = query.with_column("timestamp");
        }
        // Without the ticker field we cannot match rows back to symbols.
        if !query.common.columns.is_empty() {
            query = query.with_column("ticker");
        }

        let attempts = match self.inner.get_quotes(&query).await {
            Ok(quotes) => match_quotes(&tickers, quotes),
            Err(e) if !symbol_may_be_at_fault(&e) => {
                tracing::warn!("batch quote request failed, no tickers returned: {}", e);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    "batch quote request failed ({}), falling back to one request per ticker",
                    e
                );
                let mut attempts = Vec::with_capacity(tickers.len());
                for ticker in &tickers {
                    let result = self
                        .inner
                        .get_quote(ticker, &query)
                        .await
                        .and_then(|quotes| first_quote(ticker, quotes));
                    attempts.push((ticker.clone(), result));
                }
                attempts
            }
        };

        ResultTable::from_quotes(&resolved.output, keep_successes(attempts))
    }
}

/// Whether a failed batch request is worth splitting into per-ticker requests.
fn symbol_may_be_at_fault(err: &tiingo_api::Error) -> bool {
    match err {
        tiingo_api::Error::NotFound | tiingo_api::Error::Parse(_) => true,
        tiingo_api::Error::HttpStatus { status, .. } => {
            (400..500).contains(status) && !matches!(*status, 401 | 403 | 429)
        }
        tiingo_api::Error::RequestFailed
        | tiingo_api::Error::Unauthorized
        | tiingo_api::Error::RateLimited => false,
    }
}

/// Pairs each requested ticker with its quote from a batch response.
fn match_quotes(
    tickers: &[String],
    quotes: Vec<Quote>,
) -> Vec<(String, Result<Quote, tiingo_api::Error>)> {
    tickers
        .iter()
        .map(|ticker| {
            let found = quotes
                .iter()
                .find(|q| q.ticker.eq_ignore_ascii_case(ticker))
                .cloned()
                .ok_or(tiingo_api::Error::NotFound);
            (ticker.clone(), found)
        })
        .collect()
}

fn first_quote(ticker: &str, quotes: Vec<Quote>) -> Result<Quote, tiingo_api::Error> {
    quotes
        .into_iter()
        .find(|q| q.ticker.eq_ignore_ascii_case(ticker))
        .ok_or(tiingo_api::Error::NotFound)
}

/// Projects per-ticker attempts onto the successes, logging each failure.
///
/// Order of the surviving tickers is preserved.
pub fn keep_successes<T>(attempts: Vec<(String, Result<T, tiingo_api::Error>)>) -> Vec<(String, T)> {
    attempts
        .into_iter()
        .filter_map(|(ticker, result)| match result {
            Ok(value) => Some((ticker, value)),
            Err(e) => {
                tracing::warn!(
                    "request for \"{}\" returned an error and was removed from the list of tickers: {}",
                    ticker,
                    e
                );
                None
            }
        })
        .collect()
}
