//! Latest top-of-book quote from the IEX endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One element of the `/iex/` response array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub ticker: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub quote_timestamp: Option<DateTime<Utc>>,
    pub last_sale_timestamp: Option<DateTime<Utc>>,
    pub last: Option<f64>,
    pub last_size: Option<f64>,
    pub tngo_last: Option<f64>,
    pub prev_close: Option<f64>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub mid: Option<f64>,
    pub volume: Option<f64>,
    pub bid_size: Option<f64>,
    pub bid_price: Option<f64>,
    pub ask_size: Option<f64>,
    pub ask_price: Option<f64>,
}

impl Quote {
    /// Numeric field by API name. Timestamp and unknown names yield `None`.
    pub fn number(&self, column: &str) -> Option<f64> {
        match column {
            "last" => self.last,
            "lastSize" => self.last_size,
            "tngoLast" => self.tngo_last,
            "prevClose" => self.prev_close,
            "open" => self.open,
            "high" => self.high,
            "low" => self.low,
            "mid" => self.mid,
            "volume" => self.volume,
            "bidSize" => self.bid_size,
            "bidPrice" => self.bid_price,
            "askSize" => self.ask_size,
            "askPrice" => self.ask_price,
            _ => None,
        }
    }

    /// Timestamp field by API name, or `None` for non-timestamp columns.
    pub fn time(&self, column: &str) -> Option<DateTime<Utc>> {
        match column {
            "timestamp" => self.timestamp,
            "quoteTimestamp" => self.quote_timestamp,
            "lastSaleTimestamp" => self.last_sale_timestamp,
            _ => None,
        }
    }

    /// Whether `column` names one of the three timestamp fields.
    pub fn is_time_column(column: &str) -> bool {
        matches!(column, "timestamp" | "quoteTimestamp" | "lastSaleTimestamp")
    }
}
