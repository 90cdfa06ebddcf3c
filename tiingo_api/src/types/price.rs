//! Price series records and the resample frequencies Tiingo accepts.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observation from `/tiingo/daily/<ticker>/prices` or `/iex/<ticker>/prices`.
///
/// Every price field is optional: when a `columns` filter is sent, Tiingo only
/// returns the requested fields plus `date`, and the IEX endpoint never sends
/// adjusted values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub date: DateTime<Utc>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    pub adj_open: Option<f64>,
    pub adj_high: Option<f64>,
    pub adj_low: Option<f64>,
    pub adj_close: Option<f64>,
    pub adj_volume: Option<f64>,
    pub div_cash: Option<f64>,
    pub split_factor: Option<f64>,
}

impl PriceRecord {
    /// Looks up a field by its API name (`adjClose`, `divCash`, ...).
    ///
    /// Unknown names and absent fields both yield `None`.
    pub fn value(&self, column: &str) -> Option<f64> {
        match column {
            "open" => self.open,
            "high" => self.high,
            "low" => self.low,
            "close" => self.close,
            "volume" => self.volume,
            "adjOpen" => self.adj_open,
            "adjHigh" => self.adj_high,
            "adjLow" => self.adj_low,
            "adjClose" => self.adj_close,
            "adjVolume" => self.adj_volume,
            "divCash" => self.div_cash,
            "splitFactor" => self.split_factor,
            _ => None,
        }
    }
}

/// Sampling interval sent as `resampleFreq`.
///
/// The four calendar frequencies are served by the end-of-day endpoint;
/// minute and hour buckets are served by the IEX endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Annually,
    Minutes(u64),
    Hours(u64),
}

impl Frequency {
    /// Whether this frequency must be requested from the IEX endpoint.
    pub fn is_intraday(&self) -> bool {
        matches!(self, Frequency::Minutes(_) | Frequency::Hours(_))
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Annually => write!(f, "annually"),
            Frequency::Minutes(n) => write!(f, "{}min", n),
            Frequency::Hours(n) => write!(f, "{}hour", n),
        }
    }
}

impl FromStr for Frequency {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => return Ok(Frequency::Daily),
            "weekly" => return Ok(Frequency::Weekly),
            "monthly" => return Ok(Frequency::Monthly),
            "annually" => return Ok(Frequency::Annually),
            _ => {}
        }

        let (digits, hours) = if let Some(d) = s.strip_suffix("min") {
            (d, false)
        } else if let Some(d) = s.strip_suffix("hour") {
            (d, true)
        } else {
            return Err(());
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(());
        }
        match digits.parse::<u64>() {
            Ok(n) if n > 0 && hours => Ok(Frequency::Hours(n)),
            Ok(n) if n > 0 => Ok(Frequency::Minutes(n)),
            _ => Err(()),
        }
    }
}
