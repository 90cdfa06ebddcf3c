use url::Url;

use super::{common::QueryCommon, Query};

/// Parameters for the batch `/iex/` latest-quote endpoint.
#[derive(Clone, Debug, Default)]
pub struct QuoteQuery {
    pub common: QueryCommon,
    pub tickers: Vec<String>,
}

impl Query for QuoteQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if !self.tickers.is_empty() {
            url.query_pairs_mut()
                .append_pair("tickers", &self.tickers.join(","));
        }
        self.common.add_to_url(&url)
    }
}

impl QuoteQuery {
    pub fn with_ticker(mut self, ticker: &str) -> Self {
        self.tickers.push(ticker.to_string());
        self
    }
    pub fn with_tickers(mut self, tickers: &[String]) -> Self {
        self.tickers.extend_from_slice(tickers);
        self
    }
}
