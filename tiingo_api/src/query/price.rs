use url::Url;

use crate::types::Frequency;

use super::{common::QueryCommon, Query};

/// Parameters for the end-of-day and IEX historical price endpoints.
///
/// Dates are forwarded verbatim; Tiingo expects `YYYY-MM-DD`.
#[derive(Clone, Debug)]
pub struct PriceQuery {
    pub common: QueryCommon,
    pub resample_freq: Frequency,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Default for PriceQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon::default(),
            resample_freq: Frequency::Daily,
            start_date: None,
            end_date: None,
        }
    }
}

impl Query for PriceQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        url.query_pairs_mut()
            .append_pair("resampleFreq", &self.resample_freq.to_string());
        if let Some(start_date) = &self.start_date {
            url.query_pairs_mut()
                .append_pair("startDate", start_date.as_str());
        };
        if let Some(end_date) = &self.end_date {
            url.query_pairs_mut().append_pair("endDate", end_date.as_str());
        };
        url
    }
}

impl PriceQuery {
    pub fn with_resample_freq(mut self, frequency: Frequency) -> Self {
        self.resample_freq = frequency;
        self
    }

    pub fn with_start_date(mut self, start_date: &str) -> Self {
        self.start_date = Some(start_date.to_string());
        self
    }

    pub fn with_end_date(mut self, end_date: &str) -> Self {
        self.end_date = Some(end_date.to_string());
        self
    }
}
