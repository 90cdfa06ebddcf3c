use chrono::{Datelike, NaiveDate, Timelike};
use tiingo_api::types::{Metadata, PriceRecord, Quote};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_daily_prices_full() {
    let json = load_fixture("spy_prices.json");
    let prices: Vec<PriceRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(prices.len(), 3);

    let first = &prices[0];
    assert_eq!(first.date.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
    assert_eq!(first.open, Some(537.83));
    assert_eq!(first.volume, Some(63251323.0));
    assert_eq!(first.div_cash, Some(0.0));
    assert_eq!(first.split_factor, Some(1.0));
}

#[test]
fn deserialize_partial_columns() {
    let json = load_fixture("spy_prices_open_close.json");
    let prices: Vec<PriceRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(prices[0].open, Some(537.83));
    assert_eq!(prices[0].close, Some(541.36));
    assert_eq!(prices[0].adj_close, None);
    assert_eq!(prices[0].volume, None);
}

#[test]
fn deserialize_intraday_timestamps() {
    let json = load_fixture("spy_iex_prices.json");
    let prices: Vec<PriceRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(prices[1].date.hour(), 13);
    assert_eq!(prices[1].date.minute(), 35);
}

#[test]
fn deserialize_metadata() {
    let meta: Metadata = serde_json::from_str(&load_fixture("spy_meta.json")).unwrap();
    assert_eq!(meta.name.as_deref(), Some("SPDR S&P 500 ETF TRUST"));
    assert_eq!(meta.start_date.unwrap().year(), 1993);
    assert_eq!(meta.end_date, NaiveDate::from_ymd_opt(2024, 6, 14));
}

#[test]
fn deserialize_metadata_missing_optional_fields() {
    let meta: Metadata = serde_json::from_str(r#"{"ticker": "XYZ"}"#).unwrap();
    assert_eq!(meta.ticker, "XYZ");
    assert!(meta.name.is_none());
    assert!(meta.start_date.is_none());
}

#[test]
fn deserialize_quotes_with_nulls() {
    let quotes: Vec<Quote> = serde_json::from_str(&load_fixture("iex_quotes.json")).unwrap();
    let spy = &quotes[0];
    assert_eq!(spy.number("mid"), Some(542.775));
    assert!(spy.time("lastSaleTimestamp").is_some());

    let qqq = &quotes[1];
    assert!(qqq.quote_timestamp.is_none());
    assert_eq!(qqq.number("askPrice"), None);
    assert_eq!(qqq.number("last"), Some(479.19));
}

#[test]
fn deserialize_price_without_date_returns_error() {
    let result = serde_json::from_str::<Vec<PriceRecord>>(r#"[{"open": 1.0}]"#);
    assert!(result.is_err());
}

#[test]
fn deserialize_not_found_body_is_not_a_series() {
    let result = serde_json::from_str::<Vec<PriceRecord>>(&load_fixture("not_found.json"));
    assert!(result.is_err());
}
