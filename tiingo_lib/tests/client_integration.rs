use chrono::{TimeZone, Utc};
use tiingo_lib::{Cell, TiingoClient, TiingoError};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../tiingo_api/tests/fixtures/{}", name)).unwrap()
}

fn tickers(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn day(d: u32) -> Option<chrono::DateTime<Utc>> {
    Some(Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap())
}

async fn mount_json(server: &MockServer, at: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
        .mount(server)
        .await;
}

async fn mount_not_found(server: &MockServer, at: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(404).set_body_string(load_fixture("not_found.json")))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> TiingoClient {
    TiingoClient::with_base_url(&server.uri(), "test-key").unwrap()
}

// -- Historical --

#[tokio::test]
async fn invalid_frequency_fails_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    for freq in ["hourly", "annual", "1day", "", "Daily"] {
        let result = client
            .get_stock_historical(&tickers(&["spy"]), freq, &[], None, None)
            .await;
        assert!(matches!(result, Err(TiingoError::InvalidFrequency(_))), "{freq:?}");
    }
}

#[tokio::test]
async fn bad_ticker_is_dropped_from_batch() {
    let server = MockServer::start().await;
    mount_json(&server, "/tiingo/daily/SPY/prices", "spy_prices.json").await;
    mount_not_found(&server, "/tiingo/daily/BAD_TICKER/prices").await;

    let table = client(&server)
        .get_stock_historical(&tickers(&["spy", "bad_ticker"]), "daily", &[], None, None)
        .await
        .unwrap();

    assert_eq!(table.tickers(), vec!["SPY"]);
    assert_eq!(table.len(), 3);
}

#[tokio::test]
async fn all_tickers_failing_is_empty_not_error() {
    let server = MockServer::start().await;
    mount_not_found(&server, "/tiingo/daily/BAD1/prices").await;
    Mock::given(method("GET"))
        .and(path("/tiingo/daily/BAD2/prices"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let table = client(&server)
        .get_stock_historical(&tickers(&["bad1", "bad2"]), "daily", &[], None, None)
        .await
        .unwrap();
    assert!(table.is_empty());
}

#[tokio::test]
async fn open_close_columns_match_fixture() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tiingo/daily/SPY/prices"))
        .and(query_param("columns", "open,close"))
        .and(query_param("startDate", "2024-06-12"))
        .and(query_param("endDate", "2024-06-14"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("spy_prices_open_close.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let table = client(&server)
        .get_stock_historical(
            &tickers(&["SPY"]),
            "daily",
            &tickers(&["open", "close"]),
            Some("2024-06-12"),
            Some("2024-06-14"),
        )
        .await
        .unwrap();

    assert_eq!(table.columns(), &["open".to_string(), "close".to_string()]);
    assert_eq!(table.get("SPY", day(12), "open"), Some(&Cell::Number(537.83)));
    assert_eq!(table.get("SPY", day(13), "close"), Some(&Cell::Number(542.45)));
    assert!(table.rows().iter().all(|r| r.cells.len() == 2));
}

#[tokio::test]
async fn invalid_columns_are_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tiingo/daily/SPY/prices"))
        .and(query_param("columns", "open,close"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("spy_prices_open_close.json")),
        )
        .mount(&server)
        .await;

    let table = client(&server)
        .get_stock_historical(
            &tickers(&["SPY"]),
            "daily",
            &tickers(&["open", "price", "close", "bid"]),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(table.columns(), &["open".to_string(), "close".to_string()]);
}

#[tokio::test]
async fn all_invalid_columns_fall_back_to_full_set() {
    let server = MockServer::start().await;
    mount_json(&server, "/tiingo/daily/SPY/prices", "spy_prices.json").await;

    let table = client(&server)
        .get_stock_historical(&tickers(&["SPY"]), "weekly", &tickers(&["price"]), None, None)
        .await
        .unwrap();
    assert_eq!(table.columns().len(), 12);
    assert_eq!(table.get("SPY", day(14), "adjClose"), Some(&Cell::Number(539.33)));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].url.query().unwrap_or("").contains("columns"));
}

#[tokio::test]
async fn intraday_frequency_uses_iex_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/iex/SPY/prices"))
        .and(query_param("resampleFreq", "5min"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("spy_iex_prices.json")))
        .expect(1)
        .mount(&server)
        .await;

    let table = client(&server)
        .get_stock_historical(
            &tickers(&["spy"]),
            "5min",
            &tickers(&["close", "adjClose"]),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(table.columns(), &["close".to_string()]);
    assert_eq!(table.len(), 2);
}

#[tokio::test]
async fn identical_calls_return_identical_tables() {
    let server = MockServer::start().await;
    mount_json(&server, "/tiingo/daily/SPY/prices", "spy_prices_open_close.json").await;
    mount_json(&server, "/tiingo/daily/QQQ/prices", "qqq_prices_open_close.json").await;

    let client = client(&server);
    let cols = tickers(&["open", "close"]);
    let list = tickers(&["SPY", "QQQ"]);
    let first = client
        .get_stock_historical(&list, "daily", &cols, Some("2024-06-12"), None)
        .await
        .unwrap();
    let second = client
        .get_stock_historical(&list, "daily", &cols, Some("2024-06-12"), None)
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first.tickers(), vec!["SPY", "QQQ"]);
    assert_eq!(first.len(), 5);
}

#[tokio::test]
async fn pivot_single_column_across_tickers() {
    let server = MockServer::start().await;
    mount_json(&server, "/tiingo/daily/SPY/prices", "spy_prices_open_close.json").await;
    mount_json(&server, "/tiingo/daily/QQQ/prices", "qqq_prices_open_close.json").await;

    let table = client(&server)
        .get_stock_historical(&tickers(&["SPY", "QQQ"]), "daily", &tickers(&["close"]), None, None)
        .await
        .unwrap();
    let wide = table.pivot("close").unwrap();
    assert_eq!(wide.rows.len(), 3);
    assert_eq!(wide.rows[2].1, vec![Cell::Number(542.78), Cell::Empty]);
}

// -- Empty input --

#[tokio::test]
async fn empty_ticker_list_issues_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.get_stock_metadata(&[]).await.is_empty());
    assert!(client
        .get_stock_historical(&[], "daily", &[], None, None)
        .await
        .unwrap()
        .is_empty());
    assert!(client.get_stock_last(&[], &[]).await.is_empty());
}

#[tokio::test]
async fn unusable_tickers_issue_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let table = client(&server)
        .get_stock_metadata(&tickers(&["", "a/b", "   "]))
        .await;
    assert!(table.is_empty());
}

// -- Metadata --

#[tokio::test]
async fn metadata_drops_failing_ticker() {
    let server = MockServer::start().await;
    mount_json(&server, "/tiingo/daily/SPY", "spy_meta.json").await;
    mount_json(&server, "/tiingo/daily/QQQ", "qqq_meta.json").await;
    mount_not_found(&server, "/tiingo/daily/BAD_TICKER").await;

    let table = client(&server)
        .get_stock_metadata(&tickers(&["spy", "bad_ticker", "qqq"]))
        .await;
    assert_eq!(table.tickers(), vec!["SPY", "QQQ"]);
    assert_eq!(
        table.get("QQQ", None, "exchangeCode"),
        Some(&Cell::Text("NASDAQ".to_string()))
    );
}

#[tokio::test]
async fn metadata_all_failing_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/tiingo/daily/[A-Z0-9]+$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let table = client(&server).get_stock_metadata(&tickers(&["bad1", "bad2"])).await;
    assert!(table.is_empty());
}

// -- Latest price --

#[tokio::test]
async fn last_batch_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/iex/"))
        .and(query_param("tickers", "SPY,QQQ,NOPE"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("iex_quotes.json")))
        .expect(1)
        .mount(&server)
        .await;

    let table = client(&server)
        .get_stock_last(&tickers(&["spy", "qqq", "nope"]), &tickers(&["last", "prevClose", "junk"]))
        .await;
    assert_eq!(table.tickers(), vec!["SPY", "QQQ"]);
    assert_eq!(table.columns(), &["last".to_string(), "prevClose".to_string()]);
    let spy = table.rows_for("SPY").next().unwrap();
    assert_eq!(spy.cells, vec![Cell::Number(542.78), Cell::Number(542.45)]);
}

#[tokio::test]
async fn last_falls_back_to_single_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/iex/"))
        .respond_with(ResponseTemplate::new(400).set_body_string("unknown ticker BAD_TICKER"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/iex/SPY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "ticker": "SPY",
            "timestamp": "2024-06-14T20:00:00+00:00",
            "last": 542.78
        }])))
        .mount(&server)
        .await;
    mount_not_found(&server, "/iex/BAD_TICKER").await;

    let table = client(&server)
        .get_stock_last(&tickers(&["SPY", "bad_ticker"]), &[])
        .await;
    assert_eq!(table.tickers(), vec!["SPY"]);
    assert_eq!(table.columns().len(), 16);
    let ts = Utc.with_ymd_and_hms(2024, 6, 14, 20, 0, 0).unwrap();
    assert_eq!(table.get("SPY", Some(ts), "last"), Some(&Cell::Number(542.78)));
    assert_eq!(table.get("SPY", Some(ts), "mid"), Some(&Cell::Empty));
}

async fn batch_failure_sends_no_single_requests(status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/iex/"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/iex/[^/]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let table = client(&server)
        .get_stock_last(&tickers(&["SPY", "QQQ", "AAPL"]), &[])
        .await;
    assert!(table.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn last_rate_limited_batch_is_not_split() {
    batch_failure_sends_no_single_requests(429).await;
}

#[tokio::test]
async fn last_unauthorized_batch_is_not_split() {
    batch_failure_sends_no_single_requests(401).await;
}

#[tokio::test]
async fn last_server_error_batch_is_not_split() {
    batch_failure_sends_no_single_requests(500).await;
}

// -- Token --

#[tokio::test]
async fn verify_token_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "Auth Token was not correct"})),
        )
        .mount(&server)
        .await;

    let result = client(&server).verify_token().await;
    assert!(matches!(result, Err(TiingoError::InvalidToken(_))));
}

#[tokio::test]
async fn verify_token_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "You successfully sent a request"})),
        )
        .mount(&server)
        .await;

    assert!(client(&server).verify_token().await.is_ok());
}
