//! Integration tests for price feed module

use crate::support::{serve, serve_with_delay, unreachable_base_url};
use btc_gold_tracker::feed::{
    CoinGeckoClient, CoinGeckoConfig, FeedError, PriceFeed, QuoteSource, SampleSource,
};
use rust_decimal_macros::dec;
use std::time::Duration;

fn client(base_url: &str, timeout: Duration) -> CoinGeckoClient {
    CoinGeckoClient::new(CoinGeckoConfig {
        base_url: base_url.to_string(),
        timeout,
        ..CoinGeckoConfig::default()
    })
    .unwrap()
}

fn feed(base_url: &str) -> PriceFeed<CoinGeckoClient> {
    PriceFeed::new(
        client(base_url, Duration::from_secs(5)),
        dec!(2490),
        dec!(80000),
    )
}

#[tokio::test]
async fn test_live_quote() {
    let server = serve(200, r#"{"bitcoin":{"usd":96543.21}}"#).await;

    let sample = feed(&server.base_url).fetch_current_prices().await;

    assert_eq!(sample.source, SampleSource::Live);
    assert_eq!(sample.asset_price, dec!(96543.21));
    assert_eq!(sample.commodity_price, dec!(2490));

    let request = server.last_request_line().unwrap();
    assert!(request.starts_with("GET /api/v3/simple/price?"));
    assert!(request.contains("ids=bitcoin"));
    assert!(request.contains("vs_currencies=usd"));
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let server = serve(500, r#"{"error":"boom"}"#).await;

    let sample = feed(&server.base_url).fetch_current_prices().await;

    assert_eq!(sample.source, SampleSource::Fallback);
    assert_eq!(sample.asset_price, dec!(80000));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_status_error_reported_by_source() {
    let server = serve(429, r#"{"status":{"error_code":429}}"#).await;

    let result = client(&server.base_url, Duration::from_secs(5))
        .asset_price()
        .await;

    assert!(matches!(result, Err(FeedError::Status(429))));
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let server = serve(200, "<html>rate limited</html>").await;

    let sample = feed(&server.base_url).fetch_current_prices().await;

    assert!(sample.is_fallback());
    assert_eq!(sample.asset_price, dec!(80000));
}

#[tokio::test]
async fn test_missing_quote_falls_back() {
    let server = serve(200, r#"{}"#).await;

    let sample = feed(&server.base_url).fetch_current_prices().await;

    assert!(sample.is_fallback());
}

#[tokio::test]
async fn test_unreachable_source_falls_back() {
    let base_url = unreachable_base_url().await;

    let sample = feed(&base_url).fetch_current_prices().await;

    assert!(sample.is_fallback());
    assert_eq!(sample.asset_price, dec!(80000));
    assert_eq!(sample.commodity_price, dec!(2490));
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let server = serve_with_delay(
        200,
        r#"{"bitcoin":{"usd":1}}"#,
        Duration::from_secs(3),
    )
    .await;
    let feed = PriceFeed::new(
        client(&server.base_url, Duration::from_millis(200)),
        dec!(2490),
        dec!(80000),
    );

    let sample = feed.fetch_current_prices().await;

    assert!(sample.is_fallback());
}
