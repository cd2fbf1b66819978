//! Integration tests for the tracker controller against a stub quote API

use crate::support::{serve, unreachable_base_url};
use btc_gold_tracker::feed::{CoinGeckoClient, CoinGeckoConfig, PriceFeed};
use btc_gold_tracker::ratio::{Parity, SupplyConstants, HISTORY_CAPACITY};
use btc_gold_tracker::simulation::SliderConfig;
use btc_gold_tracker::tracker::{
    ChannelTicker, IntervalTicker, TrackerService, TrackerState, TrackerView,
};
use rust_decimal_macros::dec;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep, timeout};

fn feed(base_url: &str) -> PriceFeed<CoinGeckoClient> {
    let client = CoinGeckoClient::new(CoinGeckoConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        ..CoinGeckoConfig::default()
    })
    .unwrap();
    PriceFeed::new(client, dec!(2490), dec!(80000))
}

fn state() -> TrackerState {
    TrackerState::new(
        SupplyConstants::new(dec!(19600000), dec!(6353000000)),
        SliderConfig::default(),
        dec!(2490),
    )
}

async fn wait_for(
    rx: &mut watch::Receiver<TrackerView>,
    f: impl FnMut(&TrackerView) -> bool,
) -> TrackerView {
    timeout(Duration::from_secs(10), rx.wait_for(f))
        .await
        .expect("timed out waiting for view")
        .expect("tracker dropped")
        .clone()
}

#[tokio::test]
async fn test_live_cycle_and_simulation() {
    let server = serve(200, r#"{"bitcoin":{"usd":80000}}"#).await;
    let (ticker, tick) = ChannelTicker::new();
    let handle = TrackerService::spawn(feed(&server.base_url), ticker, state());
    let mut rx = handle.subscribe();

    tick.send(()).await.unwrap();
    let view = wait_for(&mut rx, |v| !v.price_history.is_empty() && !v.loading).await;

    assert_eq!(view.asset_price, dec!(80000));
    assert_eq!(view.percentage.unwrap().round_dp(4), dec!(9.9121));
    assert!(!view.is_fallback);
    assert!(view.last_updated.is_some());

    handle.simulate(dec!(807091)).await.unwrap();
    let view = wait_for(&mut rx, |v| v.simulated_asset_price == dec!(807091)).await;
    let simulated = view.simulated_ratio.unwrap();
    assert_eq!(simulated.multiple_to_parity, Parity::AtOrPastParity);
    // live values untouched by the slider
    assert_eq!(view.asset_price, dec!(80000));
    assert_eq!(view.price_history.len(), 1);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unavailable_source_shows_fallback() {
    let base_url = unreachable_base_url().await;
    let (ticker, tick) = ChannelTicker::new();
    let handle = TrackerService::spawn(feed(&base_url), ticker, state());
    let mut rx = handle.subscribe();

    tick.send(()).await.unwrap();
    let view = wait_for(&mut rx, |v| v.is_fallback && !v.loading).await;

    assert_eq!(view.asset_price, dec!(80000));
    assert_eq!(view.simulated_asset_price, dec!(80000));
    assert!(view.percentage.is_some());
    assert!(view.price_history.is_empty());
    assert!(view.last_updated.is_none());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_absurd_quote_does_not_stop_tracker() {
    let server = serve(200, r#"{"bitcoin":{"usd":6e27}}"#).await;
    let (ticker, tick) = ChannelTicker::new();
    let handle = TrackerService::spawn(feed(&server.base_url), ticker, state());
    let mut rx = handle.subscribe();

    tick.send(()).await.unwrap();
    let view = wait_for(&mut rx, |v| !v.loading && v.asset_price > dec!(0)).await;
    assert!(view.percentage.is_none());
    assert!(view.slider.is_none());
    assert!(!view.is_fallback);

    handle.simulate(dec!(90000)).await.unwrap();
    let view = wait_for(&mut rx, |v| v.simulated_asset_price == dec!(90000)).await;
    assert!(view.simulated_percentage.is_some());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_history_stays_bounded() {
    let server = serve(200, r#"{"bitcoin":{"usd":80000}}"#).await;
    let (ticker, _tick) = ChannelTicker::new();
    let handle = TrackerService::spawn(feed(&server.base_url), ticker, state());
    let mut rx = handle.subscribe();

    for i in 1..=(HISTORY_CAPACITY + 5) {
        let previous = rx.borrow().last_updated;
        handle.refresh().await.unwrap();
        let view = wait_for(&mut rx, |v| !v.loading && v.last_updated != previous).await;
        assert_eq!(view.price_history.len(), i.min(HISTORY_CAPACITY));
    }
    assert_eq!(server.hits(), HISTORY_CAPACITY + 5);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_interval_polls_until_shutdown() {
    let server = serve(200, r#"{"bitcoin":{"usd":80000}}"#).await;
    let handle = TrackerService::spawn(
        feed(&server.base_url),
        IntervalTicker::new(Duration::from_millis(50)),
        state(),
    );

    timeout(Duration::from_secs(10), async {
        while server.hits() < 3 {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("ticker should keep polling");

    handle.shutdown().await.unwrap();
    let after_shutdown = server.hits();
    sleep(Duration::from_millis(300)).await;
    assert_eq!(server.hits(), after_shutdown);
}
