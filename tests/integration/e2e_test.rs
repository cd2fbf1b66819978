//! End-to-end integration tests

use btc_gold_tracker::config::Config;
use btc_gold_tracker::feed::{FeedError, PriceFeed, PriceSample, QuoteSource};
use btc_gold_tracker::ratio::{
    append_to_history, compute_ratio, HistoryBuffer, Parity, RatioError,
};
use btc_gold_tracker::simulation::SimulationState;
use btc_gold_tracker::tracker::TrackerState;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct AlwaysDown;

#[async_trait::async_trait]
impl QuoteSource for AlwaysDown {
    async fn asset_price(&self) -> Result<Decimal, FeedError> {
        Err(FeedError::Malformed("unavailable".to_string()))
    }

    fn name(&self) -> &str {
        "down"
    }
}

#[test]
fn test_config_example_exists() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.feed.asset_id, "bitcoin");
    assert_eq!(config.feed.poll_interval_secs, 60);
    assert_eq!(config.supply.asset_supply, dec!(19600000));
}

#[test]
fn test_reference_numbers() {
    let config = Config::default();
    let constants = config.supply.constants();
    let ratio = constants.ratio(dec!(80000), config.feed.commodity_price).unwrap();

    assert_eq!(ratio.asset_market_cap, dec!(1568000000000));
    assert_eq!(ratio.commodity_market_cap, dec!(15818970000000));
    assert_eq!(ratio.percentage.round_dp(4), dec!(9.9121));
    assert_eq!(
        ratio.multiple_to_parity.multiple().unwrap().round_dp(3),
        dec!(9.089)
    );
}

#[test]
fn test_compute_ratio_is_idempotent() {
    let first = compute_ratio(dec!(12345.678), dec!(2490), dec!(19600000), dec!(6353000000));
    let second = compute_ratio(dec!(12345.678), dec!(2490), dec!(19600000), dec!(6353000000));
    assert_eq!(first, second);
}

#[test]
fn test_division_by_zero_signalled() {
    assert_eq!(
        compute_ratio(dec!(80000), dec!(0), dec!(19600000), dec!(6353000000)),
        Err(RatioError::DivisionByZero)
    );
}

#[test]
fn test_parity_boundary() {
    let ratio = compute_ratio(dec!(2), dec!(4), dec!(50), dec!(25)).unwrap();
    assert_eq!(ratio.percentage, dec!(100));
    assert_eq!(ratio.multiple_to_parity, Parity::AtOrPastParity);
}

#[test]
fn test_fifteen_samples_keep_last_ten() {
    let mut buffer = HistoryBuffer::new();
    for i in 1..=15 {
        let sample = PriceSample::live(Decimal::from(i * 1000), dec!(2490));
        let derived = compute_ratio(
            sample.asset_price,
            dec!(2490),
            dec!(19600000),
            dec!(6353000000),
        )
        .unwrap();
        buffer = append_to_history(buffer, &sample, &derived);
    }

    let prices: Vec<Decimal> = buffer.iter().map(|e| e.asset_price).collect();
    let expected: Vec<Decimal> = (6..=15).map(|i| Decimal::from(i * 1000)).collect();
    assert_eq!(prices, expected);
}

#[test]
fn test_simulation_independent_of_history() {
    let mut state = TrackerState::new(
        Config::default().supply.constants(),
        Config::default().simulation.slider(),
        dec!(2490),
    );
    state.complete_fetch(PriceSample::live(dec!(80000), dec!(2490)));
    state.set_hypothetical_price(dec!(1000000));
    assert_eq!(state.history().len(), 1);

    let mut sim = SimulationState::new();
    let direct = sim
        .set_hypothetical_price(dec!(1000000), dec!(2490), dec!(19600000), dec!(6353000000))
        .unwrap();
    assert_eq!(state.view().simulated_ratio, Some(direct));
}

#[tokio::test]
async fn test_always_failing_feed_returns_fallback() {
    let feed = PriceFeed::new(AlwaysDown, dec!(2490), dec!(80000));
    for _ in 0..3 {
        let sample = feed.fetch_current_prices().await;
        assert!(sample.is_fallback());
        assert_eq!(sample.asset_price, dec!(80000));
    }
}
