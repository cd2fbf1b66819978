//! Price feed module
//!
//! Provides the current asset price from a remote quote source, paired with
//! the commodity reference price, falling back to a predefined sample when
//! the source is unavailable.

mod coingecko;
mod types;

pub use coingecko::{parse_quote, CoinGeckoClient, CoinGeckoConfig, COINGECKO_API_URL};
pub use types::{FeedError, PriceSample, SampleSource};

use crate::config::FeedConfig;
use crate::telemetry;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Instant;

/// Trait for remote asset quote implementations
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the asset's current unit price
    async fn asset_price(&self) -> Result<Decimal, FeedError>;

    /// Short identifier used in logs
    fn name(&self) -> &str;
}

/// Produces price samples, never failing
pub struct PriceFeed<S> {
    source: S,
    commodity_price: Decimal,
    fallback_asset_price: Decimal,
}

impl<S: QuoteSource> PriceFeed<S> {
    pub fn new(source: S, commodity_price: Decimal, fallback_asset_price: Decimal) -> Self {
        Self {
            source,
            commodity_price,
            fallback_asset_price,
        }
    }

    /// Create a feed with prices taken from configuration
    pub fn from_config(source: S, config: &FeedConfig) -> Self {
        Self::new(source, config.commodity_price, config.fallback_asset_price)
    }

    pub fn commodity_price(&self) -> Decimal {
        self.commodity_price
    }

    pub fn fallback_asset_price(&self) -> Decimal {
        self.fallback_asset_price
    }

    /// Fetch the current prices
    ///
    /// Any quote failure is logged and replaced by a fallback sample; no
    /// retry happens within one call.
    pub async fn fetch_current_prices(&self) -> PriceSample {
        let started = Instant::now();
        let result = self.source.asset_price().await;
        let elapsed = started.elapsed();

        let sample = match result {
            Ok(price) => {
                tracing::debug!(
                    source = self.source.name(),
                    price = %price,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Fetched asset price"
                );
                PriceSample::live(price, self.commodity_price)
            }
            Err(e) => {
                tracing::warn!(
                    source = self.source.name(),
                    error = %e,
                    fallback_price = %self.fallback_asset_price,
                    "Price feed unavailable, using fallback sample"
                );
                PriceSample::fallback(self.fallback_asset_price, self.commodity_price)
            }
        };

        telemetry::record_fetch(elapsed, sample.source);
        sample
    }
}
