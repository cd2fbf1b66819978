//! Price feed types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a sample's asset price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleSource {
    /// Quoted by the remote source
    Live,
    /// Predefined substitute, the remote source was unavailable
    Fallback,
}

/// One reading of both unit prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Local timestamp when the sample was produced
    pub timestamp: DateTime<Utc>,
    /// Asset unit price
    pub asset_price: Decimal,
    /// Commodity price per unit of quantity
    pub commodity_price: Decimal,
    pub source: SampleSource,
}

impl PriceSample {
    pub fn live(asset_price: Decimal, commodity_price: Decimal) -> Self {
        Self {
            timestamp: Utc::now(),
            asset_price,
            commodity_price,
            source: SampleSource::Live,
        }
    }

    pub fn fallback(asset_price: Decimal, commodity_price: Decimal) -> Self {
        Self {
            timestamp: Utc::now(),
            asset_price,
            commodity_price,
            source: SampleSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == SampleSource::Fallback
    }
}

/// Reasons the quote source is unavailable
///
/// Never escapes `PriceFeed`; every variant triggers the fallback sample.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport failure, including timeouts
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success status code
    #[error("Unexpected status: {0}")]
    Status(u16),
    /// Body is not the expected JSON shape
    #[error("Malformed payload: {0}")]
    Malformed(String),
    /// Payload has no quote for the asset/currency pair
    #[error("No {currency} quote for {asset}")]
    MissingQuote { asset: String, currency: String },
}
