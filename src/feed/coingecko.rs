//! CoinGecko simple-price client
//!
//! `GET {base_url}/simple/price?ids=<asset>&vs_currencies=<currency>` answers
//! with `{ "<asset>": { "<currency>": <number> } }`.

use super::{FeedError, QuoteSource};
use crate::config::FeedConfig;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

/// CoinGecko public API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Configuration for the CoinGecko client
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    pub base_url: String,
    pub asset_id: String,
    pub vs_currency: String,
    pub timeout: Duration,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
            asset_id: "bitcoin".to_string(),
            vs_currency: "usd".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl From<&FeedConfig> for CoinGeckoConfig {
    fn from(config: &FeedConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            asset_id: config.asset_id.clone(),
            vs_currency: config.vs_currency.clone(),
            timeout: config.timeout(),
        }
    }
}

/// HTTP quote source backed by CoinGecko
pub struct CoinGeckoClient {
    config: CoinGeckoConfig,
    client: Client,
}

impl CoinGeckoClient {
    /// Create a client with the given configuration
    pub fn new(config: CoinGeckoConfig) -> Result<Self, FeedError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn price_url(&self) -> String {
        format!("{}/simple/price", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl QuoteSource for CoinGeckoClient {
    async fn asset_price(&self) -> Result<Decimal, FeedError> {
        let url = self.price_url();

        tracing::debug!(url = %url, asset = %self.config.asset_id, "Requesting quote");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ids", self.config.asset_id.as_str()),
                ("vs_currencies", self.config.vs_currency.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_quote(&body, &self.config.asset_id, &self.config.vs_currency)
    }

    fn name(&self) -> &str {
        "coingecko"
    }
}

/// Extract `body[asset][currency]` as a non-negative decimal
///
/// Fractional and exponent numbers pass through `f64` first, so the result
/// is the shortest decimal text of that `f64` (`6e27` reads as
/// `6000000000000001000000000000`). Integers up to `u64::MAX` are exact.
pub fn parse_quote(body: &str, asset: &str, currency: &str) -> Result<Decimal, FeedError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FeedError::Malformed(e.to_string()))?;

    let quote = value
        .get(asset)
        .and_then(|prices| prices.get(currency))
        .ok_or_else(|| FeedError::MissingQuote {
            asset: asset.to_string(),
            currency: currency.to_string(),
        })?;

    let serde_json::Value::Number(number) = quote else {
        return Err(FeedError::Malformed(format!("non-numeric quote: {}", quote)));
    };

    let text = number.to_string();
    let price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| FeedError::Malformed(format!("{}: {}", text, e)))?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(FeedError::Malformed(format!("negative quote: {}", price)));
    }

    Ok(price)
}
