//! Configuration types for btc-gold-tracker

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::display::Locale;
use crate::ratio::SupplyConstants;
use crate::simulation::SliderConfig;
use crate::telemetry::LogFormat;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub supply: SupplyConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Price feed configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// Base URL of the quote API (without the `/simple/price` path)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Asset identifier at the quote API
    #[serde(default = "default_asset_id")]
    pub asset_id: String,

    /// Quote currency
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Period between automatic refreshes (seconds)
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Asset price used when the quote API is unavailable
    #[serde(default = "default_fallback_asset_price")]
    pub fallback_asset_price: Decimal,

    /// Commodity reference price per unit of quantity
    #[serde(default = "default_commodity_price")]
    pub commodity_price: Decimal,
}

fn default_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}
fn default_asset_id() -> String {
    "bitcoin".to_string()
}
fn default_vs_currency() -> String {
    "usd".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_poll_interval_secs() -> u64 {
    60
}
fn default_fallback_asset_price() -> Decimal {
    dec!(80000)
}
fn default_commodity_price() -> Decimal {
    dec!(2490) // USD per troy ounce
}

impl FeedConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Poll period as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            asset_id: default_asset_id(),
            vs_currency: default_vs_currency(),
            timeout_secs: default_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            fallback_asset_price: default_fallback_asset_price(),
            commodity_price: default_commodity_price(),
        }
    }
}

/// Fixed supply constants
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupplyConfig {
    /// Circulating units of the tracked asset
    #[serde(default = "default_asset_supply")]
    pub asset_supply: Decimal,

    /// Total quantity of the commodity, in the unit its price is quoted in
    #[serde(default = "default_commodity_total_quantity")]
    pub commodity_total_quantity: Decimal,
}

fn default_asset_supply() -> Decimal {
    dec!(19600000)
}
fn default_commodity_total_quantity() -> Decimal {
    dec!(6353000000) // troy ounces
}

impl Default for SupplyConfig {
    fn default() -> Self {
        Self {
            asset_supply: default_asset_supply(),
            commodity_total_quantity: default_commodity_total_quantity(),
        }
    }
}

impl SupplyConfig {
    pub fn constants(&self) -> SupplyConstants {
        SupplyConstants::new(self.asset_supply, self.commodity_total_quantity)
    }
}

/// Simulation slider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Lower slider bound as a multiple of the live price
    #[serde(default = "default_min_multiplier")]
    pub min_multiplier: Decimal,

    /// Upper slider bound as a multiple of the live price
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: Decimal,

    /// Slider step in currency units
    #[serde(default = "default_step")]
    pub step: Decimal,
}

fn default_min_multiplier() -> Decimal {
    dec!(0.5)
}
fn default_max_multiplier() -> Decimal {
    dec!(15)
}
fn default_step() -> Decimal {
    dec!(1000)
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_multiplier: default_min_multiplier(),
            max_multiplier: default_max_multiplier(),
            step: default_step(),
        }
    }
}

impl SimulationConfig {
    pub fn slider(&self) -> SliderConfig {
        SliderConfig {
            min_multiplier: self.min_multiplier,
            max_multiplier: self.max_multiplier,
            step: self.step,
        }
    }
}

/// Presentation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_asset_label")]
    pub asset_label: String,
    #[serde(default = "default_commodity_label")]
    pub commodity_label: String,
}

fn default_asset_label() -> String {
    "Bitcoin".to_string()
}
fn default_commodity_label() -> String {
    "Gold".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            asset_label: default_asset_label(),
            commodity_label: default_commodity_label(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
