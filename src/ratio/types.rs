//! Ratio engine types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ratio computation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatioError {
    /// Commodity market cap is zero, the ratio is undefined
    #[error("Commodity market cap is zero")]
    DivisionByZero,
    /// One of the inputs is below zero
    #[error("Negative input: {0}")]
    NegativeInput(Decimal),
    /// Intermediate value does not fit in a decimal
    #[error("Arithmetic overflow")]
    Overflow,
}

/// Growth still required before the asset reaches the commodity's market cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Parity {
    /// Multiple of growth needed: `100 / percentage - 1`
    Multiple(Decimal),
    /// Percentage is 100 or more
    AtOrPastParity,
    /// Percentage is zero, no finite multiple exists
    Undefined,
}

impl Parity {
    pub fn multiple(&self) -> Option<Decimal> {
        match self {
            Parity::Multiple(m) => Some(*m),
            _ => None,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Parity::AtOrPastParity)
    }
}

/// Values derived from one pair of unit prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRatio {
    /// Asset unit price x asset supply
    pub asset_market_cap: Decimal,
    /// Commodity unit price x commodity quantity
    pub commodity_market_cap: Decimal,
    /// Asset market cap as a percentage of the commodity's (unclamped)
    pub percentage: Decimal,
    pub multiple_to_parity: Parity,
}

/// Process-wide supply constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyConstants {
    /// Circulating units of the tracked asset
    pub asset_supply: Decimal,
    /// Total quantity of the commodity, same unit as its price
    pub commodity_total_quantity: Decimal,
}

impl SupplyConstants {
    pub fn new(asset_supply: Decimal, commodity_total_quantity: Decimal) -> Self {
        Self {
            asset_supply,
            commodity_total_quantity,
        }
    }

    /// Compute the ratio for a pair of unit prices against these constants
    pub fn ratio(
        &self,
        asset_price: Decimal,
        commodity_price: Decimal,
    ) -> Result<DerivedRatio, RatioError> {
        super::compute_ratio(
            asset_price,
            commodity_price,
            self.asset_supply,
            self.commodity_total_quantity,
        )
    }
}
