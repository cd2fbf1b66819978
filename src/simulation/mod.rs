//! Price simulation module
//!
//! Tracks a user-chosen hypothetical asset price and recomputes the ratio
//! against the latest commodity price whenever it changes.

mod slider;

pub use slider::{SliderConfig, SliderRange};

use crate::ratio::{compute_ratio, DerivedRatio, RatioError, SupplyConstants};
use rust_decimal::Decimal;

/// Hypothetical price input and its last computed ratio
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationState {
    hypothetical_asset_price: Decimal,
    ratio: Option<DerivedRatio>,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `new_price` and recompute the ratio with it in place of the live price.
    ///
    /// No range validation happens here; the slider bounds are a UI concern.
    pub fn set_hypothetical_price(
        &mut self,
        new_price: Decimal,
        current_commodity_price: Decimal,
        asset_supply: Decimal,
        commodity_total_quantity: Decimal,
    ) -> Result<DerivedRatio, RatioError> {
        self.hypothetical_asset_price = new_price;
        let result = compute_ratio(
            new_price,
            current_commodity_price,
            asset_supply,
            commodity_total_quantity,
        );
        self.ratio = result.as_ref().ok().copied();
        result
    }

    /// Same as `set_hypothetical_price` with the supply taken from `constants`
    pub fn set_price_with(
        &mut self,
        new_price: Decimal,
        current_commodity_price: Decimal,
        constants: &SupplyConstants,
    ) -> Result<DerivedRatio, RatioError> {
        self.set_hypothetical_price(
            new_price,
            current_commodity_price,
            constants.asset_supply,
            constants.commodity_total_quantity,
        )
    }

    pub fn hypothetical_asset_price(&self) -> Decimal {
        self.hypothetical_asset_price
    }

    /// Ratio for the current hypothetical price; `None` when undefined
    pub fn ratio(&self) -> Option<&DerivedRatio> {
        self.ratio.as_ref()
    }
}
