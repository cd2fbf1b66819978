//! Slider bounds for the simulated price input

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Slider bounds relative to the live price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderConfig {
    pub min_multiplier: Decimal,
    pub max_multiplier: Decimal,
    pub step: Decimal,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min_multiplier: dec!(0.5),
            max_multiplier: dec!(15),
            step: dec!(1000),
        }
    }
}

/// Concrete slider range for one live price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

impl SliderRange {
    /// `None` when a bound does not fit in a decimal
    pub fn for_live_price(live_price: Decimal, config: &SliderConfig) -> Option<Self> {
        let min = live_price.checked_mul(config.min_multiplier)?;
        let max = live_price.checked_mul(config.max_multiplier)?.max(min);
        Some(Self {
            min,
            max,
            step: config.step,
        })
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into the range and round to the nearest step counted from `min`
    pub fn snap(&self, value: Decimal) -> Decimal {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= Decimal::ZERO {
            return clamped;
        }
        let snapped = (clamped - self.min)
            .checked_div(self.step)
            .map(|steps| steps.round())
            .and_then(|steps| steps.checked_mul(self.step))
            .and_then(|offset| self.min.checked_add(offset));
        snapped.map_or(clamped, |value| value.min(self.max))
    }
}
