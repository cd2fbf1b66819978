//! Market cap ratio arithmetic
//!
//! percentage = (asset_price * asset_supply) / (commodity_price * commodity_quantity) * 100
//! multiple   = 100 / percentage - 1

use super::types::{DerivedRatio, Parity, RatioError};
use rust_decimal::Decimal;

/// Compute market caps, their percentage ratio and the multiple to parity.
///
/// Pure and deterministic. The percentage is not clamped; a zero commodity
/// market cap yields `RatioError::DivisionByZero` rather than a non-finite
/// value.
pub fn compute_ratio(
    asset_price: Decimal,
    commodity_price: Decimal,
    asset_supply: Decimal,
    commodity_total_quantity: Decimal,
) -> Result<DerivedRatio, RatioError> {
    for input in [
        asset_price,
        commodity_price,
        asset_supply,
        commodity_total_quantity,
    ] {
        if input.is_sign_negative() && !input.is_zero() {
            return Err(RatioError::NegativeInput(input));
        }
    }

    let asset_market_cap = asset_price
        .checked_mul(asset_supply)
        .ok_or(RatioError::Overflow)?;
    let commodity_market_cap = commodity_price
        .checked_mul(commodity_total_quantity)
        .ok_or(RatioError::Overflow)?;

    if commodity_market_cap.is_zero() {
        return Err(RatioError::DivisionByZero);
    }

    let percentage = asset_market_cap
        .checked_div(commodity_market_cap)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(RatioError::Overflow)?;

    Ok(DerivedRatio {
        asset_market_cap,
        commodity_market_cap,
        percentage,
        multiple_to_parity: multiple_to_parity(percentage),
    })
}

/// Growth multiple needed to reach 100%
pub fn multiple_to_parity(percentage: Decimal) -> Parity {
    if percentage >= Decimal::ONE_HUNDRED {
        return Parity::AtOrPastParity;
    }
    if percentage <= Decimal::ZERO {
        return Parity::Undefined;
    }
    match Decimal::ONE_HUNDRED.checked_div(percentage) {
        Some(factor) => Parity::Multiple(factor - Decimal::ONE),
        None => Parity::Undefined,
    }
}

/// Unit price at which the asset's market cap equals `commodity_market_cap`
pub fn parity_price(commodity_market_cap: Decimal, asset_supply: Decimal) -> Option<Decimal> {
    if asset_supply <= Decimal::ZERO {
        return None;
    }
    commodity_market_cap.checked_div(asset_supply)
}
