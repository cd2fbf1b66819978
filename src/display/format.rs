//! Locale-specific number formatting

use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::NumberFormatter;
use crate::ratio::Parity;

/// Adds thousands separators to a rounded integer amount
pub fn group_thousands(value: Decimal, separator: char) -> String {
    let rounded = value.round_dp(0);
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn scaled(value: Decimal, divisor: Decimal) -> String {
    format!("{:.2}", (value / divisor).round_dp(2))
}

/// US English: `$80,000`, `$1.57T`, `9.09x`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnUsFormatter;

impl NumberFormatter for EnUsFormatter {
    fn currency(&self, value: Decimal) -> String {
        format!("${}", group_thousands(value, ','))
    }

    fn large_currency(&self, value: Decimal) -> String {
        if value >= dec!(1000000000000) {
            return format!("${}T", scaled(value, dec!(1000000000000)));
        }
        if value >= dec!(1000000000) {
            return format!("${}B", scaled(value, dec!(1000000000)));
        }
        self.currency(value)
    }

    fn parity(&self, parity: &Parity) -> String {
        match parity {
            Parity::Multiple(m) => format!("{:.2}x", m.round_dp(2)),
            Parity::AtOrPastParity => "already past parity".to_string(),
            Parity::Undefined => "n/a".to_string(),
        }
    }

    fn timestamp(&self, ts: DateTime<Utc>) -> String {
        ts.with_timezone(&Local)
            .format("%m/%d/%Y, %I:%M:%S %p")
            .to_string()
    }
}

/// Traditional Chinese (Taiwan): `US$80,000`, `$1.57兆`, `9.09倍`
///
/// 兆 is 10^12 and 億 is 10^8.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZhTwFormatter;

impl NumberFormatter for ZhTwFormatter {
    fn currency(&self, value: Decimal) -> String {
        format!("US${}", group_thousands(value, ','))
    }

    fn large_currency(&self, value: Decimal) -> String {
        if value >= dec!(1000000000000) {
            return format!("${}兆", scaled(value, dec!(1000000000000)));
        }
        if value >= dec!(100000000) {
            return format!("${}億", scaled(value, dec!(100000000)));
        }
        self.currency(value)
    }

    fn parity(&self, parity: &Parity) -> String {
        match parity {
            Parity::Multiple(m) => format!("{:.2}倍", m.round_dp(2)),
            Parity::AtOrPastParity => "已超越!".to_string(),
            Parity::Undefined => "無法計算".to_string(),
        }
    }

    fn timestamp(&self, ts: DateTime<Utc>) -> String {
        ts.with_timezone(&Local)
            .format("%Y/%m/%d %H:%M:%S")
            .to_string()
    }
}
