//! Presentation module
//!
//! Pluggable number formatting per locale and a plain-text dashboard

mod dashboard;
mod format;

pub use dashboard::{progress_bar, render_dashboard, render_history, Labels};
pub use format::{group_thousands, EnUsFormatter, ZhTwFormatter};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ratio::Parity;

/// Output locale for numbers and dates
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    EnUs,
    ZhTw,
}

impl Locale {
    pub fn formatter(self) -> Box<dyn NumberFormatter> {
        match self {
            Locale::EnUs => Box::new(EnUsFormatter),
            Locale::ZhTw => Box::new(ZhTwFormatter),
        }
    }
}

/// Formats the values shown by the dashboard
pub trait NumberFormatter: Send + Sync {
    /// Whole currency units, e.g. `$80,000`
    fn currency(&self, value: Decimal) -> String;

    /// Market-cap sized amounts with a magnitude suffix
    fn large_currency(&self, value: Decimal) -> String;

    fn percentage(&self, value: Decimal) -> String {
        format!("{:.2}%", value.round_dp(2))
    }

    /// Remaining growth to parity, or the reached/undefined label
    fn parity(&self, parity: &Parity) -> String;

    fn timestamp(&self, ts: DateTime<Utc>) -> String;
}
