//! Plain-text dashboard

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt::Write;

use super::NumberFormatter;
use crate::config::DisplayConfig;
use crate::ratio::{HistoryEntry, Parity};
use crate::tracker::TrackerView;

const BAR_WIDTH: usize = 40;

/// Names shown for the two assets
#[derive(Debug, Clone)]
pub struct Labels {
    pub asset: String,
    pub commodity: String,
}

impl From<&DisplayConfig> for Labels {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            asset: config.asset_label.clone(),
            commodity: config.commodity_label.clone(),
        }
    }
}

/// Fixed-width bar; the percentage is clamped to 0..=100 for drawing only
pub fn progress_bar(percentage: Decimal, width: usize) -> String {
    let clamped = percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (clamped * Decimal::from(width) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn percentage_line(fmt: &dyn NumberFormatter, percentage: Option<Decimal>) -> String {
    match percentage {
        Some(p) => format!("{} {}", progress_bar(p, BAR_WIDTH), fmt.percentage(p)),
        None => format!("{} undefined", progress_bar(Decimal::ZERO, BAR_WIDTH)),
    }
}

/// Trend table, oldest first
pub fn render_history(
    fmt: &dyn NumberFormatter,
    labels: &Labels,
    history: &[HistoryEntry],
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>14} {:>12} {:>9}",
        "time", labels.asset, labels.commodity, "share"
    );
    for entry in history {
        let _ = writeln!(
            out,
            "{:<10} {:>14} {:>12} {:>9}",
            entry.time,
            fmt.currency(entry.asset_price),
            fmt.currency(entry.commodity_price),
            fmt.percentage(entry.percentage)
        );
    }
    out
}

/// Render every section of the tracker view
pub fn render_dashboard(fmt: &dyn NumberFormatter, labels: &Labels, view: &TrackerView) -> String {
    let mut out = String::new();

    let status = if view.loading { "  [refreshing...]" } else { "" };
    let _ = writeln!(out, "{} vs {}{}", labels.asset, labels.commodity, status);
    let _ = writeln!(out);

    let asset_cap = view.ratio.map(|r| r.asset_market_cap);
    let commodity_cap = view.ratio.map(|r| r.commodity_market_cap);
    let _ = writeln!(
        out,
        "{:<18} {:>14}   market cap {}",
        format!("{} price", labels.asset),
        fmt.currency(view.asset_price),
        asset_cap.map_or_else(|| "-".to_string(), |c| fmt.large_currency(c))
    );
    let _ = writeln!(
        out,
        "{:<18} {:>14}   market cap {}",
        format!("{} price", labels.commodity),
        fmt.currency(view.commodity_price),
        commodity_cap.map_or_else(|| "-".to_string(), |c| fmt.large_currency(c))
    );
    if view.is_fallback {
        let _ = writeln!(out, "(live quote unavailable, showing fallback price)");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{} share of {} market cap", labels.asset, labels.commodity);
    let _ = writeln!(out, "{}", percentage_line(fmt, view.percentage));
    if let Some(ratio) = &view.ratio {
        let _ = writeln!(out, "{}", parity_sentence(fmt, labels, &ratio.multiple_to_parity));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Simulation");
    if let Some(slider) = &view.slider {
        let _ = writeln!(
            out,
            "slider {} .. {} (step {})",
            fmt.currency(slider.min),
            fmt.currency(slider.max),
            fmt.currency(slider.step)
        );
    }
    let _ = writeln!(
        out,
        "simulated price {}",
        fmt.currency(view.simulated_asset_price)
    );
    let _ = writeln!(out, "{}", percentage_line(fmt, view.simulated_percentage));
    if let Some(ratio) = &view.simulated_ratio {
        let _ = writeln!(
            out,
            "simulated market cap {}   remaining {}",
            fmt.large_currency(ratio.asset_market_cap),
            fmt.parity(&ratio.multiple_to_parity)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Trend");
    out.push_str(&render_history(fmt, labels, &view.price_history));
    let _ = writeln!(out);

    let updated = view
        .last_updated
        .map_or_else(|| "never".to_string(), |ts| fmt.timestamp(ts));
    let _ = writeln!(out, "Last updated: {}", updated);

    out
}

fn parity_sentence(fmt: &dyn NumberFormatter, labels: &Labels, parity: &Parity) -> String {
    match parity {
        Parity::Multiple(_) => format!(
            "{} needs {} growth to pass {}",
            labels.asset,
            fmt.parity(parity),
            labels.commodity
        ),
        Parity::AtOrPastParity => format!("{}: {}", labels.asset, fmt.parity(parity)),
        Parity::Undefined => format!("Growth to parity: {}", fmt.parity(parity)),
    }
}
