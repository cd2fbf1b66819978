//! CLI interface for btc-gold-tracker
//!
//! Provides subcommands for:
//! - `watch`: Live dashboard with refresh and slider input
//! - `quote`: Fetch once and print the ratio
//! - `simulate`: Ratio for a hypothetical price
//! - `config`: Show configuration

mod quote;
mod simulate;
mod watch;

pub use quote::QuoteArgs;
pub use simulate::SimulateArgs;
pub use watch::{parse_input, Input, WatchArgs};

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "btc-gold-tracker")]
#[command(about = "Track Bitcoin's market cap as a share of gold's")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Live dashboard, refreshed on a fixed period
    Watch(WatchArgs),
    /// Fetch the current price once
    Quote(QuoteArgs),
    /// Compute the ratio for a hypothetical price
    Simulate(SimulateArgs),
    /// Show configuration
    Config,
}

/// Output format for one-shot commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
