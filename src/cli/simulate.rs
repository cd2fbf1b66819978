//! Simulate command implementation

use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use super::OutputFormat;
use crate::config::Config;
use crate::display::{progress_bar, Labels, Locale};
use crate::ratio::{parity_price, DerivedRatio};
use crate::simulation::SimulationState;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Hypothetical asset price
    #[arg(long)]
    pub price: Decimal,

    /// Commodity price (defaults to the configured reference price)
    #[arg(long)]
    pub commodity_price: Option<Decimal>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Output locale (overrides config)
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    price: Decimal,
    commodity_price: Decimal,
    ratio: DerivedRatio,
    parity_price: Option<Decimal>,
}

impl SimulateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let commodity_price = self.commodity_price.unwrap_or(config.feed.commodity_price);
        let constants = config.supply.constants();

        let mut simulation = SimulationState::new();
        let ratio = simulation.set_hypothetical_price(
            self.price,
            commodity_price,
            constants.asset_supply,
            constants.commodity_total_quantity,
        )?;

        let report = SimulationReport {
            price: self.price,
            commodity_price,
            ratio,
            parity_price: parity_price(ratio.commodity_market_cap, constants.asset_supply),
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => {
                let fmt = self.locale.unwrap_or(config.display.locale).formatter();
                let labels = Labels::from(&config.display);
                println!(
                    "{} at {} ({} at {})",
                    labels.asset,
                    fmt.currency(report.price),
                    labels.commodity,
                    fmt.currency(report.commodity_price)
                );
                println!(
                    "market cap {} vs {}",
                    fmt.large_currency(ratio.asset_market_cap),
                    fmt.large_currency(ratio.commodity_market_cap)
                );
                println!(
                    "{} {}",
                    progress_bar(ratio.percentage, 40),
                    fmt.percentage(ratio.percentage)
                );
                println!("remaining {}", fmt.parity(&ratio.multiple_to_parity));
                if let Some(price) = report.parity_price {
                    println!("parity price {}", fmt.currency(price));
                }
            }
        }

        Ok(())
    }
}
