//! Quote command implementation

use clap::Args;

use super::OutputFormat;
use crate::config::Config;
use crate::display::{render_dashboard, Labels, Locale};
use crate::feed::{CoinGeckoClient, CoinGeckoConfig, PriceFeed};
use crate::tracker::TrackerState;

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Output locale (overrides config)
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,
}

impl QuoteArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = CoinGeckoClient::new(CoinGeckoConfig::from(&config.feed))?;
        let feed = PriceFeed::from_config(client, &config.feed);

        let mut state = TrackerState::new(
            config.supply.constants(),
            config.simulation.slider(),
            feed.commodity_price(),
        );
        state.begin_fetch();
        state.complete_fetch(feed.fetch_current_prices().await);
        let view = state.view();

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
            OutputFormat::Table => {
                let formatter = self.locale.unwrap_or(config.display.locale).formatter();
                let labels = Labels::from(&config.display);
                print!("{}", render_dashboard(formatter.as_ref(), &labels, &view));
            }
        }

        Ok(())
    }
}
