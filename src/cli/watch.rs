//! Watch command implementation

use clap::Args;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::display::{render_dashboard, Labels, Locale};
use crate::feed::{CoinGeckoClient, CoinGeckoConfig, PriceFeed};
use crate::tracker::{IntervalTicker, TrackerHandle, TrackerService, TrackerState};

const HELP: &str = "commands: r = refresh, s <price> = simulate, q = quit";

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Refresh period in seconds (overrides config)
    #[arg(long)]
    pub interval_secs: Option<u64>,

    /// Output locale (overrides config)
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,
}

/// One line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Refresh,
    Simulate(Decimal),
    Quit,
    Help,
    Empty,
    Invalid(String),
}

/// Parse a line of user input
pub fn parse_input(line: &str) -> Input {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Input::Empty;
    };

    match command.to_lowercase().as_str() {
        "r" | "refresh" => Input::Refresh,
        "q" | "quit" | "exit" => Input::Quit,
        "h" | "help" | "?" => Input::Help,
        "s" | "sim" | "simulate" => match parts.next().map(|p| p.replace(',', "")) {
            Some(price) => match Decimal::from_str(&price) {
                Ok(value) if !value.is_sign_negative() => Input::Simulate(value),
                _ => Input::Invalid(format!("not a non-negative price: {}", price)),
            },
            None => Input::Invalid("missing price".to_string()),
        },
        other => Input::Invalid(format!("unknown command: {}", other)),
    }
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let period = self
            .interval_secs
            .map(|secs| Duration::from_secs(secs.max(1)))
            .unwrap_or_else(|| config.feed.poll_interval());

        let client = CoinGeckoClient::new(CoinGeckoConfig::from(&config.feed))?;
        let feed = PriceFeed::from_config(client, &config.feed);
        let state = TrackerState::new(
            config.supply.constants(),
            config.simulation.slider(),
            config.feed.commodity_price,
        );

        tracing::info!(period_secs = period.as_secs(), "Starting tracker");
        let handle = TrackerService::spawn(feed, IntervalTicker::new(period), state);

        let formatter = self.locale.unwrap_or(config.display.locale).formatter();
        let labels = Labels::from(&config.display);

        let mut views = handle.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;
        println!("{}", HELP);

        loop {
            tokio::select! {
                changed = views.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = views.borrow_and_update().clone();
                    print!("\x1B[2J\x1B[H");
                    println!("{}", render_dashboard(formatter.as_ref(), &labels, &view));
                    println!("{}", HELP);
                }
                line = lines.next_line(), if stdin_open => {
                    // Without stdin keep polling until interrupted
                    let Some(line) = line? else {
                        stdin_open = false;
                        continue;
                    };
                    if !handle_input(&handle, &line).await? {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    break;
                }
            }
        }

        handle.shutdown().await?;
        Ok(())
    }
}

/// Returns false when the user asked to quit
async fn handle_input(handle: &TrackerHandle, line: &str) -> anyhow::Result<bool> {
    match parse_input(line) {
        Input::Refresh => {
            if handle.view().loading {
                println!("refresh already in progress");
            } else {
                handle.refresh().await?;
            }
        }
        Input::Simulate(price) => {
            let snapped = handle
                .view()
                .slider
                .map_or(price, |slider| slider.snap(price));
            if snapped != price {
                tracing::debug!(%price, %snapped, "Simulated price moved onto slider range");
            }
            handle.simulate(snapped).await?;
        }
        Input::Quit => return Ok(false),
        Input::Help => println!("{}", HELP),
        Input::Empty => {}
        Input::Invalid(reason) => println!("{} ({})", reason, HELP),
    }
    Ok(true)
}
