use btc_gold_tracker::cli::{Cli, Commands};
use btc_gold_tracker::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    btc_gold_tracker::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Watch(args) => {
            tracing::info!("Starting live dashboard");
            args.execute(&config).await?;
        }
        Commands::Quote(args) => {
            args.execute(&config).await?;
        }
        Commands::Simulate(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Feed: {} {}/{} every {}s (timeout {}s)",
                config.feed.base_url,
                config.feed.asset_id,
                config.feed.vs_currency,
                config.feed.poll_interval_secs,
                config.feed.timeout_secs
            );
            println!(
                "  Prices: fallback={}, commodity={}",
                config.feed.fallback_asset_price, config.feed.commodity_price
            );
            println!(
                "  Supply: asset={}, commodity={}",
                config.supply.asset_supply, config.supply.commodity_total_quantity
            );
            println!(
                "  Slider: {}x..{}x step {}",
                config.simulation.min_multiplier,
                config.simulation.max_multiplier,
                config.simulation.step
            );
            println!(
                "  Display: {:?} ({} vs {})",
                config.display.locale, config.display.asset_label, config.display.commodity_label
            );
            println!(
                "  Telemetry: level={}, format={:?}, metrics_port={:?}",
                config.telemetry.log_level,
                config.telemetry.log_format,
                config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}
