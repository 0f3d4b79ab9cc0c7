pub mod cli;

use clap::Parser;
use tracing::info;

use adapters::griddy::GriddyClient;
use cli::Cli;
use common::logger::{init_logger, init_logger_json};
use monitor::{PriceMonitor, Signals};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        init_logger_json("spotwatch");
    } else {
        init_logger("spotwatch");
    }

    let cfg = cli.monitor_config()?;
    info!(
        zone = %cfg.zone,
        feed = %cli.feed_url,
        thresholds = ?cfg.thresholds,
        "starting spotwatch"
    );

    let feed = GriddyClient::new(cli.feed_url.clone())?;

    let handle = PriceMonitor::new(cfg, feed, |s: &Signals| {
        if s.has_data {
            info!(
                target: "signals",
                price = s.display_price(),
                intensity = s.intensity_percent,
                high = s.is_high,
                low = s.is_low,
                "signals updated"
            );
        } else {
            info!(target: "signals", "no price data");
        }
    })
    .start();

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    handle.shutdown().await?;

    Ok(())
}
