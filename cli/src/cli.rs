use clap::Parser;

use adapters::griddy::DEFAULT_GETNOW_URL;
use monitor::{ConfigError, MonitorConfig};

#[derive(Debug, Parser)]
#[clap(name = "spotwatch", version, about = "Watch a spot electricity price feed")]
pub struct Cli {
    /// Settlement zone to monitor (overrides SPOT_ZONE)
    #[clap(long)]
    pub zone: Option<String>,

    /// Feed endpoint
    #[clap(long, env = "SPOT_FEED_URL", default_value = DEFAULT_GETNOW_URL)]
    pub feed_url: String,

    /// Price at or below which the low flag is set (cents/kWh)
    #[clap(long)]
    pub low_price_cents: Option<f64>,

    /// Intensity at or below which the low flag is set (percent)
    #[clap(long)]
    pub low_price_percent: Option<f64>,

    /// Price above which the high flag may be set (cents/kWh)
    #[clap(long)]
    pub high_price_cents: Option<f64>,

    /// Intensity above which the high flag may be set (percent)
    #[clap(long)]
    pub high_price_percent: Option<f64>,

    /// Emit logs as JSON lines
    #[clap(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Environment config with command-line overrides applied on top.
    pub(crate) fn monitor_config(&self) -> Result<MonitorConfig, ConfigError> {
        let mut cfg = MonitorConfig::from_env()?;

        if let Some(zone) = &self.zone {
            cfg.zone = zone.clone();
        }

        let t = &mut cfg.thresholds;
        if let Some(v) = self.low_price_cents {
            t.low_price_cents = v;
        }
        if let Some(v) = self.low_price_percent {
            t.low_price_percent = v;
        }
        if let Some(v) = self.high_price_cents {
            t.high_price_cents = v;
        }
        if let Some(v) = self.high_price_percent {
            t.high_price_percent = v;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}
