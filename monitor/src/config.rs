use std::str::FromStr;
use std::time::Duration;

use market::pulse::{FORECAST_HORIZON_HOURS, PriceThresholds};

use crate::errors::ConfigError;

pub const DEFAULT_ZONE: &str = "LZ_HOUSTON";

#[derive(Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    /// Settlement zone passed to the feed unchanged.
    pub zone: String,

    /// Absolute and percentile thresholds for the high / low flags.
    pub thresholds: PriceThresholds,

    /// Delay before the next fetch after a cycle without data.
    pub retry_delay: Duration,

    /// Number of forecast hours that bound the top of the price range.
    pub forecast_horizon: usize,
}

impl MonitorConfig {
    pub fn new(zone: impl Into<String>, thresholds: PriceThresholds) -> Self {
        Self {
            zone: zone.into(),
            thresholds,
            retry_delay: crate::engine::RETRY_DELAY,
            forecast_horizon: FORECAST_HORIZON_HOURS,
        }
    }

    /// Build from `SPOT_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`MonitorConfig::from_env`] with an injectable lookup.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = PriceThresholds::default();

        let zone = lookup("SPOT_ZONE").unwrap_or_else(|| DEFAULT_ZONE.to_string());

        let thresholds = PriceThresholds {
            low_price_cents: parse_or(&lookup, "SPOT_LOW_PRICE_CENTS", defaults.low_price_cents)?,
            low_price_percent: parse_or(
                &lookup,
                "SPOT_LOW_PRICE_PERCENT",
                defaults.low_price_percent,
            )?,
            high_price_cents: parse_or(
                &lookup,
                "SPOT_HIGH_PRICE_CENTS",
                defaults.high_price_cents,
            )?,
            high_price_percent: parse_or(
                &lookup,
                "SPOT_HIGH_PRICE_PERCENT",
                defaults.high_price_percent,
            )?,
        };

        let cfg = Self::new(zone, thresholds);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zone.trim().is_empty() {
            return Err(ConfigError::EmptyZone);
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("low_price_cents", t.low_price_cents),
            ("low_price_percent", t.low_price_percent),
            ("high_price_cents", t.high_price_cents),
            ("high_price_percent", t.high_price_percent),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteThreshold(name));
            }
        }

        if self.forecast_horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }

        Ok(())
    }
}

fn parse_or<L, T>(lookup: &L, key: &'static str, default: T) -> Result<T, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
        }),
    }
}
