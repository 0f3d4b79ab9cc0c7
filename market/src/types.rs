use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single observed spot price, stamped with the feed's local wall-clock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price_cents_per_kwh: f64,
    pub timestamp_local: DateTime<FixedOffset>,
}

impl PricePoint {
    pub fn new(price_cents_per_kwh: f64, timestamp_local: DateTime<FixedOffset>) -> Self {
        Self {
            price_cents_per_kwh,
            timestamp_local,
        }
    }

    /// Calendar day of this point in its own timezone.
    pub fn day(&self) -> NaiveDate {
        self.timestamp_local.date_naive()
    }

    /// Calendar day of this point as seen from `offset`.
    pub fn day_in(&self, offset: &FixedOffset) -> NaiveDate {
        self.timestamp_local.with_timezone(offset).date_naive()
    }
}

/// One hourly forecast price. The hour is implied by position in the forecast.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub price_cents_per_kwh: f64,
}

impl ForecastPoint {
    pub fn new(price_cents_per_kwh: f64) -> Self {
        Self {
            price_cents_per_kwh,
        }
    }
}

/// One fetch result from the price feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub current: PricePoint,
    /// Running low for the day as reported by the feed.
    pub day_low_so_far: f64,
    /// Chronological hourly forecast starting at "now".
    pub forecast: Vec<ForecastPoint>,
    pub refresh_after_secs: u64,
}

impl PriceSnapshot {
    pub fn price_now(&self) -> f64 {
        self.current.price_cents_per_kwh
    }

    /// Delay until the feed expects new data. Never shorter than one second.
    pub fn refresh_after(&self) -> Duration {
        Duration::from_secs(self.refresh_after_secs.max(1))
    }
}
