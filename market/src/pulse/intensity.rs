//! Intensity Pulse
//!
//! Places the current price inside the range the market is expected to span
//! over the next few hours:
//!
//! ```text
//! intensity = round((p_now - low) / (forecast_high - low) * 100)
//! ```
//!
//! where:
//! - `low`           = min(lowest price observed today, feed-reported day low)
//! - `forecast_high` = max(forecast price over the next 18 hours)
//!
//! The lower bound mixes observed history with the feed's day low while the
//! upper bound only looks forward, so the result is not clamped. A price
//! below both bounds gives a negative intensity; a price above the forecast
//! ceiling gives more than 100.
//!
//! ## Degraded inputs
//! - empty forecast → `PulseError::EmptyForecast`
//! - `forecast_high == low`, or a non-finite result → `PulseError::DegenerateRange`
//!
//! Pure and deterministic given the snapshot and the history buffer.

use crate::errors::PulseError;
use crate::history::HistoryBuffer;
use crate::types::{ForecastPoint, PriceSnapshot};

/// How many forecast hours bound the upper end of the range.
pub const FORECAST_HORIZON_HOURS: usize = 18;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensityPulseResult {
    /// Current price in cents per kWh.
    pub price_now: f64,
    /// Lower bound of the range.
    pub low: f64,
    /// Upper bound of the range.
    pub forecast_high: f64,
    /// Position of `price_now` in `[low, forecast_high]`, in percent. Unclamped.
    pub intensity_percent: i64,
}

/// Highest forecast price within the first `horizon` entries.
pub fn forecast_high(forecast: &[ForecastPoint], horizon: usize) -> Option<f64> {
    forecast
        .iter()
        .take(horizon)
        .map(|p| p.price_cents_per_kwh)
        .fold(None, |acc, price| Some(acc.map_or(price, |m: f64| m.max(price))))
}

/// Lowest of today's observed prices and the feed-reported day low.
pub fn range_low(history: &HistoryBuffer, day_low_so_far: f64) -> f64 {
    history
        .min_price()
        .unwrap_or(f64::INFINITY)
        .min(day_low_so_far)
}

pub fn intensity_percent(price_now: f64, low: f64, forecast_high: f64) -> Result<i64, PulseError> {
    let span = forecast_high - low;
    if span == 0.0 {
        return Err(PulseError::DegenerateRange { low, forecast_high });
    }

    let pct = ((price_now - low) / span * 100.0).round();
    if !pct.is_finite() {
        return Err(PulseError::DegenerateRange { low, forecast_high });
    }

    Ok(pct as i64)
}

/// Compute the intensity for `snapshot` against an already-updated history.
pub fn compute_intensity(
    snapshot: &PriceSnapshot,
    history: &HistoryBuffer,
    horizon: usize,
) -> Result<IntensityPulseResult, PulseError> {
    let forecast_high =
        forecast_high(&snapshot.forecast, horizon).ok_or(PulseError::EmptyForecast)?;
    let low = range_low(history, snapshot.day_low_so_far);
    let price_now = snapshot.price_now();

    Ok(IntensityPulseResult {
        price_now,
        low,
        forecast_high,
        intensity_percent: intensity_percent(price_now, low, forecast_high)?,
    })
}

/// Intensity pulse state.
///
/// Owns the same-day history. Each snapshot's current point is recorded
/// before the range is computed, so the point itself takes part in `low`.
#[derive(Debug)]
pub struct IntensityPulse {
    history: HistoryBuffer,
    horizon: usize,
}

impl Default for IntensityPulse {
    fn default() -> Self {
        Self::new(FORECAST_HORIZON_HOURS)
    }
}

impl IntensityPulse {
    pub fn new(horizon: usize) -> Self {
        Self {
            history: HistoryBuffer::new(),
            horizon,
        }
    }

    pub fn evaluate(&mut self, snapshot: &PriceSnapshot) -> Result<IntensityPulseResult, PulseError> {
        self.history.append(snapshot.current.clone());
        compute_intensity(snapshot, &self.history, self.horizon)
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }
}
