//! High / low price classification.
//!
//! Two independent flags over the same inputs:
//!
//! ```text
//! is_low  = p_now <= low_cents  OR  intensity <= low_percent
//! is_high = p_now >  high_cents AND intensity >  high_percent
//! ```
//!
//! The flags are independent. Overlapping thresholds can set both.

use serde::{Deserialize, Serialize};

/// The four externally supplied thresholds. Never mutated by the monitor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceThresholds {
    pub low_price_cents: f64,
    pub low_price_percent: f64,
    pub high_price_cents: f64,
    pub high_price_percent: f64,
}

impl Default for PriceThresholds {
    fn default() -> Self {
        Self {
            low_price_cents: 2.0,
            low_price_percent: 10.0,
            high_price_cents: 5.0,
            high_price_percent: 80.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub is_high: bool,
    pub is_low: bool,
}

pub fn is_low(price_now: f64, intensity_percent: i64, t: &PriceThresholds) -> bool {
    price_now <= t.low_price_cents || intensity_percent as f64 <= t.low_price_percent
}

pub fn is_high(price_now: f64, intensity_percent: i64, t: &PriceThresholds) -> bool {
    price_now > t.high_price_cents && intensity_percent as f64 > t.high_price_percent
}

pub fn classify(price_now: f64, intensity_percent: i64, t: &PriceThresholds) -> Classification {
    Classification {
        is_high: is_high(price_now, intensity_percent, t),
        is_low: is_low(price_now, intensity_percent, t),
    }
}
