pub mod classify;
pub mod intensity;

pub use classify::{Classification, PriceThresholds, classify};
pub use intensity::{FORECAST_HORIZON_HOURS, IntensityPulse, IntensityPulseResult};
