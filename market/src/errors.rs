use thiserror::Error;

/// Reasons a snapshot cannot be turned into a price intensity.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PulseError {
    #[error("forecast is empty, no upper bound for the price range")]
    EmptyForecast,

    #[error("price range is degenerate (low={low}, forecast_high={forecast_high})")]
    DegenerateRange { low: f64, forecast_high: f64 },
}
