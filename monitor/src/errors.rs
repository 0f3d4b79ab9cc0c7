use market::PulseError;
use thiserror::Error;

/// Why a fetch cycle ended without data. Never reaches the signals consumer.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("price feed fetch failed: {0}")]
    Fetch(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("snapshot unusable: {0}")]
    Pulse(#[from] PulseError),

    #[error("monitor task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("zone must not be empty")]
    EmptyZone,

    #[error("threshold {0} must be a finite number")]
    NonFiniteThreshold(&'static str),

    #[error("forecast horizon must be at least one hour")]
    ZeroHorizon,
}
