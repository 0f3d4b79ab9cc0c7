pub mod config;
pub mod engine;
pub mod errors;
pub mod types;

pub use config::MonitorConfig;
pub use engine::{MonitorHandle, PriceMonitor, RETRY_DELAY};
pub use errors::{ConfigError, MonitorError};
pub use types::{MonitorState, Signals, SignalsListener};
