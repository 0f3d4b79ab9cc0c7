pub mod errors;
pub mod feed;
pub mod history;
pub mod pulse;
pub mod types;

pub use errors::PulseError;
pub use feed::PriceFeed;
pub use history::HistoryBuffer;
pub use types::{ForecastPoint, PricePoint, PriceSnapshot};
