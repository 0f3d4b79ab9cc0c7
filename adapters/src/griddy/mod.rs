pub mod client;
pub mod errors;
pub mod types;

pub use client::{DEFAULT_GETNOW_URL, GriddyClient};
pub use errors::GriddyError;
pub use types::*;
