pub mod api;
pub mod config;
pub mod error;
pub mod fallback;
pub mod models;

pub use error::{MarketDataError, Result};
