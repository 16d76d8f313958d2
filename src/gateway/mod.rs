//! Gateway module - remote data providers.
//!
//! - **binance**: Binance spot klines over the public REST API

pub mod binance;

// Re-exports
pub use binance::{BinanceDatafeed, BinanceRestClient};
