//! Binance market data access.
//!
//! Only public endpoints are used, so no API key is needed.

mod constants;
mod datafeed;
mod rest_client;

pub use constants::*;
pub use datafeed::{parse_klines, BinanceDatafeed};
pub use rest_client::BinanceRestClient;
