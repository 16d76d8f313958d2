//! Binance API constants and mappings.

use std::collections::HashMap;
use once_cell::sync::Lazy;

use crate::trader::Interval;

/// Spot REST API host (production)
pub const SPOT_REST_HOST: &str = "https://api.binance.com";

/// Spot klines endpoint
pub const KLINES_PATH: &str = "/api/v3/klines";

/// Max rows returned by one klines request
pub const KLINES_LIMIT: usize = 1000;

/// Gateway name stamped on parsed bars
pub const GATEWAY_NAME: &str = "BINANCE";

/// Map VT interval to Binance kline interval
pub static INTERVAL_VT2BINANCE: Lazy<HashMap<Interval, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(Interval::Minute, "1m");
    m.insert(Interval::Hour, "1h");
    m.insert(Interval::Daily, "1d");
    m.insert(Interval::Weekly, "1w");
    m
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_map() {
        assert_eq!(INTERVAL_VT2BINANCE.get(&Interval::Daily), Some(&"1d"));
        assert_eq!(INTERVAL_VT2BINANCE.len(), 4);
    }
}
