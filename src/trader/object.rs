//! Basic data structures for bar history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::constant::{Exchange, Interval};

/// Candlestick bar data of a certain trading period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarData {
    pub gateway_name: String,
    pub symbol: String,
    pub exchange: Exchange,
    pub datetime: DateTime<Utc>,

    pub interval: Option<Interval>,
    pub volume: f64,
    pub turnover: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
}

impl BarData {
    /// Create a new BarData
    pub fn new(
        gateway_name: String,
        symbol: String,
        exchange: Exchange,
        datetime: DateTime<Utc>,
    ) -> Self {
        Self {
            gateway_name,
            symbol,
            exchange,
            datetime,
            interval: None,
            volume: 0.0,
            turnover: 0.0,
            open_price: 0.0,
            high_price: 0.0,
            low_price: 0.0,
            close_price: 0.0,
        }
    }

    /// Set open/high/low/close in one call
    pub fn with_ohlc(mut self, open: f64, high: f64, low: f64, close: f64) -> Self {
        self.open_price = open;
        self.high_price = high;
        self.low_price = low;
        self.close_price = close;
        self
    }

    /// Get vt_symbol (symbol.exchange)
    pub fn vt_symbol(&self) -> String {
        format!("{}.{}", self.symbol, self.exchange.value())
    }
}

/// Request sending to a datafeed for querying history data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub symbol: String,
    pub exchange: Exchange,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub interval: Option<Interval>,
}

impl HistoryRequest {
    /// Create a new HistoryRequest
    pub fn new(symbol: String, exchange: Exchange, start: DateTime<Utc>) -> Self {
        Self {
            symbol,
            exchange,
            start,
            end: None,
            interval: None,
        }
    }

    /// Daily bars between `start` and `end`
    pub fn daily(
        symbol: impl Into<String>,
        exchange: Exchange,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            exchange,
            start,
            end: Some(end),
            interval: Some(Interval::Daily),
        }
    }

    /// Get vt_symbol (symbol.exchange)
    pub fn vt_symbol(&self) -> String {
        format!("{}.{}", self.symbol, self.exchange.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bar_vt_symbol() {
        let dt = Utc.with_ymd_and_hms(2024, 9, 2, 0, 0, 0).unwrap();
        let bar = BarData::new("BINANCE".to_string(), "BTCUSDT".to_string(), Exchange::Binance, dt)
            .with_ohlc(10.0, 13.0, 9.0, 12.0);
        assert_eq!(bar.vt_symbol(), "BTCUSDT.BINANCE");
        assert_eq!(bar.high_price, 13.0);
        assert_eq!(bar.low_price, 9.0);
    }

    #[test]
    fn test_daily_request() {
        let start = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 5, 28, 0, 0, 0).unwrap();
        let req = HistoryRequest::daily("BTCUSDT", Exchange::Binance, start, end);
        assert_eq!(req.interval, Some(Interval::Daily));
        assert_eq!(req.end, Some(end));
        assert_eq!(req.vt_symbol(), "BTCUSDT.BINANCE");
    }
}
