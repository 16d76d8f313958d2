//! Kline Chart - daily candlestick charts with MA and MACD overlays
//!
//! This crate provides:
//!
//! - History bar download through a datafeed abstraction (Binance klines)
//! - A price table sorted by date with explicit OHLC accessors
//! - Candlestick rendering on a gap-free categorical time axis
//! - Moving-average and MACD overlays
//! - Display in a native window (with `gui` feature)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kline_chart::chart::{ChartContext, NullSink, PriceTable, DEFAULT_MA_WINDOWS};
//! use kline_chart::trader::{create_datafeed, Exchange, HistoryRequest, SETTINGS};
//! use chrono::{TimeZone, Utc};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> kline_chart::Result<()> {
//!     let datafeed = create_datafeed(&SETTINGS)?;
//!     let req = HistoryRequest::daily(
//!         "BTCUSDT",
//!         Exchange::Binance,
//!         Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap(),
//!         Utc.with_ymd_and_hms(2025, 5, 28, 0, 0, 0).unwrap(),
//!     );
//!     let table = PriceTable::new("BTCUSDT", datafeed.query_bar_history(req).await?);
//!
//!     let mut ctx = ChartContext::new(NullSink);
//!     table.candlestick_with_ma(&mut ctx, &DEFAULT_MA_WINDOWS)?;
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod error;
pub mod gateway;
pub mod trader;

// Re-export commonly used types
pub use chart::{
    ChartContext, FigureSink, MacdParams, PriceTable, DEFAULT_MA_WINDOWS,
};
pub use error::{ChartError, Result};
pub use trader::{BarData, Exchange, HistoryRequest, Interval};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
