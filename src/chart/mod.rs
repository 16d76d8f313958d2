//! Chart module for candlestick charts with MA and MACD overlays.
//!
//! This module provides:
//! - `PriceTable` - One instrument's bars plus the chart entry points
//! - `CandleItem` - Candlestick rendering on a gap-free time axis
//! - `Figure` - Retained figure/axes/mark model every renderer draws into
//! - `FigureSink` - Display targets, including a native window with `gui`
//!
//! # Example
//!
//! ```ignore
//! use kline_chart::chart::{ChartContext, NullSink, PriceTable, DEFAULT_MA_WINDOWS};
//!
//! let table = PriceTable::new("BTCUSDT", bars);
//! let mut ctx = ChartContext::new(NullSink);
//! let (figure, ax) = table.candlestick_with_ma(&mut ctx, &DEFAULT_MA_WINDOWS)?;
//! ```

mod base;
mod figure;
mod indicator;
mod item;
mod manager;
mod palette;
mod sink;
mod widget;

pub use base::*;
pub use figure::{
    fill_polygons, Axes, AxesBounds, AxesId, Figure, LegendLoc, Locator, Mark, MarkId, Shape,
    TickLabel, XAxis,
};
pub use indicator::{
    draw_macd, draw_moving_averages, ema, macd, moving_average, MacdMarks, MacdParams,
    MacdSeries, DEFAULT_MA_WINDOWS,
};
pub use item::{CandleItem, CandleMarks, CandleStyle, OhlcSource};
pub use manager::{ChartContext, PriceTable, MACD_PANEL, PRICE_PANEL};
pub use palette::{ColorPolicy, FixedPalette, RandomPalette};
pub use sink::{FigureSink, NullSink, RecordingSink};
#[cfg(feature = "gui")]
pub use sink::WindowSink;
pub use widget::{FigureWidget, Transform};
