//! Kline Chart - Main Application Entry Point
//!
//! Downloads BTCUSDT daily bars and shows them as a candlestick chart
//! with moving-average overlays.

use std::error::Error;

use chrono::{TimeZone, Utc};
use tracing::info;

use kline_chart::chart::{CandleStyle, ChartContext, PriceTable, WindowSink, DEFAULT_MA_WINDOWS};
use kline_chart::trader::{create_datafeed, init_logger, Exchange, HistoryRequest, SETTINGS};

const SYMBOL: &str = "BTCUSDT";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logger(&SETTINGS)?;
    info!("Kline Chart v{} starting", kline_chart::VERSION);

    let start = Utc
        .with_ymd_and_hms(2024, 9, 1, 0, 0, 0)
        .single()
        .ok_or("invalid start date")?;
    let end = Utc
        .with_ymd_and_hms(2025, 5, 28, 0, 0, 0)
        .single()
        .ok_or("invalid end date")?;

    let datafeed = create_datafeed(&SETTINGS)?;
    datafeed.init().await?;

    let req = HistoryRequest::daily(SYMBOL, Exchange::Binance, start, end);
    let bars = datafeed.query_bar_history(req).await?;
    let table = PriceTable::new(SYMBOL, bars);

    let mut ctx = ChartContext::new(WindowSink::default())
        .with_style(CandleStyle::from_settings(&SETTINGS));
    table.candlestick_with_ma(&mut ctx, &DEFAULT_MA_WINDOWS)?;

    info!("chart closed");
    Ok(())
}
