//! MACD chart demo: candlesticks above a MACD panel sharing the date axis.
//!
//! Run with: cargo run --example macd_chart

use std::error::Error;

use chrono::{TimeZone, Utc};

use kline_chart::chart::{CandleStyle, ChartContext, MacdParams, PriceTable, WindowSink};
use kline_chart::trader::{create_datafeed, init_logger, Exchange, HistoryRequest, SETTINGS};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logger(&SETTINGS)?;

    let start = Utc
        .with_ymd_and_hms(2024, 9, 1, 0, 0, 0)
        .single()
        .ok_or("invalid start date")?;
    let end = Utc
        .with_ymd_and_hms(2025, 5, 28, 0, 0, 0)
        .single()
        .ok_or("invalid end date")?;

    let datafeed = create_datafeed(&SETTINGS)?;
    let req = HistoryRequest::daily("BTCUSDT", Exchange::Binance, start, end);
    let table = PriceTable::new("BTCUSDT", datafeed.query_bar_history(req).await?);

    let mut ctx = ChartContext::new(WindowSink::new(1280.0, 900.0))
        .with_style(CandleStyle::from_settings(&SETTINGS));
    let (figure, _, _) = table.candlestick_with_macd(&mut ctx, MacdParams::default())?;

    tracing::info!("closed {}", figure.title());
    Ok(())
}
