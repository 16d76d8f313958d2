//! Price table and the chart entry points built on it.

use chrono::{DateTime, Utc};

use super::figure::{AxesBounds, AxesId, Figure};
use super::indicator::{draw_macd, draw_moving_averages, macd, MacdParams};
use super::item::{CandleItem, CandleStyle, OhlcSource};
use super::palette::{ColorPolicy, FixedPalette};
use super::sink::FigureSink;
use crate::error::{ChartError, Result};
use crate::trader::object::BarData;

/// Upper panel of the two-panel MACD layout
pub const PRICE_PANEL: AxesBounds = AxesBounds::new(0.1, 0.35, 0.8, 0.6);
/// Lower panel of the two-panel MACD layout
pub const MACD_PANEL: AxesBounds = AxesBounds::new(0.1, 0.05, 0.8, 0.3);

/// Everything a chart call needs besides the data
pub struct ChartContext<S: FigureSink> {
    pub style: CandleStyle,
    pub colors: Box<dyn ColorPolicy>,
    pub sink: S,
}

impl<S: FigureSink> ChartContext<S> {
    /// Default style and fixed palette
    pub fn new(sink: S) -> Self {
        Self {
            style: CandleStyle::default(),
            colors: Box::new(FixedPalette::default()),
            sink,
        }
    }

    pub fn with_style(mut self, style: CandleStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_colors(mut self, colors: impl ColorPolicy + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }
}

/// One instrument's daily bars, ascending by date
#[derive(Debug, Clone)]
pub struct PriceTable {
    symbol: String,
    bars: Vec<BarData>,
    dates: Vec<DateTime<Utc>>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
}

impl PriceTable {
    /// Build a table, sorting bars by date. Bars sharing a date keep their input order.
    pub fn new(symbol: impl Into<String>, mut bars: Vec<BarData>) -> Self {
        bars.sort_by_key(|bar| bar.datetime);

        Self {
            symbol: symbol.into(),
            dates: bars.iter().map(|b| b.datetime).collect(),
            open: bars.iter().map(|b| b.open_price).collect(),
            high: bars.iter().map(|b| b.high_price).collect(),
            low: bars.iter().map(|b| b.low_price).collect(),
            close: bars.iter().map(|b| b.close_price).collect(),
            bars,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Rows in ascending date order
    pub fn bars(&self) -> &[BarData] {
        &self.bars
    }

    fn title(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            self.symbol.clone()
        } else {
            format!("{} {}", self.symbol, suffix)
        }
    }

    /// Candlesticks on a single axes
    pub fn candlestick<S: FigureSink>(&self, ctx: &mut ChartContext<S>) -> Result<(Figure, AxesId)> {
        let mut figure = Figure::new(self.title(""));
        let ax_id = self.draw_candles(&mut figure, AxesBounds::full(), &ctx.style)?;

        tracing::info!("candlestick chart for {}: {} bars", self.symbol, self.len());
        ctx.sink.show(&figure)?;
        Ok((figure, ax_id))
    }

    /// Candlesticks with one moving-average line per window
    pub fn candlestick_with_ma<S: FigureSink>(
        &self,
        ctx: &mut ChartContext<S>,
        windows: &[usize],
    ) -> Result<(Figure, AxesId)> {
        let mut figure = Figure::new(self.title("MA"));
        let ax_id = self.draw_candles(&mut figure, AxesBounds::full(), &ctx.style)?;

        let ax = figure.axes_mut(ax_id).ok_or_else(|| missing_axes(ax_id))?;
        draw_moving_averages(ax, &self.close, windows, ctx.colors.as_mut(), ctx.style.width)?;

        tracing::info!(
            "candlestick chart for {}: {} bars, MA windows {:?}",
            self.symbol,
            self.len(),
            windows
        );
        ctx.sink.show(&figure)?;
        Ok((figure, ax_id))
    }

    /// Candlesticks above a MACD panel sharing their x-axis
    pub fn candlestick_with_macd<S: FigureSink>(
        &self,
        ctx: &mut ChartContext<S>,
        params: MacdParams,
    ) -> Result<(Figure, AxesId, AxesId)> {
        let series = macd(&self.close, params)?;

        let mut figure = Figure::new(self.title("MACD"));
        let price_ax = self.draw_candles(&mut figure, PRICE_PANEL, &ctx.style)?;
        let macd_ax = figure.add_axes_sharex(MACD_PANEL, price_ax);

        let ax = figure.axes_mut(macd_ax).ok_or_else(|| missing_axes(macd_ax))?;
        draw_macd(ax, &series, ctx.style.width);

        tracing::info!(
            "candlestick chart for {}: {} bars, MACD({}, {}, {})",
            self.symbol,
            self.len(),
            params.fast,
            params.slow,
            params.signal
        );
        ctx.sink.show(&figure)?;
        Ok((figure, price_ax, macd_ax))
    }

    fn draw_candles(
        &self,
        figure: &mut Figure,
        bounds: AxesBounds,
        style: &CandleStyle,
    ) -> Result<AxesId> {
        let ax_id = figure.add_axes(bounds);
        let ax = figure.axes_mut(ax_id).ok_or_else(|| missing_axes(ax_id))?;
        CandleItem::new(style.clone()).draw(ax, self);
        Ok(ax_id)
    }
}

fn missing_axes(id: AxesId) -> ChartError {
    ChartError::Display(format!("axes {} not found", id.index()))
}

impl OhlcSource for PriceTable {
    fn len(&self) -> usize {
        self.bars.len()
    }

    fn dates(&self) -> &[DateTime<Utc>] {
        &self.dates
    }

    fn open(&self) -> &[f64] {
        &self.open
    }

    fn high(&self) -> &[f64] {
        &self.high
    }

    fn low(&self) -> &[f64] {
        &self.low
    }

    fn close(&self) -> &[f64] {
        &self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::figure::{LegendLoc, Shape};
    use crate::chart::indicator::DEFAULT_MA_WINDOWS;
    use crate::chart::palette::RandomPalette;
    use crate::chart::sink::RecordingSink;
    use crate::trader::Exchange;
    use chrono::{Duration, TimeZone};

    fn bar(day: i64, close: f64) -> BarData {
        let start = Utc.with_ymd_and_hms(2024, 9, 2, 0, 0, 0).unwrap();
        BarData::new(
            "BINANCE".to_string(),
            "BTCUSDT".to_string(),
            Exchange::Binance,
            start + Duration::days(day),
        )
        .with_ohlc(close - 1.0, close + 2.0, close - 2.0, close)
    }

    fn table(n: i64) -> PriceTable {
        PriceTable::new("BTCUSDT", (0..n).map(|d| bar(d, 100.0 + d as f64)).collect())
    }

    #[test]
    fn test_sorts_ascending_and_keeps_rows() {
        let bars = vec![bar(3, 13.0), bar(1, 11.0), bar(2, 12.0), bar(0, 10.0)];
        let table = PriceTable::new("BTCUSDT", bars);

        assert_eq!(table.len(), 4);
        assert_eq!(table.close(), &[10.0, 11.0, 12.0, 13.0]);
        assert!(table.dates().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(table.bars()[0].close_price, 10.0);
    }

    #[test]
    fn test_sorted_input_unchanged() {
        let bars: Vec<_> = (0..5).map(|d| bar(d, 10.0 + d as f64)).collect();
        let table = PriceTable::new("BTCUSDT", bars.clone());
        assert_eq!(table.bars(), bars.as_slice());
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let table = PriceTable::new("BTCUSDT", vec![bar(1, 20.0), bar(0, 5.0), bar(1, 21.0)]);
        assert_eq!(table.close(), &[5.0, 20.0, 21.0]);
    }

    #[test]
    fn test_candlestick_shows_once() {
        let table = table(30);
        let mut ctx = ChartContext::new(RecordingSink::new());

        let (figure, ax_id) = table.candlestick(&mut ctx).unwrap();
        assert_eq!(ctx.sink.show_count(), 1);
        assert_eq!(figure.title(), "BTCUSDT");
        assert_eq!(figure.axes(ax_id).unwrap().mark_count(), 60);
        assert_eq!(figure.xlim(ax_id), Some((-0.5, 29.5)));
    }

    #[test]
    fn test_empty_table_renders() {
        let table = PriceTable::new("BTCUSDT", Vec::new());
        let mut ctx = ChartContext::new(RecordingSink::new());

        let (figure, ax_id) = table.candlestick(&mut ctx).unwrap();
        assert!(table.is_empty());
        assert_eq!(figure.axes(ax_id).unwrap().mark_count(), 0);
        assert_eq!(figure.xlim(ax_id), Some((0.0, 0.0)));
        assert_eq!(ctx.sink.show_count(), 1);
    }

    #[test]
    fn test_candlestick_with_ma() {
        let table = table(70);
        let mut ctx = ChartContext::new(RecordingSink::new());

        let (figure, ax_id) = table.candlestick_with_ma(&mut ctx, &DEFAULT_MA_WINDOWS).unwrap();
        let ax = figure.axes(ax_id).unwrap();

        assert_eq!(ax.mark_count(), 140 + 5);
        assert_eq!(ax.legend_loc(), Some(LegendLoc::Best));
        let labels: Vec<_> = ax.legend_entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["MA5", "MA10", "MA20", "MA30", "MA60"]);
        assert_eq!(ctx.sink.show_count(), 1);
    }

    #[test]
    fn test_ma_zero_window_does_not_show() {
        let table = table(10);
        let mut ctx = ChartContext::new(RecordingSink::new());

        let err = table.candlestick_with_ma(&mut ctx, &[5, 0]).unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter { .. }));
        assert_eq!(ctx.sink.show_count(), 0);
    }

    #[test]
    fn test_seeded_colors_reproducible() {
        let table = table(20);
        let colors = |seed| {
            let mut ctx =
                ChartContext::new(RecordingSink::new()).with_colors(RandomPalette::seeded(seed));
            let (figure, ax_id) = table.candlestick_with_ma(&mut ctx, &[5, 10]).unwrap();
            let colors: Vec<_> = figure
                .axes(ax_id)
                .unwrap()
                .legend_entries()
                .into_iter()
                .map(|(_, c)| c)
                .collect();
            colors
        };
        assert_eq!(colors(11), colors(11));
    }

    #[test]
    fn test_candlestick_with_macd() {
        let table = table(40);
        let mut ctx = ChartContext::new(RecordingSink::new());

        let (figure, price_ax, macd_ax) = table
            .candlestick_with_macd(&mut ctx, MacdParams::default())
            .unwrap();

        assert_eq!(figure.axes_count(), 2);
        assert_eq!(figure.axes(price_ax).unwrap().bounds(), PRICE_PANEL);
        assert_eq!(figure.axes(macd_ax).unwrap().bounds(), MACD_PANEL);
        assert_eq!(figure.axes(macd_ax).unwrap().sharex(), Some(price_ax));
        assert_eq!(figure.xlim(macd_ax), figure.xlim(price_ax));

        let lower = figure.axes(macd_ax).unwrap();
        assert_eq!(lower.legend_loc(), Some(LegendLoc::Best));
        assert_eq!(lower.mark_count(), 3);
        assert!(lower.marks().any(|m| matches!(
            m.shape,
            Shape::FillBetween { baseline, .. } if baseline == 0.0
        )));
        assert_eq!(figure.axes(price_ax).unwrap().legend_loc(), None);
        assert_eq!(ctx.sink.show_count(), 1);
    }

    #[test]
    fn test_style_width_flows_to_overlays() {
        let table = table(3);
        let style = CandleStyle {
            width: 2.0,
            ..CandleStyle::default()
        };
        let mut ctx = ChartContext::new(RecordingSink::new()).with_style(style);

        let (figure, ax_id) = table.candlestick_with_ma(&mut ctx, &[1]).unwrap();
        let ax = figure.axes(ax_id).unwrap();
        let line = ax.marks().find(|m| m.label.is_some()).unwrap();
        let Shape::Polyline { points } = &line.shape else {
            panic!("expected a polyline");
        };
        assert_eq!(points[2].0, 4.0);
        assert_eq!(figure.xlim(ax_id), Some((-1.0, 5.0)));
    }
}
