//! Candlestick drawing on a categorical, gap-free time axis.

use chrono::{DateTime, Utc};
use egui::Color32;

use super::base::{
    BODY_ALPHA, BODY_RATIO, DATE_FORMAT, DOWN_COLOR, MAJOR_TICK_BARS, MINOR_TICK_BARS, PEN_WIDTH,
    SLOT_WIDTH, UP_COLOR,
};
use super::figure::{Axes, Locator, Mark, MarkId, Shape, TickLabel};
use crate::trader::setting::Settings;

/// Read-only columns a renderer needs from a price table
pub trait OhlcSource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bar dates in ascending order
    fn dates(&self) -> &[DateTime<Utc>];
    fn open(&self) -> &[f64];
    fn high(&self) -> &[f64];
    fn low(&self) -> &[f64];
    fn close(&self) -> &[f64];
}

/// Geometry and colors of the candlesticks
#[derive(Debug, Clone, PartialEq)]
pub struct CandleStyle {
    /// Slot width each bar occupies on the x-axis
    pub width: f64,
    /// Body width as a fraction of the slot
    pub body_ratio: f64,
    pub up_color: Color32,
    pub down_color: Color32,
    pub alpha: f32,
    pub wick_width: f32,
    /// Bars between labeled major ticks
    pub major_every: usize,
    /// Bars between minor ticks
    pub minor_every: usize,
    pub date_format: String,
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            width: SLOT_WIDTH,
            body_ratio: BODY_RATIO,
            up_color: UP_COLOR,
            down_color: DOWN_COLOR,
            alpha: BODY_ALPHA,
            wick_width: PEN_WIDTH,
            major_every: MAJOR_TICK_BARS,
            minor_every: MINOR_TICK_BARS,
            date_format: DATE_FORMAT.to_string(),
        }
    }
}

impl CandleStyle {
    /// Default style with `chart.*` overrides from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let default = Self::default();
        Self {
            width: settings
                .get_float("chart.width")
                .filter(|w| *w > 0.0)
                .unwrap_or(default.width),
            body_ratio: settings
                .get_float("chart.body_ratio")
                .filter(|r| *r > 0.0 && *r <= 1.0)
                .unwrap_or(default.body_ratio),
            alpha: settings
                .get_float("chart.alpha")
                .map(|a| a.clamp(0.0, 1.0) as f32)
                .unwrap_or(default.alpha),
            ..default
        }
    }

    /// x of the centre of slot `ix`
    pub fn slot_center(&self, ix: usize) -> f64 {
        ix as f64 * self.width
    }

    /// x-limits covering `count` slots
    pub fn x_limits(&self, count: usize) -> (f64, f64) {
        if count == 0 {
            return (0.0, 0.0);
        }
        let half = self.width / 2.0;
        (-half, self.slot_center(count - 1) + half)
    }
}

/// Handles of the marks created for one candlestick chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandleMarks {
    pub wicks: Vec<MarkId>,
    pub bodies: Vec<MarkId>,
}

/// Candlestick chart item
#[derive(Debug, Clone, Default)]
pub struct CandleItem {
    style: CandleStyle,
}

impl CandleItem {
    pub fn new(style: CandleStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &CandleStyle {
        &self.style
    }

    /// Draw one wick and one body per bar and set up the x-axis.
    ///
    /// Bars sit in consecutive slots whatever the calendar gap between
    /// them, so weekends and holidays take no room.
    pub fn draw<D: OhlcSource + ?Sized>(&self, ax: &mut Axes, data: &D) -> CandleMarks {
        let style = &self.style;
        let (open, high, low, close) = (data.open(), data.high(), data.low(), data.close());
        let body_width = style.width * style.body_ratio;

        let mut marks = CandleMarks::default();
        for q in 0..data.len() {
            let x = style.slot_center(q);
            let color = if close[q] >= open[q] {
                style.up_color
            } else {
                style.down_color
            };

            let wick = Mark::new(
                Shape::Segment {
                    x0: x,
                    y0: low[q],
                    x1: x,
                    y1: high[q],
                },
                color,
            )
            .with_alpha(style.alpha)
            .with_line_width(style.wick_width);
            marks.wicks.push(ax.add_mark(wick));

            let body = Mark::new(
                Shape::Rectangle {
                    x: x - body_width / 2.0,
                    y: open[q].min(close[q]),
                    width: body_width,
                    height: (close[q] - open[q]).abs(),
                },
                color,
            )
            .with_alpha(style.alpha);
            marks.bodies.push(ax.add_mark(body));
        }

        let (lo, hi) = style.x_limits(data.len());
        ax.set_xlim(lo, hi);

        let xaxis = ax.xaxis_mut();
        xaxis.major = Some(Locator::new(style.major_every as f64 * style.width));
        xaxis.minor = Some(Locator::new(style.minor_every as f64 * style.width));
        xaxis.labels = self.tick_labels(data.dates());

        marks
    }

    /// Date labels for every `major_every`-th bar, at its slot centre
    pub fn tick_labels(&self, dates: &[DateTime<Utc>]) -> Vec<TickLabel> {
        let every = self.style.major_every.max(1);
        dates
            .iter()
            .enumerate()
            .step_by(every)
            .map(|(q, dt)| TickLabel {
                x: self.style.slot_center(q),
                text: dt.format(&self.style.date_format).to_string(),
            })
            .collect()
    }
}
