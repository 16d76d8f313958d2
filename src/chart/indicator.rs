//! Technical indicators for charting: moving averages and MACD.

use ta::indicators::ExponentialMovingAverage;
use ta::Next;

use super::base::{DEA_COLOR, DIF_COLOR, HISTOGRAM_COLOR, LINE_WIDTH};
use super::figure::{Axes, LegendLoc, Mark, MarkId, Shape};
use super::palette::ColorPolicy;
use crate::error::{ChartError, Result};

/// Moving-average windows drawn when none are given
pub const DEFAULT_MA_WINDOWS: [usize; 5] = [5, 10, 20, 30, 60];

/// Trailing arithmetic mean of `values` over `window` points.
///
/// Index `i` holds the mean of `values[i + 1 - window..=i]`; the first
/// `window - 1` entries are `None`.
pub fn moving_average(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(ChartError::InvalidParameter {
            name: "window",
            value: window,
        });
    }

    let mut result = vec![None; values.len()];
    if values.len() < window {
        return Ok(result);
    }

    for i in (window - 1)..values.len() {
        let sum: f64 = values[i + 1 - window..=i].iter().sum();
        result[i] = Some(sum / window as f64);
    }
    Ok(result)
}

/// Exponential moving average, seeded with the first value
pub fn ema(values: &[f64], span: usize) -> Result<Vec<f64>> {
    let mut indicator = ExponentialMovingAverage::new(span).map_err(|_| {
        ChartError::InvalidParameter {
            name: "span",
            value: span,
        }
    })?;
    Ok(values.iter().map(|v| indicator.next(*v)).collect())
}

/// MACD spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// MACD output, one value per input point
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub fast_ema: Vec<f64>,
    pub slow_ema: Vec<f64>,
    pub dif: Vec<f64>,
    pub dea: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    pub fn len(&self) -> usize {
        self.dif.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dif.is_empty()
    }
}

/// Compute DIF, DEA and histogram for `closes`
pub fn macd(closes: &[f64], params: MacdParams) -> Result<MacdSeries> {
    let fast_ema = ema(closes, params.fast)?;
    let slow_ema = ema(closes, params.slow)?;
    let dif: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let dea = ema(&dif, params.signal)?;
    let histogram = dif.iter().zip(&dea).map(|(d, e)| d - e).collect();

    Ok(MacdSeries {
        fast_ema,
        slow_ema,
        dif,
        dea,
        histogram,
    })
}

/// Polyline points at slot centres; missing values become NaN gaps
fn slot_points<I>(values: I, width: f64) -> Vec<(f64, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(ix, v)| (ix as f64 * width, v.unwrap_or(f64::NAN)))
        .collect()
}

/// Draw one `MA<window>` line per window and attach a legend
pub fn draw_moving_averages(
    ax: &mut Axes,
    closes: &[f64],
    windows: &[usize],
    colors: &mut dyn ColorPolicy,
    width: f64,
) -> Result<Vec<MarkId>> {
    let mut marks = Vec::with_capacity(windows.len());
    for (rank, window) in windows.iter().copied().enumerate() {
        let values = moving_average(closes, window)?;
        let color = colors.assign(rank, window);
        let line = Mark::new(
            Shape::Polyline {
                points: slot_points(values, width),
            },
            color,
        )
        .with_line_width(LINE_WIDTH)
        .with_label(format!("MA{}", window));
        marks.push(ax.add_mark(line));
    }

    ax.legend(LegendLoc::Best);
    Ok(marks)
}

/// Handles of the marks drawn on a MACD panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdMarks {
    pub dif: MarkId,
    pub dea: MarkId,
    pub histogram: MarkId,
}

/// Draw DIF and DEA lines plus the histogram area around zero
pub fn draw_macd(ax: &mut Axes, series: &MacdSeries, width: f64) -> MacdMarks {
    let histogram = ax.add_mark(
        Mark::new(
            Shape::FillBetween {
                points: slot_points(series.histogram.iter().map(|v| Some(*v)), width),
                baseline: 0.0,
            },
            HISTOGRAM_COLOR,
        )
        .with_label("MACD"),
    );
    let dif = ax.add_mark(
        Mark::new(
            Shape::Polyline {
                points: slot_points(series.dif.iter().map(|v| Some(*v)), width),
            },
            DIF_COLOR,
        )
        .with_line_width(LINE_WIDTH)
        .with_label("DIF"),
    );
    let dea = ax.add_mark(
        Mark::new(
            Shape::Polyline {
                points: slot_points(series.dea.iter().map(|v| Some(*v)), width),
            },
            DEA_COLOR,
        )
        .with_line_width(LINE_WIDTH)
        .with_label("DEA"),
    );

    ax.legend(LegendLoc::Best);
    MacdMarks {
        dif,
        dea,
        histogram,
    }
}
