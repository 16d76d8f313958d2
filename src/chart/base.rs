//! Base constants and utility functions for the chart module.

use egui::Color32;

// Chart colors
pub const WHITE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const BLACK_COLOR: Color32 = Color32::from_rgb(0, 0, 0);
pub const GREY_COLOR: Color32 = Color32::from_rgb(100, 100, 100);
pub const GRID_COLOR: Color32 = Color32::from_rgb(55, 55, 55);

// Price movement colors (Chinese style: red up, green down)
pub const UP_COLOR: Color32 = Color32::from_rgb(255, 75, 75);
pub const DOWN_COLOR: Color32 = Color32::from_rgb(0, 200, 90);

// MACD panel colors
pub const DIF_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const DEA_COLOR: Color32 = Color32::from_rgb(255, 200, 0);
pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(200, 0, 200);

// Candle geometry
pub const SLOT_WIDTH: f64 = 1.0;
pub const BODY_RATIO: f64 = 0.6;
pub const BODY_ALPHA: f32 = 0.7;
pub const PEN_WIDTH: f32 = 1.0;
pub const LINE_WIDTH: f32 = 1.5;

// Tick policy, in bars
pub const MAJOR_TICK_BARS: usize = 20;
pub const MINOR_TICK_BARS: usize = 5;
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const LABEL_ROTATION_DEG: f32 = 45.0;

// Layout constants, in pixels
pub const MARGIN: f32 = 5.0;
pub const AXIS_X_HEIGHT: f32 = 48.0;
pub const AXIS_Y_WIDTH: f32 = 80.0;
pub const Y_PADDING_RATIO: f64 = 0.05;

/// Format price with appropriate precision
pub fn format_price(price: f64, decimals: usize) -> String {
    format!("{:.prec$}", price, prec = decimals)
}

/// Calculate nice axis tick values
pub fn calculate_axis_ticks(min_val: f64, max_val: f64, max_ticks: usize) -> Vec<f64> {
    if min_val >= max_val || max_ticks == 0 {
        return vec![min_val];
    }

    let range = max_val - min_val;
    let rough_step = range / max_ticks as f64;

    // Find the magnitude of the step
    let magnitude = 10.0_f64.powf(rough_step.log10().floor());
    let residual = rough_step / magnitude;

    // Choose a nice step value
    let nice_step = if residual <= 1.5 {
        magnitude
    } else if residual <= 3.0 {
        2.0 * magnitude
    } else if residual <= 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    let mut ticks = Vec::new();
    let mut value = (min_val / nice_step).ceil() * nice_step;

    // A step below the float resolution of the range would never advance
    while value <= max_val && ticks.len() <= max_ticks * 4 {
        ticks.push(value);
        let next = value + nice_step;
        if next <= value {
            break;
        }
        value = next;
    }

    ticks
}

/// Pick the number of decimals that keeps `step` distinguishable
pub fn decimals_for_step(step: f64) -> usize {
    if step <= 0.0 || !step.is_finite() {
        return 2;
    }
    let digits = -step.log10().floor();
    if digits <= 0.0 {
        0
    } else {
        digits as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(12.0, 2), "12.00");
        assert_eq!(format_price(0.12345, 4), "0.1235");
    }

    #[test]
    fn test_calculate_axis_ticks() {
        let ticks = calculate_axis_ticks(0.0, 100.0, 5);
        assert!(!ticks.is_empty());
        for tick in &ticks {
            assert!(*tick >= 0.0 && *tick <= 100.0);
        }
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_calculate_axis_ticks_degenerate() {
        assert_eq!(calculate_axis_ticks(5.0, 5.0, 5), vec![5.0]);
    }

    #[test]
    fn test_calculate_axis_ticks_one_ulp_range() {
        let hi = f64::from_bits(100f64.to_bits() + 1);
        let ticks = calculate_axis_ticks(100.0, hi, 5);
        assert!(ticks.len() <= 21);
        assert!(ticks.iter().all(|t| *t >= 100.0 && *t <= hi));
    }

    #[test]
    fn test_decimals_for_step() {
        assert_eq!(decimals_for_step(20.0), 0);
        assert_eq!(decimals_for_step(0.5), 1);
        assert_eq!(decimals_for_step(0.02), 2);
    }
}
