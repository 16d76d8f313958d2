//! Color assignment for overlay lines.

use egui::ecolor::Hsva;
use egui::Color32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks a line color for the `rank`-th overlay of a chart
pub trait ColorPolicy {
    fn assign(&mut self, rank: usize, window: usize) -> Color32;
}

/// Fixed palette indexed by overlay rank.
///
/// Ranks past the palette get generated colors, spread over the hue circle
/// by the golden ratio and kept darker than every palette entry.
#[derive(Debug, Clone)]
pub struct FixedPalette {
    colors: Vec<Color32>,
}

impl FixedPalette {
    pub fn new(colors: Vec<Color32>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }
}

impl Default for FixedPalette {
    fn default() -> Self {
        Self {
            colors: vec![
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(255, 200, 0),
                Color32::from_rgb(255, 0, 255),
                Color32::from_rgb(0, 160, 255),
                Color32::from_rgb(0, 220, 120),
                Color32::from_rgb(255, 120, 40),
                Color32::from_rgb(160, 120, 255),
            ],
        }
    }
}

const GOLDEN_RATIO_CONJUGATE: f32 = 0.618_034;

impl ColorPolicy for FixedPalette {
    fn assign(&mut self, rank: usize, _window: usize) -> Color32 {
        match self.colors.get(rank) {
            Some(color) => *color,
            None => {
                let extra = (rank - self.colors.len()) as f32;
                let hue = (extra * GOLDEN_RATIO_CONJUGATE).fract();
                Color32::from(Hsva::new(hue, 0.75, 0.9, 1.0))
            }
        }
    }
}

/// Independent random colors, reproducible when seeded
#[derive(Debug, Clone)]
pub struct RandomPalette {
    rng: StdRng,
}

impl RandomPalette {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl ColorPolicy for RandomPalette {
    fn assign(&mut self, _rank: usize, _window: usize) -> Color32 {
        let [r, g, b]: [u8; 3] = self.rng.random();
        Color32::from_rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_palette_is_deterministic() {
        let mut a = FixedPalette::default();
        let mut b = FixedPalette::default();
        let first: Vec<_> = (0..5).map(|rank| a.assign(rank, 5)).collect();
        let second: Vec<_> = (0..5).map(|rank| b.assign(rank, 5)).collect();
        assert_eq!(first, second);

        // default windows each get a distinct color
        for i in 0..first.len() {
            for j in i + 1..first.len() {
                assert_ne!(first[i], first[j]);
            }
        }
    }

    #[test]
    fn test_fixed_palette_extends_past_its_colors() {
        let mut palette = FixedPalette::new(vec![Color32::RED, Color32::GREEN]);
        assert_eq!(palette.assign(0, 5), Color32::RED);
        assert_eq!(palette.assign(1, 10), Color32::GREEN);
        assert_ne!(palette.assign(2, 20), Color32::RED);
        assert_ne!(palette.assign(2, 20), Color32::GREEN);
    }

    #[test]
    fn test_many_windows_get_distinct_colors() {
        let mut palette = FixedPalette::default();
        let colors: Vec<_> = (0..12).map(|rank| palette.assign(rank, rank + 1)).collect();
        for i in 0..colors.len() {
            for j in i + 1..colors.len() {
                assert_ne!(colors[i], colors[j], "ranks {} and {}", i, j);
            }
        }
        // same rank, same color
        assert_eq!(palette.assign(9, 60), colors[9]);
    }

    #[test]
    fn test_empty_palette_falls_back_to_default() {
        let mut palette = FixedPalette::new(Vec::new());
        assert_eq!(palette.assign(0, 5), FixedPalette::default().assign(0, 5));
    }

    #[test]
    fn test_seeded_random_palette_reproducible() {
        let mut a = RandomPalette::seeded(7);
        let mut b = RandomPalette::seeded(7);
        for rank in 0..5 {
            assert_eq!(a.assign(rank, 5), b.assign(rank, 5));
        }
    }
}
