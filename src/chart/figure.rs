//! Retained drawing surface: a figure holds axes, axes hold marks.
//!
//! Nothing here paints pixels. Renderers populate a [`Figure`] in data
//! coordinates and a [`FigureSink`](super::sink::FigureSink) decides how to
//! show it, so every drawing call receives its surface explicitly.

use egui::Color32;

use super::base::{LABEL_ROTATION_DEG, PEN_WIDTH};

/// Handle of an axes inside its figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId(usize);

impl AxesId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Handle of a mark inside its axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(usize);

/// Axes placement as fractions of the figure, origin at the bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesBounds {
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl AxesBounds {
    pub const fn new(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    /// Single axes filling most of the figure
    pub const fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

/// Geometry of a mark, in data coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Straight line between two points
    Segment { x0: f64, y0: f64, x1: f64, y1: f64 },
    /// Axis-aligned rectangle anchored at its lower-left corner
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    /// Connected line; points with a NaN coordinate break the line
    Polyline { points: Vec<(f64, f64)> },
    /// Area between a curve and a horizontal baseline
    FillBetween { points: Vec<(f64, f64)>, baseline: f64 },
}

impl Shape {
    /// Horizontal extent, ignoring NaN points
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        match self {
            Shape::Segment { x0, x1, .. } => Some((x0.min(*x1), x0.max(*x1))),
            Shape::Rectangle { x, width, .. } => Some((*x, x + width)),
            Shape::Polyline { points } | Shape::FillBetween { points, .. } => {
                extent(points.iter().filter(|(_, y)| !y.is_nan()).map(|(x, _)| *x))
            }
        }
    }

    /// Vertical extent, ignoring NaN points
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        match self {
            Shape::Segment { y0, y1, .. } => Some((y0.min(*y1), y0.max(*y1))),
            Shape::Rectangle { y, height, .. } => Some((*y, y + height)),
            Shape::Polyline { points } => extent(points.iter().map(|(_, y)| *y)),
            Shape::FillBetween { points, baseline } => {
                extent(points.iter().map(|(_, y)| *y).chain(std::iter::once(*baseline)))
            }
        }
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// A drawn primitive plus its style
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub shape: Shape,
    pub color: Color32,
    pub alpha: f32,
    pub line_width: f32,
    /// Legend label; unlabeled marks stay out of the legend
    pub label: Option<String>,
    pub visible: bool,
}

impl Mark {
    pub fn new(shape: Shape, color: Color32) -> Self {
        Self {
            shape,
            color,
            alpha: 1.0,
            line_width: PEN_WIDTH,
            label: None,
            visible: true,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Color with the mark's alpha applied
    pub fn display_color(&self) -> Color32 {
        self.color.gamma_multiply(self.alpha)
    }
}

/// Evenly spaced tick positions, like a multiple locator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Locator {
    pub step: f64,
}

impl Locator {
    pub fn new(step: f64) -> Self {
        Self { step }
    }

    /// Multiples of the step inside `[lo, hi]`
    pub fn ticks(&self, lo: f64, hi: f64) -> Vec<f64> {
        if !(self.step > 0.0) || !(hi >= lo) {
            return Vec::new();
        }
        let first = (lo / self.step).ceil() as i64;
        let last = (hi / self.step).floor() as i64;
        (first..=last).map(|k| k as f64 * self.step).collect()
    }
}

/// Text placed at an explicit x position
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub x: f64,
    pub text: String,
}

/// Categorical x-axis: locators plus explicitly positioned labels
#[derive(Debug, Clone, PartialEq)]
pub struct XAxis {
    pub major: Option<Locator>,
    pub minor: Option<Locator>,
    pub labels: Vec<TickLabel>,
    /// Angle in degrees used when neighbouring labels would overlap
    pub label_rotation: f32,
}

impl Default for XAxis {
    fn default() -> Self {
        Self {
            major: None,
            minor: None,
            labels: Vec::new(),
            label_rotation: LABEL_ROTATION_DEG,
        }
    }
}

/// Where the legend box is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendLoc {
    /// Corner with the fewest marks
    Best,
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// One coordinate system inside a figure
#[derive(Debug, Clone)]
pub struct Axes {
    bounds: AxesBounds,
    sharex: Option<AxesId>,
    marks: Vec<(MarkId, Mark)>,
    next_mark: usize,
    xlim: (f64, f64),
    ylim: Option<(f64, f64)>,
    xaxis: XAxis,
    legend: Option<LegendLoc>,
}

impl Axes {
    fn new(bounds: AxesBounds, sharex: Option<AxesId>) -> Self {
        Self {
            bounds,
            sharex,
            marks: Vec::new(),
            next_mark: 0,
            xlim: (0.0, 0.0),
            ylim: None,
            xaxis: XAxis::default(),
            legend: None,
        }
    }

    pub fn bounds(&self) -> AxesBounds {
        self.bounds
    }

    /// Axes whose x-limits and ticks this axes reuses
    pub fn sharex(&self) -> Option<AxesId> {
        self.sharex
    }

    /// Add a mark and get its handle
    pub fn add_mark(&mut self, mark: Mark) -> MarkId {
        let id = MarkId(self.next_mark);
        self.next_mark += 1;
        self.marks.push((id, mark));
        id
    }

    pub fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.marks.iter().find(|(mid, _)| *mid == id).map(|(_, m)| m)
    }

    pub fn mark_mut(&mut self, id: MarkId) -> Option<&mut Mark> {
        self.marks.iter_mut().find(|(mid, _)| *mid == id).map(|(_, m)| m)
    }

    /// Remove a mark, returning it if it existed
    pub fn remove_mark(&mut self, id: MarkId) -> Option<Mark> {
        let pos = self.marks.iter().position(|(mid, _)| *mid == id)?;
        Some(self.marks.remove(pos).1)
    }

    /// Marks in drawing order
    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter().map(|(_, m)| m)
    }

    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.xlim = (lo, hi);
    }

    /// Own x-limits; shared axes should be resolved through [`Figure::xlim`]
    pub fn xlim(&self) -> (f64, f64) {
        self.xlim
    }

    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.ylim = Some((lo, hi));
    }

    /// Explicit y-limits, or the extent of all visible marks
    pub fn ylim(&self) -> (f64, f64) {
        self.ylim
            .or_else(|| self.data_y_range())
            .unwrap_or((0.0, 1.0))
    }

    /// Union of the visible marks' vertical extents
    pub fn data_y_range(&self) -> Option<(f64, f64)> {
        self.marks()
            .filter(|m| m.visible)
            .filter_map(|m| m.shape.y_extent())
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }

    pub fn xaxis(&self) -> &XAxis {
        &self.xaxis
    }

    pub fn xaxis_mut(&mut self) -> &mut XAxis {
        &mut self.xaxis
    }

    /// Attach a legend built from labeled marks
    pub fn legend(&mut self, loc: LegendLoc) {
        self.legend = Some(loc);
    }

    pub fn legend_loc(&self) -> Option<LegendLoc> {
        self.legend
    }

    /// Label and color of every visible labeled mark
    pub fn legend_entries(&self) -> Vec<(&str, Color32)> {
        self.marks()
            .filter(|m| m.visible)
            .filter_map(|m| m.label.as_deref().map(|l| (l, m.color)))
            .collect()
    }
}

/// Top-level drawing surface
#[derive(Debug, Clone)]
pub struct Figure {
    title: String,
    axes: Vec<Axes>,
}

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            axes: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Add an independent axes
    pub fn add_axes(&mut self, bounds: AxesBounds) -> AxesId {
        self.axes.push(Axes::new(bounds, None));
        AxesId(self.axes.len() - 1)
    }

    /// Add an axes that reuses `share`'s x-limits and ticks
    pub fn add_axes_sharex(&mut self, bounds: AxesBounds, share: AxesId) -> AxesId {
        let root = self.shared_root(share);
        self.axes.push(Axes::new(bounds, Some(root)));
        AxesId(self.axes.len() - 1)
    }

    pub fn axes(&self, id: AxesId) -> Option<&Axes> {
        self.axes.get(id.0)
    }

    pub fn axes_mut(&mut self, id: AxesId) -> Option<&mut Axes> {
        self.axes.get_mut(id.0)
    }

    /// All axes with their handles
    pub fn axes_iter(&self) -> impl Iterator<Item = (AxesId, &Axes)> {
        self.axes.iter().enumerate().map(|(ix, ax)| (AxesId(ix), ax))
    }

    pub fn axes_count(&self) -> usize {
        self.axes.len()
    }

    fn shared_root(&self, id: AxesId) -> AxesId {
        let mut current = id;
        while let Some(parent) = self.axes(current).and_then(|ax| ax.sharex) {
            current = parent;
        }
        current
    }

    /// x-limits in effect for `id`, following x-axis sharing
    pub fn xlim(&self, id: AxesId) -> Option<(f64, f64)> {
        self.axes(self.shared_root(id)).map(|ax| ax.xlim())
    }

    /// x-axis in effect for `id`, following x-axis sharing
    pub fn xaxis(&self, id: AxesId) -> Option<&XAxis> {
        self.axes(self.shared_root(id)).map(|ax| ax.xaxis())
    }
}

/// Convex pieces covering the area between `points` and `baseline`.
///
/// Each piece spans two neighbouring finite points; pieces whose ends sit on
/// opposite sides of the baseline are split at the crossing.
pub fn fill_polygons(points: &[(f64, f64)], baseline: f64) -> Vec<Vec<(f64, f64)>> {
    let mut polygons = Vec::new();
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            continue;
        }

        let d0 = y0 - baseline;
        let d1 = y1 - baseline;
        if d0 * d1 < 0.0 {
            let xc = x0 + (x1 - x0) * d0 / (d0 - d1);
            polygons.push(vec![(x0, baseline), (x0, y0), (xc, baseline)]);
            polygons.push(vec![(xc, baseline), (x1, y1), (x1, baseline)]);
        } else {
            polygons.push(vec![(x0, baseline), (x0, y0), (x1, y1), (x1, baseline)]);
        }
    }
    polygons
}
