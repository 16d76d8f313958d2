//! Painting a figure with egui.

use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, StrokeKind, Ui, Vec2};

use super::base::{
    calculate_axis_ticks, decimals_for_step, format_price, AXIS_X_HEIGHT, AXIS_Y_WIDTH,
    BLACK_COLOR, GREY_COLOR, GRID_COLOR, MARGIN, WHITE_COLOR, Y_PADDING_RATIO,
};
use super::figure::{fill_polygons, Axes, AxesBounds, AxesId, Figure, LegendLoc, Shape, XAxis};

const TICK_FONT_SIZE: f32 = 11.0;
const LEGEND_FONT_SIZE: f32 = 12.0;
const TITLE_FONT_SIZE: f32 = 14.0;
const Y_TICK_COUNT: usize = 5;

/// Maps data coordinates onto a screen rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    rect: Rect,
    xlim: (f64, f64),
    ylim: (f64, f64),
}

impl Transform {
    pub fn new(rect: Rect, xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        Self { rect, xlim, ylim }
    }

    fn span(lim: (f64, f64)) -> f64 {
        let span = lim.1 - lim.0;
        if span.abs() < f64::EPSILON {
            1.0
        } else {
            span
        }
    }

    pub fn x(&self, x: f64) -> f32 {
        let t = (x - self.xlim.0) / Self::span(self.xlim);
        self.rect.left() + t as f32 * self.rect.width()
    }

    /// Screen y grows downwards
    pub fn y(&self, y: f64) -> f32 {
        let t = (y - self.ylim.0) / Self::span(self.ylim);
        self.rect.bottom() - t as f32 * self.rect.height()
    }

    pub fn pos(&self, x: f64, y: f64) -> Pos2 {
        Pos2::new(self.x(x), self.y(y))
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.xlim.0.min(self.xlim.1) && x <= self.xlim.0.max(self.xlim.1)
    }
}

/// Screen rectangle for axes `bounds` inside `area`
pub fn axes_rect(area: Rect, bounds: AxesBounds) -> Rect {
    let left = area.left() + bounds.left * area.width();
    let right = left + bounds.width * area.width();
    let bottom = area.bottom() - bounds.bottom * area.height();
    let top = bottom - bounds.height * area.height();
    Rect::from_min_max(Pos2::new(left, top), Pos2::new(right, bottom))
}

/// y-limits padded so marks do not touch the frame
pub fn padded_ylim(ax: &Axes) -> (f64, f64) {
    let (lo, hi) = ax.ylim();
    let span = hi - lo;
    let scale = lo.abs().max(hi.abs()).max(1.0);
    if span.abs() <= scale * 1e-9 {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * Y_PADDING_RATIO };
        (lo - pad, hi + pad)
    } else {
        (lo - span * Y_PADDING_RATIO, hi + span * Y_PADDING_RATIO)
    }
}

/// Whether neighbouring labels of `widths` at screen `xs` would collide
pub fn labels_overlap(xs: &[f32], widths: &[f32]) -> bool {
    xs.windows(2)
        .zip(widths.windows(2))
        .any(|(x, w)| (x[1] - x[0]).abs() < (w[0] + w[1]) / 2.0 + MARGIN)
}

/// Widget painting a whole figure
pub struct FigureWidget {
    figure: Figure,
}

impl FigureWidget {
    pub fn new(figure: Figure) -> Self {
        Self { figure }
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Paint the figure into all remaining space
    pub fn ui(&self, ui: &mut Ui) -> Response {
        let size = ui.available_size();
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let full = response.rect;
        painter.rect_filled(full, 0.0, BLACK_COLOR);

        painter.text(
            Pos2::new(full.center().x, full.top() + MARGIN),
            Align2::CENTER_TOP,
            self.figure.title(),
            FontId::proportional(TITLE_FONT_SIZE),
            WHITE_COLOR,
        );

        // Keep room for the title, the y tick labels and the date labels
        let area = Rect::from_min_max(
            Pos2::new(full.left() + MARGIN, full.top() + TITLE_FONT_SIZE + 2.0 * MARGIN),
            Pos2::new(full.right() - AXIS_Y_WIDTH, full.bottom() - AXIS_X_HEIGHT),
        );

        let bottom_axes = self.bottom_axes();
        for (id, ax) in self.figure.axes_iter() {
            self.paint_axes(&painter, area, id, ax, bottom_axes == Some(id));
        }

        response
    }

    /// The lowest axes carries the date labels when axes share an x-axis
    fn bottom_axes(&self) -> Option<AxesId> {
        self.figure
            .axes_iter()
            .min_by(|(_, a), (_, b)| a.bounds().bottom.total_cmp(&b.bounds().bottom))
            .map(|(id, _)| id)
    }

    fn paint_axes(&self, painter: &egui::Painter, area: Rect, id: AxesId, ax: &Axes, labeled: bool) {
        let rect = axes_rect(area, ax.bounds());
        let xlim = self.figure.xlim(id).unwrap_or_else(|| ax.xlim());
        let ylim = padded_ylim(ax);
        let transform = Transform::new(rect, xlim, ylim);

        let clipped = painter.with_clip_rect(rect);

        if let Some(xaxis) = self.figure.xaxis(id) {
            self.paint_x_grid(&clipped, &transform, rect, xaxis);
            if labeled {
                self.paint_x_labels(painter, &transform, rect, xaxis);
            }
        }
        self.paint_y_axis(painter, &transform, rect, ylim);

        for mark in ax.marks().filter(|m| m.visible) {
            let color = mark.display_color();
            let stroke = Stroke::new(mark.line_width, color);
            match &mark.shape {
                Shape::Segment { x0, y0, x1, y1 } => {
                    clipped.line_segment([transform.pos(*x0, *y0), transform.pos(*x1, *y1)], stroke);
                }
                Shape::Rectangle { x, y, width, height } => {
                    let mut body = Rect::from_two_pos(
                        transform.pos(*x, *y),
                        transform.pos(x + width, y + height),
                    );
                    // Flat bodies still show as a hairline
                    if body.height() < 1.0 {
                        body = body.expand2(Vec2::new(0.0, 0.5));
                    }
                    clipped.rect_filled(body, 0.0, color);
                }
                Shape::Polyline { points } => {
                    for run in finite_runs(points) {
                        let screen: Vec<Pos2> =
                            run.iter().map(|(x, y)| transform.pos(*x, *y)).collect();
                        if screen.len() > 1 {
                            clipped.add(egui::Shape::line(screen, stroke));
                        }
                    }
                }
                Shape::FillBetween { points, baseline } => {
                    for polygon in fill_polygons(points, *baseline) {
                        let screen: Vec<Pos2> =
                            polygon.iter().map(|(x, y)| transform.pos(*x, *y)).collect();
                        clipped.add(egui::Shape::convex_polygon(screen, color, Stroke::NONE));
                    }
                }
            }
        }

        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, GREY_COLOR), StrokeKind::Inside);

        if let Some(loc) = ax.legend_loc() {
            self.paint_legend(painter, rect, ax, loc, &transform);
        }
    }

    fn paint_x_grid(&self, painter: &egui::Painter, transform: &Transform, rect: Rect, xaxis: &XAxis) {
        let (lo, hi) = transform.xlim;
        if let Some(minor) = xaxis.minor {
            for x in minor.ticks(lo, hi) {
                let sx = transform.x(x);
                painter.line_segment(
                    [Pos2::new(sx, rect.bottom()), Pos2::new(sx, rect.bottom() - 3.0)],
                    Stroke::new(1.0, GREY_COLOR),
                );
            }
        }
        if let Some(major) = xaxis.major {
            for x in major.ticks(lo, hi) {
                let sx = transform.x(x);
                painter.line_segment(
                    [Pos2::new(sx, rect.top()), Pos2::new(sx, rect.bottom())],
                    Stroke::new(1.0, GRID_COLOR),
                );
            }
        }
    }

    fn paint_x_labels(&self, painter: &egui::Painter, transform: &Transform, rect: Rect, xaxis: &XAxis) {
        let font = FontId::proportional(TICK_FONT_SIZE);
        let visible: Vec<_> = xaxis
            .labels
            .iter()
            .filter(|label| transform.contains_x(label.x))
            .collect();
        let galleys: Vec<_> = visible
            .iter()
            .map(|label| painter.layout_no_wrap(label.text.clone(), font.clone(), WHITE_COLOR))
            .collect();

        let xs: Vec<f32> = visible.iter().map(|label| transform.x(label.x)).collect();
        let widths: Vec<f32> = galleys.iter().map(|g| g.size().x).collect();
        let rotate = labels_overlap(&xs, &widths);
        let angle = xaxis.label_rotation.to_radians();

        for (sx, galley) in xs.into_iter().zip(galleys) {
            let y = rect.bottom() + 4.0;
            if rotate {
                // Text rises to the right and ends under its tick
                let w = galley.size().x;
                let pos = Pos2::new(sx - w * angle.cos(), y + w * angle.sin());
                let shape = TextShape::new(pos, galley, WHITE_COLOR).with_angle(-angle);
                painter.add(shape);
            } else {
                let pos = Pos2::new(sx - galley.size().x / 2.0, y);
                painter.galley(pos, galley, WHITE_COLOR);
            }
        }
    }

    fn paint_y_axis(&self, painter: &egui::Painter, transform: &Transform, rect: Rect, ylim: (f64, f64)) {
        let ticks = calculate_axis_ticks(ylim.0, ylim.1, Y_TICK_COUNT);
        let decimals = match ticks.as_slice() {
            [a, b, ..] => decimals_for_step(b - a),
            _ => 2,
        };

        for tick in ticks {
            let y = transform.y(tick);
            if y < rect.top() || y > rect.bottom() {
                continue;
            }
            painter.line_segment(
                [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
                Stroke::new(1.0, GRID_COLOR),
            );
            painter.text(
                Pos2::new(rect.right() + 6.0, y),
                Align2::LEFT_CENTER,
                format_price(tick, decimals),
                FontId::proportional(TICK_FONT_SIZE),
                WHITE_COLOR,
            );
        }
    }

    fn paint_legend(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        ax: &Axes,
        loc: LegendLoc,
        transform: &Transform,
    ) {
        let entries = ax.legend_entries();
        if entries.is_empty() {
            return;
        }

        let font = FontId::proportional(LEGEND_FONT_SIZE);
        let row_height = LEGEND_FONT_SIZE + 4.0;
        let swatch = 16.0;
        let text_width = entries
            .iter()
            .map(|(label, _)| {
                painter
                    .layout_no_wrap(label.to_string(), font.clone(), WHITE_COLOR)
                    .size()
                    .x
            })
            .fold(0.0_f32, f32::max);
        let size = Vec2::new(
            swatch + text_width + 3.0 * MARGIN,
            entries.len() as f32 * row_height + 2.0 * MARGIN,
        );

        let loc = match loc {
            LegendLoc::Best => best_corner(rect, size, ax, transform),
            other => other,
        };
        let legend_rect = corner_rect(rect, size, loc);

        painter.rect_filled(legend_rect, 2.0, Color32::from_rgba_unmultiplied(0, 0, 0, 200));
        painter.rect_stroke(legend_rect, 2.0, Stroke::new(1.0, GREY_COLOR), StrokeKind::Inside);

        for (row, (label, color)) in entries.into_iter().enumerate() {
            let y = legend_rect.top() + MARGIN + row as f32 * row_height + row_height / 2.0;
            let x = legend_rect.left() + MARGIN;
            painter.line_segment(
                [Pos2::new(x, y), Pos2::new(x + swatch, y)],
                Stroke::new(2.0, color),
            );
            painter.text(
                Pos2::new(x + swatch + MARGIN, y),
                Align2::LEFT_CENTER,
                label,
                font.clone(),
                WHITE_COLOR,
            );
        }
    }
}

/// Maximal runs of consecutive finite points
fn finite_runs(points: &[(f64, f64)]) -> Vec<&[(f64, f64)]> {
    points
        .split(|(x, y)| !(x.is_finite() && y.is_finite()))
        .filter(|run| !run.is_empty())
        .collect()
}

fn corner_rect(rect: Rect, size: Vec2, loc: LegendLoc) -> Rect {
    let inner = rect.shrink(MARGIN);
    let min = match loc {
        LegendLoc::UpperLeft | LegendLoc::Best => inner.left_top(),
        LegendLoc::UpperRight => Pos2::new(inner.right() - size.x, inner.top()),
        LegendLoc::LowerLeft => Pos2::new(inner.left(), inner.bottom() - size.y),
        LegendLoc::LowerRight => inner.right_bottom() - size,
    };
    Rect::from_min_size(min, size)
}

/// Corner whose legend box would cover the fewest mark points
fn best_corner(rect: Rect, size: Vec2, ax: &Axes, transform: &Transform) -> LegendLoc {
    let points: Vec<Pos2> = ax
        .marks()
        .filter(|m| m.visible)
        .flat_map(|m| match &m.shape {
            Shape::Segment { x0, y0, x1, y1 } => vec![(*x0, *y0), (*x1, *y1)],
            Shape::Rectangle { x, y, width, height } => vec![(*x, *y), (x + width, y + height)],
            Shape::Polyline { points } | Shape::FillBetween { points, .. } => points.clone(),
        })
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(x, y)| transform.pos(x, y))
        .collect();

    [
        LegendLoc::UpperRight,
        LegendLoc::UpperLeft,
        LegendLoc::LowerLeft,
        LegendLoc::LowerRight,
    ]
    .into_iter()
    .min_by_key(|loc| {
        let area = corner_rect(rect, size, *loc);
        points.iter().filter(|p| area.contains(**p)).count()
    })
    .unwrap_or(LegendLoc::UpperRight)
}
