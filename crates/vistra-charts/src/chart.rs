//! The chart engine: rendering, lifecycle, and pointer handling.
//!
//! `ChartEngine` is a pure function of its inputs per frame: the same
//! dataset, config, viewport, and animation progress always produce the
//! same draw commands and the same hit regions. The host drives it with
//! `tick(now_ms)` + `render(canvas)` and forwards pointer events.

use crate::config::{BarMode, ChartConfig, ChartKind};
use crate::data::{DataPoint, Dataset, Series, Slice};
use crate::hit::{HitArena, HitRegion, HitShape};
use crate::legend::{self, LegendEntry};
use crate::tooltip::{self, TooltipLayout};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use vistra_core::{
    polar_point, to_canvas_radians, AnimationDriver, AnimationState, ArcSweep, Canvas, Color,
    LinearScale, Point, Rect, StrokeStyle, TextAlign, TextStyle,
};

/// Segments sampled per span when smoothing a line.
const SMOOTH_SEGMENTS: usize = 8;
/// Alpha of the area fill under a line.
const AREA_FILL_ALPHA: f32 = 0.3;
/// Label radius as a fraction of the pie's outer radius.
const PIE_LABEL_RADIUS: f32 = 0.7;

/// Event emitted back to the host from pointer handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    /// A pie slice or bar category was clicked
    PrimaryClick {
        /// Index of the data point
        point_index: usize,
        /// Category label
        label: String,
    },
    /// A specific series primitive was clicked
    SeriesClick {
        /// Index into the series array
        series_index: usize,
        /// Index of the data point
        point_index: usize,
        /// Value of the clicked primitive
        value: f64,
    },
    /// The pointer entered a pie slice
    SliceHover {
        /// Index of the data point
        point_index: usize,
        /// Category label
        label: String,
        /// Share of the total
        fraction: f64,
    },
}

/// One chart instance.
#[derive(Debug)]
pub struct ChartEngine {
    dataset: Dataset,
    series: Vec<Series>,
    config: ChartConfig,
    width: f32,
    height: f32,
    viewport: Viewport,
    driver: AnimationDriver,
    arena: HitArena,
    tooltip: Option<TooltipLayout>,
    mounted: bool,
}

impl ChartEngine {
    /// Create an engine for the given inputs and canvas size.
    #[must_use]
    pub fn new(
        dataset: Dataset,
        series: Vec<Series>,
        config: ChartConfig,
        width: f32,
        height: f32,
    ) -> Self {
        let driver = if config.animate {
            AnimationDriver::new(config.animation_ms, config.easing)
        } else {
            AnimationDriver::disabled()
        };
        Self {
            dataset,
            series,
            config,
            width,
            height,
            viewport: Viewport::new(),
            driver,
            arena: HitArena::new(),
            tooltip: None,
            mounted: false,
        }
    }

    /// Mount the instance and start the enter transition.
    pub fn mount(&mut self, now_ms: f64) {
        self.mounted = true;
        self.driver.start(now_ms);
    }

    /// Replace the dataset and replay the transition.
    pub fn set_dataset(&mut self, dataset: Dataset, now_ms: f64) {
        self.dataset = dataset;
        self.tooltip = None;
        self.driver.reset(now_ms);
    }

    /// Replay the transition without changing data.
    pub fn refresh(&mut self, now_ms: f64) {
        self.driver.reset(now_ms);
    }

    /// Update the canvas size. Scales are derived per render, so only
    /// the pixel dimensions change; the numeric domain stays put.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Advance the animation to `now_ms`. Returns true while another
    /// frame is needed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.driver.tick(now_ms);
        self.driver.needs_frame()
    }

    /// Whether a frame should be scheduled.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.driver.needs_frame()
    }

    /// Current animation lifecycle state.
    #[must_use]
    pub fn animation_state(&self) -> AnimationState {
        self.driver.state()
    }

    /// Stop the instance: cancels the transition and invalidates all
    /// further pointer queries.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.driver.stop();
        self.arena.unmount();
        self.tooltip = None;
    }

    /// The currently placed tooltip, if the pointer rests on a primitive.
    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipLayout> {
        self.tooltip.as_ref()
    }

    /// Zoom/pan state.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Apply a wheel-zoom step. Ignored unless zoom is enabled.
    pub fn zoom_by(&mut self, factor: f32) {
        if self.config.enable_zoom {
            self.viewport.zoom_by(factor);
        }
    }

    /// Apply a drag-pan delta. Ignored unless zoom is enabled.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        if self.config.enable_zoom {
            self.viewport.pan_by(dx, dy);
        }
    }

    /// Legend rows for the current dataset and series.
    #[must_use]
    pub fn legend(&self) -> Vec<LegendEntry> {
        if self.config.show_legend {
            legend::aggregate(&self.dataset, &self.series, self.config.kind)
        } else {
            Vec::new()
        }
    }

    /// Plot area inside the margins.
    #[must_use]
    pub fn plot_area(&self) -> Rect {
        let m = &self.config.margins;
        Rect::new(
            m.left,
            m.top,
            (self.width - m.left - m.right).max(0.0),
            (self.height - m.top - m.bottom).max(0.0),
        )
    }

    /// Y scale for the current data, zero always in the domain.
    fn y_scale(&self, plot: &Rect) -> LinearScale {
        let stacked = self.config.bar_mode == BarMode::Stacked;
        let (y_min, y_max) = self.dataset.y_domain(&self.series, stacked);
        let range = if self.config.horizontal {
            plot.width
        } else {
            plot.height
        };
        LinearScale::new(y_min, y_max, f64::from(range))
    }

    /// Render one frame into the canvas.
    ///
    /// Repaints everything and rebuilds the hit arena, so regions always
    /// match the painted primitives. An empty dataset paints background
    /// and grid only.
    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        self.arena.clear();

        canvas.fill_rect(
            Rect::new(0.0, 0.0, self.width, self.height),
            self.config.background,
        );

        let plot = self.plot_area();
        if plot.size().is_empty() {
            return;
        }

        if self.config.show_grid && self.config.kind != ChartKind::Pie {
            self.paint_grid(canvas, &plot);
        }

        let transformed = !self.viewport.is_identity();
        if transformed {
            canvas.push_transform(self.viewport.to_transform());
        }

        if !self.dataset.is_empty() {
            match self.config.kind {
                ChartKind::Bar => self.paint_bars(canvas, &plot),
                ChartKind::Line => self.paint_line(canvas, &plot),
                ChartKind::Pie => self.paint_pie(canvas, &plot),
            }
        }

        if transformed {
            canvas.pop_transform();
        }

        if self.config.show_legend {
            self.paint_legend(canvas, &plot);
        }

        if let Some(tooltip) = &self.tooltip {
            Self::paint_tooltip(canvas, tooltip);
        }
    }

    fn paint_grid(&self, canvas: &mut dyn Canvas, plot: &Rect) {
        let grid_stroke = StrokeStyle::dashed(
            Color::rgb(0.85, 0.87, 0.9),
            1.0,
            vec![4.0, 4.0],
        );
        let scale = self.y_scale(plot);
        let divisions = self.config.grid_divisions.max(1);
        let label_color = Color::rgb(0.45, 0.47, 0.5);

        for i in 0..=divisions {
            let t = i as f32 / divisions as f32;
            let value = scale.from_pixel(f64::from(t) * scale.range_len);
            if self.config.horizontal {
                // The value axis runs along X here, so grid lines are
                // vertical and value labels sit under the plot; the left
                // edge belongs to the category names.
                let x = plot.x + t * plot.width;
                canvas.draw_line(
                    Point::new(x, plot.y),
                    Point::new(x, plot.bottom()),
                    grid_stroke.clone(),
                );
                canvas.draw_text(
                    tooltip::format_value(value),
                    Point::new(x, plot.bottom() + 14.0),
                    TextStyle {
                        size: 10.0,
                        color: label_color,
                        align: TextAlign::Center,
                    },
                );
            } else {
                let y = plot.bottom() - t * plot.height;
                canvas.draw_line(
                    Point::new(plot.x, y),
                    Point::new(plot.right(), y),
                    grid_stroke.clone(),
                );
                canvas.draw_text(
                    tooltip::format_value(value),
                    Point::new(plot.x - 6.0, y + 3.0),
                    TextStyle {
                        size: 10.0,
                        color: label_color,
                        align: TextAlign::Right,
                    },
                );
            }
        }
    }

    fn paint_bars(&mut self, canvas: &mut dyn Canvas, plot: &Rect) {
        if self.series.is_empty() {
            return;
        }
        match self.config.bar_mode {
            BarMode::Grouped => self.paint_grouped_bars(canvas, plot),
            BarMode::Stacked => self.paint_stacked_bars(canvas, plot),
        }
        self.paint_category_labels(canvas, plot);
    }

    fn paint_grouped_bars(&mut self, canvas: &mut dyn Canvas, plot: &Rect) {
        let scale = self.y_scale(plot);
        let px_per_unit = scale.px_per_unit();
        let progress = self.driver.eased_progress();
        let bands = vistra_core::BandScale::fit(
            self.dataset.len(),
            self.series.len(),
            f64::from(if self.config.horizontal {
                plot.height
            } else {
                plot.width
            }),
        );
        let baseline = scale.to_pixel(0.0);

        for (pi, point) in self.dataset.points().iter().enumerate() {
            for (si, series) in self.series.iter().enumerate() {
                let value = point.value(&series.key);
                let length = (value.abs() * px_per_unit * progress) as f32;
                let band = bands.band_offset(pi, si) as f32;
                let band_width = bands.band_width as f32;

                let rect = if self.config.horizontal {
                    let x = if value >= 0.0 {
                        plot.x + baseline as f32
                    } else {
                        plot.x + baseline as f32 - length
                    };
                    Rect::new(x, plot.y + band, length, band_width)
                } else {
                    let y = if value >= 0.0 {
                        plot.bottom() - baseline as f32 - length
                    } else {
                        plot.bottom() - baseline as f32
                    };
                    Rect::new(plot.x + band, y, band_width, length)
                };

                canvas.fill_rect(rect, self.config.palette.color(si));
                self.arena.push(HitRegion {
                    shape: HitShape::Rect(rect),
                    series_index: si,
                    point_index: pi,
                    value,
                });
            }
        }
    }

    fn paint_stacked_bars(&mut self, canvas: &mut dyn Canvas, plot: &Rect) {
        let scale = self.y_scale(plot);
        let px_per_unit = scale.px_per_unit();
        let progress = self.driver.eased_progress();
        let bands = vistra_core::BandScale::fit(
            self.dataset.len(),
            1,
            f64::from(if self.config.horizontal {
                plot.height
            } else {
                plot.width
            }),
        );
        let baseline = scale.to_pixel(0.0) as f32;

        for (pi, point) in self.dataset.points().iter().enumerate() {
            let band = bands.band_offset(pi, 0) as f32;
            let band_width = bands.band_width as f32;
            // Running offsets per sign; each segment's own length is
            // scaled by progress, so mid-transition the boundaries lag
            // while the total still grows linearly.
            let mut positive_offset = 0.0f32;
            let mut negative_offset = 0.0f32;

            // Stack order is series-array order; callers that reorder
            // series reorder the stack.
            for (si, series) in self.series.iter().enumerate() {
                let value = point.value(&series.key);
                let length = (value.abs() * px_per_unit * progress) as f32;
                let offset = if value >= 0.0 {
                    let o = positive_offset;
                    positive_offset += length;
                    o
                } else {
                    let o = negative_offset;
                    negative_offset += length;
                    o
                };

                let rect = if self.config.horizontal {
                    let x = if value >= 0.0 {
                        plot.x + baseline + offset
                    } else {
                        plot.x + baseline - offset - length
                    };
                    Rect::new(x, plot.y + band, length, band_width)
                } else {
                    let y = if value >= 0.0 {
                        plot.bottom() - baseline - offset - length
                    } else {
                        plot.bottom() - baseline + offset
                    };
                    Rect::new(plot.x + band, y, band_width, length)
                };

                canvas.fill_rect(rect, self.config.palette.color(si));
                self.arena.push(HitRegion {
                    shape: HitShape::Rect(rect),
                    series_index: si,
                    point_index: pi,
                    value,
                });
            }
        }
    }

    /// Pixel position of line point `i` of `n`; single points sit at the
    /// left edge because the `(n - 1)` denominator is guarded.
    fn line_x(plot: &Rect, i: usize, n: usize) -> f32 {
        let denom = (n.saturating_sub(1)).max(1) as f32;
        plot.x + plot.width * i as f32 / denom
    }

    fn paint_line(&mut self, canvas: &mut dyn Canvas, plot: &Rect) {
        let scale = self.y_scale(plot);
        let progress = self.driver.eased_progress();
        let n = self.dataset.len();
        let baseline_y = plot.bottom() - scale.to_pixel(0.0) as f32;

        for (si, series) in self.series.iter().enumerate() {
            let color = self.config.palette.color(si);
            let points: Vec<(Point, f64)> = self
                .dataset
                .points()
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let value = p.value(&series.key);
                    // Animate by growing each point up from the baseline.
                    let y = plot.bottom() - (scale.to_pixel(value * progress)) as f32;
                    (Point::new(Self::line_x(plot, i, n), y), value)
                })
                .collect();

            if points.len() >= 2 {
                let path: Vec<Point> = points.iter().map(|(p, _)| *p).collect();
                let path = if self.config.smooth_lines {
                    smooth_path(&path)
                } else {
                    path
                };

                if self.config.fill_area {
                    let mut fill = path.clone();
                    if let (Some(first), Some(last)) = (path.first(), path.last()) {
                        fill.push(Point::new(last.x, baseline_y));
                        fill.push(Point::new(first.x, baseline_y));
                    }
                    canvas.fill_polygon(fill, color.with_alpha(AREA_FILL_ALPHA));
                }

                canvas.draw_path(path, false, StrokeStyle::solid(color, self.config.line_width));
            }

            if self.config.show_points || points.len() == 1 {
                for (pi, (pt, value)) in points.iter().enumerate() {
                    canvas.fill_circle(*pt, self.config.point_radius, color);
                    self.arena.push(HitRegion {
                        shape: HitShape::Circle {
                            center: *pt,
                            // Hit radius is padded so markers are easy to hover.
                            radius: self.config.point_radius + 3.0,
                        },
                        series_index: si,
                        point_index: pi,
                        value: *value,
                    });
                }
            }
        }
        self.paint_category_labels(canvas, plot);
    }

    fn paint_pie(&mut self, canvas: &mut dyn Canvas, plot: &Rect) {
        let Some(first) = self.series.first() else {
            return;
        };
        let center = plot.center();
        let outer = plot.width.min(plot.height) / 2.0 * self.config.outer_radius_ratio;
        let slices = Slice::derive(
            self.dataset.points(),
            &first.key,
            self.config.start_angle,
            self.config.angle_span,
            self.config.pad_angle,
            self.driver.eased_progress(),
        );

        for (i, slice) in slices.iter().enumerate() {
            canvas.fill_arc(
                center,
                outer,
                to_canvas_radians(slice.start_angle),
                to_canvas_radians(slice.end_angle),
                self.config.palette.color(i),
            );
            self.arena.push(HitRegion {
                shape: HitShape::Slice {
                    center,
                    outer_radius: outer,
                    sweep: ArcSweep::new(slice.start_angle, slice.end_angle - slice.start_angle),
                },
                series_index: 0,
                point_index: i,
                value: slice.value,
            });
        }

        // Donut hole painted over the wedges.
        if self.config.inner_radius_ratio > 0.0 {
            canvas.fill_circle(
                center,
                outer * self.config.inner_radius_ratio,
                self.config.background,
            );
        }

        let label_style = TextStyle {
            size: 11.0,
            color: Color::WHITE,
            align: TextAlign::Center,
        };
        for slice in &slices {
            // Thin slices get no label.
            if slice.fraction < self.config.min_label_share {
                continue;
            }
            let sweep = ArcSweep::new(slice.start_angle, slice.end_angle - slice.start_angle);
            let pos = polar_point(center, outer * PIE_LABEL_RADIUS, sweep.mid());
            canvas.draw_text(
                format!("{:.0}%", slice.fraction * 100.0),
                pos,
                label_style.clone(),
            );
        }
    }

    fn paint_category_labels(&self, canvas: &mut dyn Canvas, plot: &Rect) {
        if self.config.horizontal {
            let bands = vistra_core::BandScale::fit(
                self.dataset.len(),
                match self.config.bar_mode {
                    BarMode::Grouped => self.series.len().max(1),
                    BarMode::Stacked => 1,
                },
                f64::from(plot.height),
            );
            let style = TextStyle {
                size: 10.0,
                color: Color::rgb(0.3, 0.32, 0.35),
                align: TextAlign::Right,
            };
            for (i, label) in self.dataset.labels().iter().enumerate() {
                let y = plot.y + bands.group_offset(i) as f32 + bands.group_stride() as f32 / 2.0;
                canvas.draw_text((*label).to_string(), Point::new(plot.x - 6.0, y), style.clone());
            }
        } else {
            let style = TextStyle {
                size: 10.0,
                color: Color::rgb(0.3, 0.32, 0.35),
                align: TextAlign::Center,
            };
            let n = self.dataset.len();
            for (i, label) in self.dataset.labels().iter().enumerate() {
                let x = match self.config.kind {
                    ChartKind::Line => Self::line_x(plot, i, n),
                    _ => {
                        let stride = plot.width / n.max(1) as f32;
                        plot.x + stride * (i as f32 + 0.5)
                    }
                };
                canvas.draw_text(
                    (*label).to_string(),
                    Point::new(x, plot.bottom() + 14.0),
                    style.clone(),
                );
            }
        }
    }

    fn paint_legend(&self, canvas: &mut dyn Canvas, plot: &Rect) {
        let entries = self.legend();
        let swatch = 8.0;
        let row_height = 16.0;
        let style = TextStyle {
            size: 10.0,
            color: Color::rgb(0.3, 0.32, 0.35),
            align: TextAlign::Left,
        };
        for (i, entry) in entries.iter().enumerate() {
            let y = plot.y + i as f32 * row_height;
            canvas.fill_rect(
                Rect::new(plot.right() - 90.0, y, swatch, swatch),
                self.config.palette.color(entry.color_index),
            );
            canvas.draw_text(
                entry.label.clone(),
                Point::new(plot.right() - 90.0 + swatch + 4.0, y + swatch),
                style.clone(),
            );
        }
    }

    fn paint_tooltip(canvas: &mut dyn Canvas, layout: &TooltipLayout) {
        canvas.fill_rect(layout.bounds, Color::new(0.1, 0.1, 0.12, 0.9));
        canvas.draw_text(
            layout.text.clone(),
            Point::new(
                layout.bounds.x + tooltip::PADDING,
                layout.bounds.bottom() - tooltip::PADDING,
            ),
            TextStyle {
                size: tooltip::FONT_SIZE,
                color: Color::WHITE,
                align: TextAlign::Left,
            },
        );
    }

    /// Handle pointer movement. Updates the tooltip and returns a hover
    /// event for pie slices. Queries after `unmount` return `None`.
    pub fn pointer_move(&mut self, position: Point) -> Option<ChartEvent> {
        if !self.mounted {
            return None;
        }
        let plot_position = self.viewport.untransform(position);
        let Some(hit) = self.arena.hit_test(plot_position).cloned() else {
            self.tooltip = None;
            return None;
        };

        if self.config.show_tooltip {
            self.tooltip = Some(self.place_tooltip(&hit));
        }

        match (self.config.kind, self.point_at(hit.point_index)) {
            (ChartKind::Pie, Some(point)) => {
                let total: f64 = self
                    .dataset
                    .points()
                    .iter()
                    .map(|p| {
                        self.series
                            .first()
                            .map_or(0.0, |s| p.value(&s.key).max(0.0))
                    })
                    .sum();
                Some(ChartEvent::SliceHover {
                    point_index: hit.point_index,
                    label: point.label.clone(),
                    fraction: if total > 0.0 { hit.value / total } else { 0.0 },
                })
            }
            _ => None,
        }
    }

    /// Handle the pointer leaving the canvas: the hovered primitive is
    /// forgotten and the tooltip disappears on the next render.
    pub fn pointer_leave(&mut self) {
        self.tooltip = None;
    }

    /// Handle a click. Bars and markers emit `SeriesClick`; pie slices
    /// emit `PrimaryClick`. Queries after `unmount` return `None`.
    #[must_use]
    pub fn click(&self, position: Point) -> Option<ChartEvent> {
        if !self.mounted {
            return None;
        }
        let plot_position = self.viewport.untransform(position);
        let hit = self.arena.hit_test(plot_position)?;
        match self.config.kind {
            ChartKind::Pie => self.point_at(hit.point_index).map(|p| ChartEvent::PrimaryClick {
                point_index: hit.point_index,
                label: p.label.clone(),
            }),
            _ => Some(ChartEvent::SeriesClick {
                series_index: hit.series_index,
                point_index: hit.point_index,
                value: hit.value,
            }),
        }
    }

    fn point_at(&self, index: usize) -> Option<&DataPoint> {
        self.dataset.points().get(index)
    }

    /// Render the current frame off-screen and return a PNG data URL.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`](crate::export::ExportError) when the canvas
    /// has a zero dimension or PNG encoding fails.
    pub fn to_data_url(&mut self) -> Result<String, crate::export::ExportError> {
        let mut canvas = vistra_core::RecordingCanvas::new();
        self.render(&mut canvas);
        crate::export::to_data_url(
            canvas.commands(),
            self.width.max(0.0) as u32,
            self.height.max(0.0) as u32,
        )
    }

    fn place_tooltip(&self, hit: &HitRegion) -> TooltipLayout {
        let plot = self.plot_area();
        let (anchor, text) = match &hit.shape {
            HitShape::Slice { .. } => {
                let label = self
                    .point_at(hit.point_index)
                    .map_or_else(String::new, |p| p.label.clone());
                let total: f64 = self
                    .dataset
                    .points()
                    .iter()
                    .map(|p| {
                        self.series
                            .first()
                            .map_or(0.0, |s| p.value(&s.key).max(0.0))
                    })
                    .sum();
                let share = if total > 0.0 {
                    Some(hit.value / total)
                } else {
                    None
                };
                // Pie tooltips anchor near the chart top.
                let anchor = Point::new(plot.center().x, plot.y + 20.0);
                (anchor, tooltip::format_label(&label, hit.value, share))
            }
            HitShape::Rect(rect) => {
                let name = self
                    .series
                    .get(hit.series_index)
                    .map_or("", |s| s.name.as_str());
                (
                    Point::new(rect.center().x, rect.y),
                    tooltip::format_label(name, hit.value, None),
                )
            }
            HitShape::Circle { center, .. } => {
                let name = self
                    .series
                    .get(hit.series_index)
                    .map_or("", |s| s.name.as_str());
                (*center, tooltip::format_label(name, hit.value, None))
            }
        };
        // Hit shapes live in plot space but the tooltip is painted after
        // the viewport group is closed, so the anchor maps to canvas space.
        let anchor = self.viewport.to_transform().apply(anchor);
        tooltip::place(
            anchor,
            text,
            self.config.margins.left,
            self.config.margins.top,
            plot.width,
        )
    }
}

/// Quadratic smoothing through midpoints: each original point acts as the
/// control of a curve between neighboring midpoints.
fn smooth_path(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(points.len() * SMOOTH_SEGMENTS);
    out.push(points[0]);
    for window in points.windows(3) {
        let m0 = window[0].midpoint(&window[1]);
        let control = window[1];
        let m1 = window[1].midpoint(&window[2]);
        for step in 1..=SMOOTH_SEGMENTS {
            let t = step as f32 / SMOOTH_SEGMENTS as f32;
            let a = m0.lerp(&control, t);
            let b = control.lerp(&m1, t);
            out.push(a.lerp(&b, t));
        }
    }
    out.push(points[points.len() - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vistra_core::{DrawCommand, RecordingCanvas};

    fn dataset() -> Dataset {
        Dataset::from_points(vec![
            DataPoint::new("Jan").with_value("clicks", 5.0),
            DataPoint::new("Feb").with_value("clicks", 3.0),
            DataPoint::new("Mar").with_value("clicks", 2.0),
        ])
    }

    fn series() -> Vec<Series> {
        vec![Series::new("clicks", "Clicks")]
    }

    fn mounted_engine(config: ChartConfig) -> ChartEngine {
        let mut engine = ChartEngine::new(dataset(), series(), config, 480.0, 360.0);
        engine.mount(0.0);
        engine.tick(10_000.0);
        engine
    }

    fn count_rects(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count()
    }

    fn bare(config: ChartConfig) -> ChartConfig {
        ChartConfig {
            show_grid: false,
            show_legend: false,
            ..config
        }
    }

    #[test]
    fn test_bar_render_emits_one_rect_per_value() {
        let mut engine = mounted_engine(bare(ChartConfig::default()));
        let mut canvas = RecordingCanvas::new();
        engine.render(&mut canvas);
        // Background plus three bars.
        assert_eq!(count_rects(canvas.commands()), 4);
    }

    #[test]
    fn test_empty_dataset_renders_chrome_only() {
        let config = ChartConfig {
            show_legend: false,
            ..ChartConfig::default()
        };
        let mut engine = ChartEngine::new(Dataset::new(), series(), config, 480.0, 360.0);
        engine.mount(0.0);
        let mut canvas = RecordingCanvas::new();
        engine.render(&mut canvas);
        // Background only, plus grid lines and labels; no bars.
        assert_eq!(count_rects(canvas.commands()), 1);
        let grid_lines = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Path { .. }))
            .count();
        assert!(grid_lines > 0);
    }

    #[test]
    fn test_single_point_line_renders_marker_only() {
        let ds = Dataset::from_points(vec![DataPoint::new("only").with_value("clicks", 7.0)]);
        let config = ChartConfig {
            animate: false,
            ..bare(ChartConfig::new(ChartKind::Line))
        };
        let mut engine = ChartEngine::new(ds, series(), config, 480.0, 360.0);
        engine.mount(0.0);
        let mut canvas = RecordingCanvas::new();
        engine.render(&mut canvas);
        let circles = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        let paths = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Path { .. }))
            .count();
        assert_eq!(circles, 1);
        assert_eq!(paths, 0);
    }

    #[test]
    fn test_pie_render_emits_arcs_and_regions() {
        let mut engine = mounted_engine(ChartConfig::new(ChartKind::Pie));
        let mut canvas = RecordingCanvas::new();
        engine.render(&mut canvas);
        let arcs = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Arc { .. }))
            .count();
        assert_eq!(arcs, 3);
    }

    #[test]
    fn test_bar_hit_and_click() {
        let config = ChartConfig {
            show_legend: false,
            ..ChartConfig::default()
        };
        let mut engine = mounted_engine(config);
        let mut canvas = RecordingCanvas::new();
        engine.render(&mut canvas);

        // Find a painted bar and click its top-left corner (inclusive).
        let bar = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { bounds, .. } if bounds.y > 0.0 => Some(*bounds),
                _ => None,
            })
            .next()
            .unwrap();
        let event = engine.click(Point::new(bar.x, bar.y)).unwrap();
        match event {
            ChartEvent::SeriesClick { series_index, .. } => assert_eq!(series_index, 0),
            other => panic!("expected SeriesClick, got {other:?}"),
        }
        // Just outside the bar misses.
        assert!(engine.click(Point::new(bar.x - 1.0, bar.y - 1.0)).is_none());
    }

    #[test]
    fn test_pie_hover_emits_slice_event_and_tooltip() {
        let mut engine = mounted_engine(ChartConfig::new(ChartKind::Pie));
        let mut canvas = RecordingCanvas::new();
        engine.render(&mut canvas);

        // First slice spans [0°, 180°): probe right of center.
        let center = engine.plot_area().center();
        let probe = Point::new(center.x + 30.0, center.y);
        let event = engine.pointer_move(probe).unwrap();
        match event {
            ChartEvent::SliceHover {
                point_index,
                label,
                fraction,
            } => {
                assert_eq!(point_index, 0);
                assert_eq!(label, "Jan");
                assert!((fraction - 0.5).abs() < 1e-9);
            }
            other => panic!("expected SliceHover, got {other:?}"),
        }
        let tooltip = engine.tooltip().unwrap();
        assert!(tooltip.text.contains("(50.0%)"));
    }

    #[test]
    fn test_unmount_invalidates_pointer_queries() {
        let mut engine = mounted_engine(ChartConfig::default());
        let mut canvas = RecordingCanvas::new();
        engine.render(&mut canvas);
        engine.unmount();
        assert!(engine.click(Point::new(100.0, 300.0)).is_none());
        assert!(engine.pointer_move(Point::new(100.0, 300.0)).is_none());
        assert!(!engine.needs_frame());
    }

    #[test]
    fn test_resize_keeps_domain() {
        let mut engine = mounted_engine(ChartConfig::default());
        let plot = engine.plot_area();
        let before = engine.y_scale(&plot);
        engine.resize(960.0, 720.0);
        let plot = engine.plot_area();
        let after = engine.y_scale(&plot);
        assert_eq!(before.domain_min, after.domain_min);
        assert_eq!(before.domain_max, after.domain_max);
        assert!(after.range_len > before.range_len);
    }

    #[test]
    fn test_zoom_ignored_when_disabled() {
        let mut engine = mounted_engine(ChartConfig::default());
        engine.zoom_by(2.0);
        assert_eq!(engine.viewport().zoom, 1.0);

        let config = ChartConfig {
            enable_zoom: true,
            ..ChartConfig::default()
        };
        let mut engine = mounted_engine(config);
        engine.zoom_by(4.0);
        assert_eq!(engine.viewport().zoom, 3.0);
    }

    #[test]
    fn test_stacked_animation_scales_segments_independently() {
        let ds = Dataset::from_points(vec![DataPoint::new("x")
            .with_value("a", 10.0)
            .with_value("b", 10.0)]);
        let series = vec![Series::new("a", "A"), Series::new("b", "B")];
        let config = ChartConfig {
            easing: vistra_core::Easing::Linear,
            ..bare(ChartConfig::stacked())
        };
        let mut engine = ChartEngine::new(ds, series, config, 480.0, 360.0);
        engine.mount(0.0);
        engine.tick(150.0); // half of the 300ms duration

        let mut canvas = RecordingCanvas::new();
        engine.render(&mut canvas);
        let bars: Vec<Rect> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { bounds, .. } if bounds.height < 360.0 => Some(*bounds),
                _ => None,
            })
            .collect();
        assert_eq!(bars.len(), 2);
        // Each segment is at half its settled height, so the stack total
        // is also at half height and segment heights are equal.
        assert!((bars[0].height - bars[1].height).abs() < 1e-3);
    }

    #[test]
    fn test_stack_order_follows_series_order() {
        let ds = Dataset::from_points(vec![DataPoint::new("x")
            .with_value("a", 4.0)
            .with_value("b", 2.0)]);
        let make = |order: Vec<Series>| {
            let config = bare(ChartConfig::stacked());
            let mut engine = ChartEngine::new(ds.clone(), order, config, 480.0, 360.0);
            engine.mount(0.0);
            engine.tick(10_000.0);
            let mut canvas = RecordingCanvas::new();
            engine.render(&mut canvas);
            canvas
                .commands()
                .iter()
                .filter_map(|c| match c {
                    DrawCommand::Rect { bounds, .. } if bounds.height < 360.0 => Some(*bounds),
                    _ => None,
                })
                .collect::<Vec<Rect>>()
        };
        let forward = make(vec![Series::new("a", "A"), Series::new("b", "B")]);
        let reversed = make(vec![Series::new("b", "B"), Series::new("a", "A")]);
        assert_eq!(forward.len(), 2);
        assert_eq!(reversed.len(), 2);
        // The first series in the array is painted first and sits on the
        // baseline in both runs.
        assert!(forward[0].bottom() > forward[1].bottom());
        assert!(reversed[0].bottom() > reversed[1].bottom());
        // The values differ (4 vs 2), so reversing the array flips which
        // segment height ends up on the baseline.
        assert!(forward[0].height > forward[1].height);
        assert!(reversed[0].height < reversed[1].height);
    }

    #[test]
    fn test_horizontal_grid_is_transposed() {
        let config = ChartConfig {
            show_legend: false,
            ..ChartConfig::horizontal()
        };
        let mut engine = mounted_engine(config);
        let mut canvas = RecordingCanvas::new();
        engine.render(&mut canvas);
        let plot = engine.plot_area();

        // Category names own the left edge; numeric grid labels sit under
        // the plot along the value axis.
        let left_labels = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { position, .. } if position.x < plot.x))
            .count();
        let bottom_labels = canvas
            .commands()
            .iter()
            .filter(
                |c| matches!(c, DrawCommand::Text { position, .. } if position.y > plot.bottom()),
            )
            .count();
        assert_eq!(left_labels, 3);
        assert_eq!(bottom_labels, engine.config.grid_divisions + 1);
    }

    #[test]
    fn test_tooltip_tracks_zoomed_primitive() {
        let config = ChartConfig {
            enable_zoom: true,
            ..bare(ChartConfig::default())
        };
        let mut engine = mounted_engine(config);
        let mut canvas = RecordingCanvas::new();
        engine.render(&mut canvas);
        let bar = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { bounds, .. } if bounds.width < 480.0 => Some(*bounds),
                _ => None,
            })
            .next()
            .unwrap();

        engine.zoom_by(2.0);
        let transform = engine.viewport().to_transform();
        assert!(engine.pointer_move(transform.apply(bar.center())).is_none());
        let tooltip = engine.tooltip().unwrap();
        // The box centers on the primitive's on-screen anchor, not its
        // plot-space position.
        let anchor = transform.apply(Point::new(bar.center().x, bar.y));
        assert!((tooltip.bounds.center().x - anchor.x).abs() < 1e-3);
    }

    #[test]
    fn test_smooth_path_preserves_endpoints() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 20.0),
            Point::new(20.0, 5.0),
        ];
        let smoothed = smooth_path(&points);
        assert_eq!(smoothed.first(), points.first());
        assert_eq!(smoothed.last(), points.last());
        assert!(smoothed.len() > points.len());
    }
}
