//! Chart configuration.
//!
//! Every knob is a named field with a documented default; presets are
//! plain constructors over the same struct, so a host can start from a
//! preset and override fields. The whole struct is serde-derived and can
//! ship as JSON.

use serde::{Deserialize, Serialize};
use vistra_core::{Color, Easing, Palette};

/// Which chart family to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartKind {
    /// Vertical or horizontal bars
    #[default]
    Bar,
    /// Polyline with optional markers and area fill
    Line,
    /// Pie or donut
    Pie,
}

/// How multiple bar series share a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BarMode {
    /// Series side by side within each category group
    #[default]
    Grouped,
    /// Series stacked by running offset, in series-array order
    Stacked,
}

/// Plot-area margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Right margin
    pub right: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
}

impl Margins {
    /// Uniform margins on all sides.
    #[must_use]
    pub const fn uniform(amount: f32) -> Self {
        Self {
            top: amount,
            right: amount,
            bottom: amount,
            left: amount,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

/// Full chart configuration with documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart family (default: bar)
    pub kind: ChartKind,
    /// Plot-area margins (default: 20/20/30/40)
    pub margins: Margins,
    /// Series color palette (default: the built-in categorical palette)
    pub palette: Palette,
    /// Canvas background color (default: white)
    pub background: Color,
    /// Draw horizontal grid lines (default: true)
    pub show_grid: bool,
    /// Number of grid divisions (default: 5)
    pub grid_divisions: usize,
    /// Compute legend entries (default: true)
    pub show_legend: bool,
    /// Show a tooltip on hover (default: true)
    pub show_tooltip: bool,
    /// Allow wheel zoom and drag pan (default: false)
    pub enable_zoom: bool,
    /// Animate enter/update transitions (default: true)
    pub animate: bool,
    /// Transition duration in milliseconds (default: 300)
    pub animation_ms: f64,
    /// Transition easing (default: ease-out)
    pub easing: Easing,
    /// Grouped vs stacked bars (default: grouped)
    pub bar_mode: BarMode,
    /// Swap axes so bars grow rightward (default: false)
    pub horizontal: bool,
    /// Quadratic smoothing for lines (default: false)
    pub smooth_lines: bool,
    /// Fill the area under a line to the baseline (default: false)
    pub fill_area: bool,
    /// Draw circular markers at line points (default: true)
    pub show_points: bool,
    /// Marker radius in pixels (default: 3)
    pub point_radius: f32,
    /// Line stroke width in pixels (default: 2)
    pub line_width: f32,
    /// Pie outer radius as a fraction of the plot's half-extent
    /// (default: 0.9)
    pub outer_radius_ratio: f32,
    /// Donut hole radius as a fraction of the outer radius; 0 = solid pie
    /// (default: 0)
    pub inner_radius_ratio: f32,
    /// Angle where the first slice begins, in degrees clockwise from the
    /// top (default: 0)
    pub start_angle: f64,
    /// Total angular span of the pie in degrees (default: 360)
    pub angle_span: f64,
    /// Gap between slices in degrees (default: 0)
    pub pad_angle: f64,
    /// Slices below this share get no percentage label (default: 0.05)
    pub min_label_share: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            margins: Margins::default(),
            palette: Palette::default(),
            background: Color::WHITE,
            show_grid: true,
            grid_divisions: 5,
            show_legend: true,
            show_tooltip: true,
            enable_zoom: false,
            animate: true,
            animation_ms: 300.0,
            easing: Easing::EaseOut,
            bar_mode: BarMode::Grouped,
            horizontal: false,
            smooth_lines: false,
            fill_area: false,
            show_points: true,
            point_radius: 3.0,
            line_width: 2.0,
            outer_radius_ratio: 0.9,
            inner_radius_ratio: 0.0,
            start_angle: 0.0,
            angle_span: 360.0,
            pad_angle: 0.0,
            min_label_share: 0.05,
        }
    }
}

impl ChartConfig {
    /// Default config for the given chart family.
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Compact chart for dashboard cards: tight margins, no grid or
    /// legend, fast transitions.
    #[must_use]
    pub fn mini(kind: ChartKind) -> Self {
        Self {
            kind,
            margins: Margins::uniform(8.0),
            show_grid: false,
            show_legend: false,
            animation_ms: 150.0,
            ..Self::default()
        }
    }

    /// Inline trend line: no chrome at all, no animation.
    #[must_use]
    pub fn sparkline() -> Self {
        Self {
            kind: ChartKind::Line,
            margins: Margins::uniform(2.0),
            show_grid: false,
            show_legend: false,
            show_tooltip: false,
            show_points: false,
            animate: false,
            line_width: 1.5,
            ..Self::default()
        }
    }

    /// Stacked bar chart.
    #[must_use]
    pub fn stacked() -> Self {
        Self {
            kind: ChartKind::Bar,
            bar_mode: BarMode::Stacked,
            ..Self::default()
        }
    }

    /// Horizontal bar chart; category labels get room on the left.
    #[must_use]
    pub fn horizontal() -> Self {
        Self {
            kind: ChartKind::Bar,
            horizontal: true,
            margins: Margins {
                left: 80.0,
                ..Margins::default()
            },
            ..Self::default()
        }
    }

    /// Donut chart with a 60% hole.
    #[must_use]
    pub fn donut() -> Self {
        Self {
            kind: ChartKind::Pie,
            inner_radius_ratio: 0.6,
            ..Self::default()
        }
    }

    /// Semicircular progress gauge: a donut sweeping left to right over
    /// the top half of the circle.
    #[must_use]
    pub fn progress() -> Self {
        Self {
            kind: ChartKind::Pie,
            inner_radius_ratio: 0.75,
            start_angle: 270.0,
            angle_span: 180.0,
            show_legend: false,
            ..Self::default()
        }
    }
}
