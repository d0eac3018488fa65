//! Angle math for pie and donut slices.
//!
//! Angles are degrees measured clockwise from the top of the circle
//! (12 o'clock), normalized to [0, 360). Draw commands consume radians;
//! `to_canvas_radians` does the conversion at the paint boundary.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Normalize an angle in degrees to [0, 360).
#[must_use]
pub fn normalize_deg(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Convert a chart angle (degrees clockwise from top) to canvas radians
/// (counterclockwise-from-east convention of the draw commands is not used;
/// the canvas measures clockwise from east, so top = -90°).
#[must_use]
pub fn to_canvas_radians(deg: f64) -> f32 {
    ((deg - 90.0).to_radians()) as f32
}

/// An angular sweep of a circle, `[start, end)` in normalized degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSweep {
    /// Start angle in degrees, [0, 360)
    pub start: f64,
    /// End angle in degrees; may exceed 360 for sweeps crossing the top
    pub end: f64,
}

impl ArcSweep {
    /// Create a sweep from a start angle and a sweep length in degrees.
    #[must_use]
    pub fn new(start: f64, sweep: f64) -> Self {
        let start = normalize_deg(start);
        Self {
            start,
            end: start + sweep.max(0.0),
        }
    }

    /// Sweep length in degrees.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }

    /// Angle at the middle of the sweep, normalized.
    #[must_use]
    pub fn mid(&self) -> f64 {
        normalize_deg(self.start + self.sweep() / 2.0)
    }

    /// Whether a normalized angle falls inside the sweep. Start is
    /// inclusive, end exclusive, and sweeps crossing 360 wrap correctly.
    #[must_use]
    pub fn contains(&self, angle: f64) -> bool {
        let a = normalize_deg(angle);
        if self.end <= 360.0 {
            a >= self.start && a < self.end
        } else {
            a >= self.start || a < self.end - 360.0
        }
    }
}

/// Point on a circle at `angle` degrees (clockwise from top) and `radius`
/// pixels from `center`.
#[must_use]
pub fn polar_point(center: Point, radius: f32, angle_deg: f64) -> Point {
    let rad = f64::from(to_canvas_radians(angle_deg));
    Point::new(
        center.x + radius * rad.cos() as f32,
        center.y + radius * rad.sin() as f32,
    )
}

/// Pointer position converted to (radius, angle-degrees-from-top) polar
/// form around `center`. The inverse of `polar_point`.
#[must_use]
pub fn to_polar(center: Point, point: Point) -> (f32, f64) {
    let dx = f64::from(point.x - center.x);
    let dy = f64::from(point.y - center.y);
    let radius = dx.hypot(dy) as f32;
    let angle = normalize_deg(dy.atan2(dx).to_degrees() + 90.0);
    (radius, angle)
}
