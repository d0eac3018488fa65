//! Presentation viewport: zoom and pan.
//!
//! The viewport never touches data or scale domains; it becomes a single
//! transform group wrapped around the painted primitives.

use serde::{Deserialize, Serialize};
use vistra_core::{Point, Transform2D};

/// Minimum zoom factor.
pub const MIN_ZOOM: f32 = 0.5;
/// Maximum zoom factor.
pub const MAX_ZOOM: f32 = 3.0;

/// Zoom and pan state for one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`
    pub zoom: f32,
    /// Horizontal pan offset in pixels
    pub pan_x: f32,
    /// Vertical pan offset in pixels
    pub pan_y: f32,
}

impl Viewport {
    /// Identity viewport: zoom 1, no pan.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Set the zoom factor, clamping into the allowed range.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Multiply the current zoom by `factor` (wheel steps), clamped.
    pub fn zoom_by(&mut self, factor: f32) {
        self.set_zoom(self.zoom * factor);
    }

    /// Shift the pan offset by a pointer drag delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Reset to the identity viewport.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether this viewport changes anything.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.zoom == 1.0 && self.pan_x == 0.0 && self.pan_y == 0.0
    }

    /// The transform applied around the plot's draw commands: pan first,
    /// then scale about the origin.
    #[must_use]
    pub fn to_transform(&self) -> Transform2D {
        Transform2D::translate(self.pan_x, self.pan_y)
            .then(&Transform2D::scale(self.zoom, self.zoom))
    }

    /// Map a canvas-space pointer position back into plot space, so hit
    /// regions captured before the viewport transform still line up.
    #[must_use]
    pub fn untransform(&self, point: Point) -> Point {
        Point::new(
            point.x / self.zoom - self.pan_x,
            point.y / self.zoom - self.pan_y,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
