//! Pointer hit-testing.
//!
//! Each chart instance owns a [`HitArena`]. The render pass clears it and
//! repopulates it with one region per visible primitive, so regions never
//! leak between instances or outlive the frame they were captured in.

use serde::{Deserialize, Serialize};
use vistra_core::{to_polar, ArcSweep, Point, Rect};

/// Geometric footprint of one hoverable primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HitShape {
    /// A bar (or stacked segment); edges are inclusive
    Rect(Rect),
    /// A line marker, hit within `radius` of `center`
    Circle {
        /// Marker center
        center: Point,
        /// Hit radius in pixels
        radius: f32,
    },
    /// A pie slice, hit when the pointer's polar form falls inside the
    /// sweep at a radius no greater than `outer_radius`
    Slice {
        /// Pie center
        center: Point,
        /// Outer radius in pixels
        outer_radius: f32,
        /// Angular sweep in degrees
        sweep: ArcSweep,
    },
}

impl HitShape {
    /// Whether the pointer position falls inside this shape.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Self::Rect(rect) => rect.contains_point(&point),
            Self::Circle { center, radius } => center.distance(&point) <= *radius,
            Self::Slice {
                center,
                outer_radius,
                sweep,
            } => {
                let (radius, angle) = to_polar(*center, point);
                radius <= *outer_radius && sweep.contains(angle)
            }
        }
    }
}

/// One hoverable primitive with its data identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRegion {
    /// Footprint tested against the pointer
    pub shape: HitShape,
    /// Index into the series array (0 for pies)
    pub series_index: usize,
    /// Index into the dataset's point order
    pub point_index: usize,
    /// Value of the primitive, for tooltip text
    pub value: f64,
}

/// Per-instance region storage, rebuilt every render pass.
#[derive(Debug, Clone, Default)]
pub struct HitArena {
    regions: Vec<HitRegion>,
    unmounted: bool,
}

impl HitArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all regions at the start of a render pass.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Capture a region during the render pass.
    pub fn push(&mut self, region: HitRegion) {
        if !self.unmounted {
            self.regions.push(region);
        }
    }

    /// Number of captured regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether no regions are captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Find the primitive under the pointer, if any.
    ///
    /// Later-painted primitives sit on top, so the scan runs in reverse
    /// paint order and returns the first match. The same pointer position
    /// always yields the same region. After `unmount` every query
    /// returns `None`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&HitRegion> {
        if self.unmounted {
            return None;
        }
        self.regions.iter().rev().find(|r| r.shape.contains(point))
    }

    /// Invalidate the arena. Queries arriving after the chart is torn
    /// down are answered with `None` instead of stale regions.
    pub fn unmount(&mut self) {
        self.regions.clear();
        self.unmounted = true;
    }
}
