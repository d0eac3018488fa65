//! Coordinate scales mapping data domains to pixel ranges.
//!
//! Scales are stateless value types: the same scale applied to the same
//! value always yields the same pixel, and `to_pixel`/`from_pixel` are
//! inverses over the live domain.

use serde::{Deserialize, Serialize};

/// Linear mapping from a numeric domain `[domain_min, domain_max]` onto a
/// pixel range `[0, range_len]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    /// Lower bound of the data domain
    pub domain_min: f64,
    /// Upper bound of the data domain
    pub domain_max: f64,
    /// Length of the pixel range
    pub range_len: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    #[must_use]
    pub const fn new(domain_min: f64, domain_max: f64, range_len: f64) -> Self {
        Self {
            domain_min,
            domain_max,
            range_len,
        }
    }

    /// Domain span used as the divisor. A collapsed domain substitutes 1.0
    /// so the scale stays total and never divides by zero.
    fn span(&self) -> f64 {
        let span = self.domain_max - self.domain_min;
        if span == 0.0 {
            1.0
        } else {
            span
        }
    }

    /// Map a domain value to a pixel offset within the range.
    #[must_use]
    pub fn to_pixel(&self, value: f64) -> f64 {
        (value - self.domain_min) / self.span() * self.range_len
    }

    /// Map a pixel offset back to a domain value.
    #[must_use]
    pub fn from_pixel(&self, px: f64) -> f64 {
        if self.range_len == 0.0 {
            self.domain_min
        } else {
            px / self.range_len * self.span() + self.domain_min
        }
    }

    /// Pixels per domain unit.
    #[must_use]
    pub fn px_per_unit(&self) -> f64 {
        self.range_len / self.span()
    }
}

/// Categorical band layout for grouped bars.
///
/// Each category occupies a group of `bands_per_group` bands; offsets are
/// measured from the left edge of the plot area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    /// Number of bands (series) per category group
    pub bands_per_group: usize,
    /// Width of one band in pixels
    pub band_width: f64,
    /// Gap between bands within a group
    pub band_spacing: f64,
    /// Gap between consecutive groups
    pub group_spacing: f64,
}

impl BandScale {
    /// Create a new band scale. A zero `bands_per_group` is treated as one
    /// band so the stride stays positive.
    #[must_use]
    pub fn new(
        bands_per_group: usize,
        band_width: f64,
        band_spacing: f64,
        group_spacing: f64,
    ) -> Self {
        Self {
            bands_per_group: bands_per_group.max(1),
            band_width,
            band_spacing,
            group_spacing,
        }
    }

    /// Total width of one group including its trailing gap.
    #[must_use]
    pub fn group_stride(&self) -> f64 {
        let n = self.bands_per_group as f64;
        n * self.band_width + (n - 1.0) * self.band_spacing + self.group_spacing
    }

    /// Pixel offset of the first band of category `group`.
    #[must_use]
    pub fn group_offset(&self, group: usize) -> f64 {
        self.group_spacing / 2.0 + group as f64 * self.group_stride()
    }

    /// Pixel offset of band `band` within category `group`.
    #[must_use]
    pub fn band_offset(&self, group: usize, band: usize) -> f64 {
        self.group_offset(group) + band as f64 * (self.band_width + self.band_spacing)
    }

    /// Total width needed for `groups` categories.
    #[must_use]
    pub fn total_width(&self, groups: usize) -> f64 {
        groups as f64 * self.group_stride()
    }

    /// Derive a band scale that fits `groups` categories with
    /// `bands_per_group` bands into `range_len` pixels.
    ///
    /// Bands take 70% of each group's width, the rest is spacing.
    #[must_use]
    pub fn fit(groups: usize, bands_per_group: usize, range_len: f64) -> Self {
        let groups = groups.max(1) as f64;
        let bands = bands_per_group.max(1) as f64;
        let stride = range_len / groups;
        let band_width = stride * 0.7 / bands;
        let band_spacing = if bands_per_group > 1 {
            stride * 0.1 / (bands - 1.0)
        } else {
            0.0
        };
        let group_spacing = stride - bands * band_width - (bands - 1.0) * band_spacing;
        Self::new(bands_per_group, band_width, band_spacing, group_spacing)
    }
}
