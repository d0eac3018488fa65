//! Chart data model: records, series, and derived pie slices.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One record on the category axis.
///
/// A point carries one numeric field per series key. A key absent from
/// `values` reads as 0.0, so sparse records render without special cases.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    /// Category label
    pub label: String,
    /// Numeric field per series key
    pub values: BTreeMap<String, f64>,
}

impl DataPoint {
    /// Create a point with no values.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: BTreeMap::new(),
        }
    }

    /// Add a value for a series key.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Value for a series key; missing keys read as 0.0.
    #[must_use]
    pub fn value(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }
}

/// One series: which field to read and what to call it.
///
/// Color is positional: series `i` gets palette color `i % palette_len`,
/// independent of the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Field key looked up in each [`DataPoint`]
    pub key: String,
    /// Display name for legends and tooltips
    pub name: String,
}

impl Series {
    /// Create a series.
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// Ordered collection of data points.
///
/// Point order defines category-axis order; the engine never sorts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an existing point list.
    #[must_use]
    pub fn from_points(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    /// Append a point.
    pub fn push(&mut self, point: DataPoint) {
        self.points.push(point);
    }

    /// The points in category order.
    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dataset has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Category labels in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// Numeric y-domain over the given series, always including zero.
    ///
    /// Grouped charts take the extent of individual values; stacked charts
    /// take the extent of per-point signed stack totals. Returns
    /// `(min(0, data_min), max(0, data_max))`, so `(0, 0)` for an empty
    /// dataset or empty series list.
    #[must_use]
    pub fn y_domain(&self, series: &[Series], stacked: bool) -> (f64, f64) {
        let mut min = 0.0f64;
        let mut max = 0.0f64;
        for point in &self.points {
            if stacked {
                let mut positive = 0.0;
                let mut negative = 0.0;
                for s in series {
                    let v = point.value(&s.key);
                    if v >= 0.0 {
                        positive += v;
                    } else {
                        negative += v;
                    }
                }
                min = min.min(negative);
                max = max.max(positive);
            } else {
                for s in series {
                    let v = point.value(&s.key);
                    min = min.min(v);
                    max = max.max(v);
                }
            }
        }
        (min, max)
    }
}

/// One pie slice derived from a data point. Angles are degrees clockwise
/// from the top, already scaled by animation progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    /// Category label of the source point
    pub label: String,
    /// Raw value (negative values are clamped to 0 before derivation)
    pub value: f64,
    /// Share of the total, in [0, 1]
    pub fraction: f64,
    /// Start angle in degrees
    pub start_angle: f64,
    /// End angle in degrees (start + sweep)
    pub end_angle: f64,
}

impl Slice {
    /// Derive slices for a pie chart.
    ///
    /// One slice per data point, reading `key` from each; values clamp to
    /// zero from below. The cursor begins at `start_angle` and start
    /// angles accumulate in point order; each slice's sweep is
    /// `fraction * (angle_span - n * pad_angle) * progress` and slices are
    /// separated by `pad_angle` degrees. A zero total yields no slices.
    #[must_use]
    pub fn derive(
        points: &[DataPoint],
        key: &str,
        start_angle: f64,
        angle_span: f64,
        pad_angle: f64,
        progress: f64,
    ) -> Vec<Self> {
        let values: Vec<f64> = points.iter().map(|p| p.value(key).max(0.0)).collect();
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return Vec::new();
        }

        let n = values.len() as f64;
        let sweep_budget = (angle_span - n * pad_angle).max(0.0);
        let progress = progress.clamp(0.0, 1.0);

        let mut slices = Vec::with_capacity(values.len());
        let mut cursor = start_angle;
        for (point, value) in points.iter().zip(values) {
            let fraction = value / total;
            let sweep = fraction * sweep_budget * progress;
            slices.push(Self {
                label: point.label.clone(),
                value,
                fraction,
                start_angle: cursor,
                end_angle: cursor + sweep,
            });
            cursor += sweep + pad_angle * progress;
        }
        slices
    }
}
