//! Legend aggregation.

use crate::config::ChartKind;
use crate::data::{Dataset, Series};
use serde::{Deserialize, Serialize};

/// One legend row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Display label: series name (bar/line) or category label (pie)
    pub label: String,
    /// Palette index of the swatch
    pub color_index: usize,
    /// Aggregate value: sum (bar), mean (line) or slice value (pie)
    pub value: f64,
    /// Share of the total; pie only
    pub share: Option<f64>,
}

/// Compute legend entries for the current dataset.
///
/// Bar charts get per-series sums, line charts per-series means, pie
/// charts one entry per data point with its value and share of the
/// total. Missing fields count as 0. Entries follow series order
/// (bar/line) or point order (pie).
#[must_use]
pub fn aggregate(dataset: &Dataset, series: &[Series], kind: ChartKind) -> Vec<LegendEntry> {
    match kind {
        ChartKind::Bar => series
            .iter()
            .enumerate()
            .map(|(i, s)| LegendEntry {
                label: s.name.clone(),
                color_index: i,
                value: dataset.points().iter().map(|p| p.value(&s.key)).sum(),
                share: None,
            })
            .collect(),
        ChartKind::Line => series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let sum: f64 = dataset.points().iter().map(|p| p.value(&s.key)).sum();
                let count = dataset.len().max(1) as f64;
                LegendEntry {
                    label: s.name.clone(),
                    color_index: i,
                    value: sum / count,
                    share: None,
                }
            })
            .collect(),
        ChartKind::Pie => {
            let Some(first) = series.first() else {
                return Vec::new();
            };
            let values: Vec<f64> = dataset
                .points()
                .iter()
                .map(|p| p.value(&first.key).max(0.0))
                .collect();
            let total: f64 = values.iter().sum();
            dataset
                .points()
                .iter()
                .zip(values)
                .enumerate()
                .map(|(i, (point, value))| LegendEntry {
                    label: point.label.clone(),
                    color_index: i,
                    value,
                    share: if total > 0.0 {
                        Some(value / total)
                    } else {
                        None
                    },
                })
                .collect()
        }
    }
}
