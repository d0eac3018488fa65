//! Tooltip measurement and placement.
//!
//! Placement is a pure function of the anchor, the measured box, and the
//! plot bounds; the engine calls it from `pointer_move` and paints the
//! result as ordinary draw commands.

use serde::{Deserialize, Serialize};
use vistra_core::{Point, Rect, Size};

/// Inner padding around the tooltip text.
pub const PADDING: f32 = 6.0;
/// Tooltip font size in pixels.
pub const FONT_SIZE: f32 = 12.0;
/// Gap between the anchor and the tooltip box.
const ANCHOR_GAP: f32 = 8.0;
/// Approximate glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// A placed tooltip ready to paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipLayout {
    /// Box bounds in canvas pixels
    pub bounds: Rect,
    /// Display text
    pub text: String,
    /// True when the box flipped below the anchor
    pub below: bool,
}

/// Estimate the box size for a text line, padding included.
#[must_use]
pub fn measure(text: &str) -> Size {
    let width = text.chars().count() as f32 * FONT_SIZE * CHAR_WIDTH_FACTOR;
    Size::new(width + 2.0 * PADDING, FONT_SIZE + 2.0 * PADDING)
}

/// Format a tooltip label: `"<series>: <value>"`, with a percentage
/// suffix for pie slices.
#[must_use]
pub fn format_label(series_name: &str, value: f64, share: Option<f64>) -> String {
    let value_text = format_value(value);
    match share {
        Some(share) => format!(
            "{series_name}: {value_text} ({:.1}%)",
            share * 100.0
        ),
        None => format!("{series_name}: {value_text}"),
    }
}

/// Format a numeric value: integers without a decimal point, everything
/// else with two decimals.
#[must_use]
pub fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Place a tooltip near an anchor point.
///
/// The candidate box is centered above the anchor. X is clamped to
/// `[margin_left, margin_left + plot_width - box_width]` so the box never
/// leaves the plot horizontally; if the top placement would cross the top
/// margin, the box flips below the anchor instead.
#[must_use]
pub fn place(
    anchor: Point,
    text: String,
    margin_left: f32,
    margin_top: f32,
    plot_width: f32,
) -> TooltipLayout {
    let size = measure(&text);
    let max_x = margin_left + (plot_width - size.width).max(0.0);
    let x = (anchor.x - size.width / 2.0).clamp(margin_left, max_x);

    let above_y = anchor.y - size.height - ANCHOR_GAP;
    let (y, below) = if above_y < margin_top {
        (anchor.y + ANCHOR_GAP, true)
    } else {
        (above_y, false)
    };

    TooltipLayout {
        bounds: Rect::new(x, y, size.width, size.height),
        text,
        below,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_measure_grows_with_text() {
        let short = measure("a");
        let long = measure("a much longer label");
        assert!(long.width > short.width);
        assert_eq!(long.height, short.height);
    }

    #[test]
    fn test_format_label_plain() {
        assert_eq!(format_label("Clicks", 42.0, None), "Clicks: 42");
        assert_eq!(format_label("Revenue", 12.345, None), "Revenue: 12.35");
    }

    #[test]
    fn test_format_label_with_share() {
        assert_eq!(
            format_label("Organic", 50.0, Some(0.5)),
            "Organic: 50 (50.0%)"
        );
    }

    #[test]
    fn test_place_above_by_default() {
        let layout = place(Point::new(200.0, 150.0), "x: 1".into(), 40.0, 20.0, 400.0);
        assert!(!layout.below);
        assert!(layout.bounds.bottom() < 150.0);
    }

    #[test]
    fn test_place_flips_below_near_top() {
        let layout = place(Point::new(200.0, 25.0), "x: 1".into(), 40.0, 20.0, 400.0);
        assert!(layout.below);
        assert!(layout.bounds.y > 25.0);
    }

    #[test]
    fn test_place_clamps_left_edge() {
        let layout = place(Point::new(0.0, 150.0), "x: 1".into(), 40.0, 20.0, 400.0);
        assert_eq!(layout.bounds.x, 40.0);
    }

    #[test]
    fn test_place_clamps_right_edge() {
        let layout = place(
            Point::new(1000.0, 150.0),
            "series: 123".into(),
            40.0,
            20.0,
            400.0,
        );
        assert!((layout.bounds.right() - 440.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_tooltip_stays_within_plot_horizontally(
            anchor_x in -500.0f32..1500.0,
            anchor_y in 0.0f32..600.0,
            len in 1usize..40,
        ) {
            let text = "x".repeat(len);
            let layout = place(Point::new(anchor_x, anchor_y), text, 40.0, 20.0, 400.0);
            prop_assert!(layout.bounds.x >= 40.0);
            // Boxes wider than the plot pin to the left margin.
            if layout.bounds.width <= 400.0 {
                prop_assert!(layout.bounds.right() <= 440.0 + 1e-3);
            }
        }

        #[test]
        fn prop_placement_deterministic(
            anchor_x in 0.0f32..800.0,
            anchor_y in 0.0f32..600.0,
        ) {
            let a = place(Point::new(anchor_x, anchor_y), "v: 1".into(), 40.0, 20.0, 400.0);
            let b = place(Point::new(anchor_x, anchor_y), "v: 1".into(), 40.0, 20.0, 400.0);
            prop_assert_eq!(a, b);
        }
    }
}
