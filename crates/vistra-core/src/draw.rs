//! Draw commands.
//!
//! All chart painting reduces to these primitives. Commands are plain
//! serializable data, so a host can forward them to any raster or vector
//! backend, and tests can assert on them directly.

use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for paths and outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
    /// Dash pattern (empty = solid)
    pub dash: Vec<f32>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            dash: Vec::new(),
        }
    }
}

impl StrokeStyle {
    /// Solid stroke of the given color and width.
    #[must_use]
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    /// Dashed stroke, used for grid lines.
    #[must_use]
    pub fn dashed(color: Color, width: f32, dash: Vec<f32>) -> Self {
        Self { color, width, dash }
    }
}

/// Horizontal text anchoring relative to the position point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    /// Position is the left edge
    #[default]
    Left,
    /// Position is the horizontal center
    Center,
    /// Position is the right edge
    Right,
}

/// Text style for labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Horizontal alignment
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 12.0,
            color: Color::BLACK,
            align: TextAlign::Left,
        }
    }
}

/// Fill and/or stroke for box-like shapes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl BoxStyle {
    /// Create a box with only a fill.
    #[must_use]
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Create a box with only a stroke.
    #[must_use]
    pub fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }

    /// Add a stroke on top of the existing style.
    #[must_use]
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, e, f]
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    pub matrix: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Identity transform.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Translation transform.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Uniform or non-uniform scale transform.
    #[must_use]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            matrix: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Chain transforms: first apply self, then apply other.
    ///
    /// For point p: `a.then(b).apply(p)` == `b.apply(a.apply(p))`
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        let a = other.matrix;
        let b = self.matrix;
        Self {
            matrix: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Transform a point.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let m = self.matrix;
        Point::new(
            m[0] * point.x + m[2] * point.y + m[4],
            m[1] * point.x + m[3] * point.y + m[5],
        )
    }
}

/// Drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Stroke a polyline or closed outline
    Path {
        /// Points defining the path
        points: Vec<Point>,
        /// Whether the last point connects back to the first
        closed: bool,
        /// Stroke style
        style: StrokeStyle,
    },

    /// Fill a polygon
    Polygon {
        /// Polygon vertices in order
        points: Vec<Point>,
        /// Fill color
        color: Color,
    },

    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius in pixels (0 = square corners)
        radius: f32,
        /// Box style
        style: BoxStyle,
    },

    /// Draw a circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Box style
        style: BoxStyle,
    },

    /// Fill a circular wedge (pie slice)
    Arc {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Start angle in radians
        start_angle: f32,
        /// End angle in radians
        end_angle: f32,
        /// Fill color
        color: Color,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Anchor position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Group of commands with a shared transform
    Group {
        /// Child commands
        children: Vec<DrawCommand>,
        /// Transform to apply
        transform: Transform2D,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: 0.0,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a stroked rectangle.
    #[must_use]
    pub fn stroked_rect(bounds: Rect, stroke: StrokeStyle) -> Self {
        Self::Rect {
            bounds,
            radius: 0.0,
            style: BoxStyle::stroke(stroke),
        }
    }

    /// Create a filled circle.
    #[must_use]
    pub fn filled_circle(center: Point, radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a line between two points.
    #[must_use]
    pub fn line(from: Point, to: Point, style: StrokeStyle) -> Self {
        Self::Path {
            points: vec![from, to],
            closed: false,
            style,
        }
    }

    /// Wrap in a group with a transform.
    #[must_use]
    pub fn with_transform(self, transform: Transform2D) -> Self {
        Self::Group {
            children: vec![self],
            transform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_style_default() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.width, 1.0);
        assert!(style.dash.is_empty());
    }

    #[test]
    fn test_box_style_constructors() {
        let fill = BoxStyle::fill(Color::WHITE);
        assert_eq!(fill.fill, Some(Color::WHITE));
        assert!(fill.stroke.is_none());

        let stroke = BoxStyle::stroke(StrokeStyle::solid(Color::BLACK, 2.0));
        assert!(stroke.fill.is_none());
        assert!(stroke.stroke.is_some());
    }

    #[test]
    fn test_transform_translate() {
        let t = Transform2D::translate(10.0, 20.0);
        assert_eq!(t.apply(Point::ORIGIN), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_transform_scale() {
        let t = Transform2D::scale(2.0, 3.0);
        assert_eq!(t.apply(Point::new(5.0, 10.0)), Point::new(10.0, 30.0));
    }

    #[test]
    fn test_transform_chain() {
        let t1 = Transform2D::translate(10.0, 0.0);
        let t2 = Transform2D::scale(2.0, 2.0);
        let p = t1.then(&t2).apply(Point::ORIGIN);
        assert_eq!(p, Point::new(20.0, 0.0));
    }

    #[test]
    fn test_filled_rect_helper() {
        let cmd = DrawCommand::filled_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::WHITE);
        match cmd {
            DrawCommand::Rect { bounds, style, .. } => {
                assert_eq!(bounds.width, 100.0);
                assert_eq!(style.fill, Some(Color::WHITE));
            }
            _ => panic!("expected Rect command"),
        }
    }

    #[test]
    fn test_line_helper() {
        let cmd = DrawCommand::line(
            Point::ORIGIN,
            Point::new(100.0, 100.0),
            StrokeStyle::default(),
        );
        match cmd {
            DrawCommand::Path { points, closed, .. } => {
                assert_eq!(points.len(), 2);
                assert!(!closed);
            }
            _ => panic!("expected Path command"),
        }
    }

    #[test]
    fn test_with_transform_wraps_in_group() {
        let cmd = DrawCommand::filled_circle(Point::ORIGIN, 5.0, Color::BLACK)
            .with_transform(Transform2D::translate(5.0, 5.0));
        match cmd {
            DrawCommand::Group {
                children,
                transform,
            } => {
                assert_eq!(children.len(), 1);
                assert_eq!(transform.matrix[4], 5.0);
            }
            _ => panic!("expected Group command"),
        }
    }

    #[test]
    fn test_commands_serialize() {
        let cmd = DrawCommand::Arc {
            center: Point::new(50.0, 50.0),
            radius: 40.0,
            start_angle: 0.0,
            end_angle: std::f32::consts::PI,
            color: Color::BLACK,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }
}
