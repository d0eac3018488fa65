//! The `Canvas` trait and the recording implementation.
//!
//! The chart engine never talks to a backend directly; it paints into a
//! `Canvas`. `RecordingCanvas` captures the resulting `DrawCommand` list,
//! which is what tests inspect and what the export pipeline rasterizes.

use crate::draw::{BoxStyle, DrawCommand, StrokeStyle, TextStyle, Transform2D};
use crate::{Color, Point, Rect};

/// Painting surface abstraction.
pub trait Canvas {
    /// Emit a draw command.
    fn push(&mut self, command: DrawCommand);

    /// Start a transformed group; commands until the matching
    /// `pop_transform` are children of the group.
    fn push_transform(&mut self, transform: Transform2D);

    /// Close the innermost transformed group.
    fn pop_transform(&mut self);

    /// Fill a rectangle.
    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.push(DrawCommand::filled_rect(bounds, color));
    }

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, bounds: Rect, stroke: StrokeStyle) {
        self.push(DrawCommand::stroked_rect(bounds, stroke));
    }

    /// Draw a straight line segment.
    fn draw_line(&mut self, from: Point, to: Point, stroke: StrokeStyle) {
        self.push(DrawCommand::line(from, to, stroke));
    }

    /// Stroke a polyline through `points`.
    fn draw_path(&mut self, points: Vec<Point>, closed: bool, stroke: StrokeStyle) {
        self.push(DrawCommand::Path {
            points,
            closed,
            style: stroke,
        });
    }

    /// Fill a polygon.
    fn fill_polygon(&mut self, points: Vec<Point>, color: Color) {
        self.push(DrawCommand::Polygon { points, color });
    }

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.push(DrawCommand::filled_circle(center, radius, color));
    }

    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: StrokeStyle) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            style: BoxStyle::stroke(stroke),
        });
    }

    /// Fill a circular wedge. Angles are radians.
    fn fill_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
    ) {
        self.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            color,
        });
    }

    /// Draw a text label.
    fn draw_text(&mut self, content: String, position: Point, style: TextStyle) {
        self.push(DrawCommand::Text {
            content,
            position,
            style,
        });
    }
}

/// Canvas that records commands instead of painting pixels.
///
/// `begin_frame` clears the previous frame, so a canvas reused across
/// renders holds exactly one frame's commands.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    // Open transform groups; commands land in the innermost one.
    group_stack: Vec<(Transform2D, Vec<DrawCommand>)>,
}

impl RecordingCanvas {
    /// Create an empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded commands, starting a fresh frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.group_stack.clear();
    }

    /// Recorded commands of the current frame.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, leaving the canvas empty.
    #[must_use]
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.group_stack.clear();
        std::mem::take(&mut self.commands)
    }

    /// Count commands, descending into groups.
    #[must_use]
    pub fn command_count(&self) -> usize {
        fn count(commands: &[DrawCommand]) -> usize {
            commands
                .iter()
                .map(|c| match c {
                    DrawCommand::Group { children, .. } => count(children),
                    _ => 1,
                })
                .sum()
        }
        count(&self.commands)
    }
}

impl Canvas for RecordingCanvas {
    fn push(&mut self, command: DrawCommand) {
        match self.group_stack.last_mut() {
            Some((_, children)) => children.push(command),
            None => self.commands.push(command),
        }
    }

    fn push_transform(&mut self, transform: Transform2D) {
        self.group_stack.push((transform, Vec::new()));
    }

    fn pop_transform(&mut self) {
        if let Some((transform, children)) = self.group_stack.pop() {
            self.push(DrawCommand::Group {
                children,
                transform,
            });
        }
    }
}
