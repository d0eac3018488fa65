//! Core types for the Vistra chart engine.
//!
//! This crate provides the foundational, backend-agnostic pieces:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color and the categorical [`Palette`]
//! - Coordinate scales: [`LinearScale`], [`BandScale`]
//! - Angle math for pie slices: [`ArcSweep`], polar conversions
//! - The [`DrawCommand`] model with [`Canvas`] and [`RecordingCanvas`]
//! - The [`AnimationDriver`] for enter/update transitions

pub mod animation;
pub mod arc;
pub mod canvas;
mod color;
pub mod draw;
mod geometry;
pub mod scale;

pub use animation::{AnimationDriver, AnimationState, Easing};
pub use arc::{normalize_deg, polar_point, to_canvas_radians, to_polar, ArcSweep};
pub use canvas::{Canvas, RecordingCanvas};
pub use color::{Color, ColorParseError, Palette};
pub use draw::{BoxStyle, DrawCommand, StrokeStyle, TextAlign, TextStyle, Transform2D};
pub use geometry::{Point, Rect, Size};
pub use scale::{BandScale, LinearScale};
