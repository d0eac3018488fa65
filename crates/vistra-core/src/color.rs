//! Color representation and the categorical series palette.

use serde::{Deserialize, Serialize};

/// RGBA color with components in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Create a new color, clamping components to [0.0, 1.0].
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB components.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Copy of this color with a different alpha.
    #[must_use]
    pub fn with_alpha(&self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Parse a hex color string (e.g., "#ff6b35" or "ff6b35").
    ///
    /// Supports 6-character RGB and 8-character RGBA formats.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        fn channel(hex: &str, at: usize) -> Result<f32, ColorParseError> {
            u8::from_str_radix(&hex[at..at + 2], 16)
                .map(|v| f32::from(v) / 255.0)
                .map_err(|_| ColorParseError::InvalidHex)
        }

        let hex = hex.trim_start_matches('#');
        match hex.len() {
            6 => Ok(Self::rgb(channel(hex, 0)?, channel(hex, 2)?, channel(hex, 4)?)),
            8 => Ok(Self::new(
                channel(hex, 0)?,
                channel(hex, 2)?,
                channel(hex, 4)?,
                channel(hex, 6)?,
            )),
            _ => Err(ColorParseError::InvalidLength),
        }
    }

    /// Convert to hex string (RGB only).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }

    /// Convert to packed 8-bit RGBA, the pixel format of the export surface.
    #[must_use]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    // Common colors
    /// Black color
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// White color
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    /// Transparent color
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Invalid hex characters
    InvalidHex,
    /// Invalid string length
    InvalidLength,
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHex => write!(f, "invalid hex characters"),
            Self::InvalidLength => write!(f, "invalid hex string length (expected 6 or 8)"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// Categorical palette assigning one color per series.
///
/// Series `i` always gets `colors[i % colors.len()]`, so color assignment
/// is stable across re-renders and dataset updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Create a palette from an explicit color list.
    ///
    /// An empty list falls back to the default palette.
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    /// Color for the series at `index`, wrapping around the palette.
    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Number of distinct colors before wrapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; empty palettes collapse to the default in `new`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::rgb(0.204, 0.443, 0.851), // blue
                Color::rgb(0.906, 0.435, 0.318), // coral
                Color::rgb(0.180, 0.667, 0.506), // green
                Color::rgb(0.949, 0.722, 0.204), // amber
                Color::rgb(0.557, 0.404, 0.816), // purple
                Color::rgb(0.851, 0.373, 0.584), // pink
                Color::rgb(0.306, 0.702, 0.780), // teal
                Color::rgb(0.608, 0.612, 0.627), // gray
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_rgb() {
        let c = Color::from_hex("#ff6b35").unwrap();
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 107.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 53.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_from_hex_rgba() {
        let c = Color::from_hex("00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_hex_invalid() {
        assert_eq!(Color::from_hex("#zzz"), Err(ColorParseError::InvalidLength));
        assert_eq!(
            Color::from_hex("zzzzzz"),
            Err(ColorParseError::InvalidHex)
        );
    }

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex("#3471d9").unwrap();
        assert_eq!(c.to_hex(), "#3471d9");
    }

    #[test]
    fn test_to_rgba8() {
        assert_eq!(Color::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::TRANSPARENT.to_rgba8(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn test_palette_wraps() {
        let p = Palette::default();
        assert_eq!(p.color(0), p.color(p.len()));
        assert_eq!(p.color(3), p.color(3 + 2 * p.len()));
    }

    #[test]
    fn test_empty_palette_falls_back_to_default() {
        let p = Palette::new(vec![]);
        assert_eq!(p.len(), Palette::default().len());
    }

    #[test]
    fn test_color_parse_error_display() {
        assert_eq!(
            ColorParseError::InvalidHex.to_string(),
            "invalid hex characters"
        );
    }
}
