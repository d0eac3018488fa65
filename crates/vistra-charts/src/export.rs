//! PNG export.
//!
//! Recorded draw commands are software-rasterized to an RGBA surface,
//! encoded as PNG, and wrapped in a `data:image/png;base64,...` URL. Text
//! labels are skipped; export captures the chart geometry, not typography.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use std::io::Cursor;
use vistra_core::{Color, DrawCommand, Point, Rect, StrokeStyle, Transform2D};

/// Errors surfaced to the host from the export pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The surface has a zero dimension
    ZeroSized,
    /// PNG encoding failed
    Encode(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroSized => write!(f, "export surface has zero width or height"),
            Self::Encode(msg) => write!(f, "png encoding failed: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

/// Rasterize commands and encode a PNG.
///
/// # Errors
///
/// Returns [`ExportError::ZeroSized`] for an empty surface and
/// [`ExportError::Encode`] when the PNG encoder fails.
pub fn to_png_bytes(
    commands: &[DrawCommand],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::ZeroSized);
    }
    let mut surface = Surface::new(width, height);
    for command in commands {
        surface.draw(command, &Transform2D::identity());
    }

    let image = image::RgbaImage::from_raw(width, height, surface.pixels)
        .ok_or_else(|| ExportError::Encode("surface buffer size mismatch".into()))?;
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Rasterize commands and return a base64 PNG data URL.
///
/// # Errors
///
/// Same failure modes as [`to_png_bytes`].
pub fn to_data_url(
    commands: &[DrawCommand],
    width: u32,
    height: u32,
) -> Result<String, ExportError> {
    let bytes = to_png_bytes(commands, width, height)?;
    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD_NO_PAD.encode(bytes)
    ))
}

/// CPU raster surface with src-over blending.
struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    fn blend(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let src = color.to_rgba8();
        let sa = f32::from(src[3]) / 255.0;
        for c in 0..3 {
            let dst = f32::from(self.pixels[idx + c]);
            self.pixels[idx + c] = (f32::from(src[c]) * sa + dst * (1.0 - sa)).round() as u8;
        }
        let da = f32::from(self.pixels[idx + 3]) / 255.0;
        self.pixels[idx + 3] = ((sa + da * (1.0 - sa)) * 255.0).round() as u8;
    }

    /// Fill every pixel in `bounds` whose center satisfies `test`.
    fn fill_where(&mut self, bounds: Rect, color: Color, test: impl Fn(f32, f32) -> bool) {
        let x0 = bounds.x.floor() as i64;
        let y0 = bounds.y.floor() as i64;
        let x1 = bounds.right().ceil() as i64;
        let y1 = bounds.bottom().ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let cx = x as f32 + 0.5;
                let cy = y as f32 + 0.5;
                if test(cx, cy) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn draw(&mut self, command: &DrawCommand, transform: &Transform2D) {
        match command {
            DrawCommand::Rect {
                bounds,
                style,
                ..
            } => {
                let rect = transform_rect(transform, *bounds);
                if let Some(fill) = style.fill {
                    self.fill_where(rect, fill, |x, y| {
                        rect.contains_point(&Point::new(x, y))
                    });
                }
                if let Some(stroke) = &style.stroke {
                    self.stroke_segments(
                        &[
                            Point::new(rect.x, rect.y),
                            Point::new(rect.right(), rect.y),
                            Point::new(rect.right(), rect.bottom()),
                            Point::new(rect.x, rect.bottom()),
                            Point::new(rect.x, rect.y),
                        ],
                        stroke,
                    );
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                style,
            } => {
                let c = transform.apply(*center);
                let r = radius * scale_of(transform);
                let bbox = Rect::new(c.x - r, c.y - r, 2.0 * r, 2.0 * r);
                if let Some(fill) = style.fill {
                    self.fill_where(bbox, fill, |x, y| {
                        c.distance(&Point::new(x, y)) <= r
                    });
                }
                if let Some(stroke) = &style.stroke {
                    let half = stroke.width / 2.0;
                    let color = stroke.color;
                    let outer = Rect::new(
                        c.x - r - half,
                        c.y - r - half,
                        2.0 * (r + half),
                        2.0 * (r + half),
                    );
                    self.fill_where(outer, color, |x, y| {
                        (c.distance(&Point::new(x, y)) - r).abs() <= half
                    });
                }
            }
            DrawCommand::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                color,
            } => {
                let c = transform.apply(*center);
                let r = radius * scale_of(transform);
                let (start, end) = (*start_angle, *end_angle);
                let bbox = Rect::new(c.x - r, c.y - r, 2.0 * r, 2.0 * r);
                self.fill_where(bbox, *color, |x, y| {
                    let dx = x - c.x;
                    let dy = y - c.y;
                    if dx.hypot(dy) > r {
                        return false;
                    }
                    let mut angle = dy.atan2(dx);
                    while angle < start {
                        angle += std::f32::consts::TAU;
                    }
                    angle < end
                });
            }
            DrawCommand::Path { points, closed, style } => {
                let pts: Vec<Point> = points.iter().map(|p| transform.apply(*p)).collect();
                if *closed {
                    let mut looped = pts.clone();
                    if let Some(first) = pts.first() {
                        looped.push(*first);
                    }
                    self.stroke_segments(&looped, style);
                } else {
                    self.stroke_segments(&pts, style);
                }
            }
            DrawCommand::Polygon { points, color } => {
                let pts: Vec<Point> = points.iter().map(|p| transform.apply(*p)).collect();
                if pts.len() >= 3 {
                    let bbox = bounding_box(&pts);
                    self.fill_where(bbox, *color, |x, y| point_in_polygon(&pts, x, y));
                }
            }
            DrawCommand::Text { .. } => {}
            DrawCommand::Group {
                children,
                transform: inner,
            } => {
                let combined = inner.then(transform);
                for child in children {
                    self.draw(child, &combined);
                }
            }
        }
    }

    fn stroke_segments(&mut self, points: &[Point], style: &StrokeStyle) {
        let half = (style.width / 2.0).max(0.5);
        for segment in points.windows(2) {
            let (a, b) = (segment[0], segment[1]);
            let bbox = Rect::new(
                a.x.min(b.x) - half,
                a.y.min(b.y) - half,
                (a.x - b.x).abs() + 2.0 * half,
                (a.y - b.y).abs() + 2.0 * half,
            );
            let color = style.color;
            self.fill_where(bbox, color, |x, y| {
                distance_to_segment(Point::new(x, y), a, b) <= half
            });
        }
    }
}

fn scale_of(transform: &Transform2D) -> f32 {
    transform.matrix[0].hypot(transform.matrix[1])
}

fn transform_rect(transform: &Transform2D, rect: Rect) -> Rect {
    let a = transform.apply(Point::new(rect.x, rect.y));
    let b = transform.apply(Point::new(rect.right(), rect.bottom()));
    Rect::new(
        a.x.min(b.x),
        a.y.min(b.y),
        (b.x - a.x).abs(),
        (b.y - a.y).abs(),
    )
}

fn bounding_box(points: &[Point]) -> Rect {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance(&a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance(&Point::new(a.x + ab.x * t, a.y + ab.y * t))
}

/// Even-odd crossing test.
fn point_in_polygon(points: &[Point], x: f32, y: f32) -> bool {
    let mut inside = false;
    let n = points.len();
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > y) != (pj.y > y)
            && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use vistra_core::Color;

    fn pixel(bytes: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * width + x) * 4) as usize;
        [bytes[idx], bytes[idx + 1], bytes[idx + 2], bytes[idx + 3]]
    }

    fn rasterize(commands: &[DrawCommand], w: u32, h: u32) -> Vec<u8> {
        let mut surface = Surface::new(w, h);
        for c in commands {
            surface.draw(c, &Transform2D::identity());
        }
        surface.pixels
    }

    #[test]
    fn test_zero_size_is_an_error() {
        assert_eq!(to_png_bytes(&[], 0, 10), Err(ExportError::ZeroSized));
        assert_eq!(to_png_bytes(&[], 10, 0), Err(ExportError::ZeroSized));
    }

    #[test]
    fn test_data_url_prefix() {
        let commands = [DrawCommand::filled_rect(
            Rect::new(0.0, 0.0, 4.0, 4.0),
            Color::WHITE,
        )];
        let url = to_data_url(&commands, 4, 4).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > "data:image/png;base64,".len());
    }

    #[test]
    fn test_rect_fill_covers_interior() {
        let commands = [DrawCommand::filled_rect(
            Rect::new(2.0, 2.0, 4.0, 4.0),
            Color::BLACK,
        )];
        let pixels = rasterize(&commands, 10, 10);
        assert_eq!(pixel(&pixels, 10, 4, 4), [0, 0, 0, 255]);
        assert_eq!(pixel(&pixels, 10, 0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_circle_fill_respects_radius() {
        let commands = [DrawCommand::filled_circle(
            Point::new(10.0, 10.0),
            5.0,
            Color::BLACK,
        )];
        let pixels = rasterize(&commands, 20, 20);
        assert_eq!(pixel(&pixels, 20, 10, 10)[3], 255);
        assert_eq!(pixel(&pixels, 20, 1, 1)[3], 0);
    }

    #[test]
    fn test_group_transform_moves_geometry() {
        let commands = [DrawCommand::filled_rect(
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Color::BLACK,
        )
        .with_transform(Transform2D::translate(10.0, 10.0))];
        let pixels = rasterize(&commands, 20, 20);
        assert_eq!(pixel(&pixels, 20, 11, 11)[3], 255);
        assert_eq!(pixel(&pixels, 20, 1, 1)[3], 0);
    }

    #[test]
    fn test_png_bytes_have_signature() {
        let commands = [DrawCommand::filled_rect(
            Rect::new(0.0, 0.0, 4.0, 4.0),
            Color::WHITE,
        )];
        let bytes = to_png_bytes(&commands, 4, 4).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn test_polygon_fill() {
        let commands = [DrawCommand::Polygon {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            color: Color::BLACK,
        }];
        let pixels = rasterize(&commands, 12, 12);
        assert_eq!(pixel(&pixels, 12, 5, 5)[3], 255);
        assert_eq!(pixel(&pixels, 12, 11, 11)[3], 0);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ExportError::ZeroSized.to_string(),
            "export surface has zero width or height"
        );
    }
}
