use super::{Canvas, LineStyle, PointStyle};
use crate::geometry::Point2;
use image::{Rgba, RgbaImage};

/// Canvas backed by an RGBA image buffer
///
/// Primitives are clipped to the image bounds. Points use a square cap and
/// lines are stamped with a square brush of the stroke width.
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Draw on top of an existing image
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fill a `width`-sided square centred on (cx, cy)
    fn stamp(&mut self, cx: f32, cy: f32, width: f32, color: Rgba<u8>) {
        let half = width.max(1.0) / 2.0;
        let x0 = (cx - half).round() as i64;
        let y0 = (cy - half).round() as i64;
        let x1 = ((cx + half).round() as i64).max(x0 + 1);
        let y1 = ((cy + half).round() as i64).max(y0 + 1);

        let (w, h) = self.image.dimensions();
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(w as i64);
        let y1 = y1.min(h as i64);

        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn draw_point(&mut self, at: Point2, style: &PointStyle) {
        if !at.x.is_finite() || !at.y.is_finite() {
            return;
        }
        self.stamp(at.x, at.y, style.stroke_width, style.color);
    }

    fn draw_line(&mut self, from: Point2, to: Point2, style: &LineStyle) {
        if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
            return;
        }

        // Bresenham over the rounded endpoints
        let (mut x, mut y) = (from.x.round() as i64, from.y.round() as i64);
        let (x_end, y_end) = (to.x.round() as i64, to.y.round() as i64);
        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let sx = if x < x_end { 1 } else { -1 };
        let sy = if y < y_end { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp(x as f32, y as f32, style.stroke_width, style.color);
            if x == x_end && y == y_end {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn painted(canvas: &RasterCanvas) -> usize {
        canvas.image().pixels().filter(|p| **p != CLEAR).count()
    }

    #[test]
    fn point_fills_square_of_stroke_width() {
        let mut canvas = RasterCanvas::new(32, 32);
        let style = PointStyle {
            color: RED,
            stroke_width: 8.0,
        };
        canvas.draw_point(Point2::new(16.0, 16.0), &style);
        assert_eq!(painted(&canvas), 64);
        assert_eq!(*canvas.image().get_pixel(12, 12), RED);
        assert_eq!(*canvas.image().get_pixel(19, 19), RED);
        assert_eq!(*canvas.image().get_pixel(20, 20), CLEAR);
    }

    #[test]
    fn point_off_image_is_clipped() {
        let mut canvas = RasterCanvas::new(10, 10);
        let style = PointStyle {
            color: RED,
            stroke_width: 4.0,
        };
        canvas.draw_point(Point2::new(0.0, 0.0), &style);
        assert_eq!(painted(&canvas), 4);
        canvas.draw_point(Point2::new(-50.0, 500.0), &style);
        assert_eq!(painted(&canvas), 4);
    }

    #[test]
    fn horizontal_line_covers_span() {
        let mut canvas = RasterCanvas::new(20, 5);
        let style = LineStyle {
            color: RED,
            stroke_width: 1.0,
        };
        canvas.draw_line(Point2::new(2.0, 2.0), Point2::new(12.0, 2.0), &style);
        assert_eq!(painted(&canvas), 11);
        for x in 2..=12 {
            assert_eq!(*canvas.image().get_pixel(x, 2), RED);
        }
    }

    #[test]
    fn diagonal_line_reaches_both_ends() {
        let mut canvas = RasterCanvas::new(16, 16);
        let style = LineStyle {
            color: RED,
            stroke_width: 1.0,
        };
        canvas.draw_line(Point2::new(15.0, 0.0), Point2::new(0.0, 15.0), &style);
        assert_eq!(*canvas.image().get_pixel(15, 0), RED);
        assert_eq!(*canvas.image().get_pixel(0, 15), RED);
        assert_eq!(painted(&canvas), 16);
    }

    #[test]
    fn non_finite_coordinates_draw_nothing() {
        let mut canvas = RasterCanvas::new(8, 8);
        let style = LineStyle {
            color: RED,
            stroke_width: 2.0,
        };
        canvas.draw_line(Point2::new(f32::NAN, 0.0), Point2::new(4.0, 4.0), &style);
        canvas.draw_point(
            Point2::new(f32::INFINITY, 1.0),
            &PointStyle {
                color: RED,
                stroke_width: 2.0,
            },
        );
        assert_eq!(painted(&canvas), 0);
    }
}
