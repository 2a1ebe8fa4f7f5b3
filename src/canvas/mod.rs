mod commands;
mod raster;

pub use commands::{CommandCanvas, DrawCommand};
pub use raster::RasterCanvas;

use crate::geometry::Point2;
use image::Rgba;

/// Paint for landmark points (filled, square cap)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub color: Rgba<u8>,
    pub stroke_width: f32,
}

/// Paint for skeleton and hull edges (stroke)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgba<u8>,
    pub stroke_width: f32,
}

/// Trait for draw targets
/// Coordinates are device pixels with the origin at the top-left
pub trait Canvas {
    /// Get the drawable area as (width, height)
    fn size(&self) -> (u32, u32);

    fn draw_point(&mut self, at: Point2, style: &PointStyle);

    fn draw_line(&mut self, from: Point2, to: Point2, style: &LineStyle);
}
