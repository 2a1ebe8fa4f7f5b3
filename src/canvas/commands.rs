use super::{Canvas, LineStyle, PointStyle};
use crate::geometry::Point2;

/// A single recorded draw primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Point { at: Point2, style: PointStyle },
    Line { from: Point2, to: Point2, style: LineStyle },
}

/// Canvas that records primitives instead of rasterizing them
///
/// Useful for hosts that forward draw calls to another renderer.
#[derive(Debug, Clone, Default)]
pub struct CommandCanvas {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl CommandCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Point { at, .. } => Some(*at),
            DrawCommand::Line { .. } => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            DrawCommand::Point { .. } => None,
        })
    }

    /// Drop everything recorded so far
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for CommandCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_point(&mut self, at: Point2, style: &PointStyle) {
        self.commands.push(DrawCommand::Point { at, style: *style });
    }

    fn draw_line(&mut self, from: Point2, to: Point2, style: &LineStyle) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            style: *style,
        });
    }
}
