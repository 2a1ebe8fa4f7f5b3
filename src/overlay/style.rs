use crate::canvas::{LineStyle, PointStyle};
use image::Rgba;

pub const LANDMARK_STROKE_WIDTH: f32 = 8.0;
pub const POINT_COLOR: Rgba<u8> = Rgba([255, 255, 0, 255]);
pub const LINE_COLOR: Rgba<u8> = Rgba([0, 127, 139, 255]);

/// Paints used by the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub point: PointStyle,
    pub line: LineStyle,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            point: PointStyle {
                color: POINT_COLOR,
                stroke_width: LANDMARK_STROKE_WIDTH,
            },
            line: LineStyle {
                color: LINE_COLOR,
                stroke_width: LANDMARK_STROKE_WIDTH,
            },
        }
    }
}

/// Parse a `#RRGGBB` or `RRGGBB` color into an opaque RGBA value
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>, String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected #RRGGBB, got '{}'", s));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|e| format!("invalid color '{}': {}", s, e))
    };
    Ok(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255]))
}
