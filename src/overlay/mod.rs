mod renderer;
pub mod style;

pub use renderer::HandOverlay;
pub use style::OverlayStyle;

use crate::geometry::Point2;
use crate::landmarks::NormalizedLandmark;

/// Where the source imagery comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CaptureMode {
    #[default]
    Image,
    Video,
    /// Camera preview shown fill-start, so the frame is cropped to the view
    LiveStream,
}

/// How each detected hand is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DisplayMode {
    /// Landmarks plus the hand skeleton
    #[default]
    Original,
    /// Landmarks plus their convex hull
    ConvexHull,
}

/// Hand skeleton as landmark index pairs
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // Palm
    (0, 1),
    (1, 5),
    (5, 9),
    (9, 13),
    (13, 17),
    (0, 17),
    // Thumb
    (1, 2),
    (2, 3),
    (3, 4),
    // Index
    (5, 6),
    (6, 7),
    (7, 8),
    // Middle
    (9, 10),
    (10, 11),
    (11, 12),
    // Ring
    (13, 14),
    (14, 15),
    (15, 16),
    // Pinky
    (17, 18),
    (18, 19),
    (19, 20),
];

/// Scale that maps the source image onto the view
///
/// Static and recorded frames are fit inside the view. Live-stream frames
/// fill it, so the larger ratio is used.
pub fn scale_factor(
    view_width: u32,
    view_height: u32,
    image_width: u32,
    image_height: u32,
    capture_mode: CaptureMode,
) -> f32 {
    let sx = view_width as f32 / image_width as f32;
    let sy = view_height as f32 / image_height as f32;
    match capture_mode {
        CaptureMode::Image | CaptureMode::Video => sx.min(sy),
        CaptureMode::LiveStream => sx.max(sy),
    }
}

/// Map a normalized landmark to device pixels
pub fn to_display(
    landmark: &NormalizedLandmark,
    image_width: u32,
    image_height: u32,
    scale: f32,
) -> Point2 {
    Point2::new(
        landmark.x * image_width as f32 * scale,
        landmark.y * image_height as f32 * scale,
    )
}
