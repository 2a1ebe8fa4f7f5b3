//! Hand-landmark overlay rendering
//!
//! Draws hand-landmark detection results on top of a camera or image view,
//! either as landmarks with the hand skeleton or as landmarks with their
//! convex hull.

pub mod canvas;
pub mod geometry;
pub mod landmarks;
pub mod overlay;

pub use canvas::{Canvas, CommandCanvas, RasterCanvas};
pub use geometry::{GeoHull, HullComputer, Point2};
pub use landmarks::{HandLandmarkerResult, JsonResultSource, LandmarkSource, NormalizedLandmark};
pub use overlay::{CaptureMode, DisplayMode, HandOverlay, OverlayStyle};
