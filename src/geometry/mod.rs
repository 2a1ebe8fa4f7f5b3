mod hull;

pub use hull::GeoHull;

/// A point in display (device pixel) space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Trait for convex hull computation
/// Allows swapping the geometry backend without touching the overlay
pub trait HullComputer {
    /// Compute the convex hull of a point set
    ///
    /// # Returns
    /// * Indices into `points`, ordered around the hull
    fn convex_hull(&self, points: &[Point2]) -> Vec<usize>;
}

impl<H: HullComputer + ?Sized> HullComputer for Box<H> {
    fn convex_hull(&self, points: &[Point2]) -> Vec<usize> {
        (**self).convex_hull(points)
    }
}
