use super::{HullComputer, Point2};
use geo::{ConvexHull, MultiPoint};

/// Convex hull backed by the `geo` crate
///
/// Hull vertices come back counter-clockwise (y-up) and are mapped to the
/// first input index carrying the same coordinates. Non-finite points are
/// never part of the hull.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoHull;

impl HullComputer for GeoHull {
    fn convex_hull(&self, points: &[Point2]) -> Vec<usize> {
        let finite: Vec<(f64, f64)> = points
            .iter()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .map(|p| (p.x as f64, p.y as f64))
            .collect();

        match finite.len() {
            0 => return Vec::new(),
            1 => return index_of(points, finite[0]).into_iter().collect(),
            _ => {}
        }

        let polygon = MultiPoint::from(finite).convex_hull();
        let mut ring: Vec<(f64, f64)> = polygon.exterior().coords().map(|c| (c.x, c.y)).collect();

        // Exterior rings are closed
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        ring.dedup();

        let mut hull: Vec<usize> = Vec::with_capacity(ring.len());
        for coord in ring {
            if let Some(i) = index_of(points, coord) {
                if !hull.contains(&i) {
                    hull.push(i);
                }
            }
        }

        tracing::trace!("Convex hull: {} of {} points", hull.len(), points.len());
        hull
    }
}

fn index_of(points: &[Point2], (x, y): (f64, f64)) -> Option<usize> {
    points
        .iter()
        .position(|p| p.x as f64 == x && p.y as f64 == y)
}
