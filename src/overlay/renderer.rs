use super::style::OverlayStyle;
use super::{scale_factor, to_display, CaptureMode, DisplayMode, HAND_CONNECTIONS};
use crate::canvas::Canvas;
use crate::geometry::{GeoHull, HullComputer, Point2};
use crate::landmarks::HandLandmarkerResult;

/// Overlay that draws hand landmarks on top of a camera or image view
///
/// The host feeds results through [`HandOverlay::update`] and calls
/// [`HandOverlay::render`] whenever [`HandOverlay::take_redraw`] reports a
/// pending request.
pub struct HandOverlay<H = GeoHull> {
    hull: H,
    view_width: u32,
    view_height: u32,

    results: Option<HandLandmarkerResult>,
    image_width: u32,
    image_height: u32,
    scale_factor: f32,
    capture_mode: CaptureMode,
    display_mode: DisplayMode,

    // Restored by clear()
    default_style: OverlayStyle,
    style: OverlayStyle,

    redraw_requested: bool,
}

impl HandOverlay<GeoHull> {
    /// Create an overlay with the default style and hull backend
    pub fn with_defaults(view_width: u32, view_height: u32) -> Self {
        Self::new(view_width, view_height, OverlayStyle::default(), GeoHull)
    }
}

impl<H: HullComputer> HandOverlay<H> {
    pub fn new(view_width: u32, view_height: u32, style: OverlayStyle, hull: H) -> Self {
        Self {
            hull,
            view_width,
            view_height,
            results: None,
            image_width: 1,
            image_height: 1,
            scale_factor: 1.0,
            capture_mode: CaptureMode::default(),
            display_mode: DisplayMode::default(),
            default_style: style,
            style,
            redraw_requested: false,
        }
    }

    /// Record a new view size
    ///
    /// The scale factor follows on the next `update`.
    pub fn set_view_size(&mut self, width: u32, height: u32) {
        tracing::debug!("View resized to {}x{}", width, height);
        self.view_width = width;
        self.view_height = height;
    }

    pub fn view_size(&self) -> (u32, u32) {
        (self.view_width, self.view_height)
    }

    /// Replace the current results and geometry, then request a redraw
    pub fn update(
        &mut self,
        results: HandLandmarkerResult,
        image_height: u32,
        image_width: u32,
        capture_mode: CaptureMode,
        display_mode: DisplayMode,
    ) {
        self.image_height = image_height;
        self.image_width = image_width;
        self.capture_mode = capture_mode;
        self.display_mode = display_mode;
        self.scale_factor = scale_factor(
            self.view_width,
            self.view_height,
            image_width,
            image_height,
            capture_mode,
        );
        if !self.scale_factor.is_finite() {
            tracing::warn!(
                "Non-finite scale factor for {}x{} image in {}x{} view",
                image_width,
                image_height,
                self.view_width,
                self.view_height
            );
        }

        tracing::debug!(
            "Overlay update: {} hand(s), image {}x{}, scale={:.3}, {:?}/{:?}",
            results.hands(),
            image_width,
            image_height,
            self.scale_factor,
            capture_mode,
            display_mode
        );

        self.results = Some(results);
        self.redraw_requested = true;
    }

    /// Drop the current results and restore the default paints
    pub fn clear(&mut self) {
        tracing::debug!("Overlay cleared");
        self.results = None;
        self.style = self.default_style;
        self.redraw_requested = true;
    }

    /// Returns true once per pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Draw the current results onto `canvas`
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let Some(results) = &self.results else {
            return;
        };
        let _span = tracing::debug_span!("render", hands = results.hands()).entered();

        for hand in &results.landmarks {
            let points: Vec<Point2> = hand
                .iter()
                .map(|lm| to_display(lm, self.image_width, self.image_height, self.scale_factor))
                .collect();

            for &p in &points {
                canvas.draw_point(p, &self.style.point);
            }

            match self.display_mode {
                DisplayMode::Original => self.draw_skeleton(canvas, &points),
                DisplayMode::ConvexHull => self.draw_hull(canvas, &points),
            }
        }
    }

    fn draw_skeleton<C: Canvas + ?Sized>(&self, canvas: &mut C, points: &[Point2]) {
        for &(start, end) in HAND_CONNECTIONS.iter() {
            let (Some(&a), Some(&b)) = (points.get(start), points.get(end)) else {
                tracing::trace!("Skipping connection {}-{} for {} points", start, end, points.len());
                continue;
            };
            canvas.draw_line(a, b, &self.style.line);
        }
    }

    fn draw_hull<C: Canvas + ?Sized>(&self, canvas: &mut C, points: &[Point2]) {
        let hull: Vec<Point2> = self
            .hull
            .convex_hull(points)
            .into_iter()
            .filter_map(|i| points.get(i).copied())
            .collect();

        for (k, &from) in hull.iter().enumerate() {
            let to = hull[(k + 1) % hull.len()];
            canvas.draw_line(from, to, &self.style.line);
        }
    }

    pub fn results(&self) -> Option<&HandLandmarkerResult> {
        self.results.as_ref()
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    pub fn capture_mode(&self) -> CaptureMode {
        self.capture_mode
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Change the active paints until the next `clear`
    pub fn set_style(&mut self, style: OverlayStyle) {
        self.style = style;
        self.redraw_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CommandCanvas, DrawCommand};
    use crate::landmarks::NormalizedLandmark;
    use image::Rgba;
    use std::cell::Cell;

    /// 21 landmarks on a loose grid inside the unit square
    fn full_hand() -> Vec<NormalizedLandmark> {
        (0..21)
            .map(|i| NormalizedLandmark::new(0.1 + 0.04 * (i % 5) as f32, 0.1 + 0.03 * i as f32))
            .collect()
    }

    fn square_hand() -> Vec<NormalizedLandmark> {
        vec![
            NormalizedLandmark::new(0.0, 0.0),
            NormalizedLandmark::new(0.5, 0.5),
            NormalizedLandmark::new(1.0, 0.0),
            NormalizedLandmark::new(1.0, 1.0),
            NormalizedLandmark::new(0.0, 1.0),
        ]
    }

    /// Hull backend that counts calls and returns a fixed index list
    struct FixedHull {
        indices: Vec<usize>,
        calls: Cell<usize>,
    }

    impl HullComputer for FixedHull {
        fn convex_hull(&self, _points: &[Point2]) -> Vec<usize> {
            self.calls.set(self.calls.get() + 1);
            self.indices.clone()
        }
    }

    #[test]
    fn update_computes_scale_and_requests_redraw() {
        let mut overlay = HandOverlay::with_defaults(1080, 2000);
        assert!(!overlay.take_redraw());

        overlay.update(
            HandLandmarkerResult::default(),
            640,
            480,
            CaptureMode::Image,
            DisplayMode::Original,
        );
        assert_eq!(overlay.scale_factor(), 2.25);
        assert!(overlay.take_redraw());
        assert!(!overlay.take_redraw());

        overlay.update(
            HandLandmarkerResult::default(),
            640,
            480,
            CaptureMode::LiveStream,
            DisplayMode::Original,
        );
        assert_eq!(overlay.scale_factor(), 3.125);
    }

    #[test]
    fn resize_applies_on_next_update() {
        let mut overlay = HandOverlay::with_defaults(100, 100);
        overlay.update(
            HandLandmarkerResult::default(),
            100,
            100,
            CaptureMode::Image,
            DisplayMode::Original,
        );
        overlay.set_view_size(200, 300);
        assert_eq!(overlay.scale_factor(), 1.0);

        overlay.update(
            HandLandmarkerResult::default(),
            100,
            100,
            CaptureMode::Image,
            DisplayMode::Original,
        );
        assert_eq!(overlay.scale_factor(), 2.0);
    }

    #[test]
    fn original_mode_draws_points_then_skeleton() {
        let mut overlay = HandOverlay::with_defaults(640, 480);
        overlay.update(
            HandLandmarkerResult::new(vec![full_hand()]),
            480,
            640,
            CaptureMode::Image,
            DisplayMode::Original,
        );

        let mut canvas = CommandCanvas::new(640, 480);
        overlay.render(&mut canvas);

        assert_eq!(canvas.points().count(), 21);
        assert_eq!(canvas.lines().count(), HAND_CONNECTIONS.len());
        assert!(matches!(canvas.commands()[20], DrawCommand::Point { .. }));
        assert!(matches!(canvas.commands()[21], DrawCommand::Line { .. }));

        let hand = full_hand();
        let (from, to) = canvas.lines().next().unwrap();
        assert_eq!(from, to_display(&hand[0], 640, 480, 1.0));
        assert_eq!(to, to_display(&hand[1], 640, 480, 1.0));
    }

    #[test]
    fn points_are_scaled_into_view() {
        let mut overlay = HandOverlay::with_defaults(1280, 960);
        overlay.update(
            HandLandmarkerResult::new(vec![vec![NormalizedLandmark::new(0.5, 0.25)]]),
            480,
            640,
            CaptureMode::Video,
            DisplayMode::Original,
        );

        let mut canvas = CommandCanvas::new(1280, 960);
        overlay.render(&mut canvas);
        let points: Vec<Point2> = canvas.points().collect();
        assert_eq!(points, vec![Point2::new(640.0, 240.0)]);
    }

    #[test]
    fn short_hand_skips_missing_connections() {
        let mut overlay = HandOverlay::with_defaults(100, 100);
        let hand: Vec<_> = full_hand().into_iter().take(5).collect();
        overlay.update(
            HandLandmarkerResult::new(vec![hand]),
            100,
            100,
            CaptureMode::Image,
            DisplayMode::Original,
        );

        let mut canvas = CommandCanvas::new(100, 100);
        overlay.render(&mut canvas);
        assert_eq!(canvas.points().count(), 5);
        // (0,1) (1,2) (2,3) (3,4)
        assert_eq!(canvas.lines().count(), 4);
    }

    #[test]
    fn convex_hull_mode_draws_closed_polygon() {
        let mut overlay = HandOverlay::with_defaults(100, 100);
        overlay.update(
            HandLandmarkerResult::new(vec![square_hand()]),
            100,
            100,
            CaptureMode::Image,
            DisplayMode::ConvexHull,
        );

        let mut canvas = CommandCanvas::new(100, 100);
        overlay.render(&mut canvas);
        assert_eq!(canvas.points().count(), 5);

        let edges: Vec<(Point2, Point2)> = canvas.lines().collect();
        assert_eq!(edges.len(), 4);
        for k in 0..edges.len() {
            assert_eq!(edges[k].1, edges[(k + 1) % edges.len()].0);
        }
        assert!(edges
            .iter()
            .all(|(a, b)| *a != Point2::new(50.0, 50.0) && *b != Point2::new(50.0, 50.0)));
    }

    #[test]
    fn hull_edge_count_matches_backend_vertices() {
        let hull = FixedHull {
            indices: vec![2, 0, 4],
            calls: Cell::new(0),
        };
        let mut overlay = HandOverlay::new(100, 100, OverlayStyle::default(), hull);
        overlay.update(
            HandLandmarkerResult::new(vec![square_hand(), square_hand()]),
            100,
            100,
            CaptureMode::Image,
            DisplayMode::ConvexHull,
        );

        let mut canvas = CommandCanvas::new(100, 100);
        overlay.render(&mut canvas);
        assert_eq!(canvas.lines().count(), 6);
        assert_eq!(overlay.hull.calls.get(), 2);

        let (last_from, last_to) = canvas.lines().nth(2).unwrap();
        assert_eq!(last_from, Point2::new(0.0, 100.0));
        assert_eq!(last_to, Point2::new(100.0, 0.0));
    }

    #[test]
    fn clear_then_render_draws_nothing() {
        let mut overlay = HandOverlay::with_defaults(100, 100);
        overlay.update(
            HandLandmarkerResult::new(vec![full_hand()]),
            100,
            100,
            CaptureMode::Image,
            DisplayMode::Original,
        );
        let _ = overlay.take_redraw();

        overlay.clear();
        assert!(overlay.take_redraw());
        assert!(overlay.results().is_none());

        let mut canvas = CommandCanvas::new(100, 100);
        overlay.render(&mut canvas);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn clear_restores_default_style() {
        let mut overlay = HandOverlay::with_defaults(10, 10);
        let mut custom = OverlayStyle::default();
        custom.line.color = Rgba([255, 0, 0, 255]);
        custom.point.stroke_width = 2.0;

        overlay.set_style(custom);
        assert_eq!(overlay.style(), &custom);
        overlay.clear();
        assert_eq!(overlay.style(), &OverlayStyle::default());
    }

    #[test]
    fn switching_display_mode_keeps_landmarks() {
        let results = HandLandmarkerResult::new(vec![full_hand()]);
        let mut overlay = HandOverlay::with_defaults(100, 100);

        overlay.update(results.clone(), 100, 100, CaptureMode::Image, DisplayMode::Original);
        let mut skeleton = CommandCanvas::new(100, 100);
        overlay.render(&mut skeleton);

        overlay.update(results.clone(), 100, 100, CaptureMode::Image, DisplayMode::ConvexHull);
        let mut hull = CommandCanvas::new(100, 100);
        overlay.render(&mut hull);

        assert_eq!(overlay.results(), Some(&results));
        assert_eq!(
            skeleton.points().collect::<Vec<_>>(),
            hull.points().collect::<Vec<_>>()
        );
        assert_ne!(skeleton.lines().count(), hull.lines().count());
    }

    #[test]
    fn zero_sized_image_in_hull_mode_draws_no_edges() {
        let mut overlay = HandOverlay::with_defaults(100, 100);
        overlay.update(
            HandLandmarkerResult::new(vec![square_hand()]),
            0,
            0,
            CaptureMode::LiveStream,
            DisplayMode::ConvexHull,
        );
        assert!(!overlay.scale_factor().is_finite());

        let mut canvas = CommandCanvas::new(100, 100);
        overlay.render(&mut canvas);
        assert_eq!(canvas.points().count(), 5);
        assert_eq!(canvas.lines().count(), 0);
    }

    #[test]
    fn nothing_drawn_before_first_update() {
        let overlay = HandOverlay::with_defaults(100, 100);
        let mut canvas = CommandCanvas::new(100, 100);
        overlay.render(&mut canvas);
        assert!(canvas.commands().is_empty());
    }
}
