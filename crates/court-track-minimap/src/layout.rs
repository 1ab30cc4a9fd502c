//! Mini-court geometry.
//!
//! The diagram is a fixed-size rectangle pinned to the top-right corner of
//! the video frame. The court is inset by a padding and drawn to scale: the
//! doubles width spans the full inset width, and every other landmark is
//! placed from real-world measurements through the same meters→pixels ratio.
//! Keypoints keep sub-pixel precision; nothing is rounded to whole pixels.

use crate::dimensions::CourtDimensions;
use crate::error::MiniCourtError;
use court_track_core::{MetricScale, COURT_KEYPOINT_COUNT};
use log::warn;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Size and placement of the diagram inside the video frame, in pixels.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MiniCourtLayout {
    /// Background rectangle width.
    pub width: f32,
    /// Background rectangle height.
    pub height: f32,
    /// Gap between the rectangle and the frame's top and right borders.
    pub buffer: f32,
    /// Inset of the court inside the rectangle.
    pub padding: f32,
}

impl Default for MiniCourtLayout {
    fn default() -> Self {
        Self {
            width: 250.0,
            height: 500.0,
            buffer: 50.0,
            padding: 20.0,
        }
    }
}

impl MiniCourtLayout {
    /// The court inset must leave a non-empty drawing area.
    pub fn validate(&self) -> Result<(), MiniCourtError> {
        let finite = [self.width, self.height, self.buffer, self.padding]
            .iter()
            .all(|v| v.is_finite());
        if !finite
            || self.padding < 0.0
            || self.buffer < 0.0
            || self.width <= 2.0 * self.padding
            || self.height <= 2.0 * self.padding
        {
            return Err(MiniCourtError::InvalidLayout {
                width: self.width,
                height: self.height,
                padding: self.padding,
            });
        }
        Ok(())
    }
}

/// Axis-aligned rectangle in frame pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point2<f32>,
    pub max: Point2<f32>,
}

impl Rect {
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Court lines as pairs of diagram keypoint indices.
pub const COURT_LINES: [(usize, usize); 8] = [
    (0, 2),
    (4, 5),
    (6, 7),
    (1, 3),
    (0, 1),
    (8, 9),
    (10, 11),
    (2, 3),
];

/// Diagram geometry, computed once per video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiniCourt {
    canvas: Rect,
    court: Rect,
    scale: MetricScale,
    keypoints: [Point2<f32>; COURT_KEYPOINT_COUNT],
}

impl MiniCourt {
    /// Place the diagram in a frame `frame_width` pixels wide.
    ///
    /// A frame narrower than `width + buffer` still gets a diagram; its
    /// canvas starts at a negative x.
    pub fn new(
        frame_width: u32,
        layout: &MiniCourtLayout,
        dims: &CourtDimensions,
    ) -> Result<Self, MiniCourtError> {
        dims.validate()?;
        layout.validate()?;

        let end_x = frame_width as f32 - layout.buffer;
        let end_y = layout.buffer + layout.height;
        let start_x = end_x - layout.width;
        if start_x < 0.0 {
            warn!(
                "frame width {frame_width} cannot hold a {} px wide diagram, canvas starts at x={start_x}",
                layout.width + layout.buffer
            );
        }
        let canvas = Rect {
            min: Point2::new(start_x, end_y - layout.height),
            max: Point2::new(end_x, end_y),
        };
        let court = Rect {
            min: canvas.min + nalgebra::Vector2::repeat(layout.padding),
            max: canvas.max - nalgebra::Vector2::repeat(layout.padding),
        };
        let scale = MetricScale::new(dims.double_line_width, court.width());
        let keypoints = drawing_keypoints(&court, &scale, dims);

        Ok(Self {
            canvas,
            court,
            scale,
            keypoints,
        })
    }

    /// Background rectangle.
    #[inline]
    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    /// Top-left corner of the drawn court.
    #[inline]
    pub fn start_point(&self) -> Point2<f32> {
        self.court.min
    }

    /// Drawn doubles width in pixels.
    #[inline]
    pub fn court_width(&self) -> f32 {
        self.court.width()
    }

    /// Meters↔diagram-pixels ratio.
    #[inline]
    pub fn scale(&self) -> MetricScale {
        self.scale
    }

    #[inline]
    pub fn meters_to_pixels(&self, meters: f32) -> f32 {
        self.scale.to_pixels(meters)
    }

    #[inline]
    pub fn pixels_to_meters(&self, pixels: f32) -> f32 {
        self.scale.to_meters(pixels)
    }

    #[inline]
    pub fn keypoint(&self, index: usize) -> Option<Point2<f32>> {
        self.keypoints.get(index).copied()
    }

    #[inline]
    pub fn keypoints(&self) -> &[Point2<f32>; COURT_KEYPOINT_COUNT] {
        &self.keypoints
    }

    /// Keypoints in the flat `[x0, y0, x1, y1, ...]` layout.
    pub fn keypoints_flat(&self) -> Vec<f32> {
        self.keypoints.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Court line segments as endpoint pairs.
    pub fn lines(&self) -> Vec<[Point2<f32>; 2]> {
        COURT_LINES
            .iter()
            .map(|&(a, b)| [self.keypoints[a], self.keypoints[b]])
            .collect()
    }

    /// Net segment, halfway between the two baselines.
    pub fn net_line(&self) -> [Point2<f32>; 2] {
        let y = (self.keypoints[0].y + self.keypoints[2].y) / 2.0;
        [
            Point2::new(self.keypoints[0].x, y),
            Point2::new(self.keypoints[1].x, y),
        ]
    }
}

fn drawing_keypoints(
    court: &Rect,
    scale: &MetricScale,
    dims: &CourtDimensions,
) -> [Point2<f32>; COURT_KEYPOINT_COUNT] {
    let px = |m: f32| scale.to_pixels(m);
    let alley = px(dims.double_alley_difference);
    let no_mans_land = px(dims.no_mans_land_height);
    let singles = px(dims.single_line_width);

    let mut k = [Point2::origin(); COURT_KEYPOINT_COUNT];
    // baseline corners, far then near
    k[0] = court.min;
    k[1] = Point2::new(court.max.x, court.min.y);
    k[2] = Point2::new(court.min.x, court.min.y + px(dims.court_length()));
    k[3] = Point2::new(k[0].x + court.width(), k[2].y);
    // singles sidelines on the baselines
    k[4] = Point2::new(k[0].x + alley, k[0].y);
    k[5] = Point2::new(k[2].x + alley, k[2].y);
    k[6] = Point2::new(k[1].x - alley, k[1].y);
    k[7] = Point2::new(k[3].x - alley, k[3].y);
    // service lines
    k[8] = Point2::new(k[4].x, k[4].y + no_mans_land);
    k[9] = Point2::new(k[8].x + singles, k[8].y);
    k[10] = Point2::new(k[5].x, k[5].y - no_mans_land);
    k[11] = Point2::new(k[10].x + singles, k[10].y);
    // center service marks
    k[12] = Point2::new((k[8].x + k[9].x) / 2.0, k[8].y);
    k[13] = Point2::new((k[10].x + k[11].x) / 2.0, k[10].y);
    k
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn court() -> MiniCourt {
        MiniCourt::new(1920, &MiniCourtLayout::default(), &CourtDimensions::default())
            .expect("mini court")
    }

    #[test]
    fn diagram_is_pinned_top_right() {
        let mc = court();
        let canvas = mc.canvas();
        assert_eq!(canvas.min, Point2::new(1620.0, 50.0));
        assert_eq!(canvas.max, Point2::new(1870.0, 550.0));
        assert_eq!(mc.start_point(), Point2::new(1640.0, 70.0));
        assert_relative_eq!(mc.court_width(), 210.0);
    }

    #[test]
    fn baseline_corners_span_the_court() {
        let mc = court();
        let k = mc.keypoints();
        assert_eq!(k[0], Point2::new(1640.0, 70.0));
        assert_eq!(k[1], Point2::new(1850.0, 70.0));
        assert_relative_eq!(k[3].x, k[1].x);
        let length_px = k[2].y - k[0].y;
        assert_relative_eq!(mc.pixels_to_meters(length_px), 23.76, epsilon = 1e-3);
    }

    #[test]
    fn singles_and_service_lines_follow_measurements() {
        let mc = court();
        let k = mc.keypoints();
        let dims = CourtDimensions::default();
        assert_relative_eq!(
            mc.pixels_to_meters(k[4].x - k[0].x),
            dims.double_alley_difference,
            epsilon = 1e-4
        );
        assert_relative_eq!(
            mc.pixels_to_meters(k[9].x - k[8].x),
            dims.single_line_width,
            epsilon = 1e-4
        );
        assert_relative_eq!(
            mc.pixels_to_meters(k[8].y - k[4].y),
            dims.no_mans_land_height,
            epsilon = 1e-4
        );
        assert_relative_eq!(k[12].x, (k[8].x + k[9].x) / 2.0);
        assert_relative_eq!(k[13].y, k[10].y);
    }

    #[test]
    fn scale_round_trips_meters() {
        let mc = court();
        for d in [0.25_f32, 1.0, 6.4, 10.97, 23.76] {
            assert_relative_eq!(mc.pixels_to_meters(mc.meters_to_pixels(d)), d, epsilon = 1e-5);
        }
    }

    #[test]
    fn net_sits_between_baselines() {
        let mc = court();
        let [a, b] = mc.net_line();
        let k = mc.keypoints();
        assert_relative_eq!(a.y, (k[0].y + k[2].y) / 2.0);
        assert_relative_eq!(a.x, k[0].x);
        assert_relative_eq!(b.x, k[1].x);
        assert_eq!(mc.lines().len(), COURT_LINES.len());
        assert_eq!(mc.keypoints_flat().len(), 28);
    }

    #[test]
    fn keypoints_are_not_rounded() {
        let mc = court();
        let k = mc.keypoints();
        // 1.37 m alley at 210 / 10.97 px per meter
        assert!(k[4].x.fract() != 0.0, "k4 = {:?}", k[4]);
        assert!(k[8].y.fract() != 0.0, "k8 = {:?}", k[8]);
        assert_relative_eq!(k[12].x, (k[8].x + k[9].x) / 2.0);
    }

    #[test]
    fn narrow_frame_overhangs_the_left_edge() {
        let mc = MiniCourt::new(200, &MiniCourtLayout::default(), &CourtDimensions::default())
            .expect("mini court");
        assert_eq!(mc.canvas().min, Point2::new(-100.0, 50.0));
        assert_eq!(mc.start_point(), Point2::new(-80.0, 70.0));
        assert_relative_eq!(mc.court_width(), 210.0);
        assert_relative_eq!(mc.keypoints()[1].x, 130.0);
    }

    #[test]
    fn degenerate_layout_is_rejected() {
        let layout = MiniCourtLayout {
            padding: 200.0,
            ..MiniCourtLayout::default()
        };
        let err = MiniCourt::new(1920, &layout, &CourtDimensions::default()).unwrap_err();
        assert!(matches!(err, MiniCourtError::InvalidLayout { .. }));
    }
}
