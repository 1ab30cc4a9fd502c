//! Court-space mapping.
//!
//! For every object and frame:
//! 1. pick an anchor (player foot, or box center as a fallback; ball center),
//! 2. find the nearest reference keypoint among the configured candidates,
//! 3. convert the anchor→keypoint pixel offset to meters with the object's
//!    local ratio (physical height / pixel height),
//! 4. convert meters to diagram pixels and add the offset to the keypoint's
//!    diagram position.
//!
//! [`CourtMapper::project`] is strict and reports a [`MappingIssue`].
//! [`CourtMapper::project_or_fallback`] applies the substitution policy:
//! a degenerate or missing pixel height is replaced by
//! [`PlayerCalibration::fallback_pixel_height`]. Objects that still cannot
//! be placed are dropped from their frame and logged.

use crate::calibration::PlayerCalibration;
use crate::dimensions::CourtDimensions;
use crate::error::{MappingIssue, MiniCourtError};
use crate::layout::{MiniCourt, MiniCourtLayout};
use court_track_core::{axis_offset, CourtKeypoints, Detection, MetricScale, PlayerFrame};
use log::{debug, warn};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Mini-court positions of one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MappedFrame {
    /// Present players only.
    pub players: BTreeMap<u32, Point2<f32>>,
    pub ball: Option<Point2<f32>>,
}

/// Mini-court positions of a whole run; both sequences have the same length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CourtTrack {
    pub players: Vec<BTreeMap<u32, Point2<f32>>>,
    pub ball: Vec<Option<Point2<f32>>>,
}

impl CourtTrack {
    #[inline]
    pub fn len(&self) -> usize {
        self.ball.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ball.is_empty()
    }
}

/// Maps pixel-space detections onto the mini-court.
#[derive(Clone, Debug)]
pub struct CourtMapper {
    court: MiniCourt,
    calibration: PlayerCalibration,
}

impl CourtMapper {
    /// Build the mapper for a video whose frames are `frame_width` pixels wide.
    pub fn new(
        frame_width: u32,
        layout: &MiniCourtLayout,
        dims: &CourtDimensions,
        calibration: PlayerCalibration,
    ) -> Result<Self, MiniCourtError> {
        calibration.validate()?;
        let court = MiniCourt::new(frame_width, layout, dims)?;
        Ok(Self { court, calibration })
    }

    #[inline]
    pub fn court(&self) -> &MiniCourt {
        &self.court
    }

    #[inline]
    pub fn calibration(&self) -> &PlayerCalibration {
        &self.calibration
    }

    /// Place `anchor` on the mini-court.
    ///
    /// `pixel_height` and `height_m` describe the same reference object in
    /// image pixels and meters.
    pub fn project(
        &self,
        anchor: Point2<f32>,
        keypoints: &CourtKeypoints,
        pixel_height: f32,
        height_m: f32,
    ) -> Result<Point2<f32>, MappingIssue> {
        if !(anchor.x.is_finite() && anchor.y.is_finite()) {
            return Err(MappingIssue::NonFiniteAnchor);
        }
        let object_scale = MetricScale::new(height_m, pixel_height);
        if !(pixel_height.is_finite() && pixel_height > 0.0) {
            return Err(MappingIssue::DegeneratePixelHeight(pixel_height));
        }
        if !object_scale.is_valid() {
            return Err(MappingIssue::DegeneratePhysicalHeight(height_m));
        }

        let (index, reference) = keypoints
            .nearest(anchor, &self.calibration.candidate_keypoints)
            .ok_or(MappingIssue::NoCandidateKeypoint)?;
        let diagram_reference = self
            .court
            .keypoint(index)
            .ok_or(MappingIssue::KeypointOutOfRange(index))?;

        let offset_px = axis_offset(anchor, reference);
        let offset_diagram = offset_px.map(|v| self.court.meters_to_pixels(object_scale.to_meters(v)));
        Ok(diagram_reference + offset_diagram)
    }

    /// [`Self::project`] with the fallback pixel height substituted for a
    /// missing or degenerate one.
    pub fn project_or_fallback(
        &self,
        anchor: Point2<f32>,
        keypoints: &CourtKeypoints,
        pixel_height: Option<f32>,
        height_m: f32,
    ) -> Result<Point2<f32>, MappingIssue> {
        let fallback = self.calibration.fallback_pixel_height;
        match pixel_height.map(|h| self.project(anchor, keypoints, h, height_m)) {
            Some(Err(MappingIssue::DegeneratePixelHeight(h))) => {
                debug!("pixel height {h} replaced by fallback {fallback}");
                self.project(anchor, keypoints, fallback, height_m)
            }
            Some(result) => result,
            None => self.project(anchor, keypoints, fallback, height_m),
        }
    }

    /// Map frame `frame` of a run.
    ///
    /// `players` is the whole player run, since pixel heights are estimated
    /// over neighbouring frames. A frame index past the end of either
    /// sequence reads as an empty frame.
    pub fn map_frame(
        &self,
        frame: usize,
        players: &[PlayerFrame],
        ball: &[Detection],
        keypoints: &CourtKeypoints,
    ) -> MappedFrame {
        let mut out = MappedFrame::default();
        let mut frame_heights: Vec<f32> = Vec::new();

        if let Some(present) = players.get(frame) {
            for (&id, bbox) in present {
                let Some(anchor) = bbox.foot_position().or_else(|| bbox.center()) else {
                    warn!("frame {frame}: player {id} box has no usable anchor, skipped");
                    continue;
                };
                let estimate = self.calibration.estimate_pixel_height(players, frame, id);
                let pixel_height = self.calibration.resolve_pixel_height(estimate);
                frame_heights.push(pixel_height);

                match self.project_or_fallback(
                    anchor,
                    keypoints,
                    Some(pixel_height),
                    self.calibration.height_m(id),
                ) {
                    Ok(p) => {
                        out.players.insert(id, p);
                    }
                    Err(issue) => warn!("frame {frame}: player {id} skipped: {issue}"),
                }
            }
        }

        let ball_center = ball
            .get(frame)
            .and_then(Detection::as_box)
            .and_then(|b| b.center());
        if let Some(center) = ball_center {
            // The ball has no size calibration of its own; borrow the
            // tallest player of this frame and the reference player's height.
            let pixel_height = frame_heights.iter().copied().reduce(f32::max);
            match self.project_or_fallback(
                center,
                keypoints,
                pixel_height,
                self.calibration.ball_reference_height_m(),
            ) {
                Ok(p) => out.ball = Some(p),
                Err(issue) => warn!("frame {frame}: ball skipped: {issue}"),
            }
        }

        out
    }

    /// Map a whole run. The output length is the longer of the two inputs.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, players, ball, keypoints),
            fields(player_frames = players.len(), ball_frames = ball.len())
        )
    )]
    pub fn map_sequence(
        &self,
        players: &[PlayerFrame],
        ball: &[Detection],
        keypoints: &CourtKeypoints,
    ) -> CourtTrack {
        let frames = players.len().max(ball.len());
        let mut track = CourtTrack {
            players: Vec::with_capacity(frames),
            ball: Vec::with_capacity(frames),
        };
        for frame in 0..frames {
            let mapped = self.map_frame(frame, players, ball, keypoints);
            track.players.push(mapped.players);
            track.ball.push(mapped.ball);
        }
        track
    }
}
