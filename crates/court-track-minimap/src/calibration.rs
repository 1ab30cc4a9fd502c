use crate::error::MiniCourtError;
use court_track_core::{PlayerFrame, COURT_KEYPOINT_COUNT};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-object calibration settings.
///
/// Pixel offsets are converted to meters with a local ratio
/// `player height in meters / player height in pixels`, where the pixel
/// height is the tallest box the player shows in a window around the
/// current frame.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerCalibration {
    /// Known physical height per player id, in meters.
    pub heights_m: BTreeMap<u32, f32>,
    /// Player whose height is used for unknown ids and as the ball's
    /// stand-in reference.
    pub reference_player: u32,
    /// Pixel height used when no usable estimate exists.
    pub fallback_pixel_height: f32,
    /// Frames before the current one included in the height window.
    pub window_before: usize,
    /// Frames after the current one (exclusive) included in the height window.
    pub window_after: usize,
    /// Court keypoints an object may be anchored to: far baseline corners
    /// and the center service marks.
    pub candidate_keypoints: Vec<usize>,
}

impl Default for PlayerCalibration {
    fn default() -> Self {
        Self {
            heights_m: BTreeMap::from([(1, 1.88), (2, 1.91)]),
            reference_player: 1,
            fallback_pixel_height: 150.0,
            window_before: 20,
            window_after: 50,
            candidate_keypoints: vec![0, 2, 12, 13],
        }
    }
}

impl PlayerCalibration {
    pub fn validate(&self) -> Result<(), MiniCourtError> {
        let h = self.fallback_pixel_height;
        if !h.is_finite() || h <= 0.0 {
            return Err(MiniCourtError::InvalidFallbackHeight(h));
        }
        if let Some((&id, &meters)) = self
            .heights_m
            .iter()
            .find(|(_, m)| !m.is_finite() || **m <= 0.0)
        {
            return Err(MiniCourtError::InvalidPlayerHeight { id, meters });
        }
        if !self.heights_m.contains_key(&self.reference_player) {
            return Err(MiniCourtError::MissingReferencePlayer(self.reference_player));
        }
        if self.candidate_keypoints.is_empty()
            || self
                .candidate_keypoints
                .iter()
                .any(|&i| i >= COURT_KEYPOINT_COUNT)
        {
            return Err(MiniCourtError::InvalidCandidates);
        }
        Ok(())
    }

    /// Physical height for `id`, falling back to the reference player.
    pub fn height_m(&self, id: u32) -> f32 {
        self.heights_m
            .get(&id)
            .or_else(|| self.heights_m.get(&self.reference_player))
            .copied()
            .unwrap_or(f32::NAN)
    }

    /// Physical height used to calibrate the ball.
    #[inline]
    pub fn ball_reference_height_m(&self) -> f32 {
        self.height_m(self.reference_player)
    }

    /// Tallest valid box of player `id` in
    /// `[frame - window_before, frame + window_after)`, clipped to the run.
    ///
    /// Non-finite and non-positive heights are ignored; `None` if nothing
    /// usable remains.
    pub fn estimate_pixel_height(
        &self,
        players: &[PlayerFrame],
        frame: usize,
        id: u32,
    ) -> Option<f32> {
        let start = frame.saturating_sub(self.window_before);
        let end = frame.saturating_add(self.window_after).min(players.len());
        players
            .get(start..end)?
            .iter()
            .filter_map(|f| f.get(&id))
            .map(|b| b.height())
            .filter(|h| h.is_finite() && *h > 0.0)
            .reduce(f32::max)
    }

    /// Substitute the fallback for a missing or unusable pixel height.
    pub fn resolve_pixel_height(&self, estimate: Option<f32>) -> f32 {
        match estimate {
            Some(h) if h.is_finite() && h > 0.0 => h,
            other => {
                debug!(
                    "pixel height {:?} replaced by fallback {}",
                    other, self.fallback_pixel_height
                );
                self.fallback_pixel_height
            }
        }
    }
}
