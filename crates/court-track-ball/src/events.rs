//! Hit/bounce detection from the ball's vertical motion.
//!
//! A hit or bounce shows up as a persistent reversal of the ball's vertical
//! direction in image space:
//! 1. take the vertical box midpoint per frame,
//! 2. smooth it with a trailing moving average,
//! 3. difference consecutive frames,
//! 4. at every sign change of the difference, look ahead over the
//!    confirmation window and count the frames that keep the new sign,
//! 5. accept the frame when at least `threshold` of them do.
//!
//! A single-frame flip never gathers enough confirmations, so jitter is
//! rejected without extra filtering.

use crate::params::HitDetectionParams;
use crate::smoothing::{first_difference, rolling_mean};
use court_track_core::{all_absent, Detection};
use log::{debug, warn};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reversal {
    /// Image-space `y` stops decreasing and starts increasing.
    Upward,
    /// Image-space `y` stops increasing and starts decreasing.
    Downward,
}

impl Reversal {
    fn between(current: Option<f32>, next: Option<f32>) -> Option<Self> {
        let (current, next) = (current?, next?);
        if current < 0.0 && next > 0.0 {
            Some(Reversal::Upward)
        } else if current > 0.0 && next < 0.0 {
            Some(Reversal::Downward)
        } else {
            None
        }
    }

    fn continues(self, delta: Option<f32>) -> bool {
        match (self, delta) {
            (Reversal::Upward, Some(d)) => d > 0.0,
            (Reversal::Downward, Some(d)) => d < 0.0,
            _ => false,
        }
    }
}

/// Smoothed per-frame vertical velocity of the ball (`None` at frame 0 and
/// wherever the ball is missing).
pub fn vertical_deltas(track: &[Detection], smoothing_window: usize) -> Vec<Option<f32>> {
    let mid_y: Vec<Option<f32>> = track
        .iter()
        .map(|d| d.as_box().map(|b| b.mid_y()).filter(|v| v.is_finite()))
        .collect();
    first_difference(&rolling_mean(&mid_y, smoothing_window))
}

/// Detects hit/bounce frames in an interpolated ball track.
#[derive(Clone, Debug, Default)]
pub struct HitDetector {
    params: HitDetectionParams,
}

impl HitDetector {
    pub fn new(params: HitDetectionParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &HitDetectionParams {
        &self.params
    }

    /// Frame indices of detected events, ascending.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, track), fields(frames = track.len()))
    )]
    pub fn detect(&self, track: &[Detection]) -> Vec<usize> {
        if all_absent(track) {
            warn!("no valid ball boxes, hit detection skipped");
            return Vec::new();
        }

        let delta = vertical_deltas(track, self.params.smoothing_window);
        let window = self.params.confirmation_window().max(1);
        let end = delta.len().saturating_sub(window);

        let mut events = Vec::new();
        for i in 1..end {
            let Some(reversal) = Reversal::between(delta[i], delta[i + 1]) else {
                continue;
            };
            let confirmations = delta[i + 1..=i + window]
                .iter()
                .filter(|&&d| reversal.continues(d))
                .count();
            if confirmations >= self.params.threshold {
                debug!("{reversal:?} reversal at frame {i} ({confirmations}/{window} confirmations)");
                events.push(i);
            }
        }
        events
    }
}

/// Convenience wrapper around [`HitDetector::detect`].
pub fn detect_hit_frames(track: &[Detection], params: &HitDetectionParams) -> Vec<usize> {
    HitDetector::new(params.clone()).detect(track)
}

/// Per-frame hit annotation of length `frames`; events past the end are ignored.
pub fn hit_flags(frames: usize, events: &[usize]) -> Vec<bool> {
    let mut flags = vec![false; frames];
    for &e in events {
        if let Some(flag) = flags.get_mut(e) {
            *flag = true;
        }
    }
    flags
}
