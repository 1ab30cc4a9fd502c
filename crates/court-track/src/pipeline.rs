//! End-to-end processing of one cached detector run.
//!
//! normalize → interpolate the ball → detect events → map onto the mini-court.

use crate::config::{ConfigError, CourtTrackConfig};
use crate::io::{DetectionCache, MiniCourtGeometry, TrackingReport};
use court_track_ball::{hit_flags, interpolate_ball_track, HitDetector};
use court_track_core::{normalize_ball_frames, normalize_player_frames, Detection};
use court_track_minimap::{CourtMapper, MiniCourtError};
use log::info;

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    MiniCourt(#[from] MiniCourtError),
}

/// A validated configuration, ready to process runs.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: CourtTrackConfig,
    detector: HitDetector,
}

impl Pipeline {
    pub fn new(config: CourtTrackConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let detector = HitDetector::new(config.events.clone());
        Ok(Self { config, detector })
    }

    #[inline]
    pub fn config(&self) -> &CourtTrackConfig {
        &self.config
    }

    /// Normalized, gap-filled ball track of `cache`.
    pub fn ball_track(&self, cache: &DetectionCache) -> Vec<Detection> {
        interpolate_ball_track(&normalize_ball_frames(&cache.ball))
    }

    /// Event frames of `cache`, without court mapping.
    pub fn events(&self, cache: &DetectionCache) -> Vec<usize> {
        self.detector.detect(&self.ball_track(cache))
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, cache), fields(run_id = %cache.run_id))
    )]
    pub fn run(&self, cache: &DetectionCache) -> Result<TrackingReport, PipelineError> {
        let mapper = CourtMapper::new(
            cache.frame_width,
            &self.config.layout,
            &self.config.court,
            self.config.calibration.clone(),
        )?;

        let players = normalize_player_frames(&cache.players);
        let ball_track = self.ball_track(cache);
        let detected = ball_track.iter().filter(|d| !d.is_absent()).count();
        info!(
            "{}: {} frames ({}x{}), {} ball boxes after gap filling",
            cache.run_id,
            cache.frame_count(),
            cache.frame_width,
            cache.frame_height,
            detected
        );

        let events = self.detector.detect(&ball_track);
        info!("{}: {} ball events", cache.run_id, events.len());

        let court_positions = mapper.map_sequence(&players, &ball_track, &cache.court_keypoints);
        let frame_count = court_positions.len();
        info!("{}: mapped {} frames onto the mini-court", cache.run_id, frame_count);

        Ok(TrackingReport {
            run_id: cache.run_id.clone(),
            frame_count,
            ball_hit: hit_flags(frame_count, &events),
            ball_track,
            events,
            court_positions,
            mini_court: MiniCourtGeometry::from(mapper.court()),
        })
    }
}

/// Validate `config` and process `cache` in one call.
pub fn run_pipeline(
    cache: &DetectionCache,
    config: &CourtTrackConfig,
) -> Result<TrackingReport, PipelineError> {
    Pipeline::new(config.clone())?.run(cache)
}
