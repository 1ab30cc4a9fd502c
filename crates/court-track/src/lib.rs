//! High-level facade crate for the `court-track-*` workspace.
//!
//! This crate provides:
//! - re-exports of the component crates,
//! - the end-to-end [`pipeline`] that turns a cached detector run into a
//!   [`TrackingReport`],
//! - JSON helpers for the detection cache, the configuration and the report.
//!
//! ## Quickstart
//!
//! ```no_run
//! use court_track::{run_pipeline, CourtTrackConfig, DetectionCache};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = DetectionCache::load_json("rally_detections.json")?;
//! let report = run_pipeline(&cache, &CourtTrackConfig::default())?;
//! println!("ball hits at frames {:?}", report.events);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `court_track::core`: boxes, detections, the normalizer, court keypoints, units.
//! - `court_track::ball`: trajectory gap filling and hit/bounce events.
//! - `court_track::minimap`: mini-court geometry and court-space mapping.

pub use court_track_ball as ball;
pub use court_track_core as core;
pub use court_track_minimap as minimap;

pub use court_track_ball::HitDetectionParams;
pub use court_track_core::{BoundingBox, CourtKeypoints, Detection, PlayerFrame};
pub use court_track_minimap::{CourtDimensions, CourtTrack, MiniCourtLayout, PlayerCalibration};

mod config;
mod io;
pub mod pipeline;

pub use config::{ConfigError, CourtTrackConfig};
pub use io::{DetectionCache, IoError, MiniCourtGeometry, TrackingReport};
pub use pipeline::{run_pipeline, Pipeline, PipelineError};
