//! Core types for turning per-frame detector output into court tracks.
//!
//! This crate is small and purely geometric. It knows nothing about the
//! detector or the court model beyond the shapes of their output.

mod bbox;
mod detection;
mod keypoints;
mod logger;
mod normalize;
mod units;

pub use bbox::{axis_offset, distance, BoundingBox};
pub use detection::{all_absent, Detection, PlayerFrame};
pub use keypoints::{CourtKeypoints, KeypointError, COURT_KEYPOINT_COUNT};
pub use normalize::{
    normalize_ball_frame, normalize_ball_frames, normalize_player_frame, normalize_player_frames,
    BALL_LABEL, BALL_TRACK_ID,
};
pub use units::{meters_to_pixels, pixels_to_meters, MetricScale};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

pub use nalgebra::{Point2, Vector2};
