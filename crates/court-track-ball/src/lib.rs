//! Ball trajectory reconstruction.
//!
//! - [`interpolate_ball_track`] turns a sparse per-frame ball track into a
//!   complete one (or an all-absent one when nothing was ever detected).
//! - [`HitDetector`] reports frames where the vertical motion reverses and
//!   stays reversed, the usual signature of a hit or a bounce.

mod events;
mod interpolate;
mod params;
mod smoothing;

pub use events::{detect_hit_frames, hit_flags, vertical_deltas, HitDetector};
pub use interpolate::{fill_gaps, interpolate_ball_track};
pub use params::{HitDetectionParams, HitDetectionParamsError};
pub use smoothing::{first_difference, rolling_mean};
