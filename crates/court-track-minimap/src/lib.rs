//! Mini-court diagram and court-space mapping.
//!
//! [`MiniCourt`] holds the diagram geometry for one video. [`CourtMapper`]
//! places player and ball detections on it, calibrating each pixel offset
//! with the object's own apparent height.
//!
//! ```
//! use court_track_minimap::{CourtDimensions, CourtMapper, MiniCourtLayout, PlayerCalibration};
//!
//! let mapper = CourtMapper::new(
//!     1920,
//!     &MiniCourtLayout::default(),
//!     &CourtDimensions::default(),
//!     PlayerCalibration::default(),
//! )
//! .unwrap();
//! assert_eq!(mapper.court().court_width(), 210.0);
//! ```

mod calibration;
mod dimensions;
mod error;
mod layout;
mod mapper;

pub use calibration::PlayerCalibration;
pub use dimensions::CourtDimensions;
pub use error::{MappingIssue, MiniCourtError};
pub use layout::{MiniCourt, MiniCourtLayout, Rect, COURT_LINES};
pub use mapper::{CourtMapper, CourtTrack, MappedFrame};
