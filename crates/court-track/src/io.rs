//! JSON detection cache and report helpers.
//!
//! The cache keeps raw detector frames as untyped JSON so every accepted
//! shape survives a round trip unchanged; normalization happens only in the
//! pipeline.

use court_track_core::{CourtKeypoints, Detection, Point2};
use court_track_minimap::{CourtTrack, MiniCourt, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Detector output of one run, as produced upstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionCache {
    pub run_id: String,
    pub frame_width: u32,
    pub frame_height: u32,
    /// 28 numbers, `[x0, y0, ..., x13, y13]`.
    pub court_keypoints: CourtKeypoints,
    /// One raw value per frame.
    #[serde(default)]
    pub ball: Vec<Value>,
    /// One raw value per frame.
    #[serde(default)]
    pub players: Vec<Value>,
}

impl DetectionCache {
    /// Cache file for `run_id` inside `dir`.
    ///
    /// Path separators in the id are replaced so the file always lands in
    /// `dir`.
    pub fn path_for(dir: impl AsRef<Path>, run_id: &str) -> PathBuf {
        let stem = run_id.replace(['/', '\\'], "_");
        dir.as_ref().join(format!("{stem}_detections.json"))
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Number of frames in the run.
    pub fn frame_count(&self) -> usize {
        self.ball.len().max(self.players.len())
    }
}

/// Mini-court drawing geometry for downstream renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiniCourtGeometry {
    pub canvas: Rect,
    pub court_start: Point2<f32>,
    pub court_width: f32,
    /// 28 numbers, same numbering as the court keypoints.
    pub keypoints: Vec<f32>,
    pub lines: Vec<[Point2<f32>; 2]>,
    pub net: [Point2<f32>; 2],
}

impl From<&MiniCourt> for MiniCourtGeometry {
    fn from(court: &MiniCourt) -> Self {
        Self {
            canvas: court.canvas(),
            court_start: court.start_point(),
            court_width: court.court_width(),
            keypoints: court.keypoints_flat(),
            lines: court.lines(),
            net: court.net_line(),
        }
    }
}

/// Result of a pipeline run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingReport {
    pub run_id: String,
    pub frame_count: usize,
    /// Gap-filled ball boxes, one per frame.
    pub ball_track: Vec<Detection>,
    /// Frames at which the ball changes vertical direction.
    pub events: Vec<usize>,
    /// `ball_hit` flag per frame.
    pub ball_hit: Vec<bool>,
    /// Mini-court player and ball positions per frame.
    pub court_positions: CourtTrack,
    pub mini_court: MiniCourtGeometry,
}

impl TrackingReport {
    /// Default report file name for a run.
    pub fn default_path(run_id: &str) -> PathBuf {
        let stem = run_id.replace(['/', '\\'], "_");
        PathBuf::from(format!("{stem}_report.json"))
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keypoints_json() -> Value {
        json!((0..28).map(|i| i as f32 * 10.0).collect::<Vec<_>>())
    }

    #[test]
    fn cache_path_is_derived_from_run_id() {
        let p = DetectionCache::path_for("/tmp/cache", "match-01");
        assert_eq!(p, PathBuf::from("/tmp/cache/match-01_detections.json"));
        let p = DetectionCache::path_for("/tmp/cache", "../etc");
        assert_eq!(p, PathBuf::from("/tmp/cache/.._etc_detections.json"));
        assert_eq!(
            TrackingReport::default_path("match-01"),
            PathBuf::from("match-01_report.json")
        );
    }

    #[test]
    fn raw_frame_shapes_survive_a_round_trip() {
        let raw = json!({
            "run_id": "r1",
            "frame_width": 1280,
            "frame_height": 720,
            "court_keypoints": keypoints_json(),
            "ball": [{"1": [1, 2, 3, 4]}, [5, 6, 7, 8], [[9, 10, 11, 12]], null, {}],
            "players": [{"1": [0, 0, 10, 40], "2": [50, 50, 60, 90]}, {}]
        });
        let cache: DetectionCache = serde_json::from_value(raw).expect("cache");
        assert_eq!(cache.frame_count(), 5);
        assert_eq!(cache.ball[2], json!([[9, 10, 11, 12]]));

        let dir = tempfile::tempdir().expect("tempdir");
        let path = DetectionCache::path_for(dir.path(), &cache.run_id);
        cache.write_json(&path).expect("write");
        let back = DetectionCache::load_json(&path).expect("load");
        assert_eq!(back, cache);
    }

    #[test]
    fn malformed_keypoints_are_rejected() {
        let raw = json!({
            "run_id": "r1",
            "frame_width": 1280,
            "frame_height": 720,
            "court_keypoints": [1.0, 2.0, 3.0],
        });
        assert!(serde_json::from_value::<DetectionCache>(raw).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = DetectionCache::load_json(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
