//! Run configuration.

use crate::io::IoError;
use court_track_ball::{HitDetectionParams, HitDetectionParamsError};
use court_track_minimap::{CourtDimensions, MiniCourtError, MiniCourtLayout, PlayerCalibration};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("event detection: {0}")]
    Events(#[from] HitDetectionParamsError),
    #[error("mini-court: {0}")]
    MiniCourt(#[from] MiniCourtError),
}

/// Every tunable of a pipeline run. Missing JSON fields take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtTrackConfig {
    pub events: HitDetectionParams,
    pub court: CourtDimensions,
    pub layout: MiniCourtLayout,
    pub calibration: PlayerCalibration,
}

impl CourtTrackConfig {
    /// Reject settings that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.events.validate()?;
        self.court.validate()?;
        self.layout.validate()?;
        self.calibration.validate()?;
        Ok(())
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CourtTrackConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let cfg: CourtTrackConfig =
            serde_json::from_str(r#"{"events": {"threshold": 10}, "layout": {"buffer": 10.0}}"#)
                .expect("config");
        assert_eq!(cfg.events.threshold, 10);
        assert_eq!(cfg.events.smoothing_window, 5);
        assert_eq!(cfg.layout.buffer, 10.0);
        assert_eq!(cfg.layout.width, 250.0);
        assert_eq!(cfg.calibration, PlayerCalibration::default());
    }

    #[test]
    fn invalid_sections_are_reported() {
        let mut cfg = CourtTrackConfig::default();
        cfg.events.threshold = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Events(_))));

        let mut cfg = CourtTrackConfig::default();
        cfg.calibration.candidate_keypoints.clear();
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::MiniCourt(MiniCourtError::InvalidCandidates))
        );

        let mut cfg = CourtTrackConfig::default();
        cfg.court.double_line_width = 0.0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::MiniCourt(MiniCourtError::InvalidDimensions))
        );
    }

    #[test]
    fn json_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        let mut cfg = CourtTrackConfig::default();
        cfg.calibration.fallback_pixel_height = 170.0;
        cfg.write_json(&path).expect("write");
        assert_eq!(CourtTrackConfig::load_json(&path).expect("load"), cfg);
    }
}
