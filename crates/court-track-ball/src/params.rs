use serde::{Deserialize, Serialize};

/// Parameters of the hit/bounce detector.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HitDetectionParams {
    /// Minimal number of frames that must continue a direction change
    /// before it is accepted.
    pub threshold: usize,
    /// Confirmation window length as a multiple of `threshold`.
    pub window_multiplier: f64,
    /// Trailing moving-average window applied to the vertical midpoint.
    pub smoothing_window: usize,
}

impl Default for HitDetectionParams {
    fn default() -> Self {
        Self {
            threshold: 25,
            window_multiplier: 1.2,
            smoothing_window: 5,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HitDetectionParamsError {
    #[error("threshold must be > 0")]
    ZeroThreshold,
    #[error("smoothing_window must be > 0")]
    ZeroSmoothingWindow,
    #[error("window_multiplier must be finite and >= 1 (got {0})")]
    InvalidWindowMultiplier(f64),
}

impl HitDetectionParams {
    /// Number of frames scanned after a candidate direction change,
    /// `ceil(threshold * window_multiplier)`.
    pub fn confirmation_window(&self) -> usize {
        (self.threshold as f64 * self.window_multiplier).ceil() as usize
    }

    pub fn validate(&self) -> Result<(), HitDetectionParamsError> {
        if self.threshold == 0 {
            return Err(HitDetectionParamsError::ZeroThreshold);
        }
        if self.smoothing_window == 0 {
            return Err(HitDetectionParamsError::ZeroSmoothingWindow);
        }
        if !self.window_multiplier.is_finite() || self.window_multiplier < 1.0 {
            return Err(HitDetectionParamsError::InvalidWindowMultiplier(
                self.window_multiplier,
            ));
        }
        Ok(())
    }
}
