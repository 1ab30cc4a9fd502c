use crate::error::MiniCourtError;
use serde::{Deserialize, Serialize};

/// Real-world court measurements, in meters.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CourtDimensions {
    /// Singles court width.
    pub single_line_width: f32,
    /// Doubles court width; also the reference length of the diagram scale.
    pub double_line_width: f32,
    /// Baseline to net.
    pub half_court_line_height: f32,
    /// Service line to net.
    pub service_line_width: f32,
    /// Width of one doubles alley.
    pub double_alley_difference: f32,
    /// Baseline to service line.
    pub no_mans_land_height: f32,
}

impl Default for CourtDimensions {
    fn default() -> Self {
        Self {
            single_line_width: 8.23,
            double_line_width: 10.97,
            half_court_line_height: 11.88,
            service_line_width: 6.4,
            double_alley_difference: 1.37,
            no_mans_land_height: 5.48,
        }
    }
}

impl CourtDimensions {
    /// Baseline to baseline.
    #[inline]
    pub fn court_length(&self) -> f32 {
        self.half_court_line_height * 2.0
    }

    /// Every measurement must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), MiniCourtError> {
        let ok = [
            self.single_line_width,
            self.double_line_width,
            self.half_court_line_height,
            self.service_line_width,
            self.double_alley_difference,
            self.no_mans_land_height,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0);
        if ok {
            Ok(())
        } else {
            Err(MiniCourtError::InvalidDimensions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn half_court_splits_at_the_service_line() {
        let d = CourtDimensions::default();
        assert_relative_eq!(
            d.service_line_width + d.no_mans_land_height,
            d.half_court_line_height,
            epsilon = 1e-5
        );
        assert_relative_eq!(d.court_length(), 23.76, epsilon = 1e-5);
        assert!(d.validate().is_ok());
        let bad = CourtDimensions {
            no_mans_land_height: -1.0,
            ..d
        };
        assert_eq!(bad.validate(), Err(MiniCourtError::InvalidDimensions));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let d: CourtDimensions = serde_json::from_str(r#"{"double_line_width": 11.0}"#).unwrap();
        assert_eq!(d.double_line_width, 11.0);
        assert_eq!(d.single_line_width, 8.23);
    }
}
