use serde::{Deserialize, Serialize};

/// Convert a pixel distance to meters given a reference object whose size is
/// known in both units.
#[inline]
pub fn pixels_to_meters(pixel_distance: f32, reference_meters: f32, reference_pixels: f32) -> f32 {
    pixel_distance * reference_meters / reference_pixels
}

/// Convert a distance in meters to pixels given a reference object whose size
/// is known in both units.
#[inline]
pub fn meters_to_pixels(meters: f32, reference_meters: f32, reference_pixels: f32) -> f32 {
    meters * reference_pixels / reference_meters
}

/// A fixed meters↔pixels ratio, e.g. the court width in meters against the
/// drawn court width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricScale {
    pub reference_meters: f32,
    pub reference_pixels: f32,
}

impl MetricScale {
    pub fn new(reference_meters: f32, reference_pixels: f32) -> Self {
        Self {
            reference_meters,
            reference_pixels,
        }
    }

    /// `true` when both references are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.reference_meters.is_finite()
            && self.reference_pixels.is_finite()
            && self.reference_meters > 0.0
            && self.reference_pixels > 0.0
    }

    #[inline]
    pub fn to_pixels(&self, meters: f32) -> f32 {
        meters_to_pixels(meters, self.reference_meters, self.reference_pixels)
    }

    #[inline]
    pub fn to_meters(&self, pixels: f32) -> f32 {
        pixels_to_meters(pixels, self.reference_meters, self.reference_pixels)
    }

    /// Pixels per meter.
    #[inline]
    pub fn pixels_per_meter(&self) -> f32 {
        self.reference_pixels / self.reference_meters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn meters_round_trip_through_pixels() {
        let scale = MetricScale::new(10.97, 210.0);
        for d in [0.0_f32, 0.5, 1.37, 5.48, 11.88, 23.77] {
            let px = scale.to_pixels(d);
            assert_relative_eq!(scale.to_meters(px), d, epsilon = 1e-5);
        }
    }

    #[test]
    fn free_functions_match_scale() {
        assert_relative_eq!(pixels_to_meters(100.0, 1.88, 200.0), 0.94, epsilon = 1e-6);
        assert_relative_eq!(meters_to_pixels(0.94, 1.88, 200.0), 100.0, epsilon = 1e-4);
    }

    #[test]
    fn validity() {
        assert!(MetricScale::new(1.0, 1.0).is_valid());
        assert!(!MetricScale::new(0.0, 1.0).is_valid());
        assert!(!MetricScale::new(1.0, f32::NAN).is_valid());
    }
}
