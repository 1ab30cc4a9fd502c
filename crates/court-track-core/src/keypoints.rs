use crate::bbox::distance;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Number of landmarks produced by the court model.
pub const COURT_KEYPOINT_COUNT: usize = 14;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum KeypointError {
    #[error("expected {expected} keypoint coordinates, got {got}")]
    WrongLength { expected: usize, got: usize },
    #[error("keypoint coordinate {index} is not finite")]
    NonFinite { index: usize },
}

/// Ordered court landmarks in pixel space.
///
/// Index `i` always denotes the same court landmark; the diagram keypoints
/// of the mini-court use the same numbering. Serialized flat as 28 numbers
/// `[x0, y0, x1, y1, ...]`, the layout the court model emits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct CourtKeypoints {
    points: [Point2<f32>; COURT_KEYPOINT_COUNT],
}

impl CourtKeypoints {
    pub fn new(points: [Point2<f32>; COURT_KEYPOINT_COUNT]) -> Self {
        Self { points }
    }

    /// Build from the flat `[x0, y0, x1, y1, ...]` layout.
    pub fn from_flat(coords: &[f32]) -> Result<Self, KeypointError> {
        let expected = COURT_KEYPOINT_COUNT * 2;
        if coords.len() != expected {
            return Err(KeypointError::WrongLength {
                expected,
                got: coords.len(),
            });
        }
        if let Some(index) = coords.iter().position(|v| !v.is_finite()) {
            return Err(KeypointError::NonFinite { index });
        }
        let mut points = [Point2::origin(); COURT_KEYPOINT_COUNT];
        for (p, xy) in points.iter_mut().zip(coords.chunks_exact(2)) {
            *p = Point2::new(xy[0], xy[1]);
        }
        Ok(Self { points })
    }

    pub fn to_flat(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Point2<f32>> {
        self.points.get(index).copied()
    }

    #[inline]
    pub fn points(&self) -> &[Point2<f32>; COURT_KEYPOINT_COUNT] {
        &self.points
    }

    /// Nearest landmark to `anchor` among `candidates`, by pixel distance.
    ///
    /// Out-of-range candidate indices are ignored. Ties keep the earlier
    /// candidate. Returns `None` when no candidate is usable.
    pub fn nearest(&self, anchor: Point2<f32>, candidates: &[usize]) -> Option<(usize, Point2<f32>)> {
        let mut best: Option<(usize, Point2<f32>, f32)> = None;
        for &idx in candidates {
            let Some(p) = self.get(idx) else {
                continue;
            };
            let d = distance(anchor, p);
            match best {
                Some((_, _, bd)) if d >= bd => {}
                _ => best = Some((idx, p, d)),
            }
        }
        best.map(|(idx, p, _)| (idx, p))
    }
}

impl TryFrom<Vec<f32>> for CourtKeypoints {
    type Error = KeypointError;

    fn try_from(value: Vec<f32>) -> Result<Self, Self::Error> {
        Self::from_flat(&value)
    }
}

impl From<CourtKeypoints> for Vec<f32> {
    fn from(value: CourtKeypoints) -> Self {
        value.to_flat()
    }
}
