use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Axis-aligned pixel-space box `(x1, y1, x2, y2)`.
///
/// Serialized as a plain `[x1, y1, x2, y2]` array, the same layout the
/// detector emits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Vertical midpoint `(y1 + y2) / 2`.
    #[inline]
    pub fn mid_y(&self) -> f32 {
        (self.y1 + self.y2) / 2.0
    }

    /// Box center, `None` if any coordinate involved is not finite.
    pub fn center(&self) -> Option<Point2<f32>> {
        finite_point((self.x1 + self.x2) / 2.0, self.mid_y())
    }

    /// Bottom-center of the box: where a standing player touches the court.
    pub fn foot_position(&self) -> Option<Point2<f32>> {
        finite_point((self.x1 + self.x2) / 2.0, self.y2)
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        b.to_array()
    }
}

fn finite_point(x: f32, y: f32) -> Option<Point2<f32>> {
    (x.is_finite() && y.is_finite()).then(|| Point2::new(x, y))
}

/// Straight-line pixel distance.
#[inline]
pub fn distance(a: Point2<f32>, b: Point2<f32>) -> f32 {
    (a - b).norm()
}

/// Signed per-axis offset `a - b`.
#[inline]
pub fn axis_offset(a: Point2<f32>, b: Point2<f32>) -> Vector2<f32> {
    a - b
}
