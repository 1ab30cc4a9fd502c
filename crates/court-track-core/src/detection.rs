use crate::BoundingBox;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical per-frame, per-track detection.
///
/// Serialized as `[x1, y1, x2, y2]` or `null`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<BoundingBox>", into = "Option<BoundingBox>")]
pub enum Detection {
    Box(BoundingBox),
    #[default]
    Absent,
}

impl Detection {
    #[inline]
    pub fn as_box(&self) -> Option<&BoundingBox> {
        match self {
            Detection::Box(b) => Some(b),
            Detection::Absent => None,
        }
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Detection::Absent)
    }
}

impl From<Option<BoundingBox>> for Detection {
    fn from(value: Option<BoundingBox>) -> Self {
        value.map_or(Detection::Absent, Detection::Box)
    }
}

impl From<Detection> for Option<BoundingBox> {
    fn from(value: Detection) -> Self {
        value.as_box().copied()
    }
}

impl From<BoundingBox> for Detection {
    fn from(value: BoundingBox) -> Self {
        Detection::Box(value)
    }
}

/// Player boxes present in one frame, keyed by pre-assigned player id.
///
/// Absent players have no entry.
pub type PlayerFrame = BTreeMap<u32, BoundingBox>;

/// `true` when no element of the sequence carries a box.
pub fn all_absent(detections: &[Detection]) -> bool {
    detections.iter().all(Detection::is_absent)
}
