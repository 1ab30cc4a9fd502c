//! Detection normalizer.
//!
//! The detector (or a cached dump of its output) hands us one loosely shaped
//! JSON value per frame. Everything downstream works on [`Detection`] and
//! [`PlayerFrame`]; this module is the only place that inspects raw shapes.
//!
//! Accepted ball shapes, in lookup order:
//! - `{"1": [x1, y1, x2, y2]}` (keyed by the ball track id),
//! - `{"ball": [x1, y1, x2, y2]}` (keyed by label),
//! - `[x1, y1, x2, y2]`,
//! - `[[x1, y1, x2, y2]]`.
//!
//! Anything else, including boxes with non-numeric or non-finite entries,
//! becomes [`Detection::Absent`].

use crate::{BoundingBox, Detection, PlayerFrame};
use serde_json::Value;

/// Track id the detector assigns to the single ball track.
pub const BALL_TRACK_ID: u32 = 1;
/// String label some detector dumps use instead of the track id.
pub const BALL_LABEL: &str = "ball";

/// Normalize one frame of raw ball output.
pub fn normalize_ball_frame(raw: &Value) -> Detection {
    let parsed = match raw {
        Value::Object(map) => map
            .get(&BALL_TRACK_ID.to_string())
            .and_then(parse_box)
            .or_else(|| map.get(BALL_LABEL).and_then(parse_box)),
        Value::Array(items) => match items.as_slice() {
            [single] => parse_box(single),
            _ => parse_box(raw),
        },
        _ => None,
    };
    parsed.into()
}

/// Normalize a whole run of raw ball output; the result has the same length.
pub fn normalize_ball_frames(raw: &[Value]) -> Vec<Detection> {
    raw.iter().map(normalize_ball_frame).collect()
}

/// Normalize one frame of raw player output.
///
/// Only mappings from a player id (integer-like key) to a box are understood.
/// `null` or malformed boxes drop that player from the frame; any other
/// frame shape yields an empty frame.
pub fn normalize_player_frame(raw: &Value) -> PlayerFrame {
    let Value::Object(map) = raw else {
        return PlayerFrame::new();
    };
    map.iter()
        .filter_map(|(key, value)| {
            let id = key.trim().parse::<u32>().ok()?;
            parse_box(value).map(|b| (id, b))
        })
        .collect()
}

/// Normalize a whole run of raw player output; the result has the same length.
pub fn normalize_player_frames(raw: &[Value]) -> Vec<PlayerFrame> {
    raw.iter().map(normalize_player_frame).collect()
}

/// Parse exactly four finite numbers.
fn parse_box(value: &Value) -> Option<BoundingBox> {
    let Value::Array(items) = value else {
        return None;
    };
    let [x1, y1, x2, y2] = items.as_slice() else {
        return None;
    };
    let coords = [
        finite(x1)?,
        finite(y1)?,
        finite(x2)?,
        finite(y2)?,
    ];
    Some(BoundingBox::from(coords))
}

fn finite(value: &Value) -> Option<f32> {
    let v = value.as_f64()? as f32;
    v.is_finite().then_some(v)
}
