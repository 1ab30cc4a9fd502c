#![allow(dead_code)]

use serde_json::{json, Value};

pub const RUN_ID: &str = "rally-01";

/// Rough broadcast-view court keypoints in a 1920x1080 frame.
pub fn court_keypoints() -> Value {
    json!([
        580.0, 280.0, 1340.0, 280.0, 300.0, 900.0, 1620.0, 900.0, 670.0, 280.0, 400.0, 900.0,
        1250.0, 280.0, 1520.0, 900.0, 640.0, 380.0, 1280.0, 380.0, 420.0, 760.0, 1500.0, 760.0,
        960.0, 380.0, 960.0, 760.0
    ])
}

/// Vertical ball midpoint of an 81-frame rally that bottoms out at frame 40.
pub fn rally_mid_y(k: usize) -> f32 {
    if k <= 40 {
        700.0 - 5.0 * k as f32
    } else {
        500.0 + 5.0 * (k - 40) as f32
    }
}

/// Raw ball frame `k`, cycling through every accepted detector shape and
/// dropping every seventh frame.
fn raw_ball(k: usize) -> Value {
    let y = rally_mid_y(k);
    let b = json!([950.0, y - 6.0, 962.0, y + 6.0]);
    match k {
        _ if k % 7 == 3 => json!({}),
        _ if k % 3 == 0 => json!({ "1": b }),
        _ if k % 3 == 1 => b,
        _ => json!([b]),
    }
}

fn raw_players(k: usize) -> Value {
    let drift = k as f32;
    json!({
        "1": [880.0 + drift, 250.0, 920.0 + drift, 370.0],
        "2": [1000.0 - drift, 480.0, 1080.0 - drift, 860.0],
    })
}

pub fn rally_cache() -> Value {
    json!({
        "run_id": RUN_ID,
        "frame_width": 1920,
        "frame_height": 1080,
        "court_keypoints": court_keypoints(),
        "ball": (0..=80).map(raw_ball).collect::<Vec<_>>(),
        "players": (0..=80).map(raw_players).collect::<Vec<_>>(),
    })
}

pub fn cache_without_ball() -> Value {
    let mut cache = rally_cache();
    cache["ball"] = json!((0..=80).map(|_| json!({})).collect::<Vec<_>>());
    cache
}
