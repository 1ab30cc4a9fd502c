mod common;

use approx::assert_relative_eq;
use court_track::{
    run_pipeline, CourtTrackConfig, DetectionCache, Pipeline, PipelineError, TrackingReport,
};

fn cache() -> DetectionCache {
    serde_json::from_value(common::rally_cache()).expect("cache")
}

#[test]
fn rally_produces_a_complete_report() {
    let report = run_pipeline(&cache(), &CourtTrackConfig::default()).expect("report");

    assert_eq!(report.run_id, common::RUN_ID);
    assert_eq!(report.frame_count, 81);
    assert_eq!(report.ball_track.len(), 81);
    assert!(report.ball_track.iter().all(|d| !d.is_absent()));

    // dropped frame 3 is reconstructed on the straight descent
    let b = report.ball_track[3].as_box().expect("box");
    assert_relative_eq!(b.mid_y(), common::rally_mid_y(3), epsilon = 1e-3);

    assert_eq!(report.events.len(), 1, "events: {:?}", report.events);
    assert!(report.events[0].abs_diff(40) <= 3);
    assert_eq!(report.ball_hit.len(), 81);
    assert_eq!(report.ball_hit.iter().filter(|&&h| h).count(), 1);
    assert!(report.ball_hit[report.events[0]]);

    let positions = &report.court_positions;
    assert_eq!(positions.len(), 81);
    assert!(positions.players.iter().all(|p| p.len() == 2));
    assert!(positions.ball.iter().all(Option::is_some));

    assert_eq!(report.mini_court.keypoints.len(), 28);
    assert_eq!(report.mini_court.lines.len(), 8);
}

#[test]
fn far_player_stays_above_near_player_on_the_diagram() {
    let report = run_pipeline(&cache(), &CourtTrackConfig::default()).expect("report");
    let net_y = report.mini_court.net[0].y;
    for frame in &report.court_positions.players {
        assert!(frame[&1].y < net_y, "player 1 at {:?}", frame[&1]);
        assert!(frame[&2].y > net_y, "player 2 at {:?}", frame[&2]);
    }
}

#[test]
fn run_without_ball_detections_still_maps_players() {
    let cache: DetectionCache =
        serde_json::from_value(common::cache_without_ball()).expect("cache");
    let report = run_pipeline(&cache, &CourtTrackConfig::default()).expect("report");

    assert!(report.ball_track.iter().all(|d| d.is_absent()));
    assert!(report.events.is_empty());
    assert!(report.ball_hit.iter().all(|&h| !h));
    assert!(report.court_positions.ball.iter().all(Option::is_none));
    assert!(report.court_positions.players.iter().all(|p| p.len() == 2));
}

#[test]
fn invalid_config_is_rejected_before_processing() {
    let mut config = CourtTrackConfig::default();
    config.events.smoothing_window = 0;
    assert!(matches!(
        run_pipeline(&cache(), &config),
        Err(PipelineError::Config(_))
    ));
    assert!(Pipeline::new(config).is_err());
}

#[test]
fn narrow_frame_still_produces_events_and_positions() {
    let mut cache = cache();
    cache.frame_width = 299;
    let report = run_pipeline(&cache, &CourtTrackConfig::default()).expect("report");

    assert_eq!(report.events.len(), 1, "events: {:?}", report.events);
    assert!(report.ball_track.iter().all(|d| !d.is_absent()));
    assert_eq!(report.court_positions.len(), 81);
    assert!(report.court_positions.players.iter().all(|p| p.len() == 2));
    assert!(report.court_positions.ball.iter().all(Option::is_some));
    assert!(report.mini_court.canvas.min.x < 0.0);
}

#[test]
fn events_only_matches_the_full_run() {
    let pipeline = Pipeline::new(CourtTrackConfig::default()).expect("pipeline");
    let cache = cache();
    let report = pipeline.run(&cache).expect("report");
    assert_eq!(pipeline.events(&cache), report.events);
}

#[test]
fn report_survives_a_json_round_trip() {
    let report = run_pipeline(&cache(), &CourtTrackConfig::default()).expect("report");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(TrackingReport::default_path(&report.run_id));
    report.write_json(&path).expect("write");
    assert_eq!(TrackingReport::load_json(&path).expect("load"), report);
}
