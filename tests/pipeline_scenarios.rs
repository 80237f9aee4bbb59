use shelfscan_rs::detection::HorizontalZone;
use shelfscan_rs::{FrameSize, Pipeline, PipelineConfig, RawDetection, Rect};

fn bottle_at(x: f32) -> RawDetection {
    RawDetection::new("bottle", 0.8, Rect::new(x, 100.0, 50.0, 200.0))
}

#[test]
fn test_bottle_confirms_on_fifth_frame_and_announces_once() {
    let mut pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let frame = FrameSize::new(640, 480);

    let mut announced_at = Vec::new();
    for i in 0..5u64 {
        let now = i * 30;
        let out = pipeline.tick(&[bottle_at(100.0)], frame, now);

        let track = pipeline.tracker().tracks().next().unwrap();
        assert!((track.smoothed_distance - 0.75).abs() < 1e-5);

        if i < 4 {
            assert!(out.objects.is_empty(), "confirmed too early at frame {}", i + 1);
        } else {
            assert_eq!(out.objects.len(), 1);
            assert_eq!(out.objects[0].label, "bottle");
        }
        if !out.announcements.is_empty() {
            announced_at.push(now);
        }
    }
    assert_eq!(announced_at, vec![120]);

    // Still visible, but inside the cooldown
    for now in (150..3120).step_by(30) {
        let out = pipeline.tick(&[bottle_at(100.0)], frame, now);
        assert_eq!(out.objects.len(), 1);
        assert!(out.announcements.is_empty(), "re-announced at {now}");
    }

    let out = pipeline.tick(&[bottle_at(100.0)], frame, 3120);
    assert_eq!(out.announcements.len(), 1);
    assert_eq!(out.announcements[0].text, "bottle, 75 centimeters, on your left");
}

#[test]
fn test_zone_change_keeps_identity_without_reannouncing() {
    let mut pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let frame = FrameSize::new(1000, 480);

    // Box center moves from x = 100 to x = 900 in 20 px steps
    let mut ids = Vec::new();
    let mut zones = Vec::new();
    let mut announcements = 0;
    for step in 0..=40u64 {
        let det = RawDetection::new("box", 0.9, Rect::new(step as f32 * 20.0, 100.0, 200.0, 200.0));
        let out = pipeline.tick(&[det], frame, step * 30);
        announcements += out.announcements.len();
        if let Some(obj) = out.objects.first() {
            ids.push(obj.track_id);
            zones.push(obj.spatial_zone.horizontal);
        }
    }

    assert_eq!(pipeline.tracker().len(), 1);
    assert!(!ids.is_empty());
    assert!(ids.iter().all(|id| *id == ids[0]));
    assert_eq!(zones.first(), Some(&HorizontalZone::Left));
    assert_eq!(zones.last(), Some(&HorizontalZone::Right));
    assert_eq!(announcements, 1);
}

#[test]
fn test_staleness_through_pipeline() {
    let mut pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let frame = FrameSize::new(640, 480);

    pipeline.tick(&[bottle_at(100.0)], frame, 1000);
    pipeline.tick(&[], frame, 1599);
    assert_eq!(pipeline.tracker().len(), 1);

    pipeline.tick(&[], frame, 1601);
    assert!(pipeline.tracker().is_empty());
}

#[test]
fn test_lost_track_stays_reported_until_stale() {
    let mut config = PipelineConfig::default();
    config.ranker.min_frames = 3;
    let mut pipeline = Pipeline::new(config).unwrap();
    let frame = FrameSize::new(640, 480);

    for now in [0, 30, 60] {
        pipeline.tick(&[bottle_at(100.0)], frame, now);
    }
    // Brief dropout, e.g. motion blur
    let out = pipeline.tick(&[], frame, 200);
    assert_eq!(out.objects.len(), 1);

    let out = pipeline.tick(&[], frame, 700);
    assert!(out.objects.is_empty());
}

#[test]
fn test_frame_resize_between_ticks() {
    let mut config = PipelineConfig::default();
    config.ranker.min_frames = 1;
    let mut pipeline = Pipeline::new(config).unwrap();
    let det = RawDetection::new("cup", 0.9, Rect::new(280.0, 100.0, 40.0, 60.0));

    let landscape = pipeline.tick(&[det.clone()], FrameSize::new(1280, 720), 0);
    assert_eq!(landscape.objects[0].spatial_zone.horizontal, HorizontalZone::Left);

    let portrait = pipeline.tick(&[det], FrameSize::new(400, 720), 30);
    assert_eq!(portrait.objects[0].spatial_zone.horizontal, HorizontalZone::Right);
    assert_eq!(landscape.objects[0].track_id, portrait.objects[0].track_id);
}

#[test]
fn test_product_search_ignores_people() {
    let mut config = PipelineConfig::product_search();
    config.ranker.min_frames = 1;
    let mut pipeline = Pipeline::new(config).unwrap();

    let dets = RawDetection::parse_batch(
        r#"[
            {"label": "person", "confidence": 0.95, "box": [0, 0, 200, 400]},
            {"label": "bottle", "confidence": 0.8, "box": [300, 100, 50, 200]},
            {"label": "cup", "confidence": 0.5, "box": [500, 100, 50, 50]}
        ]"#,
    )
    .unwrap();
    let out = pipeline.tick(&dets, FrameSize::new(640, 480), 0);

    assert_eq!(out.objects.len(), 1);
    assert_eq!(out.objects[0].label, "bottle");
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["announcements"][0]["trackId"], json["objects"][0]["trackId"]);
}
