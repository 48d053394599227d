// Host-side tests for landmark validation, classification and the detector feed.

use std::time::{Duration, Instant};

use evergreen_core::gesture::LANDMARK_COUNT;
use evergreen_core::{
    DetectorError, FeedEvent, GestureClassifier, GestureFeed, HandLandmarks, HandPose, Landmark,
    LandmarkError, Mode, RotationIntent, SceneContext, ScriptedSource, SyntheticHand,
};
use glam::Vec2;

fn pose(pinch: f32, fist: f32) -> HandPose {
    HandPose {
        pinch_distance: pinch,
        fist_distance: fist,
        palm: Vec2::splat(0.5),
    }
}

fn next_event(feed: &mut GestureFeed) -> FeedEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = feed.try_next() {
            return event;
        }
        assert!(Instant::now() < deadline, "no event from detector thread");
        std::thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn synthetic_hand_has_requested_distances() {
    let hand = SyntheticHand::default()
        .with_pinch(0.03)
        .with_spread(0.3)
        .at(0.25, 0.75)
        .build();
    assert_eq!(hand.points().len(), LANDMARK_COUNT);
    let pose = HandPose::from_landmarks(&hand);
    assert!((pose.pinch_distance - 0.03).abs() < 1e-4);
    assert!((pose.fist_distance - 0.3).abs() < 1e-4);
    assert!(pose.palm.distance(Vec2::new(0.25, 0.75)) < 1e-6);
}

#[test]
fn pinch_with_inconclusive_fist_selects_focus() {
    let decision = GestureClassifier::default().classify(&pose(0.03, 0.3));
    assert_eq!(decision.mode, Some(Mode::Focus));
}

#[test]
fn fist_overrides_pinch_in_the_same_frame() {
    let classifier = GestureClassifier::default();
    assert_eq!(classifier.classify(&pose(0.03, 0.15)).mode, Some(Mode::Tree));
    assert_eq!(classifier.classify(&pose(0.2, 0.15)).mode, Some(Mode::Tree));
}

#[test]
fn open_hand_selects_scatter_even_when_pinching() {
    let classifier = GestureClassifier::default();
    assert_eq!(classifier.classify(&pose(0.2, 0.45)).mode, Some(Mode::Scatter));
    assert_eq!(classifier.classify(&pose(0.01, 0.45)).mode, Some(Mode::Scatter));
}

#[test]
fn mid_range_hand_without_pinch_is_inconclusive() {
    let decision = GestureClassifier::default().classify(&pose(0.2, 0.3));
    assert_eq!(decision.mode, None);
}

#[test]
fn palm_position_maps_to_rotation_intent() {
    let classifier = GestureClassifier::default();
    let mut p = pose(0.2, 0.3);
    p.palm = Vec2::new(0.0, 1.0);
    assert_eq!(classifier.classify(&p).rotation_intent, RotationIntent::new(-1.0, 1.0));
    p.palm = Vec2::new(0.5, 0.5);
    assert_eq!(classifier.classify(&p).rotation_intent, RotationIntent::new(0.0, 0.0));
    p.palm = Vec2::new(0.75, 0.25);
    let intent = classifier.classify(&p).rotation_intent;
    assert!((intent.x() - 0.5).abs() < 1e-6 && (intent.y() + 0.5).abs() < 1e-6);
}

#[test]
fn missing_hand_leaves_state_untouched() {
    let classifier = GestureClassifier::default();
    let mut ctx = SceneContext::new(Mode::Scatter, 1);
    ctx.set_rotation_intent(RotationIntent::new(0.3, -0.2));
    assert!(classifier.apply(None, &mut ctx).is_none());
    assert_eq!(ctx.mode(), Mode::Scatter);
    assert_eq!(ctx.rotation_intent(), RotationIntent::new(0.3, -0.2));
}

#[test]
fn applied_frames_drive_the_context() {
    let classifier = GestureClassifier::default();
    let mut ctx = SceneContext::new(Mode::Tree, 1);

    classifier.apply(Some(&SyntheticHand::open().at(1.0, 0.5).build()), &mut ctx);
    assert_eq!(ctx.mode(), Mode::Scatter);
    assert!((ctx.rotation_intent().x() - 1.0).abs() < 1e-6);

    classifier.apply(Some(&SyntheticHand::pinch().build()), &mut ctx);
    assert_eq!(ctx.mode(), Mode::Focus);

    classifier.apply(Some(&SyntheticHand::fist().build()), &mut ctx);
    assert_eq!(ctx.mode(), Mode::Tree);
    assert_eq!(ctx.focus(), None);
}

#[test]
fn overridden_pinch_never_reaches_the_context() {
    let classifier = GestureClassifier::default();
    let mut ctx = SceneContext::new(Mode::Tree, 1);
    let hand = SyntheticHand::fist().with_pinch(0.01).build();
    let decision = classifier.apply(Some(&hand), &mut ctx).expect("hand present");
    assert_eq!(decision.mode, Some(Mode::Tree));
    assert_eq!(ctx.mode(), Mode::Tree);
}

#[test]
fn landmark_sets_are_validated() {
    let short = HandLandmarks::new(vec![Landmark::default(); 5]);
    assert_eq!(
        short,
        Err(LandmarkError::WrongCount {
            expected: LANDMARK_COUNT,
            found: 5
        })
    );

    let mut points = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    points[7].y = f32::NAN;
    assert_eq!(
        HandLandmarks::new(points),
        Err(LandmarkError::NonFinite { index: 7 })
    );

    assert!(HandLandmarks::new(vec![Landmark::default(); LANDMARK_COUNT]).is_ok());
}

#[test]
fn raw_frames_failing_validation_become_no_hand() {
    let mut points = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    assert!(HandLandmarks::from_raw(&points).is_some());
    points[12].z = f32::INFINITY;
    assert_eq!(HandLandmarks::from_raw(&points), None);
    assert_eq!(HandLandmarks::from_raw(&points[..4]), None);
}

#[test]
fn failing_detector_reports_unavailable() {
    let mut feed = GestureFeed::spawn(ScriptedSource::failing(DetectorError::PermissionDenied));
    match next_event(&mut feed) {
        FeedEvent::Unavailable(DetectorError::PermissionDenied) => {}
        other => panic!("unexpected event {other:?}"),
    }
    assert!(!feed.is_available());
}

#[test]
fn scripted_detector_delivers_frames_in_order() {
    let frames = vec![
        Some(SyntheticHand::pinch().build()),
        None,
        Some(SyntheticHand::fist().build()),
    ];
    let mut feed = GestureFeed::spawn(ScriptedSource::new(frames, Duration::from_millis(1)));
    assert!(feed.is_available());

    let classifier = GestureClassifier::default();
    let mut ctx = SceneContext::new(Mode::Scatter, 1);
    let mut modes = Vec::new();
    for _ in 0..3 {
        match next_event(&mut feed) {
            FeedEvent::Frame(hand) => {
                classifier.apply(hand.as_ref(), &mut ctx);
                modes.push(ctx.mode());
            }
            FeedEvent::Unavailable(e) => panic!("detector failed: {e}"),
        }
    }
    assert_eq!(modes, vec![Mode::Focus, Mode::Focus, Mode::Tree]);
}

#[test]
fn detector_lost_mid_run_reports_unavailable_after_its_frames() {
    let frames = vec![Some(SyntheticHand::open().build()), None];
    let source = ScriptedSource::new(frames, Duration::from_millis(1))
        .looping()
        .fail_after(3, DetectorError::Inference("model crashed".into()));
    let mut feed = GestureFeed::spawn(source);

    for _ in 0..3 {
        match next_event(&mut feed) {
            FeedEvent::Frame(_) => {}
            FeedEvent::Unavailable(e) => panic!("lost too early: {e}"),
        }
    }
    match next_event(&mut feed) {
        FeedEvent::Unavailable(DetectorError::Inference(msg)) => assert_eq!(msg, "model crashed"),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(!feed.is_available());

    // the thread has ended; nothing else arrives
    std::thread::sleep(Duration::from_millis(20));
    assert!(feed.try_next().is_none());
    assert!(!feed.is_available());
}

#[test]
fn finished_script_does_not_flood_the_feed() {
    let mut feed = GestureFeed::spawn(ScriptedSource::new(vec![None], Duration::ZERO));
    let window = Duration::from_millis(300);
    let start = Instant::now();
    let mut drained = 0;
    while start.elapsed() < window {
        while let Some(event) = feed.try_next() {
            assert!(matches!(event, FeedEvent::Frame(None)));
            drained += 1;
        }
        std::thread::yield_now();
    }
    assert!(drained >= 1);
    assert!(drained < 20, "drained {drained} events in {window:?}");
    assert!(feed.is_available());

    let dropped = Instant::now();
    drop(feed);
    assert!(dropped.elapsed() < Duration::from_secs(1));
}

#[test]
fn undrained_feed_shuts_down_promptly() {
    let frames = vec![Some(SyntheticHand::pinch().build())];
    let feed = GestureFeed::spawn(ScriptedSource::new(frames, Duration::ZERO).looping());
    // the detector fills the single slot and blocks on the next send
    std::thread::sleep(Duration::from_millis(20));
    let dropped = Instant::now();
    drop(feed);
    assert!(dropped.elapsed() < Duration::from_secs(1));
}
