//! Measurement-range behavior through the full run loop

use std::time::Duration;

use replay_driver::application::{MeasurementOutcome, MeasurementRange, PlaybackState};

use crate::helpers::{scripted_app, ManualClock, ScriptedEngine};

#[test]
fn quit_after_range_measures_exactly_the_range() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(100, clock.clone());
    let mut app = scripted_app(vec![], engine, clock);

    let outcome = app
        .run(MeasurementRange::new(10, 20).quit_after_range(true))
        .unwrap();

    // Frame 20 is never replayed.
    assert_eq!(log.borrow().replayed, 20);
    assert_eq!(app.state(), PlaybackState::Stopped);
    assert!(log.borrow().drains.is_empty());

    let timer = app.measurement();
    assert_eq!(timer.start_time(), Some(Duration::from_millis(10)));
    assert_eq!(timer.end_time(), Some(Duration::from_millis(20)));

    let report = outcome.report().copied().unwrap();
    assert_eq!(report.frame_count, 10);
    assert!((report.seconds - 0.010).abs() < 1e-9);
    assert!((report.fps - 10.0 / report.seconds).abs() < 1e-9);
    assert_eq!(
        report.to_string(),
        "Measurement range FPS: 1000.000000 fps, 0.010000 seconds, 10 frames, 1 loop, framerange [10-20)"
    );
}

#[test]
fn without_quit_replay_continues_past_the_range() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(40, clock.clone());
    let mut app = scripted_app(vec![], engine, clock);

    let outcome = app.run(MeasurementRange::new(10, 20)).unwrap();

    assert_eq!(log.borrow().replayed, 40);
    let report = outcome.report().copied().unwrap();
    assert_eq!((report.start_frame, report.end_frame), (10, 20));
    assert!((report.seconds - 0.010).abs() < 1e-9);
}

#[test]
fn flush_includes_queued_work_in_the_timestamps() {
    let clock = ManualClock::default();
    let (mut engine, log) = ScriptedEngine::new(100, clock.clone());
    engine.gpu_cost = Duration::from_millis(3);
    let mut app = scripted_app(vec![], engine, clock);

    let range = MeasurementRange::new(10, 20)
        .quit_after_range(true)
        .flush_boundaries(true);
    let outcome = app.run(range).unwrap();

    // Drained right before each boundary timestamp.
    assert_eq!(log.borrow().drains, vec![10, 20]);

    // Start: 10ms CPU + 30ms queued. End: +10ms CPU + 30ms queued.
    let timer = app.measurement();
    assert_eq!(timer.start_time(), Some(Duration::from_millis(40)));
    assert_eq!(timer.end_time(), Some(Duration::from_millis(80)));

    let report = outcome.report().copied().unwrap();
    assert!((report.fps - 250.0).abs() < 1e-6);
}

#[test]
fn inverted_range_reports_invalid_without_dividing() {
    let clock = ManualClock::default();
    let (engine, _log) = ScriptedEngine::new(30, clock.clone());
    let mut app = scripted_app(vec![], engine, clock);

    let outcome = app.run(MeasurementRange::new(20, 10)).unwrap();
    assert_eq!(
        outcome,
        MeasurementOutcome::InvalidRange {
            start_frame: 20,
            end_frame: 10
        }
    );
}

#[test]
fn short_capture_clips_to_last_frame() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(15, clock.clone());
    let mut app = scripted_app(vec![], engine, clock);

    let outcome = app.run(MeasurementRange::new(10, 20)).unwrap();

    // One drain, taken while clipping.
    assert_eq!(log.borrow().drains, vec![15]);
    let report = outcome.report().copied().unwrap();
    assert_eq!((report.start_frame, report.end_frame), (10, 15));
    assert_eq!(report.frame_count, 5);
    assert!((report.seconds - 0.005).abs() < 1e-9);
    assert!(report.to_string().ends_with("5 frames, 1 loop, framerange [10-15)"));
}

#[test]
fn capture_shorter_than_start_never_starts() {
    let clock = ManualClock::default();
    let (engine, _log) = ScriptedEngine::new(5, clock.clone());
    let mut app = scripted_app(vec![], engine, clock);

    let outcome = app.run(MeasurementRange::new(10, 20)).unwrap();
    assert_eq!(
        outcome,
        MeasurementOutcome::NeverStarted {
            start_frame: 10,
            last_frame: 5
        }
    );
}

#[test]
fn engine_error_always_reports_replay_failed() {
    for fail_at in [3, 12, 25] {
        let clock = ManualClock::default();
        let (mut engine, _log) = ScriptedEngine::new(100, clock.clone());
        engine.fail_at = Some(fail_at);
        let mut app = scripted_app(vec![], engine, clock);

        let outcome = app.run(MeasurementRange::new(10, 20)).unwrap();
        assert_eq!(outcome, MeasurementOutcome::ReplayFailed, "fail_at={}", fail_at);
        assert_eq!(app.state(), PlaybackState::Stopped);
    }
}

#[test]
fn default_range_measures_whole_replay() {
    let clock = ManualClock::default();
    let (engine, _log) = ScriptedEngine::new(60, clock.clone());
    let mut app = scripted_app(vec![], engine, clock);

    let outcome = app.run(MeasurementRange::default()).unwrap();
    let report = outcome.report().copied().unwrap();
    assert_eq!((report.start_frame, report.end_frame), (0, 60));
    assert!((report.fps - 1000.0).abs() < 1e-6);
}
