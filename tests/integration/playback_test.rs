//! Run-loop state machine and window registry tests

use std::sync::Arc;

use replay_driver::application::{HostCommand, MeasurementRange, PlaybackState};
use replay_driver::platform::{HeadlessWindow, Window};

use crate::helpers::{scripted_app, ManualClock, ScriptedEngine};

#[test]
fn pause_frame_pauses_once_and_stays_paused() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(50, clock.clone());
    // One empty batch arrives while paused; the exhausted script then quits.
    let script = vec![Vec::new(); 6];
    let mut app = scripted_app(script, engine, clock);
    app.set_pause_frame(Some(5));

    app.run(MeasurementRange::default()).unwrap();

    // Paused at frame 5 and the scripted platform quit while paused.
    assert_eq!(log.borrow().replayed, 5);
    assert_eq!(app.current_frame(), Some(5));
}

#[test]
fn resume_after_pause_frame_continues_to_the_end() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(12, clock.clone());
    // The fourth replayed frame pauses; the fifth pump resumes.
    let script = vec![
        vec![],
        vec![],
        vec![],
        vec![],
        vec![HostCommand::TogglePause],
    ];
    let mut app = scripted_app(script, engine, clock);
    app.set_pause_frame(Some(4));

    app.run(MeasurementRange::default()).unwrap();

    assert_eq!(log.borrow().replayed, 12);
    assert_eq!(app.state(), PlaybackState::Stopped);
}

#[test]
fn single_step_while_paused_replays_one_frame_each() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(50, clock.clone());
    let script = vec![
        vec![HostCommand::TogglePause],
        vec![HostCommand::StepFrame],
        vec![HostCommand::StepFrame, HostCommand::StepFrame],
        vec![HostCommand::Quit],
    ];
    let mut app = scripted_app(script, engine, clock);

    app.run(MeasurementRange::default()).unwrap();
    assert_eq!(log.borrow().replayed, 3);
}

#[test]
fn single_step_past_the_end_stops_the_loop() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(1, clock.clone());
    let script = vec![
        vec![HostCommand::TogglePause],
        vec![HostCommand::StepFrame],
        vec![HostCommand::StepFrame],
    ];
    let mut app = scripted_app(script, engine, clock);

    app.run(MeasurementRange::default()).unwrap();
    assert_eq!(log.borrow().replayed, 1);
    assert_eq!(app.state(), PlaybackState::Stopped);
}

#[test]
fn quit_wins_over_toggle_in_the_same_batch() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(50, clock.clone());
    let script = vec![
        vec![HostCommand::Quit, HostCommand::TogglePause],
        vec![HostCommand::StepFrame],
        vec![HostCommand::StepFrame],
    ];
    let mut app = scripted_app(script, engine, clock);

    app.run(MeasurementRange::default()).unwrap();
    assert_eq!(log.borrow().replayed, 0);
    assert_eq!(app.state(), PlaybackState::Stopped);
}

#[test]
fn quit_before_any_frame_replays_nothing() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(25, clock.clone());
    let mut app = scripted_app(vec![vec![HostCommand::Quit]], engine, clock);

    app.run(MeasurementRange::default()).unwrap();
    assert_eq!(log.borrow().replayed, 0);
}

#[test]
fn step_while_running_is_ignored() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(25, clock.clone());
    let script = vec![vec![HostCommand::StepFrame], vec![HostCommand::Quit]];
    let mut app = scripted_app(script, engine, clock);

    app.run(MeasurementRange::default()).unwrap();
    // Only the regular frame of the first iteration.
    assert_eq!(log.borrow().replayed, 1);
}

#[test]
fn toggle_pause_resumes_replay() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(25, clock.clone());
    let script = vec![
        vec![HostCommand::TogglePause],
        vec![HostCommand::TogglePause],
        vec![HostCommand::Quit],
    ];
    let mut app = scripted_app(script, engine, clock);

    app.run(MeasurementRange::default()).unwrap();
    assert_eq!(log.borrow().replayed, 1);
}

#[test]
fn failed_step_at_pause_frame_stops_the_loop() {
    let clock = ManualClock::default();
    let (engine, log) = ScriptedEngine::new(3, clock.clone());
    let script = vec![vec![], vec![], vec![], vec![HostCommand::StepFrame]];
    let mut app = scripted_app(script, engine, clock);
    app.set_pause_frame(Some(3));

    app.run(MeasurementRange::default()).unwrap();
    assert_eq!(log.borrow().replayed, 3);
    assert_eq!(app.state(), PlaybackState::Stopped);
}

#[test]
fn stopped_controller_ignores_pause_frame() {
    let clock = ManualClock::default();
    let (engine, _log) = ScriptedEngine::new(10, clock.clone());
    let mut app = scripted_app(vec![], engine, clock);
    app.set_pause_frame(Some(1));

    assert!(app.play_single_frame());
    assert_eq!(app.current_frame(), Some(1));
    assert_eq!(app.state(), PlaybackState::Stopped);

    app.set_paused(true);
    assert_eq!(app.state(), PlaybackState::Stopped);
}

#[test]
fn windows_register_once_and_leaks_are_released() {
    let clock = ManualClock::default();
    let (engine, _log) = ScriptedEngine::new(3, clock.clone());
    let mut app = scripted_app(vec![], engine, clock);

    let main: Arc<dyn Window> = Arc::new(HeadlessWindow::new("main"));
    let overlay: Arc<dyn Window> = Arc::new(HeadlessWindow::new("overlay"));
    let never: Arc<dyn Window> = Arc::new(HeadlessWindow::new("never"));

    assert!(app.register_window(main.clone()));
    assert!(app.register_window(overlay.clone()));
    assert!(!app.register_window(main.clone()));
    assert!(!app.unregister_window(&never));
    assert_eq!(app.window_count(), 2);

    app.run(MeasurementRange::default()).unwrap();
    assert!(app.unregister_window(&overlay));

    drop(app);
    assert!(main.is_released());
    assert!(!overlay.is_released());
    assert!(!never.is_released());
}
