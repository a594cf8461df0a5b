//! The run-loop controller.

use std::sync::Arc;

use super::clock::{Clock, MonotonicClock};
use super::error::ApplicationError;
use super::measurement::{BoundaryAction, MeasurementOutcome, MeasurementRange, MeasurementTimer};
use super::state::{HostCommand, PlaybackState};
use super::windows::WindowRegistry;
use crate::platform::{Platform, Window};
use crate::replay::ReplayEngine;

/// Drives frame-by-frame replay.
///
/// Owns the playback state, the window registry, and the measurement timer.
/// The replay engine is attached with [`initialize`](Self::initialize) and
/// the host is reached only through the [`Platform`] given at construction.
pub struct Application {
    name: String,
    platform: Box<dyn Platform>,
    engine: Option<Box<dyn ReplayEngine>>,
    clock: Box<dyn Clock>,
    state: PlaybackState,
    pause_frame: Option<u32>,
    windows: WindowRegistry,
    timer: MeasurementTimer,
}

impl Application {
    /// Create a controller with no engine attached, timed by the wall clock.
    pub fn new(name: impl Into<String>, platform: Box<dyn Platform>) -> Self {
        Self::with_clock(name, platform, Box::new(MonotonicClock::new()))
    }

    pub fn with_clock(
        name: impl Into<String>,
        platform: Box<dyn Platform>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            name: name.into(),
            platform,
            engine: None,
            clock,
            state: PlaybackState::Stopped,
            pause_frame: None,
            windows: WindowRegistry::new(),
            timer: MeasurementTimer::new(MeasurementRange::default()),
        }
    }

    /// Attach the replay engine. Replaces any previously attached engine.
    pub fn initialize(&mut self, engine: Box<dyn ReplayEngine>) {
        if self.engine.is_some() {
            tracing::warn!("Replacing the replay engine of application '{}'", self.name);
        }
        self.engine = Some(engine);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_live()
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    pub fn pause_frame(&self) -> Option<u32> {
        self.pause_frame
    }

    pub fn set_pause_frame(&mut self, pause_frame: Option<u32>) {
        self.pause_frame = pause_frame;
    }

    /// Frame number reported by the engine, if one is attached.
    pub fn current_frame(&self) -> Option<u32> {
        self.engine.as_ref().map(|e| e.current_frame_number())
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Timer state of the current (or last) run.
    pub fn measurement(&self) -> &MeasurementTimer {
        &self.timer
    }

    /// Replay until the engine runs out of frames or a stop is requested.
    ///
    /// This is the only blocking entry point. Returns the measurement
    /// outcome, which has already been logged.
    ///
    /// # Errors
    /// Returns `ApplicationError::NotInitialized` if no engine is attached.
    pub fn run(&mut self, range: MeasurementRange) -> Result<MeasurementOutcome, ApplicationError> {
        if self.engine.is_none() {
            return Err(ApplicationError::NotInitialized {
                name: self.name.clone(),
            });
        }

        self.state = PlaybackState::Running;
        self.timer = MeasurementTimer::new(range);
        tracing::info!(
            "Starting replay '{}' on {} platform, measurement range [{}-{})",
            self.name,
            self.platform.name(),
            range.start_frame,
            range.end_frame
        );

        while self.state.is_live() {
            let commands = self.platform.pump_events(self.is_paused());
            for command in commands {
                self.apply(command);
            }

            // Only replay if no quit was processed and we aren't paused.
            if self.state == PlaybackState::Running {
                if let Some(engine) = self.engine.as_deref_mut() {
                    if self.timer.check_boundary(engine, self.clock.as_ref()) == BoundaryAction::Stop {
                        tracing::info!("Reached end of measurement range, stopping");
                        self.state = PlaybackState::Stopped;
                    }
                }

                if self.state == PlaybackState::Running {
                    self.play_single_frame();
                }
            }
        }

        Ok(self.report_measurement())
    }

    /// Compute and log the measurement outcome of the current run.
    ///
    /// Called automatically when [`run`](Self::run) exits.
    pub fn report_measurement(&mut self) -> MeasurementOutcome {
        let outcome = match self.engine.as_deref_mut() {
            Some(engine) => self.timer.report(engine, self.clock.as_ref(), self.state),
            None => MeasurementOutcome::ReplayFailed,
        };
        outcome.log();
        outcome
    }

    /// Apply a command produced by the platform.
    pub fn apply(&mut self, command: HostCommand) {
        match command {
            HostCommand::Quit => self.request_stop(),
            HostCommand::TogglePause => self.set_paused(!self.is_paused()),
            HostCommand::StepFrame => {
                if self.is_paused() {
                    self.play_single_frame();
                }
            }
        }
    }

    /// Ask the run loop to exit after the current iteration.
    pub fn request_stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// Pause or resume playback.
    ///
    /// Only switches between `Running` and `Paused`; a stopped controller
    /// stays stopped until the next [`run`](Self::run).
    pub fn set_paused(&mut self, paused: bool) {
        match (paused, self.state) {
            (true, PlaybackState::Running) => {
                self.state = PlaybackState::Paused;
                if let Some(frame) = self.current_frame().filter(|&f| f > 0) {
                    tracing::info!("Paused at frame {}", frame);
                }
            }
            (false, PlaybackState::Paused) => self.state = PlaybackState::Running,
            _ => {}
        }
    }

    /// Replay exactly one frame, whether paused or not.
    ///
    /// On failure the controller stops. On success a live controller pauses
    /// if the pause frame was reached.
    pub fn play_single_frame(&mut self) -> bool {
        let Some(engine) = self.engine.as_deref_mut() else {
            return false;
        };

        if !engine.process_next_frame() {
            self.state = PlaybackState::Stopped;
            return false;
        }

        let frame = engine.current_frame_number();
        if self.state.is_live() && self.pause_frame == Some(frame) {
            self.state = PlaybackState::Paused;
        }

        // Checked separately so both cases log: pausing on the requested
        // frame, and stepping forward while already paused.
        if self.is_paused() {
            tracing::info!("Paused at frame {}", frame);
        }

        true
    }

    /// Track a window created by the host.
    ///
    /// Returns false (and logs) if the same window is already registered.
    pub fn register_window(&mut self, window: Arc<dyn Window>) -> bool {
        let title = window.title().to_string();
        if !self.windows.insert(window) {
            tracing::warn!(
                "Window '{}' was registered with the application more than once",
                title
            );
            return false;
        }
        tracing::debug!("Registered window '{}'", title);
        true
    }

    /// Stop tracking a window.
    ///
    /// Returns false (and logs) if the window was never registered.
    pub fn unregister_window(&mut self, window: &Arc<dyn Window>) -> bool {
        if !self.windows.remove(window) {
            tracing::warn!(
                "A remove request was made for window '{}', which was never registered with the application",
                window.title()
            );
            return false;
        }
        tracing::debug!("Unregistered window '{}'", window.title());
        true
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        if self.windows.is_empty() {
            return;
        }

        tracing::info!(
            "Application '{}' is releasing {} window(s) that were not released by their owner",
            self.name,
            self.windows.len()
        );
        for window in self.windows.drain() {
            tracing::debug!("Releasing window '{}'", window.title());
            window.release();
        }
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.name)
            .field("platform", &self.platform.name())
            .field("initialized", &self.engine.is_some())
            .field("state", &self.state)
            .field("pause_frame", &self.pause_frame)
            .field("windows", &self.windows)
            .finish()
    }
}
