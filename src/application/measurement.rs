//! Measurement-range timing.
//!
//! Brackets a `[start_frame, end_frame)` interval of the replay with two
//! wall-clock readings and turns them into a frames-per-second figure once
//! the run loop exits.
//!
//! Both boundaries are checked *before* the frame at that index is replayed,
//! so frame `start_frame` is the first one measured and frame `end_frame` is
//! never measured. When `flush_boundaries` is set, in-flight engine work is
//! drained before each reading so queued work from outside the range is not
//! counted (and work inside it is not missed).

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::clock::Clock;
use super::state::PlaybackState;
use crate::replay::ReplayEngine;

/// Frame interval to measure, plus what to do at its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementRange {
    /// First frame inside the range
    pub start_frame: u32,
    /// First frame after the range (exclusive)
    pub end_frame: u32,
    /// Stop the run loop as soon as `end_frame` is reached
    pub quit_after_range: bool,
    /// Drain in-flight engine work before each boundary timestamp
    pub flush_boundaries: bool,
}

impl MeasurementRange {
    pub fn new(start_frame: u32, end_frame: u32) -> Self {
        Self {
            start_frame,
            end_frame,
            ..Self::default()
        }
    }

    pub fn quit_after_range(mut self, quit: bool) -> Self {
        self.quit_after_range = quit;
        self
    }

    pub fn flush_boundaries(mut self, flush: bool) -> Self {
        self.flush_boundaries = flush;
        self
    }
}

impl Default for MeasurementRange {
    /// Measure the whole replay.
    fn default() -> Self {
        Self {
            start_frame: 0,
            end_frame: u32::MAX,
            quit_after_range: false,
            flush_boundaries: false,
        }
    }
}

/// What the run loop should do after a boundary check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryAction {
    Continue,
    Stop,
}

/// Final FPS figures for a closed measurement range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasurementReport {
    pub fps: f64,
    pub seconds: f64,
    pub frame_count: u32,
    pub start_frame: u32,
    /// Effective (possibly clipped) exclusive end
    pub end_frame: u32,
}

impl MeasurementReport {
    fn new(start_frame: u32, end_frame: u32, elapsed: Duration) -> Self {
        let frame_count = end_frame.saturating_sub(start_frame);
        let seconds = elapsed.as_secs_f64();
        Self {
            fps: f64::from(frame_count) / seconds,
            seconds,
            frame_count,
            start_frame,
            end_frame,
        }
    }
}

impl fmt::Display for MeasurementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Measurement range FPS: {:.6} fps, {:.6} seconds, {} frame{}, 1 loop, framerange [{}-{})",
            self.fps,
            self.seconds,
            self.frame_count,
            if self.frame_count > 1 { "s" } else { "" },
            self.start_frame,
            self.end_frame
        )
    }
}

/// Result of closing out a measurement range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MeasurementOutcome {
    /// FPS was computed
    Completed(MeasurementReport),
    /// The engine reported a failure during replay
    ReplayFailed,
    /// Playback is still running and has not reached the end frame
    StillRunning { current_frame: u32, end_frame: u32 },
    /// `start_frame >= end_frame`
    InvalidRange { start_frame: u32, end_frame: u32 },
    /// Replay stopped before reaching the start frame
    NeverStarted { start_frame: u32, last_frame: u32 },
    /// A boundary frame was passed without being observed by the run loop
    /// (for example, single-stepped over while paused)
    BoundarySkipped { frame: u32 },
}

impl MeasurementOutcome {
    pub fn report(&self) -> Option<&MeasurementReport> {
        match self {
            Self::Completed(report) => Some(report),
            _ => None,
        }
    }

    /// Write the outcome to the log at the appropriate level.
    pub fn log(&self) {
        match *self {
            Self::Completed(report) => tracing::info!("{}", report),
            Self::ReplayFailed => tracing::error!(
                "A failure has occurred during replay, cannot calculate measurement range FPS."
            ),
            Self::StillRunning { .. } => tracing::warn!(
                "Application is still running and has not yet reached the measurement range end frame. \
                 Cannot calculate measurement range FPS."
            ),
            Self::InvalidRange {
                start_frame,
                end_frame,
            } => tracing::warn!(
                "Measurement start frame ({}) is greater than or equal to the end frame ({}). \
                 Cannot calculate measurement range FPS.",
                start_frame,
                end_frame
            ),
            Self::NeverStarted {
                start_frame,
                last_frame,
            } => tracing::warn!(
                "Measurement range start frame ({}) is greater than the last replayed frame ({}). \
                 Measurements were never started, cannot calculate measurement range FPS.",
                start_frame,
                last_frame
            ),
            Self::BoundarySkipped { frame } => tracing::warn!(
                "Measurement range boundary frame ({}) was replayed without being timed. \
                 Cannot calculate measurement range FPS.",
                frame
            ),
        }
    }
}

/// Tracks the two boundary timestamps of one run.
#[derive(Debug, Clone)]
pub struct MeasurementTimer {
    range: MeasurementRange,
    start_time: Option<Duration>,
    end_time: Option<Duration>,
}

impl MeasurementTimer {
    pub fn new(range: MeasurementRange) -> Self {
        Self {
            range,
            start_time: None,
            end_time: None,
        }
    }

    pub fn range(&self) -> &MeasurementRange {
        &self.range
    }

    pub fn start_time(&self) -> Option<Duration> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<Duration> {
        self.end_time
    }

    /// Observe the frame about to be replayed.
    ///
    /// Records `start_time` at `start_frame` and `end_time` at `end_frame`,
    /// each at most once. Returns `Stop` when the end frame is reached and
    /// the range was configured to quit there.
    pub fn check_boundary<E>(&mut self, engine: &mut E, clock: &dyn Clock) -> BoundaryAction
    where
        E: ReplayEngine + ?Sized,
    {
        let current = engine.current_frame_number();

        if current == self.range.start_frame {
            if self.start_time.is_none() {
                self.start_time = Some(self.timestamp(engine, clock));
                tracing::debug!("Measurement range started at frame {}", current);
            }
        } else if current == self.range.end_frame {
            if self.end_time.is_none() {
                self.end_time = Some(self.timestamp(engine, clock));
                tracing::debug!("Measurement range ended at frame {}", current);
            }
            if self.range.quit_after_range {
                return BoundaryAction::Stop;
            }
        }

        BoundaryAction::Continue
    }

    /// Close out the range and compute FPS, if possible.
    ///
    /// If replay stopped inside the range (a capture shorter than the range)
    /// the range is clipped to the last replayed frame: work is drained and
    /// the end is timestamped now.
    pub fn report<E>(
        &mut self,
        engine: &mut E,
        clock: &dyn Clock,
        state: PlaybackState,
    ) -> MeasurementOutcome
    where
        E: ReplayEngine + ?Sized,
    {
        let MeasurementRange {
            start_frame,
            end_frame,
            ..
        } = self.range;
        let current = engine.current_frame_number();

        if engine.error_state().is_error() {
            return MeasurementOutcome::ReplayFailed;
        }

        if state == PlaybackState::Running && current < end_frame {
            return MeasurementOutcome::StillRunning {
                current_frame: current,
                end_frame,
            };
        }

        if start_frame >= end_frame {
            return MeasurementOutcome::InvalidRange {
                start_frame,
                end_frame,
            };
        }

        if current < start_frame {
            return MeasurementOutcome::NeverStarted {
                start_frame,
                last_frame: current,
            };
        }

        let Some(start_time) = self.start_time else {
            return MeasurementOutcome::BoundarySkipped { frame: start_frame };
        };

        let (end_frame, end_time) = if current < end_frame {
            engine.wait_until_idle();
            let now = clock.now();
            self.end_time = Some(now);
            (current, now)
        } else {
            match self.end_time {
                Some(end_time) => (end_frame, end_time),
                None => return MeasurementOutcome::BoundarySkipped { frame: end_frame },
            }
        };

        MeasurementOutcome::Completed(MeasurementReport::new(
            start_frame,
            end_frame,
            end_time.saturating_sub(start_time),
        ))
    }

    fn timestamp<E>(&self, engine: &mut E, clock: &dyn Clock) -> Duration
    where
        E: ReplayEngine + ?Sized,
    {
        if self.range.flush_boundaries {
            engine.wait_until_idle();
        }
        clock.now()
    }
}
