//! Run-loop state
//!
//! Contains the `PlaybackState` machine owned by the controller, as well as
//! the `HostCommand` signals platforms hand back from an event pump.

use std::fmt;

/// Playback state of the run loop.
///
/// `Stopped` is terminal until [`Application::run`](super::Application::run)
/// is invoked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// The loop is not active (not started, finished, or asked to quit)
    #[default]
    Stopped,
    /// Frames are being replayed each iteration
    Running,
    /// Events are still processed, but no frames are replayed
    Paused,
}

impl PlaybackState {
    /// Whether the run loop is live (running or paused).
    pub fn is_live(self) -> bool {
        !matches!(self, Self::Stopped)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// Result of pumping host events.
///
/// Platforms translate their native input into these signals; the
/// controller applies them in order before deciding whether to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Stop the run loop
    Quit,
    /// Flip between running and paused
    TogglePause,
    /// Replay exactly one frame (only honored while paused)
    StepFrame,
}
