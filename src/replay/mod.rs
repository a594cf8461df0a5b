//! Replay engine contract.
//!
//! The driver never decodes anything itself. It talks to the engine through
//! [`ReplayEngine`], which covers the four things the run loop needs:
//!
//! - advance one frame
//! - report the current frame number
//! - report whether a failure has occurred
//! - block until queued work has finished
//!
//! [`SyntheticEngine`] is a self-contained implementation that simulates
//! decode and GPU cost, used by the CLI and for driver benchmarking.

mod synthetic;
mod worker;

pub use synthetic::{SyntheticConfig, SyntheticEngine};

/// Whether the engine has hit a failure during replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorState {
    #[default]
    None,
    Error,
}

impl ErrorState {
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A decode/replay engine driven one frame at a time.
///
/// Implementations may queue work asynchronously; a frame is only known to
/// be finished after [`wait_until_idle`](Self::wait_until_idle) returns.
pub trait ReplayEngine {
    /// Decode and replay the next frame.
    ///
    /// Returns false when there are no more frames or replay failed; the
    /// two cases are told apart through [`error_state`](Self::error_state).
    fn process_next_frame(&mut self) -> bool;

    /// Number of the frame that will be replayed next.
    ///
    /// Starts at 0 and increases by one per successful advance.
    fn current_frame_number(&self) -> u32;

    fn error_state(&self) -> ErrorState;

    /// Block until all work queued by previous frames has completed.
    fn wait_until_idle(&mut self);
}

impl<E: ReplayEngine + ?Sized> ReplayEngine for Box<E> {
    fn process_next_frame(&mut self) -> bool {
        (**self).process_next_frame()
    }

    fn current_frame_number(&self) -> u32 {
        (**self).current_frame_number()
    }

    fn error_state(&self) -> ErrorState {
        (**self).error_state()
    }

    fn wait_until_idle(&mut self) {
        (**self).wait_until_idle()
    }
}
