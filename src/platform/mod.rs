//! Host platforms.
//!
//! A [`Platform`] is the run loop's only view of the host: it pumps pending
//! events (turning them into [`HostCommand`]s) and hands out output
//! surfaces. The implementation is chosen once, at construction time:
//!
//! - `headless`: no input and no visible surfaces
//! - `terminal`: keyboard control through crossterm raw mode

mod headless;
mod keyboard;
mod terminal;

pub use headless::{HeadlessPlatform, HeadlessWindow};
pub use keyboard::map_key_event;
pub use terminal::{TerminalPlatform, TerminalWindow};

use std::io::{self, IsTerminal};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::application::HostCommand;

/// An output surface owned by the host.
///
/// The run loop only keeps shared handles to windows; it calls
/// [`release`](Self::release) only when the host failed to unregister one.
pub trait Window: Send + Sync {
    fn title(&self) -> &str;

    /// Release the resources behind this surface. Must be idempotent.
    fn release(&self);

    fn is_released(&self) -> bool;
}

/// Event source and window factory for a host.
pub trait Platform {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Process pending host events.
    ///
    /// When `wait_for_input` is true the call blocks until at least one
    /// event arrives (or the host is asked to stop), so a paused run loop
    /// doesn't spin.
    fn pump_events(&mut self, wait_for_input: bool) -> Vec<HostCommand>;

    /// Create a new output surface.
    fn create_window(&mut self, title: &str) -> io::Result<Arc<dyn Window>>;
}

/// Which platform to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Headless,
    Terminal,
}

impl PlatformKind {
    /// Headless when requested or when stdin is not an interactive terminal.
    pub fn detect(force_headless: bool) -> Self {
        if force_headless || !io::stdin().is_terminal() {
            Self::Headless
        } else {
            Self::Terminal
        }
    }
}

/// Construct the platform for `kind`.
///
/// `stop` is a shared flag (set from a Ctrl-C handler) that every platform
/// turns into a [`HostCommand::Quit`].
pub fn select(kind: PlatformKind, stop: Arc<AtomicBool>) -> io::Result<Box<dyn Platform>> {
    match kind {
        PlatformKind::Headless => Ok(Box::new(HeadlessPlatform::new(stop))),
        PlatformKind::Terminal => Ok(Box::new(TerminalPlatform::new(stop)?)),
    }
}
