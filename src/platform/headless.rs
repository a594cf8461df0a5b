//! Headless platform: no input devices, invisible surfaces.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::{Platform, Window};
use crate::application::HostCommand;

/// How long a paused headless loop sleeps between stop-flag checks.
const PAUSED_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Surface that exists only as a registry entry.
#[derive(Debug)]
pub struct HeadlessWindow {
    title: String,
    released: AtomicBool,
}

impl HeadlessWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            released: AtomicBool::new(false),
        }
    }
}

impl Window for HeadlessWindow {
    fn title(&self) -> &str {
        &self.title
    }

    fn release(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            tracing::debug!("Released headless window '{}'", self.title);
        }
    }

    fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

/// Platform with no input source.
///
/// The only event it ever produces is `Quit`, when the shared stop flag is
/// raised. A paused headless replay therefore waits until interrupted.
pub struct HeadlessPlatform {
    stop: Arc<AtomicBool>,
    quit_sent: bool,
    warned_paused: bool,
}

impl HeadlessPlatform {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        Self {
            stop,
            quit_sent: false,
            warned_paused: false,
        }
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

impl Platform for HeadlessPlatform {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn pump_events(&mut self, wait_for_input: bool) -> Vec<HostCommand> {
        if wait_for_input && !self.warned_paused {
            tracing::warn!("Replay is paused on a headless platform; press Ctrl-C to quit");
            self.warned_paused = true;
        }

        while wait_for_input && !self.stop_requested() {
            thread::sleep(PAUSED_POLL_INTERVAL);
        }

        if self.stop_requested() && !self.quit_sent {
            self.quit_sent = true;
            return vec![HostCommand::Quit];
        }
        Vec::new()
    }

    fn create_window(&mut self, title: &str) -> io::Result<Arc<dyn Window>> {
        Ok(Arc::new(HeadlessWindow::new(title)))
    }
}
