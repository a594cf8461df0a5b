//! Interactive terminal platform built on crossterm.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, SetTitle};

use super::keyboard::map_key_event;
use super::{Platform, Window};
use crate::application::HostCommand;

/// Poll granularity while blocked on input, so Ctrl-C is still noticed.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The controlling terminal, used as an output surface.
///
/// Creating one sets the terminal title; releasing it clears the title.
#[derive(Debug)]
pub struct TerminalWindow {
    title: String,
    released: AtomicBool,
}

impl TerminalWindow {
    fn open(title: &str) -> io::Result<Self> {
        execute!(io::stderr(), SetTitle(title))?;
        Ok(Self {
            title: title.to_string(),
            released: AtomicBool::new(false),
        })
    }
}

impl Window for TerminalWindow {
    fn title(&self) -> &str {
        &self.title
    }

    fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = execute!(io::stderr(), SetTitle("")) {
            tracing::debug!("Failed to reset terminal title: {}", e);
        }
    }

    fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

/// Keyboard-driven platform. Holds the terminal in raw mode while alive.
pub struct TerminalPlatform {
    stop: Arc<AtomicBool>,
    quit_sent: bool,
}

impl TerminalPlatform {
    pub fn new(stop: Arc<AtomicBool>) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        tracing::debug!("Terminal raw mode enabled");
        Ok(Self {
            stop,
            quit_sent: false,
        })
    }

    fn stop_requested(&mut self, commands: &mut Vec<HostCommand>) -> bool {
        if self.stop.load(Ordering::SeqCst) {
            if !self.quit_sent {
                self.quit_sent = true;
                commands.push(HostCommand::Quit);
            }
            return true;
        }
        false
    }
}

impl Platform for TerminalPlatform {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn pump_events(&mut self, wait_for_input: bool) -> Vec<HostCommand> {
        let mut commands = Vec::new();

        if wait_for_input {
            // Block until something arrives or we are asked to stop.
            loop {
                if self.stop_requested(&mut commands) {
                    return commands;
                }
                match event::poll(INPUT_POLL_INTERVAL) {
                    Ok(true) => break,
                    Ok(false) => continue,
                    Err(e) => {
                        tracing::warn!("Failed to poll terminal events: {}", e);
                        return commands;
                    }
                }
            }
        }

        // Drain everything that is ready without blocking.
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(event) => translate(event, &mut commands),
                    Err(e) => {
                        tracing::warn!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => break,
                Err(e) => {
                    tracing::warn!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
        }

        self.stop_requested(&mut commands);
        commands
    }

    fn create_window(&mut self, title: &str) -> io::Result<Arc<dyn Window>> {
        Ok(Arc::new(TerminalWindow::open(title)?))
    }
}

fn translate(event: Event, commands: &mut Vec<HostCommand>) {
    if let Event::Key(key) = event {
        if let Some(command) = map_key_event(key) {
            commands.push(command);
        }
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("Failed to restore terminal mode: {}", e);
        }
    }
}
