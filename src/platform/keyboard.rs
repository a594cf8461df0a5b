//! Keyboard bindings for interactive replay.
//!
//! | Key                     | Command       |
//! |-------------------------|---------------|
//! | `space`, `p`            | toggle pause  |
//! | `→`, `n`                | step a frame  |
//! | `q`, `Esc`, `Ctrl-C`    | quit          |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::application::HostCommand;

/// Map a key press to a host command.
///
/// Key releases and unbound keys map to `None`.
pub fn map_key_event(key: KeyEvent) -> Option<HostCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => Some(HostCommand::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(HostCommand::Quit)
        }

        // === Playback controls ===
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(HostCommand::TogglePause),
        KeyCode::Right | KeyCode::Char('n') => Some(HostCommand::StepFrame),

        _ => None,
    }
}
