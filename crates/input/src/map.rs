//! Key mapping from terminal events to game commands.
//!
//! The mapping depends on the session status: a finished round only listens
//! for restart, a paused one for resume and restart, and an idle one for the
//! start keys.

use crate::types::{GameCommand, SessionStatus};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to a command for the current session status.
///
/// Letter keys match either case. Commands that make no sense in `status`
/// map to `None` rather than being forwarded as no-ops.
pub fn map_key(key: KeyEvent, status: SessionStatus) -> Option<GameCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let letter = match key.code {
        KeyCode::Char(c) => Some(c.to_ascii_lowercase()),
        _ => None,
    };

    use GameCommand::*;
    use SessionStatus::*;
    match (status, key.code, letter) {
        (Idle, KeyCode::Enter, _) | (Idle, _, Some(' ')) => Some(Restart),
        (Paused, _, Some('p')) => Some(Resume),
        (GameOver | Paused | Playing, _, Some('r')) => Some(Restart),

        (Playing, KeyCode::Left, _) | (Playing, _, Some('h' | 'a')) => Some(MoveLeft),
        (Playing, KeyCode::Right, _) | (Playing, _, Some('l' | 'd')) => Some(MoveRight),
        (Playing, KeyCode::Down, _) | (Playing, _, Some('j' | 's')) => Some(SoftDrop),
        (Playing, KeyCode::Up, _) | (Playing, _, Some('k' | 'w' | 'x')) => Some(Rotate),
        (Playing, _, Some(' ')) => Some(HardDrop),
        (Playing, _, Some('p')) => Some(Pause),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
