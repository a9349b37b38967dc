//! Key mapping from terminal events to user actions.

use crate::types::UserAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to user actions.
pub fn handle_key_event(key: KeyEvent) -> Option<UserAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(UserAction::Terminate);
    }

    match key.code {
        // Session
        KeyCode::Char('s') | KeyCode::Char('S') => Some(UserAction::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(UserAction::Pause),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(UserAction::Terminate),

        // Directions
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(UserAction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(UserAction::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(UserAction::Up),
        KeyCode::Down => Some(UserAction::Down),

        KeyCode::Char(' ') => Some(UserAction::Action),

        _ => None,
    }
}

/// Terminal auto-repeat means the key is being held.
pub fn is_hold(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Repeat
}

/// Action and hold flag for a key event; releases produce nothing.
pub fn translate(key: KeyEvent) -> Option<(UserAction, bool)> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    handle_key_event(key).map(|action| (action, is_hold(key)))
}
