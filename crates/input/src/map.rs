//! Key mapping from terminal events to direction input.

use crate::types::{DirectionKey, InputEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key onto the direction allow-list. Any other key yields `None`.
pub fn map_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    let key = match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') => DirectionKey::W,
        KeyCode::Up => DirectionKey::ArrowUp,
        KeyCode::Char('s') | KeyCode::Char('S') => DirectionKey::S,
        KeyCode::Down => DirectionKey::ArrowDown,
        KeyCode::Char('a') | KeyCode::Char('A') => DirectionKey::A,
        KeyCode::Left => DirectionKey::ArrowLeft,
        KeyCode::Char('d') | KeyCode::Char('D') => DirectionKey::D,
        KeyCode::Right => DirectionKey::ArrowRight,
        _ => return None,
    };
    Some(InputEvent::Key(key))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key asks for a fresh run.
pub fn is_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
        && !key.modifiers.contains(KeyModifiers::CONTROL)
}
