//! Key mapping from terminal events to logical buttons.

use crate::types::Button;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key code to the button it drives, if any.
pub fn button_for_key(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Button::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Button::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Button::Down),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Button::Rotate),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Button::Pause),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
