//! Key mapping from terminal events to logical buttons.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Button;

/// Map a key to the button it stands in for.
pub fn map_key(code: KeyCode) -> Option<Button> {
    match code {
        // Directions
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Button::Up)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Button::Down)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Button::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Button::Right)
        }

        // Center button
        KeyCode::Enter | KeyCode::Char(' ') => Some(Button::Confirm),

        // Side buttons
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(Button::Action1)
        }
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Char('x') | KeyCode::Char('X') => {
            Some(Button::Action2)
        }

        _ => None,
    }
}

/// Check if key should quit the process.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
