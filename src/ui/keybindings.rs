// src/ui/keybindings.rs
//! Keyboard input mapping.

use crossterm::event::{KeyCode, KeyEvent};

/// Actions the app knows how to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    /// Enter a directory or open the selected file.
    Open,
    /// Go up one directory.
    Back,
    TogglePause,
    Stop,
    ToggleVisualizer,
    Quit,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Enter | KeyCode::Right => Action::Open,
        KeyCode::Left => Action::Back,
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('v') => Action::ToggleVisualizer,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys_map_to_their_actions() {
        assert_eq!(key_to_action(&key(KeyCode::Char(' '))), Action::TogglePause);
        assert_eq!(key_to_action(&key(KeyCode::Char('s'))), Action::Stop);
        assert_eq!(
            key_to_action(&key(KeyCode::Char('v'))),
            Action::ToggleVisualizer
        );
    }

    #[test]
    fn navigation_keys_map_to_their_actions() {
        assert_eq!(key_to_action(&key(KeyCode::Up)), Action::Up);
        assert_eq!(key_to_action(&key(KeyCode::Char('j'))), Action::Down);
        assert_eq!(key_to_action(&key(KeyCode::Enter)), Action::Open);
        assert_eq!(key_to_action(&key(KeyCode::Left)), Action::Back);
    }

    #[test]
    fn unbound_keys_map_to_none() {
        assert_eq!(key_to_action(&key(KeyCode::Char('x'))), Action::None);
        assert_eq!(key_to_action(&key(KeyCode::Tab)), Action::None);
    }
}
