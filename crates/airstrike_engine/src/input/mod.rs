//! Input state
//!
//! The window layer feeds key events in; gameplay code reads them either as
//! discrete events (pressed once) or as realtime state (held right now).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Keys the game can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Space bar
    Space,
    /// M key
    M,
    /// Escape key
    Escape,
    /// Return key
    Enter,
}

/// Discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key went down
    KeyPressed(KeyCode),
    /// Key went up
    KeyReleased(KeyCode),
}

/// Keys currently held
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HashSet<KeyCode>,
}

impl InputState {
    /// Create a state with no key held
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an event
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPressed(key) => {
                self.held.insert(key);
            }
            InputEvent::KeyReleased(key) => {
                self.held.remove(&key);
            }
        }
    }

    /// Whether `key` is held
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Release every key, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::KeyPressed(KeyCode::Left));
        input.handle_event(InputEvent::KeyPressed(KeyCode::Space));
        input.handle_event(InputEvent::KeyReleased(KeyCode::Left));

        assert!(!input.is_pressed(KeyCode::Left));
        assert!(input.is_pressed(KeyCode::Space));

        input.clear();
        assert!(!input.is_pressed(KeyCode::Space));
    }
}
