use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current input state for a single window.
///
/// Holds "is down" information. Per-frame transitions are recorded into an
/// `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // On focus loss nothing can be released; avoid stuck keys.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state } => match state {
                KeyState::Pressed => {
                    // Auto-repeat arrives as further presses of a held key.
                    if self.keys_down.insert(key) {
                        frame.keys_pressed.insert(key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state }
    }

    #[test]
    fn press_is_recorded_once_while_held() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::R, KeyState::Pressed));
        frame.clear();
        state.apply_event(&mut frame, key(Key::R, KeyState::Pressed));

        assert!(state.key_down(Key::R));
        assert!(!frame.pressed(Key::R));
    }

    #[test]
    fn release_then_press_is_a_new_edge() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::R, KeyState::Pressed));
        state.apply_event(&mut frame, key(Key::R, KeyState::Released));
        frame.clear();
        state.apply_event(&mut frame, key(Key::R, KeyState::Pressed));

        assert!(frame.pressed(Key::R));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.key_down(Key::Escape));

        // Without a release, the next press is a fresh edge.
        frame.clear();
        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed));
        assert!(frame.pressed(Key::Escape));
    }
}
