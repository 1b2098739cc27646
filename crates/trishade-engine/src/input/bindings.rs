use super::frame::InputFrame;
use super::types::Key;

/// Keys the frame loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub exit: Key,
    pub reload: Key,
    /// Digit keys `1`–`9` select registry slots `0`–`8`.
    pub digit_select: bool,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            exit: Key::Escape,
            reload: Key::R,
            digit_select: true,
        }
    }
}

/// Actions requested during one frame, derived from key press transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameActions {
    pub exit: bool,
    pub reload: bool,
    pub select: Option<usize>,
}

impl KeyBindings {
    pub fn actions(&self, frame: &InputFrame) -> FrameActions {
        let select = if self.digit_select {
            // Lowest digit wins when several were pressed in one frame.
            frame
                .keys_pressed
                .iter()
                .filter_map(|k| k.slot_digit())
                .min()
        } else {
            None
        };

        FrameActions {
            exit: frame.pressed(self.exit),
            reload: frame.pressed(self.reload),
            select,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(keys: &[Key]) -> InputFrame {
        let mut frame = InputFrame::default();
        frame.keys_pressed.extend(keys.iter().copied());
        frame
    }

    #[test]
    fn default_bindings_map_escape_and_r() {
        let actions = KeyBindings::default().actions(&frame_with(&[Key::Escape, Key::R]));
        assert!(actions.exit);
        assert!(actions.reload);
        assert_eq!(actions.select, None);
    }

    #[test]
    fn digits_select_zero_based_slots() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.actions(&frame_with(&[Key::Digit2])).select, Some(1));
        assert_eq!(bindings.actions(&frame_with(&[Key::Digit0])).select, None);
        assert_eq!(
            bindings.actions(&frame_with(&[Key::Digit5, Key::Digit3])).select,
            Some(2)
        );
    }

    #[test]
    fn custom_bindings_and_disabled_digits() {
        let bindings = KeyBindings {
            exit: Key::Q,
            reload: Key::F5,
            digit_select: false,
        };
        let actions = bindings.actions(&frame_with(&[Key::Escape, Key::F5, Key::Digit1]));
        assert!(!actions.exit);
        assert!(actions.reload);
        assert_eq!(actions.select, None);
    }

    #[test]
    fn nothing_pressed_is_no_action() {
        assert_eq!(
            KeyBindings::default().actions(&InputFrame::default()),
            FrameActions::default()
        );
    }
}
