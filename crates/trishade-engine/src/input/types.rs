use std::fmt;

/// Keyboard key identifier.
///
/// The runtime maps platform keycodes into these variants where possible.
/// For unsupported keys, `Key::Unknown(u32)` carries the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

impl Key {
    /// Digit keys `1`–`9` map to slots `0`–`8`.
    pub fn slot_digit(self) -> Option<usize> {
        match self {
            Key::Digit1 => Some(0),
            Key::Digit2 => Some(1),
            Key::Digit3 => Some(2),
            Key::Digit4 => Some(3),
            Key::Digit5 => Some(4),
            Key::Digit6 => Some(5),
            Key::Digit7 => Some(6),
            Key::Digit8 => Some(7),
            Key::Digit9 => Some(8),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: KeyState },

    /// Window focus change.
    Focused(bool),
}
