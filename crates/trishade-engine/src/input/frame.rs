use std::collections::HashSet;

use super::types::Key;

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys). `InputFrame` holds
/// the keys that went down since the previous frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys pressed this frame.
    pub keys_pressed: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
    }

    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
