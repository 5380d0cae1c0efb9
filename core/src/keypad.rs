use crate::constants::KEY_COUNT;

/// # Keypad
/// Pressed status of the 16 keys of the hex keypad, 0..F.
///
/// Keys outside that range are never pressed; pressing or releasing them does nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: u8) {
        if let Some(state) = self.pressed.get_mut(key as usize) {
            *state = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(state) = self.pressed.get_mut(key as usize) {
            *state = false;
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    /// Releases every key.
    pub fn clear(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }
}
