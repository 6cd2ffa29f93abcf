/// number of keys on the hex keypad
pub const KEY_COUNT: usize = 16;

/// one pressed/not-pressed flag per key 0x0..=0xF
pub type KeySnapshot = [bool; KEY_COUNT];

/// # Keypad
/// The hex keypad as last reported by the input source. The previous
/// snapshot is kept too, so a wait-for-key can react to a key going down
/// rather than one that was already held.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: KeySnapshot,
    previous: KeySnapshot,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// replace the current snapshot, remembering the old one
    pub fn update(&mut self, snapshot: KeySnapshot) {
        self.previous = self.pressed;
        self.pressed = snapshot;
    }

    /// Only the low nibble of `key` is significant.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed[(key & 0x0F) as usize]
    }

    /// lowest key that is down now but was up in the previous snapshot
    pub fn newly_pressed(&self) -> Option<u8> {
        (0..KEY_COUNT)
            .find(|&k| self.pressed[k] && !self.previous[k])
            .map(|k| k as u8)
    }

    pub fn snapshot(&self) -> KeySnapshot {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_keys(keys: &[u8]) -> KeySnapshot {
        let mut s = [false; KEY_COUNT];
        for k in keys {
            s[*k as usize] = true;
        }
        s
    }

    #[test]
    fn test_is_pressed() {
        let mut k = Keypad::new();
        k.update(with_keys(&[0xE]));
        assert!(k.is_pressed(0xE));
        assert!(k.is_pressed(0x1E));
        assert!(!k.is_pressed(0x1));
    }

    #[test]
    fn test_newly_pressed_ignores_held_keys() {
        let mut k = Keypad::new();
        k.update(with_keys(&[0x3]));
        assert_eq!(k.newly_pressed(), Some(0x3));
        k.update(with_keys(&[0x3]));
        assert_eq!(k.newly_pressed(), None);
        k.update(with_keys(&[0x3, 0x9]));
        assert_eq!(k.newly_pressed(), Some(0x9));
    }

    #[test]
    fn test_newly_pressed_picks_lowest() {
        let mut k = Keypad::new();
        k.update(with_keys(&[0xB, 0x4]));
        assert_eq!(k.newly_pressed(), Some(0x4));
    }
}
