use minifb::Key;

pub const KEY_COUNT: usize = 16;

/// Physical key for each keypad index, laid out as the COSMAC VIP grid:
///
/// ```text
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D  <-  Q W E R
/// 7 8 9 E      A S D F
/// A 0 B F      Z X C V
/// ```
pub const KEY_LAYOUT: [Key; KEY_COUNT] = [
    Key::X,    // 0
    Key::Key1, // 1
    Key::Key2, // 2
    Key::Key3, // 3
    Key::Q,    // 4
    Key::W,    // 5
    Key::E,    // 6
    Key::A,    // 7
    Key::S,    // 8
    Key::D,    // 9
    Key::Z,    // A
    Key::C,    // B
    Key::Key4, // C
    Key::R,    // D
    Key::F,    // E
    Key::V,    // F
];

/// Down/up state of the sixteen logical keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the new state and returns whether it was an up-to-down edge.
    pub fn update_key(&mut self, index: u8, is_down: bool) -> bool {
        let slot = &mut self.keys[(index & 0xF) as usize];
        let pressed = is_down && !*slot;
        *slot = is_down;
        pressed
    }

    /// State of the key named by the low nibble of `n`.
    pub fn get_key_status_from_num(&self, n: u8) -> bool {
        self.keys[(n & 0xF) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_keys_are_distinct() {
        for (index, key) in KEY_LAYOUT.iter().enumerate() {
            assert!(!KEY_LAYOUT[index + 1..].contains(key), "{key:?} mapped twice");
        }
        assert_eq!(KEY_LAYOUT[0x1], Key::Key1);
        assert_eq!(KEY_LAYOUT[0xC], Key::Key4);
        assert_eq!(KEY_LAYOUT[0x0], Key::X);
    }

    #[test]
    fn test_update_reports_press_edge() {
        let mut keypad = Keypad::new();
        assert!(keypad.update_key(0xA, true));
        assert!(!keypad.update_key(0xA, true));
        assert!(keypad.get_key_status_from_num(0xA));
        assert!(!keypad.update_key(0xA, false));
        assert!(!keypad.get_key_status_from_num(0xA));
    }

    #[test]
    fn test_lookup_uses_low_nibble() {
        let mut keypad = Keypad::new();
        keypad.update_key(0x3, true);
        assert!(keypad.get_key_status_from_num(0x13));
        keypad.update_key(0x13, false);
        assert!(!keypad.get_key_status_from_num(0x3));
    }
}
