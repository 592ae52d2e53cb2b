/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
/// Keys are tracked by their logical value 0x0..=0xF; mapping host keys onto them is up to the
/// frontend.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    held: [bool; 16],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad { held: [false; 16] }
    }

    /// Marks `key` as held. Returns false if `key` isn't on the keypad.
    pub fn press(&mut self, key: u8) -> bool {
        match self.held.get_mut(key as usize) {
            Some(held) => {
                *held = true;
                true
            }
            None => false,
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(held) = self.held.get_mut(key as usize) {
            *held = false;
        }
    }

    pub fn is_held(&self, key: u8) -> bool {
        self.held.get(key as usize).copied().unwrap_or(false)
    }
}
