//! HID keyboard key model
//!
//! Key bindings name either a printable/control ASCII character or a
//! symbolic key. Both resolve to a [`KeyStroke`]: one HID usage id plus a
//! modifier byte, which is what the transport turns into a report.

/// Modifier bit mask, laid out as the HID keyboard report modifier byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0x00);
    pub const CTRL: Modifiers = Modifiers(0x01);
    pub const SHIFT: Modifiers = Modifiers(0x02);
    pub const ALT: Modifiers = Modifiers(0x04);
    /// Command on macOS, Windows key on Windows
    pub const GUI: Modifiers = Modifiers(0x08);

    /// Combine two masks
    pub const fn with(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Raw modifier byte
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        self.with(rhs)
    }
}

/// Symbolic keys that have no ASCII spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Key {
    Backspace = 0x2A,
    F1 = 0x3A,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    PrintScreen = 0x46,
    Insert = 0x49,
    Home,
    PageUp,
    DeleteForward,
    End,
    PageDown,
    RightArrow,
    LeftArrow,
    DownArrow,
    UpArrow,
}

impl Key {
    /// HID usage id on the keyboard page
    pub const fn usage(self) -> u8 {
        self as u8
    }
}

/// What a key binding sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// ASCII character, including `\t`, `\n` and ESC (0x1B)
    Char(u8),
    /// Symbolic key
    Key(Key),
}

/// A resolved key event: usage id plus modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyStroke {
    pub usage: u8,
    pub modifiers: Modifiers,
}

impl KeyStroke {
    /// Resolve a key code and modifier mask into a stroke
    ///
    /// Shifted ASCII characters add Shift to the given mask. Returns `None`
    /// for characters the US layout cannot type.
    pub fn resolve(code: KeyCode, modifiers: Modifiers) -> Option<KeyStroke> {
        match code {
            KeyCode::Key(key) => Some(KeyStroke {
                usage: key.usage(),
                modifiers,
            }),
            KeyCode::Char(c) => {
                let (usage, shift) = ascii_usage(c)?;
                let modifiers = if shift {
                    modifiers | Modifiers::SHIFT
                } else {
                    modifiers
                };
                Some(KeyStroke { usage, modifiers })
            }
        }
    }
}

/// Map an ASCII byte to a US-layout usage id and whether Shift is needed
pub fn ascii_usage(c: u8) -> Option<(u8, bool)> {
    let mapped = match c {
        b'a'..=b'z' => (0x04 + (c - b'a'), false),
        b'A'..=b'Z' => (0x04 + (c - b'A'), true),
        b'1'..=b'9' => (0x1E + (c - b'1'), false),
        b'0' => (0x27, false),
        b'\n' | b'\r' => (0x28, false),
        0x1B => (0x29, false),
        0x08 => (0x2A, false),
        b'\t' => (0x2B, false),
        b' ' => (0x2C, false),
        b'-' => (0x2D, false),
        b'=' => (0x2E, false),
        b'[' => (0x2F, false),
        b']' => (0x30, false),
        b'\\' => (0x31, false),
        b';' => (0x33, false),
        b'\'' => (0x34, false),
        b'`' => (0x35, false),
        b',' => (0x36, false),
        b'.' => (0x37, false),
        b'/' => (0x38, false),
        b'!' => (0x1E, true),
        b'@' => (0x1F, true),
        b'#' => (0x20, true),
        b'$' => (0x21, true),
        b'%' => (0x22, true),
        b'^' => (0x23, true),
        b'&' => (0x24, true),
        b'*' => (0x25, true),
        b'(' => (0x26, true),
        b')' => (0x27, true),
        b'_' => (0x2D, true),
        b'+' => (0x2E, true),
        b'{' => (0x2F, true),
        b'}' => (0x30, true),
        b'|' => (0x31, true),
        b':' => (0x33, true),
        b'"' => (0x34, true),
        b'~' => (0x35, true),
        b'<' => (0x36, true),
        b'>' => (0x37, true),
        b'?' => (0x38, true),
        _ => return None,
    };
    Some(mapped)
}

/// Key strokes that type `text` verbatim
///
/// Characters without a US-layout mapping are skipped.
pub fn text_strokes(text: &str) -> impl Iterator<Item = KeyStroke> + '_ {
    text.bytes()
        .filter_map(|c| KeyStroke::resolve(KeyCode::Char(c), Modifiers::NONE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(ascii_usage(b'a'), Some((0x04, false)));
        assert_eq!(ascii_usage(b'z'), Some((0x1D, false)));
        assert_eq!(ascii_usage(b'Q'), Some((0x14, true)));
        assert_eq!(ascii_usage(b'1'), Some((0x1E, false)));
        assert_eq!(ascii_usage(b'0'), Some((0x27, false)));
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(ascii_usage(b'\t'), Some((0x2B, false)));
        assert_eq!(ascii_usage(b'\n'), Some((0x28, false)));
        assert_eq!(ascii_usage(0x1B), Some((0x29, false)));
        assert_eq!(ascii_usage(0x7F), None);
    }

    #[test]
    fn test_shifted_char_adds_shift() {
        let stroke = KeyStroke::resolve(KeyCode::Char(b'%'), Modifiers::GUI).unwrap();
        assert_eq!(stroke.usage, 0x22);
        assert!(stroke.modifiers.contains(Modifiers::GUI));
        assert!(stroke.modifiers.contains(Modifiers::SHIFT));
    }

    #[test]
    fn test_symbolic_key_keeps_modifiers() {
        let stroke =
            KeyStroke::resolve(KeyCode::Key(Key::RightArrow), Modifiers::CTRL).unwrap();
        assert_eq!(stroke.usage, 0x4F);
        assert_eq!(stroke.modifiers, Modifiers::CTRL);
    }

    #[test]
    fn test_text_strokes_skip_unmapped() {
        let strokes: heapless::Vec<KeyStroke, 8> = text_strokes("Hi\u{7f}!").collect();
        assert_eq!(strokes.len(), 3);
        assert_eq!(strokes[0].modifiers, Modifiers::SHIFT);
        assert_eq!(strokes[1].modifiers, Modifiers::NONE);
        assert_eq!(strokes[2].usage, 0x1E);
    }

    #[test]
    fn test_function_key_usages() {
        assert_eq!(Key::F1.usage(), 0x3A);
        assert_eq!(Key::F12.usage(), 0x45);
        assert_eq!(Key::PageUp.usage(), 0x4B);
        assert_eq!(Key::UpArrow.usage(), 0x52);
    }
}
