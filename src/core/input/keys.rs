//=========================================================================
// Input Identifiers
//
// Portable key and mouse-button identifiers used by the input tracker.
//
// Responsibilities:
// - Represent keyboard keys as 8-bit virtual-key codes (256-entry space)
// - Represent the standard mouse buttons
// - Provide the numeric values packed into event payloads
//
// Notes:
// Key codes follow the Windows virtual-key numbering, so letters and
// digits equal their ASCII upper-case values (`Key::A == 0x41`). The
// platform layer maps OS-specific codes onto these values.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Key =================================================================

/// Number of distinct key codes tracked per snapshot.
pub const KEY_COUNT: usize = 256;

/// Keyboard key, identified by its virtual-key code.
///
/// Any 8-bit value is a valid key; the associated constants name the
/// common ones.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(u8);

impl Key {
    //--- Control Keys -----------------------------------------------------

    pub const BACKSPACE: Self = Self(0x08);
    pub const TAB: Self = Self(0x09);
    pub const ENTER: Self = Self(0x0D);
    pub const SHIFT: Self = Self(0x10);
    pub const CONTROL: Self = Self(0x11);
    pub const PAUSE: Self = Self(0x13);
    pub const CAPITAL: Self = Self(0x14);
    pub const ESCAPE: Self = Self(0x1B);
    pub const SPACE: Self = Self(0x20);

    //--- Navigation -------------------------------------------------------

    pub const PAGE_UP: Self = Self(0x21);
    pub const PAGE_DOWN: Self = Self(0x22);
    pub const END: Self = Self(0x23);
    pub const HOME: Self = Self(0x24);
    pub const LEFT: Self = Self(0x25);
    pub const UP: Self = Self(0x26);
    pub const RIGHT: Self = Self(0x27);
    pub const DOWN: Self = Self(0x28);
    pub const INSERT: Self = Self(0x2D);
    pub const DELETE: Self = Self(0x2E);

    //--- Digits -----------------------------------------------------------

    pub const DIGIT_0: Self = Self(0x30);
    pub const DIGIT_1: Self = Self(0x31);
    pub const DIGIT_2: Self = Self(0x32);
    pub const DIGIT_3: Self = Self(0x33);
    pub const DIGIT_4: Self = Self(0x34);
    pub const DIGIT_5: Self = Self(0x35);
    pub const DIGIT_6: Self = Self(0x36);
    pub const DIGIT_7: Self = Self(0x37);
    pub const DIGIT_8: Self = Self(0x38);
    pub const DIGIT_9: Self = Self(0x39);

    //--- Letters ----------------------------------------------------------

    pub const A: Self = Self(0x41);
    pub const B: Self = Self(0x42);
    pub const C: Self = Self(0x43);
    pub const D: Self = Self(0x44);
    pub const E: Self = Self(0x45);
    pub const F: Self = Self(0x46);
    pub const G: Self = Self(0x47);
    pub const H: Self = Self(0x48);
    pub const I: Self = Self(0x49);
    pub const J: Self = Self(0x4A);
    pub const K: Self = Self(0x4B);
    pub const L: Self = Self(0x4C);
    pub const M: Self = Self(0x4D);
    pub const N: Self = Self(0x4E);
    pub const O: Self = Self(0x4F);
    pub const P: Self = Self(0x50);
    pub const Q: Self = Self(0x51);
    pub const R: Self = Self(0x52);
    pub const S: Self = Self(0x53);
    pub const T: Self = Self(0x54);
    pub const U: Self = Self(0x55);
    pub const V: Self = Self(0x56);
    pub const W: Self = Self(0x57);
    pub const X: Self = Self(0x58);
    pub const Y: Self = Self(0x59);
    pub const Z: Self = Self(0x5A);

    //--- Numpad -----------------------------------------------------------

    pub const NUMPAD_0: Self = Self(0x60);
    pub const NUMPAD_1: Self = Self(0x61);
    pub const NUMPAD_2: Self = Self(0x62);
    pub const NUMPAD_3: Self = Self(0x63);
    pub const NUMPAD_4: Self = Self(0x64);
    pub const NUMPAD_5: Self = Self(0x65);
    pub const NUMPAD_6: Self = Self(0x66);
    pub const NUMPAD_7: Self = Self(0x67);
    pub const NUMPAD_8: Self = Self(0x68);
    pub const NUMPAD_9: Self = Self(0x69);
    pub const MULTIPLY: Self = Self(0x6A);
    pub const ADD: Self = Self(0x6B);
    pub const SUBTRACT: Self = Self(0x6D);
    pub const DECIMAL: Self = Self(0x6E);
    pub const DIVIDE: Self = Self(0x6F);

    //--- Function Keys ----------------------------------------------------

    pub const F1: Self = Self(0x70);
    pub const F2: Self = Self(0x71);
    pub const F3: Self = Self(0x72);
    pub const F4: Self = Self(0x73);
    pub const F5: Self = Self(0x74);
    pub const F6: Self = Self(0x75);
    pub const F7: Self = Self(0x76);
    pub const F8: Self = Self(0x77);
    pub const F9: Self = Self(0x78);
    pub const F10: Self = Self(0x79);
    pub const F11: Self = Self(0x7A);
    pub const F12: Self = Self(0x7B);

    //--- Locks & Modifiers ------------------------------------------------

    pub const NUM_LOCK: Self = Self(0x90);
    pub const SCROLL_LOCK: Self = Self(0x91);
    pub const LEFT_SHIFT: Self = Self(0xA0);
    pub const RIGHT_SHIFT: Self = Self(0xA1);
    pub const LEFT_CONTROL: Self = Self(0xA2);
    pub const RIGHT_CONTROL: Self = Self(0xA3);
    pub const LEFT_ALT: Self = Self(0xA4);
    pub const RIGHT_ALT: Self = Self(0xA5);

    //--- Punctuation ------------------------------------------------------

    pub const SEMICOLON: Self = Self(0xBA);
    pub const PLUS: Self = Self(0xBB);
    pub const COMMA: Self = Self(0xBC);
    pub const MINUS: Self = Self(0xBD);
    pub const PERIOD: Self = Self(0xBE);
    pub const SLASH: Self = Self(0xBF);
    pub const GRAVE: Self = Self(0xC0);

    //--- Construction & Access --------------------------------------------

    /// Wraps a raw virtual-key code.
    pub const fn from_code(code: u8) -> Self {
        Self(code)
    }

    /// Raw virtual-key code.
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Slot of this key in a snapshot array.
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for Key {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let printable = char::from(self.0);
        if printable.is_ascii_alphanumeric() {
            write!(f, "Key({:#04x} '{}')", self.0, printable)
        } else {
            write!(f, "Key({:#04x})", self.0)
        }
    }
}

//=== MouseButton =========================================================

/// Physical mouse button.
///
/// The discriminant is the value packed into mouse-button events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left = 0,

    /// Secondary button (typically right).
    Right = 1,

    /// Middle button (wheel click).
    Middle = 2,
}

impl MouseButton {
    /// Number of tracked buttons.
    pub const COUNT: usize = 3;

    /// All buttons in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [Self::Left, Self::Right, Self::Middle];

    /// Numeric value used in event payloads.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Decodes a payload value.
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
