//=========================================================================
// Event Codes
//=========================================================================
//
// Flat 16-bit namespace identifying event categories.
//
//   0x00            none
//   0x01 ..= 0x08   system events (quit, keys, mouse, resize)
//   0x09 ..= 0xFF   reserved for future system use
//   0x100 ..        application-defined
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== EventCode ===========================================================

/// Identifier of an event category that listeners subscribe to.
///
/// System codes document the lane layout of their [`EventContext`]
/// payload; producers and consumers of application codes agree on their
/// own layout.
///
/// [`EventContext`]: super::EventContext
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EventCode(u16);

impl EventCode {
    //--- System Codes -----------------------------------------------------

    /// Reserved "no event" code.
    pub const NONE: Self = Self(0x00);

    /// Shuts the application down on the next frame. No payload.
    pub const APPLICATION_QUIT: Self = Self(0x01);

    /// Keyboard key pressed. `u16[0]` = key code.
    pub const KEY_PRESSED: Self = Self(0x02);

    /// Keyboard key released. `u16[0]` = key code.
    pub const KEY_RELEASED: Self = Self(0x03);

    /// Mouse button pressed. `u16[0]` = button.
    pub const MOUSE_BUTTON_PRESSED: Self = Self(0x04);

    /// Mouse button released. `u16[0]` = button.
    pub const MOUSE_BUTTON_RELEASED: Self = Self(0x05);

    /// Mouse moved. `i32[0]` = x, `i32[1]` = y.
    pub const MOUSE_MOVED: Self = Self(0x06);

    /// Mouse wheel moved. `i8[0]` = z delta.
    pub const MOUSE_WHEEL: Self = Self(0x07);

    /// Surface resized by the OS. `u16[0]` = width, `u16[1]` = height.
    pub const RESIZE: Self = Self(0x08);

    /// Last code of the system range.
    pub const MAX_SYSTEM: Self = Self(0xFF);

    //--- Construction -----------------------------------------------------

    /// Wraps a raw code.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the `offset`-th application code (`0x100 + offset`).
    ///
    /// # Panics
    ///
    /// Panics if the resulting code does not fit in 16 bits.
    pub const fn application(offset: u16) -> Self {
        Self(Self::MAX_SYSTEM.0 + 1 + offset)
    }

    //--- Queries ----------------------------------------------------------

    /// Raw numeric value.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Returns `true` for codes in `0x01..=0xFF`.
    pub const fn is_system(self) -> bool {
        self.0 != 0 && self.0 <= Self::MAX_SYSTEM.0
    }

    /// Returns `true` for codes above `0xFF`.
    pub const fn is_application(self) -> bool {
        self.0 > Self::MAX_SYSTEM.0
    }

    /// Name of a known system code.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::NONE => "NONE",
            Self::APPLICATION_QUIT => "APPLICATION_QUIT",
            Self::KEY_PRESSED => "KEY_PRESSED",
            Self::KEY_RELEASED => "KEY_RELEASED",
            Self::MOUSE_BUTTON_PRESSED => "MOUSE_BUTTON_PRESSED",
            Self::MOUSE_BUTTON_RELEASED => "MOUSE_BUTTON_RELEASED",
            Self::MOUSE_MOVED => "MOUSE_MOVED",
            Self::MOUSE_WHEEL => "MOUSE_WHEEL",
            Self::RESIZE => "RESIZE",
            _ => return None,
        };
        Some(name)
    }
}

//--- Trait Implementations -----------------------------------------------

impl From<u16> for EventCode {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<EventCode> for u16 {
    fn from(code: EventCode) -> Self {
        code.0
    }
}

impl fmt::Debug for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "EventCode::{}", name),
            None => write!(f, "EventCode({:#06x})", self.0),
        }
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#06x}", self.0),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_codes_have_fixed_values() {
        assert_eq!(EventCode::APPLICATION_QUIT.raw(), 0x01);
        assert_eq!(EventCode::KEY_PRESSED.raw(), 0x02);
        assert_eq!(EventCode::KEY_RELEASED.raw(), 0x03);
        assert_eq!(EventCode::MOUSE_BUTTON_PRESSED.raw(), 0x04);
        assert_eq!(EventCode::MOUSE_BUTTON_RELEASED.raw(), 0x05);
        assert_eq!(EventCode::MOUSE_MOVED.raw(), 0x06);
        assert_eq!(EventCode::MOUSE_WHEEL.raw(), 0x07);
        assert_eq!(EventCode::RESIZE.raw(), 0x08);
    }

    #[test]
    fn ranges_are_classified() {
        assert!(!EventCode::NONE.is_system());
        assert!(!EventCode::NONE.is_application());
        assert!(EventCode::RESIZE.is_system());
        assert!(EventCode::MAX_SYSTEM.is_system());
        assert!(EventCode::new(0x100).is_application());
        assert!(!EventCode::new(0x100).is_system());
    }

    #[test]
    fn application_codes_start_above_system_range() {
        assert_eq!(EventCode::application(0).raw(), 0x100);
        assert_eq!(EventCode::application(5).raw(), 0x105);
    }

    #[test]
    fn formatting_uses_names_for_known_codes() {
        assert_eq!(EventCode::KEY_PRESSED.to_string(), "KEY_PRESSED");
        assert_eq!(EventCode::new(0x1234).to_string(), "0x1234");
        assert_eq!(format!("{:?}", EventCode::RESIZE), "EventCode::RESIZE");
        assert_eq!(format!("{:?}", EventCode::new(0x200)), "EventCode(0x0200)");
    }
}
