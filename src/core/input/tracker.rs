//=========================================================================
// Input Tracker
//=========================================================================
//
// Double-buffered keyboard/mouse state with transition-based events.
//
// Architecture:
//   platform signal → process_*() → differs from current? ──no──→ ignore
//                                          │ yes
//                                          ↓
//                              update current + fire event on EventBus
//
// Frame lifecycle: process_*() (any number) → game queries → update()
//
// `update()` copies current into previous. It must run once per frame,
// after ingestion and after the frame's consumers had a chance to compare
// "is down" with "was down"; calling it earlier makes both queries agree
// and edge detection is lost.
//
//=========================================================================

//=== External Crates =====================================================

use log::{info, trace};

//=== Internal Modules ====================================================

use super::keys::{Key, MouseButton, KEY_COUNT};
use crate::core::event::{EventBus, EventCode, EventContext};

//=== Snapshots ===========================================================

/// Pressed state of every key code.
#[derive(Clone, Copy)]
struct KeyboardState {
    keys: [bool; KEY_COUNT],
}

impl KeyboardState {
    const RELEASED: Self = Self {
        keys: [false; KEY_COUNT],
    };
}

/// Cursor position and pressed state of every button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MouseState {
    x: i32,
    y: i32,
    buttons: [bool; MouseButton::COUNT],
}

//=== InputTracker ========================================================

/// Current/previous input snapshots fed by platform signals.
///
/// Queries made before [`initialize`](Self::initialize) return
/// conservative defaults (`false` for "down", `true` for "up", `(0, 0)`
/// for positions) instead of failing.
pub struct InputTracker {
    initialized: bool,

    //--- Current Frame ----------------------------------------------------
    keyboard_current: KeyboardState,
    mouse_current: MouseState,

    //--- Previous Frame ---------------------------------------------------
    keyboard_previous: KeyboardState,
    mouse_previous: MouseState,
}

impl InputTracker {
    //--- Construction -----------------------------------------------------

    /// Creates an uninitialized tracker with everything released.
    pub fn new() -> Self {
        Self {
            initialized: false,
            keyboard_current: KeyboardState::RELEASED,
            mouse_current: MouseState::default(),
            keyboard_previous: KeyboardState::RELEASED,
            mouse_previous: MouseState::default(),
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Resets both snapshots and enables queries.
    pub fn initialize(&mut self) {
        *self = Self::new();
        self.initialized = true;
        info!(target: "input", "Input subsystem initialized");
    }

    /// Disables queries; they return defaults again.
    pub fn shutdown(&mut self) {
        self.initialized = false;
        info!(target: "input", "Input subsystem shut down");
    }

    /// Returns `true` between initialize and shutdown.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Ends the frame: copies the current snapshot into the previous one.
    ///
    /// No-op while uninitialized.
    pub fn update(&mut self, delta_time: f64) {
        if !self.initialized {
            return;
        }

        self.keyboard_previous = self.keyboard_current;
        self.mouse_previous = self.mouse_current;
        trace!(target: "input", "Input snapshot advanced (dt: {:.4}s)", delta_time);
    }

    //=====================================================================
    // Ingestion
    //=====================================================================

    /// Records a key state and fires [`EventCode::KEY_PRESSED`] or
    /// [`EventCode::KEY_RELEASED`] (`u16[0]` = key code) if it changed.
    ///
    /// Returns `true` when the state changed.
    pub fn process_key(&mut self, key: Key, pressed: bool, bus: &EventBus) -> bool {
        let slot = &mut self.keyboard_current.keys[key.index()];
        if *slot == pressed {
            return false;
        }
        *slot = pressed;

        let code = if pressed {
            EventCode::KEY_PRESSED
        } else {
            EventCode::KEY_RELEASED
        };
        let context = EventContext::new().with_u16(0, u16::from(key.code()));
        bus.fire(code, None, context);
        true
    }

    /// Records a button state and fires [`EventCode::MOUSE_BUTTON_PRESSED`]
    /// or [`EventCode::MOUSE_BUTTON_RELEASED`] (`u16[0]` = button) if it
    /// changed.
    ///
    /// Returns `true` when the state changed.
    pub fn process_mouse_button(&mut self, button: MouseButton, pressed: bool, bus: &EventBus) -> bool {
        let slot = &mut self.mouse_current.buttons[button.index()];
        if *slot == pressed {
            return false;
        }
        *slot = pressed;

        let code = if pressed {
            EventCode::MOUSE_BUTTON_PRESSED
        } else {
            EventCode::MOUSE_BUTTON_RELEASED
        };
        let context = EventContext::new().with_u16(0, button.code());
        bus.fire(code, None, context);
        true
    }

    /// Records the cursor position and fires [`EventCode::MOUSE_MOVED`]
    /// (`i32[0]` = x, `i32[1]` = y) if it changed.
    ///
    /// Returns `true` when the position changed.
    pub fn process_mouse_move(&mut self, x: i32, y: i32, bus: &EventBus) -> bool {
        if self.mouse_current.x == x && self.mouse_current.y == y {
            return false;
        }

        self.mouse_current.x = x;
        self.mouse_current.y = y;

        let context = EventContext::new().with_i32(0, x).with_i32(1, y);
        bus.fire(EventCode::MOUSE_MOVED, None, context);
        true
    }

    /// Fires [`EventCode::MOUSE_WHEEL`] (`i8[0]` = z delta).
    ///
    /// The wheel has no persisted state, so every call fires.
    pub fn process_mouse_wheel(&mut self, z_delta: i8, bus: &EventBus) {
        let context = EventContext::new().with_i8(0, z_delta);
        bus.fire(EventCode::MOUSE_WHEEL, None, context);
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` while `key` is held this frame.
    pub fn is_key_down(&self, key: Key) -> bool {
        self.initialized && self.keyboard_current.keys[key.index()]
    }

    /// Returns `true` while `key` is released this frame.
    pub fn is_key_up(&self, key: Key) -> bool {
        !self.initialized || !self.keyboard_current.keys[key.index()]
    }

    /// Returns `true` if `key` was held at the end of the previous frame.
    pub fn was_key_down(&self, key: Key) -> bool {
        self.initialized && self.keyboard_previous.keys[key.index()]
    }

    /// Returns `true` if `key` was released at the end of the previous
    /// frame.
    pub fn was_key_up(&self, key: Key) -> bool {
        !self.initialized || !self.keyboard_previous.keys[key.index()]
    }

    //=====================================================================
    // Query API - Mouse Buttons
    //=====================================================================

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.initialized && self.mouse_current.buttons[button.index()]
    }

    /// Like [`is_key_up`](Self::is_key_up) but for mouse buttons.
    pub fn is_mouse_button_up(&self, button: MouseButton) -> bool {
        !self.initialized || !self.mouse_current.buttons[button.index()]
    }

    /// Like [`was_key_down`](Self::was_key_down) but for mouse buttons.
    pub fn was_mouse_button_down(&self, button: MouseButton) -> bool {
        self.initialized && self.mouse_previous.buttons[button.index()]
    }

    /// Like [`was_key_up`](Self::was_key_up) but for mouse buttons.
    pub fn was_mouse_button_up(&self, button: MouseButton) -> bool {
        !self.initialized || !self.mouse_previous.buttons[button.index()]
    }

    //=====================================================================
    // Query API - Mouse Position
    //=====================================================================

    /// Cursor position this frame (window pixels, top-left origin).
    pub fn mouse_position(&self) -> (i32, i32) {
        if !self.initialized {
            return (0, 0);
        }
        (self.mouse_current.x, self.mouse_current.y)
    }

    /// Cursor position at the end of the previous frame.
    pub fn previous_mouse_position(&self) -> (i32, i32) {
        if !self.initialized {
            return (0, 0);
        }
        (self.mouse_previous.x, self.mouse_previous.y)
    }

    /// Cursor movement since the previous frame.
    pub fn mouse_delta(&self) -> (i32, i32) {
        let (x, y) = self.mouse_position();
        let (px, py) = self.previous_mouse_position();
        (x.wrapping_sub(px), y.wrapping_sub(py))
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InputTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys_down: Vec<Key> = (0..KEY_COUNT)
            .filter(|&code| self.keyboard_current.keys[code])
            .map(|code| Key::from_code(code as u8))
            .collect();

        f.debug_struct("InputTracker")
            .field("initialized", &self.initialized)
            .field("keys_down", &keys_down)
            .field("mouse", &self.mouse_current)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
