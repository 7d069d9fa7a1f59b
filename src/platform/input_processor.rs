//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit window events into engine platform signals.
//
// Architecture:
//   WindowEvent → translate_window_event() → PlatformSignal → SignalSender
//
// Stateless: every winit event maps to at most one signal. Unmapped keys
// (F13-F24, media keys, exotic layouts) and extra mouse buttons are
// filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{Key, MouseButton};
use crate::core::platform_bridge::PlatformSignal;

//=== Event Translation ===================================================

/// Converts a winit window event into a platform signal.
///
/// Returns `None` for events the core does not consume (focus, redraw,
/// IME, ...) and for unmapped keys or buttons.
pub fn translate_window_event(event: &WindowEvent) -> Option<PlatformSignal> {
    match event {
        WindowEvent::KeyboardInput { event: key_event, .. } => {
            translate_key(key_event.physical_key, key_event.state)
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let Some(button) = map_mouse_button(*button) else {
                trace!(target: "platform::input", "Unmapped mouse button {:?} ignored", button);
                return None;
            };
            Some(PlatformSignal::MouseButton {
                button,
                pressed: is_pressed(*state),
            })
        }

        WindowEvent::CursorMoved { position, .. } => Some(translate_cursor(*position)),

        WindowEvent::MouseWheel { delta, .. } => translate_wheel(*delta),

        WindowEvent::Resized(size) => Some(translate_resize(*size)),

        WindowEvent::CloseRequested => Some(PlatformSignal::Quit),

        _ => None,
    }
}

//--- Per-Event Helpers ---------------------------------------------------

/// Converts a physical key transition (filters unmapped keys).
pub(crate) fn translate_key(physical_key: PhysicalKey, state: ElementState) -> Option<PlatformSignal> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };

    let Some(key) = map_key_code(code) else {
        trace!(target: "platform::input", "Unmapped key {:?} ignored", code);
        return None;
    };

    Some(PlatformSignal::Key {
        key,
        pressed: is_pressed(state),
    })
}

/// Rounds physical cursor coordinates to whole pixels.
fn translate_cursor(position: PhysicalPosition<f64>) -> PlatformSignal {
    PlatformSignal::MouseMoved {
        x: position.x.round() as i32,
        y: position.y.round() as i32,
    }
}

/// Reduces any scroll amount to its direction (`+1` / `-1`).
fn translate_wheel(delta: MouseScrollDelta) -> Option<PlatformSignal> {
    let vertical = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(position) => position.y,
    };

    if vertical == 0.0 || vertical.is_nan() {
        return None;
    }

    Some(PlatformSignal::MouseWheel {
        delta: if vertical > 0.0 { 1 } else { -1 },
    })
}

/// Clamps window dimensions into the 16-bit resize payload.
fn translate_resize(size: PhysicalSize<u32>) -> PlatformSignal {
    PlatformSignal::Resized {
        width: u16::try_from(size.width).unwrap_or(u16::MAX),
        height: u16::try_from(size.height).unwrap_or(u16::MAX),
    }
}

fn is_pressed(state: ElementState) -> bool {
    matches!(state, ElementState::Pressed)
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts winit mouse buttons to engine buttons.
///
/// Left/Right/Middle map directly; Back/Forward/Other are not tracked.
pub fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Converts winit physical key codes to engine virtual-key codes.
///
/// Maps letters, digits, navigation, numpad, F1-F12, modifiers and the
/// common punctuation keys. Everything else returns `None`.
pub fn map_key_code(code: WinitKeyCode) -> Option<Key> {
    use WinitKeyCode::*;
    let key = match code {
        //--- Digits -------------------------------------------------------

        Digit0 => Key::DIGIT_0,
        Digit1 => Key::DIGIT_1,
        Digit2 => Key::DIGIT_2,
        Digit3 => Key::DIGIT_3,
        Digit4 => Key::DIGIT_4,
        Digit5 => Key::DIGIT_5,
        Digit6 => Key::DIGIT_6,
        Digit7 => Key::DIGIT_7,
        Digit8 => Key::DIGIT_8,
        Digit9 => Key::DIGIT_9,

        //--- Letters ------------------------------------------------------

        KeyA => Key::A,
        KeyB => Key::B,
        KeyC => Key::C,
        KeyD => Key::D,
        KeyE => Key::E,
        KeyF => Key::F,
        KeyG => Key::G,
        KeyH => Key::H,
        KeyI => Key::I,
        KeyJ => Key::J,
        KeyK => Key::K,
        KeyL => Key::L,
        KeyM => Key::M,
        KeyN => Key::N,
        KeyO => Key::O,
        KeyP => Key::P,
        KeyQ => Key::Q,
        KeyR => Key::R,
        KeyS => Key::S,
        KeyT => Key::T,
        KeyU => Key::U,
        KeyV => Key::V,
        KeyW => Key::W,
        KeyX => Key::X,
        KeyY => Key::Y,
        KeyZ => Key::Z,

        //--- Navigation ---------------------------------------------------

        ArrowUp => Key::UP,
        ArrowDown => Key::DOWN,
        ArrowLeft => Key::LEFT,
        ArrowRight => Key::RIGHT,
        PageUp => Key::PAGE_UP,
        PageDown => Key::PAGE_DOWN,
        Home => Key::HOME,
        End => Key::END,
        Insert => Key::INSERT,
        Delete => Key::DELETE,

        //--- Control ------------------------------------------------------

        Space => Key::SPACE,
        Enter | NumpadEnter => Key::ENTER,
        Escape => Key::ESCAPE,
        Tab => Key::TAB,
        Backspace => Key::BACKSPACE,
        Pause => Key::PAUSE,
        CapsLock => Key::CAPITAL,
        NumLock => Key::NUM_LOCK,
        ScrollLock => Key::SCROLL_LOCK,

        //--- Modifiers ----------------------------------------------------

        ShiftLeft => Key::LEFT_SHIFT,
        ShiftRight => Key::RIGHT_SHIFT,
        ControlLeft => Key::LEFT_CONTROL,
        ControlRight => Key::RIGHT_CONTROL,
        AltLeft => Key::LEFT_ALT,
        AltRight => Key::RIGHT_ALT,

        //--- Numpad -------------------------------------------------------

        Numpad0 => Key::NUMPAD_0,
        Numpad1 => Key::NUMPAD_1,
        Numpad2 => Key::NUMPAD_2,
        Numpad3 => Key::NUMPAD_3,
        Numpad4 => Key::NUMPAD_4,
        Numpad5 => Key::NUMPAD_5,
        Numpad6 => Key::NUMPAD_6,
        Numpad7 => Key::NUMPAD_7,
        Numpad8 => Key::NUMPAD_8,
        Numpad9 => Key::NUMPAD_9,
        NumpadMultiply => Key::MULTIPLY,
        NumpadAdd => Key::ADD,
        NumpadSubtract => Key::SUBTRACT,
        NumpadDecimal => Key::DECIMAL,
        NumpadDivide => Key::DIVIDE,

        //--- Function Keys ------------------------------------------------

        F1 => Key::F1,
        F2 => Key::F2,
        F3 => Key::F3,
        F4 => Key::F4,
        F5 => Key::F5,
        F6 => Key::F6,
        F7 => Key::F7,
        F8 => Key::F8,
        F9 => Key::F9,
        F10 => Key::F10,
        F11 => Key::F11,
        F12 => Key::F12,

        //--- Punctuation --------------------------------------------------

        Semicolon => Key::SEMICOLON,
        Equal => Key::PLUS,
        Comma => Key::COMMA,
        Minus => Key::MINUS,
        Period => Key::PERIOD,
        Slash => Key::SLASH,
        Backquote => Key::GRAVE,

        //--- Unmapped -----------------------------------------------------

        _ => return None,
    };
    Some(key)
}

//=========================================================================
// Tests
//=========================================================================
