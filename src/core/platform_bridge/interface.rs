//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core contract: the signal type and its producer handle.
//
// Producers may live on any thread (a winit loop, a replay script, a
// test). The single consumer is the `SignalPump` owned by the Engine.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Sender, TrySendError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::signal_pump::SignalPump;
use crate::core::input::{Key, MouseButton};

//=== PlatformSignal ======================================================

/// Raw occurrence reported by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSignal {
    /// Key changed state.
    Key { key: Key, pressed: bool },

    /// Mouse button changed state.
    MouseButton { button: MouseButton, pressed: bool },

    /// Cursor moved (window pixels, top-left origin).
    MouseMoved { x: i32, y: i32 },

    /// Wheel scrolled; positive is away from the user.
    MouseWheel { delta: i8 },

    /// Drawable area changed. `0×0` means minimized.
    Resized { width: u16, height: u16 },

    /// Window closed or the OS asked the application to quit.
    Quit,
}

//=== signal_channel ======================================================

/// Creates a bounded signal channel holding at most `capacity` signals.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn signal_channel(capacity: usize) -> (SignalSender, SignalPump) {
    assert!(capacity > 0, "Signal channel capacity must be greater than zero");

    let (sender, receiver) = bounded(capacity);
    (SignalSender { sender }, SignalPump::new(receiver))
}

//=== SignalSender ========================================================

/// Cloneable producer handle for platform signals.
#[derive(Debug, Clone)]
pub struct SignalSender {
    sender: Sender<PlatformSignal>,
}

impl SignalSender {
    /// Queues `signal`, blocking while the channel is full.
    ///
    /// Returns `false` if the pump was dropped; the signal is discarded.
    pub fn send(&self, signal: PlatformSignal) -> bool {
        trace!(target: "platform::input", "Sending {:?}", signal);

        if self.sender.send(signal).is_err() {
            warn!(target: "platform::input", "Signal pump gone, dropping {:?}", signal);
            return false;
        }
        true
    }

    /// Queues `signal` without blocking.
    ///
    /// Returns `false` if the channel is full or the pump was dropped.
    pub fn try_send(&self, signal: PlatformSignal) -> bool {
        match self.sender.try_send(signal) {
            Ok(()) => true,
            Err(TrySendError::Full(signal)) => {
                warn!(target: "platform::input", "Signal channel full, dropping {:?}", signal);
                false
            }
            Err(TrySendError::Disconnected(signal)) => {
                warn!(target: "platform::input", "Signal pump gone, dropping {:?}", signal);
                false
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
