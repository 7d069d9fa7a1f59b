//=========================================================================
// Signal Pump
//=========================================================================
//
// Core-side consumer of platform signals with bounded draining.
//
// Architecture:
//   Receiver<PlatformSignal> → pump() → InputTracker / EventBus → TickControl
//
// At most `MAX_SIGNALS_PER_FRAME` signals are handled per call so a
// flooding producer cannot stall the frame; the rest wait for the next
// frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::PlatformSignal;
use crate::core::event::{EventBus, EventCode, EventContext};
use crate::core::input::InputTracker;

//=== Constants ===========================================================

/// Upper bound on signals handled by one `pump()` call.
pub const MAX_SIGNALS_PER_FRAME: usize = 256;

//=== TickControl =========================================================

/// Frame loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== SignalPump ==========================================================

/// Drains platform signals into the input tracker and event bus.
#[derive(Debug)]
pub struct SignalPump {
    receiver: Receiver<PlatformSignal>,
}

impl SignalPump {
    pub(crate) fn new(receiver: Receiver<PlatformSignal>) -> Self {
        Self { receiver }
    }

    /// Number of signals waiting in the channel.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Handles pending signals (bounded to prevent starvation).
    ///
    /// Returns [`TickControl::Exit`] after a `Quit` signal or once every
    /// sender is gone and the channel is empty.
    pub fn pump(&mut self, input: &mut InputTracker, bus: &EventBus) -> TickControl {
        let mut drained = 0;

        while drained < MAX_SIGNALS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(signal) => {
                    drained += 1;
                    if Self::dispatch(signal, input, bus) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Disconnected) => {
                    info!(target: "platform", "All signal senders dropped");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_SIGNALS_PER_FRAME {
            warn!(
                target: "platform",
                "Signal backlog: drained {} signals this frame, {} still queued",
                drained,
                self.receiver.len()
            );
        }

        TickControl::Continue
    }

    fn dispatch(signal: PlatformSignal, input: &mut InputTracker, bus: &EventBus) -> TickControl {
        match signal {
            PlatformSignal::Key { key, pressed } => {
                input.process_key(key, pressed, bus);
            }
            PlatformSignal::MouseButton { button, pressed } => {
                input.process_mouse_button(button, pressed, bus);
            }
            PlatformSignal::MouseMoved { x, y } => {
                input.process_mouse_move(x, y, bus);
            }
            PlatformSignal::MouseWheel { delta } => {
                input.process_mouse_wheel(delta, bus);
            }
            PlatformSignal::Resized { width, height } => {
                let context = EventContext::new().with_u16(0, width).with_u16(1, height);
                bus.fire(EventCode::RESIZE, None, context);
            }
            PlatformSignal::Quit => {
                info!(target: "platform", "Quit requested by platform");
                bus.fire(EventCode::APPLICATION_QUIT, None, EventContext::new());
                return TickControl::Exit;
            }
        }
        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
