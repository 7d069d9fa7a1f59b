//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit, scripted replay, tests) with the
// core systems.
//
// Components:
// - `interface`: `PlatformSignal` and its producer handle
// - `signal_pump`: core-side draining into InputTracker / EventBus
//
//=========================================================================

//=== Module Declarations =================================================

mod interface;
mod signal_pump;

//=== Public API ==========================================================

pub use interface::{signal_channel, PlatformSignal, SignalSender};
pub use signal_pump::{SignalPump, TickControl, MAX_SIGNALS_PER_FRAME};
