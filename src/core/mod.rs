//=========================================================================
// Core Systems
//
// Engine subsystems that run on the core (frame loop) thread.
//
// Responsibilities:
// - Growable containers used by the other subsystems
// - Event codes, payloads and the synchronous event bus
// - Keyboard/mouse state tracking fed by platform signals
// - Platform → core signal channel
// - Frame clock and tagged memory statistics
//
// Notes:
// Every subsystem is an explicit object owned by the Engine; there are
// no globals, so several engines (or tests) can run side by side.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod clock;
pub mod containers;
pub mod event;
pub mod input;
pub mod memory;
pub mod platform_bridge;
