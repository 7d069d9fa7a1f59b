//=========================================================================
// Input System
//
// Keyboard and mouse state tracking for the engine.
//
// Responsibilities:
// - Keep current/previous snapshots of keys, buttons and cursor position
// - Turn platform signals into transition events on the EventBus
// - Answer "is down" / "was down" queries for gameplay code
//
// Notes:
// The tracker is single-threaded and owned by the Engine. Platform code
// reaches it through the platform bridge, never directly.
//
//=========================================================================

//=== Submodules ==========================================================

mod keys;
mod tracker;

//=== Public API ==========================================================

pub use keys::{Key, MouseButton, KEY_COUNT};
pub use tracker::InputTracker;
