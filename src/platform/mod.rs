//=========================================================================
// Platform Subsystem
//
// Decodes winit window events into engine platform signals.
//
// Architecture:
// ```text
//  Window thread (owned by the host):      Core thread:
//  ┌──────────────────────────────┐       ┌──────────────────┐
//  │  winit event loop            │       │  Engine          │
//  │   ↓                          │       │   ↓              │
//  │  translate_window_event()    │       │  SignalPump      │
//  │   ↓                          │       │   ↓              │
//  │  SignalSender ───────────────┼──────→│  InputTracker    │
//  └──────────────────────────────┘       │  EventBus        │
//                                         └──────────────────┘
// ```
//
// The host application owns the window and its event loop; this module
// only converts what that loop reports. Key codes become virtual-key
// codes, cursor positions whole pixels, wheel deltas a direction, and
// close requests a `Quit` signal.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== Public API ==========================================================

pub use input_processor::{map_key_code, map_mouse_button, translate_window_event};
