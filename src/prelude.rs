//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_core::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade
pub use crate::engine::{Engine, EngineBuilder, EngineConfig, EngineError, FrameContext, Game};

// Event system
pub use crate::core::event::{
    shared_listener, Event, EventBus, EventCode, EventContext, EventListener, ObjectId,
    SharedListener,
};

// Input system
pub use crate::core::input::{InputTracker, Key, MouseButton};

// Platform bridge
pub use crate::core::platform_bridge::{PlatformSignal, SignalSender};

// Containers
pub use crate::core::containers::DynArray;
