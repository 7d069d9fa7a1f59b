//=========================================================================
// Event System
//=========================================================================
//
// Code-keyed listener registry with immediate, ordered dispatch.
//
// Architecture:
//   InputTracker / Engine / game code ──fire(code, sender, context)──┐
//                                                                     ↓
//   EventBus: table[code] → [ (listener, callback), ... ] → callbacks
//
// Payloads are fixed 16-byte `EventContext` values passed by copy. The
// bus snapshots each listener list into a reused buffer before dispatch,
// so steady-state firing does not allocate; nested fires and lists that
// outgrow the buffer do.
//
//=========================================================================

//=== Module Declarations =================================================

mod bus;
mod code;
mod context;

//=== Public API ==========================================================

pub use bus::{
    shared_listener, Event, EventBus, EventListener, ObjectId, SharedListener, MAX_EVENT_CODES,
};
pub use code::EventCode;
pub use context::{EventContext, CONTEXT_SIZE};
