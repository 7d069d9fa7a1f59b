//=========================================================================
// Containers
//=========================================================================
//
// Generic storage types shared by the engine subsystems.
//
//=========================================================================

//=== Module Declarations =================================================

mod dyn_array;

//=== Public API ==========================================================

pub use dyn_array::{DynArray, DynArrayError, DEFAULT_CAPACITY, RESIZE_FACTOR};
