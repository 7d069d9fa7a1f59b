//=========================================================================
// Event Context
//=========================================================================
//
// Fixed 16-byte payload carried by every fired event.
//
// The same bytes can be read through several lane layouts:
//
//   2 × i64 / u64 / f64
//   4 × i32 / u32 / f32
//   8 × i16 / u16
//  16 × i8  / u8 / char bytes
//
// Lanes use native endianness and alias each other, so writing `u32[0]`
// also changes `u16[0]`, `u16[1]` and `u8[0..4]`. Producers and consumers
// of an event code must agree on a single layout.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::mem;

//=== Constants ===========================================================

/// Size of the payload in bytes.
pub const CONTEXT_SIZE: usize = 16;

//=== Lane Accessors ======================================================

macro_rules! lane_accessors {
    ($($ty:ty => $get:ident, $set:ident, $with:ident;)*) => {
        $(
            #[doc = concat!("Reads `", stringify!($ty), "` lane `lane`.")]
            ///
            /// # Panics
            ///
            /// Panics if the lane lies outside the 16-byte payload.
            pub fn $get(&self, lane: usize) -> $ty {
                const WIDTH: usize = mem::size_of::<$ty>();
                let start = lane * WIDTH;
                let mut bytes = [0u8; WIDTH];
                bytes.copy_from_slice(&self.data[start..start + WIDTH]);
                <$ty>::from_ne_bytes(bytes)
            }

            #[doc = concat!("Writes `", stringify!($ty), "` lane `lane`.")]
            ///
            /// # Panics
            ///
            /// Panics if the lane lies outside the 16-byte payload.
            pub fn $set(&mut self, lane: usize, value: $ty) {
                const WIDTH: usize = mem::size_of::<$ty>();
                let start = lane * WIDTH;
                self.data[start..start + WIDTH].copy_from_slice(&value.to_ne_bytes());
            }

            #[doc = concat!("Builder form of `", stringify!($set), "`.")]
            pub fn $with(mut self, lane: usize, value: $ty) -> Self {
                self.$set(lane, value);
                self
            }
        )*
    };
}

//=== EventContext ========================================================

/// Small, allocation-free payload for events.
///
/// # Examples
///
/// ```
/// use aetheric_core::core::event::EventContext;
///
/// let context = EventContext::new().with_u16(0, 65);
/// assert_eq!(context.u16(0), 65);
///
/// let moved = EventContext::new().with_i32(0, -20).with_i32(1, 480);
/// assert_eq!((moved.i32(0), moved.i32(1)), (-20, 480));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventContext {
    data: [u8; CONTEXT_SIZE],
}

impl EventContext {
    /// Creates a zeroed payload.
    pub const fn new() -> Self {
        Self {
            data: [0; CONTEXT_SIZE],
        }
    }

    /// Wraps raw payload bytes.
    pub const fn from_bytes(data: [u8; CONTEXT_SIZE]) -> Self {
        Self { data }
    }

    /// Raw payload bytes.
    pub fn as_bytes(&self) -> &[u8; CONTEXT_SIZE] {
        &self.data
    }

    lane_accessors! {
        i64 => i64, set_i64, with_i64;
        u64 => u64, set_u64, with_u64;
        f64 => f64, set_f64, with_f64;
        i32 => i32, set_i32, with_i32;
        u32 => u32, set_u32, with_u32;
        f32 => f32, set_f32, with_f32;
        i16 => i16, set_i16, with_i16;
        u16 => u16, set_u16, with_u16;
        i8 => i8, set_i8, with_i8;
        u8 => u8, set_u8, with_u8;
    }

    //--- Character Buffer -------------------------------------------------

    /// Stores `text` as a NUL-padded character buffer.
    ///
    /// Text longer than 16 bytes is cut at the last character boundary
    /// that fits.
    pub fn with_str(mut self, text: &str) -> Self {
        let mut end = text.len().min(CONTEXT_SIZE);
        while !text.is_char_boundary(end) {
            end -= 1;
        }

        self.data = [0; CONTEXT_SIZE];
        self.data[..end].copy_from_slice(&text.as_bytes()[..end]);
        self
    }

    /// Reads the character buffer up to the first NUL byte.
    ///
    /// Returns `None` if those bytes are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        let end = self
            .data
            .iter()
            .position(|&byte| byte == 0)
            .unwrap_or(CONTEXT_SIZE);
        std::str::from_utf8(&self.data[..end]).ok()
    }
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Debug for EventContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventContext({:02x?})", self.data)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
