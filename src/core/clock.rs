//=========================================================================
// Clock
//=========================================================================
//
// Start/update/stop wall clock used for frame timing.
//
// `elapsed()` only moves when `update()` is called, so every reader
// within a frame sees the same value.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Instant;

//=== Clock ===============================================================

/// Sampled elapsed-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    start: Option<Instant>,
    elapsed: f64,
}

impl Clock {
    /// Creates a stopped clock with zero elapsed time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the clock and resets elapsed time.
    pub fn start(&mut self) {
        self.start = Some(Instant::now());
        self.elapsed = 0.0;
    }

    /// Samples elapsed time. No effect on a stopped clock.
    pub fn update(&mut self) {
        if let Some(start) = self.start {
            self.elapsed = start.elapsed().as_secs_f64();
        }
    }

    /// Stops the clock. Elapsed time keeps its last sampled value.
    pub fn stop(&mut self) {
        self.start = None;
    }

    pub fn is_running(&self) -> bool {
        self.start.is_some()
    }

    /// Seconds between `start()` and the last `update()`.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
