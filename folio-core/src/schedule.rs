//! Bookkeeping for coalesced and debounced recomputation.
//!
//! These types hold no timers themselves; the browser layer owns the actual
//! animation-frame and timeout handles and consults them before scheduling.

/// Collapses any number of requests before the next paint into one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCoalescer {
    pending: bool,
    coalesced: u32,
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the caller must schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            self.coalesced += 1;
            return false;
        }
        self.pending = true;
        true
    }

    /// Called from the frame callback. Returns how many extra requests were
    /// folded into this frame.
    pub fn fire(&mut self) -> u32 {
        let coalesced = self.coalesced;
        self.pending = false;
        self.coalesced = 0;
        coalesced
    }

    /// Forget a scheduled frame whose handle was dropped.
    pub fn cancel(&mut self) {
        self.pending = false;
        self.coalesced = 0;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Generation counter for trailing-edge debouncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    delay_ms: u32,
    generation: u64,
    armed: bool,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: 0,
            armed: false,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Register a new event and return the token its timer must present.
    pub fn trigger(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;
        self.generation
    }

    /// Returns `true` only for the token of the most recent trigger, once.
    pub fn fire(&mut self, token: u64) -> bool {
        if !self.armed || token != self.generation {
            return false;
        }
        self.armed = false;
        true
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
