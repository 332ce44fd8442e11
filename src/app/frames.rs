//! Host-side frame scheduler.
//!
//! The event loop owns a fixed-rate timer; a ride asks [`FrameClock`] for one
//! frame at a time and the loop delivers it on the next timer tick.  Only one
//! request is ever outstanding, and cancelling it before the tick fires means
//! the tick delivers nothing.

use std::time::Instant;

use crate::core::driver::{FrameHandle, FrameScheduler};

/// Monotonic frame clock with a single pending-request slot.
#[derive(Debug)]
pub struct FrameClock {
    origin: Instant,
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            next_id: 0,
            pending: None,
        }
    }

    /// Milliseconds since the clock was created.
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Hand the pending request to the caller, clearing the slot.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = FrameHandle(self.next_id);
        if let Some(old) = self.pending.replace(handle) {
            tracing::trace!(?old, ?handle, "frame request superseded");
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
