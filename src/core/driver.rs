//! Scroll-to-top animation driver.
//!
//! An explicit two-state machine (`Idle` / `Running`) fed by the host's frame
//! scheduler.  The driver never sleeps or loops on its own: each frame it
//! asks the scheduler for exactly one more callback, and cancelling revokes
//! that single pending request.  Frame callbacks carrying any other handle
//! are ignored, which is what makes cancellation take effect immediately
//! even when a tick is already queued on the host side.

use std::time::Duration;

use super::easing::Easing;

/// Milliseconds of ride per pixel of distance when no duration is configured.
pub const MS_PER_PIXEL: f64 = 1.5;

// ───────────────────────────────────────── host seams ────────

/// Opaque id of one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Request/cancel pair for "call me back on the next frame".
///
/// Callbacks are delivered by the host through [`AnimationDriver::on_frame`]
/// together with the handle returned here and a monotonic timestamp in
/// milliseconds.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scroll-position read/write primitive, in pixels from the top.
pub trait Viewport {
    fn scroll_offset(&self) -> f64;
    fn scroll_to(&mut self, offset: f64);
}

/// Derive a ride duration from the distance to travel.
pub fn duration_for(start_position: f64) -> Duration {
    let micros = (start_position.max(0.0) * MS_PER_PIXEL * 1000.0).round();
    Duration::from_micros(micros as u64)
}

// ───────────────────────────────────────── state ─────────────

#[derive(Debug, Clone, Copy, PartialEq)]
struct Session {
    start_position: f64,
    /// Stamped by the first frame callback, not at activation, so queuing
    /// delay before the first frame is not eaten out of the ride.
    start_time: Option<f64>,
    duration_ms: f64,
    pending: FrameHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DriverState {
    #[default]
    Idle,
    Running(Session),
}

/// What a frame callback did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Handle was stale or revoked; nothing was written.
    Ignored,
    /// Position applied and another frame requested.
    Continue { position: f64 },
    /// The ride reached the top; the driver is idle again.
    Completed,
}

/// Owns the single ride session and steps it one frame at a time.
#[derive(Debug, Default)]
pub struct AnimationDriver {
    state: DriverState,
    easing: Easing,
}

impl AnimationDriver {
    pub fn new(easing: Easing) -> Self {
        Self {
            state: DriverState::Idle,
            easing,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running(_))
    }

    /// Duration of the current ride, if one is running.
    pub fn duration(&self) -> Option<Duration> {
        match self.state {
            DriverState::Running(s) => Some(Duration::from_micros((s.duration_ms * 1000.0).round() as u64)),
            DriverState::Idle => None,
        }
    }

    /// Begin a ride from `from_position` to 0.
    ///
    /// Returns `false` (and changes nothing) when a ride is already running.
    pub fn start<S: FrameScheduler + ?Sized>(
        &mut self,
        from_position: f64,
        duration: Duration,
        scheduler: &mut S,
    ) -> bool {
        if self.is_running() {
            tracing::debug!("start ignored: ride already running");
            return false;
        }

        let pending = scheduler.request_frame();
        self.state = DriverState::Running(Session {
            start_position: from_position.max(0.0),
            start_time: None,
            duration_ms: duration.as_micros() as f64 / 1000.0,
            pending,
        });
        tracing::debug!(from_position, ?duration, ?pending, "ride started");
        true
    }

    /// Advance the ride for the frame identified by `handle`.
    pub fn on_frame<S, V>(
        &mut self,
        handle: FrameHandle,
        timestamp_ms: f64,
        scheduler: &mut S,
        viewport: &mut V,
    ) -> FrameOutcome
    where
        S: FrameScheduler + ?Sized,
        V: Viewport + ?Sized,
    {
        let DriverState::Running(session) = &mut self.state else {
            return FrameOutcome::Ignored;
        };
        if session.pending != handle {
            tracing::trace!(?handle, expected = ?session.pending, "stale frame ignored");
            return FrameOutcome::Ignored;
        }

        let start_time = *session.start_time.get_or_insert(timestamp_ms);
        let elapsed = (timestamp_ms - start_time).max(0.0);
        let from = session.start_position;
        let position = self
            .easing
            .apply(elapsed.min(session.duration_ms), from, -from, session.duration_ms)
            .max(0.0);

        viewport.scroll_to(position);

        if elapsed < session.duration_ms {
            session.pending = scheduler.request_frame();
            FrameOutcome::Continue { position }
        } else {
            self.state = DriverState::Idle;
            viewport.scroll_to(0.0);
            tracing::debug!(elapsed, "ride complete");
            FrameOutcome::Completed
        }
    }

    /// Abort the ride: revoke the pending frame and snap to the top.
    ///
    /// Returns `false` when idle.
    pub fn cancel<S, V>(&mut self, scheduler: &mut S, viewport: &mut V) -> bool
    where
        S: FrameScheduler + ?Sized,
        V: Viewport + ?Sized,
    {
        let DriverState::Running(session) = self.state else {
            return false;
        };
        scheduler.cancel_frame(session.pending);
        self.state = DriverState::Idle;
        viewport.scroll_to(0.0);
        tracing::debug!("ride cancelled");
        true
    }
}

// ───────────────────────────────────────── test doubles ──────
