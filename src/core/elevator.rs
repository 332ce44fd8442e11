//! Trigger and lifecycle controller.
//!
//! [`Elevator`] owns the driver together with the host's scheduler and
//! viewport, and sequences the audio cues around a ride:
//!
//! * activation starts the ride and the (looping) ride music;
//! * natural arrival stops and rewinds the music, then plays the end cue;
//! * focus loss aborts the ride, parks the viewport at the top and silences
//!   the music without the end cue.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::driver::{duration_for, AnimationDriver, FrameHandle, FrameOutcome, FrameScheduler, Viewport};
use super::easing::Easing;
use crate::audio::{AudioBackend, AudioTrack};

/// The clickable thing that starts a ride when bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerElement {
    pub label: String,
}

impl Default for TriggerElement {
    fn default() -> Self {
        Self {
            label: "▲ top".into(),
        }
    }
}

/// Options fixed at [`Elevator::initialize`].
///
/// Every field is optional: no trigger means only [`Elevator::activate`]
/// starts a ride, no duration means 1.5 ms per pixel travelled, no audio
/// means a silent ride.
#[derive(Debug, Clone, Default)]
pub struct ElevatorOptions {
    pub element: Option<TriggerElement>,
    /// Fixed ride length.  Zero counts as unset.
    pub duration: Option<Duration>,
    pub main_audio: Option<PathBuf>,
    pub end_audio: Option<PathBuf>,
    pub easing: Easing,
}

/// One scroll-to-top effect bound to a host scheduler and viewport.
pub struct Elevator<S, V> {
    options: ElevatorOptions,
    driver: AnimationDriver,
    scheduler: S,
    viewport: V,
    main_audio: Option<Box<dyn AudioTrack>>,
    end_audio: Option<Box<dyn AudioTrack>>,
    trigger_bound: bool,
    disposed: bool,
}

impl<S: FrameScheduler, V: Viewport> Elevator<S, V> {
    /// Bind the effect: remember the trigger, preload the audio.
    ///
    /// A track that fails to load is logged and treated as not configured.
    pub fn initialize(
        options: ElevatorOptions,
        backend: &mut dyn AudioBackend,
        scheduler: S,
        viewport: V,
    ) -> Self {
        let main_audio = load_track(backend, options.main_audio.as_deref(), true, "main");
        let end_audio = load_track(backend, options.end_audio.as_deref(), false, "end");
        let trigger_bound = options.element.is_some();

        tracing::debug!(
            trigger_bound,
            duration = ?options.duration,
            easing = %options.easing,
            main_audio = main_audio.is_some(),
            end_audio = end_audio.is_some(),
            "elevator initialised"
        );

        Self {
            driver: AnimationDriver::new(options.easing),
            options,
            scheduler,
            viewport,
            main_audio,
            end_audio,
            trigger_bound,
            disposed: false,
        }
    }

    // ── accessors ──────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    /// The bound trigger, if any.
    pub fn trigger(&self) -> Option<&TriggerElement> {
        if self.trigger_bound {
            self.options.element.as_ref()
        } else {
            None
        }
    }

    pub fn ride_duration(&self) -> Option<Duration> {
        self.driver.duration()
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Direct viewport access for the host's own scrolling.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Ride length for a ride starting at `start_position`.
    pub fn resolved_duration(&self, start_position: f64) -> Duration {
        self.options
            .duration
            .filter(|d| !d.is_zero())
            .unwrap_or_else(|| duration_for(start_position))
    }

    // ── entry points ───────────────────────────────────────────

    /// Start a ride from the current offset.  No-op while a ride is running.
    ///
    /// Returns `true` when a new ride actually began.
    pub fn activate(&mut self) -> bool {
        if self.disposed {
            return false;
        }

        let from = self.viewport.scroll_offset();
        let duration = self.resolved_duration(from);
        if !self.driver.start(from, duration, &mut self.scheduler) {
            return false;
        }

        tracing::info!(from, ?duration, "going up");
        if let Some(track) = self.main_audio.as_mut() {
            track.play();
        }
        true
    }

    /// Activation coming from the bound trigger element.
    pub fn on_trigger(&mut self) -> bool {
        if !self.trigger_bound {
            return false;
        }
        self.activate()
    }

    /// Deliver a scheduled frame.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp_ms: f64) -> FrameOutcome {
        let outcome = self
            .driver
            .on_frame(handle, timestamp_ms, &mut self.scheduler, &mut self.viewport);
        if outcome == FrameOutcome::Completed {
            self.on_driver_complete();
        }
        outcome
    }

    /// Focus left the window: abort silently and park at the top.
    ///
    /// Returns `true` when a ride was actually stopped.
    pub fn force_stop(&mut self) -> bool {
        if !self.driver.cancel(&mut self.scheduler, &mut self.viewport) {
            return false;
        }
        self.stop_main_audio();
        tracing::info!("ride aborted");
        true
    }

    /// Tear down: abort any ride, release audio, unbind the trigger.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.force_stop();
        self.main_audio = None;
        self.end_audio = None;
        self.trigger_bound = false;
        self.disposed = true;
        tracing::debug!("elevator disposed");
    }

    // ── internals ──────────────────────────────────────────────

    fn on_driver_complete(&mut self) {
        self.stop_main_audio();
        if let Some(track) = self.end_audio.as_mut() {
            track.play();
        }
        tracing::info!("ding: arrived at the top");
    }

    fn stop_main_audio(&mut self) {
        if let Some(track) = self.main_audio.as_mut() {
            track.pause();
            track.rewind();
        }
    }
}

fn load_track(
    backend: &mut dyn AudioBackend,
    path: Option<&Path>,
    looping: bool,
    role: &str,
) -> Option<Box<dyn AudioTrack>> {
    let path = path?;
    match backend.load(path, looping) {
        Ok(track) => Some(track),
        Err(e) => {
            tracing::warn!(role, "{e}; {role} audio disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::fakes::RecordingBackend;
    use crate::core::driver::fakes::{FakeScheduler, FakeViewport};

    fn options_with_audio() -> ElevatorOptions {
        ElevatorOptions {
            element: Some(TriggerElement::default()),
            main_audio: Some(PathBuf::from("music.mp3")),
            end_audio: Some(PathBuf::from("ding.mp3")),
            ..Default::default()
        }
    }

    fn elevator_at(
        offset: f64,
        options: ElevatorOptions,
    ) -> (Elevator<FakeScheduler, FakeViewport>, RecordingBackend) {
        let mut backend = RecordingBackend::default();
        let e = Elevator::initialize(options, &mut backend, FakeScheduler::default(), FakeViewport::at(offset));
        backend.log.borrow_mut().clear();
        (e, backend)
    }

    /// Feed frames 16 ms apart until the scheduler runs dry.
    fn run_to_end(e: &mut Elevator<FakeScheduler, FakeViewport>, mut t: f64) -> Vec<FrameOutcome> {
        let mut outcomes = Vec::new();
        while let Some(h) = e.scheduler_mut().take() {
            outcomes.push(e.on_frame(h, t));
            t += 16.0;
        }
        outcomes
    }

    #[test]
    fn initialize_preloads_tracks_and_loops_only_main() {
        let mut backend = RecordingBackend::default();
        let e = Elevator::initialize(
            options_with_audio(),
            &mut backend,
            FakeScheduler::default(),
            FakeViewport::default(),
        );
        assert_eq!(
            *backend.log.borrow(),
            vec!["music.mp3:load(loop=true)", "ding.mp3:load(loop=false)"]
        );
        assert!(e.trigger().is_some());
        assert!(!e.is_running());
    }

    #[test]
    fn derived_and_custom_duration() {
        let (e, _) = elevator_at(0.0, ElevatorOptions::default());
        assert_eq!(e.resolved_duration(1000.0), Duration::from_millis(1500));

        let (e, _) = elevator_at(
            0.0,
            ElevatorOptions {
                duration: Some(Duration::from_millis(700)),
                ..Default::default()
            },
        );
        assert_eq!(e.resolved_duration(1000.0), Duration::from_millis(700));

        let (e, _) = elevator_at(
            0.0,
            ElevatorOptions {
                duration: Some(Duration::ZERO),
                ..Default::default()
            },
        );
        assert_eq!(e.resolved_duration(1000.0), Duration::from_millis(1500));
    }

    #[test]
    fn natural_arrival_sequences_audio() {
        let (mut e, backend) = elevator_at(1000.0, options_with_audio());

        assert!(e.activate());
        assert_eq!(e.ride_duration(), Some(Duration::from_millis(1500)));
        assert_eq!(*backend.log.borrow(), vec!["music.mp3:play"]);

        let outcomes = run_to_end(&mut e, 10_000.0);
        assert_eq!(outcomes.last(), Some(&FrameOutcome::Completed));
        assert_eq!(e.viewport().offset, 0.0);
        assert!(!e.is_running());
        assert_eq!(
            *backend.log.borrow(),
            vec!["music.mp3:play", "music.mp3:pause", "music.mp3:rewind", "ding.mp3:play"]
        );
    }

    #[test]
    fn double_activation_runs_one_ride() {
        let (mut e, backend) = elevator_at(200.0, options_with_audio());

        assert!(e.activate());
        assert!(!e.activate());
        assert_eq!(e.scheduler_mut().pending.len(), 1);

        let outcomes = run_to_end(&mut e, 0.0);
        // 200 px → 300 ms → frames at 0, 16, … 288 continue, 304 arrives.
        assert_eq!(outcomes.len(), 20);
        assert_eq!(
            outcomes.iter().filter(|o| **o == FrameOutcome::Completed).count(),
            1
        );
        let plays = backend.log.borrow().iter().filter(|l| *l == "music.mp3:play").count();
        assert_eq!(plays, 1);
    }

    #[test]
    fn zero_distance_ride_dings_on_first_frame() {
        let (mut e, backend) = elevator_at(0.0, options_with_audio());

        assert!(e.activate());
        let outcomes = run_to_end(&mut e, 3.0);
        assert_eq!(outcomes, vec![FrameOutcome::Completed]);
        assert_eq!(e.viewport().offset, 0.0);
        assert_eq!(
            *backend.log.borrow(),
            vec!["music.mp3:play", "music.mp3:pause", "music.mp3:rewind", "ding.mp3:play"]
        );
    }

    #[test]
    fn focus_loss_while_idle_changes_nothing() {
        let (mut e, backend) = elevator_at(640.0, options_with_audio());

        assert!(!e.force_stop());
        assert_eq!(e.viewport().offset, 640.0);
        assert!(e.viewport().writes.is_empty());
        assert!(backend.log.borrow().is_empty());
    }

    #[test]
    fn focus_loss_mid_ride_parks_at_top_without_ding() {
        let (mut e, backend) = elevator_at(1000.0, options_with_audio());
        e.activate();

        let h = e.scheduler_mut().take().unwrap();
        e.on_frame(h, 0.0);
        let h = e.scheduler_mut().take().unwrap();
        e.on_frame(h, 400.0);
        assert!(e.viewport().offset > 0.0);
        let queued = *e.scheduler_mut().pending.first().unwrap();

        assert!(e.force_stop());
        assert_eq!(e.viewport().offset, 0.0);
        assert!(!e.is_running());

        // A tick that was already in flight must not move anything.
        let writes = e.viewport().writes.len();
        assert_eq!(e.on_frame(queued, 416.0), FrameOutcome::Ignored);
        assert_eq!(e.viewport().writes.len(), writes);

        let log = backend.log.borrow();
        assert_eq!(*log, vec!["music.mp3:play", "music.mp3:pause", "music.mp3:rewind"]);
        assert!(!log.iter().any(|l| l == "ding.mp3:play"));
    }

    #[test]
    fn focus_loss_in_same_tick_as_activation_wins() {
        let (mut e, backend) = elevator_at(500.0, options_with_audio());

        e.activate();
        assert!(e.force_stop());

        assert!(e.scheduler_mut().pending.is_empty());
        assert_eq!(e.viewport().offset, 0.0);
        assert_eq!(
            *backend.log.borrow(),
            vec!["music.mp3:play", "music.mp3:pause", "music.mp3:rewind"]
        );
    }

    #[test]
    fn missing_audio_is_silently_skipped() {
        let mut backend = RecordingBackend {
            broken: vec!["music.mp3".into()],
            ..Default::default()
        };
        let mut e = Elevator::initialize(
            options_with_audio(),
            &mut backend,
            FakeScheduler::default(),
            FakeViewport::at(100.0),
        );
        backend.log.borrow_mut().clear();

        e.activate();
        run_to_end(&mut e, 0.0);
        assert_eq!(*backend.log.borrow(), vec!["ding.mp3:play"]);

        let (mut e, backend) = elevator_at(100.0, ElevatorOptions::default());
        e.activate();
        run_to_end(&mut e, 0.0);
        assert_eq!(e.viewport().offset, 0.0);
        assert!(backend.log.borrow().is_empty());
    }

    #[test]
    fn trigger_only_fires_when_bound() {
        let (mut e, _) = elevator_at(100.0, ElevatorOptions::default());
        assert!(e.trigger().is_none());
        assert!(!e.on_trigger());
        assert!(!e.is_running());
        // Programmatic activation still works without a trigger.
        assert!(e.activate());

        let (mut e, _) = elevator_at(100.0, options_with_audio());
        assert!(e.on_trigger());
        assert!(e.is_running());
    }

    #[test]
    fn dispose_aborts_and_goes_inert() {
        let (mut e, backend) = elevator_at(300.0, options_with_audio());
        e.activate();

        e.dispose();
        assert!(!e.is_running());
        assert_eq!(e.viewport().offset, 0.0);
        assert!(e.trigger().is_none());

        e.viewport_mut().scroll_to(300.0);
        assert!(!e.activate());
        assert!(!e.on_trigger());
        assert_eq!(
            *backend.log.borrow(),
            vec!["music.mp3:play", "music.mp3:pause", "music.mp3:rewind"]
        );
    }
}
