//! Core logic – easing curves, the ride driver, its controller, and page text.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The host
//! plugs in through the [`driver::FrameScheduler`] and [`driver::Viewport`]
//! traits and the audio traits in [`crate::audio`].

pub mod driver;
pub mod easing;
pub mod elevator;
pub mod page;
