//! Application orchestration — state, frame clock, viewport and input handling.

pub mod event;
pub mod frames;
pub mod handler;
pub mod state;
pub mod viewport;
