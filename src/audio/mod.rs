//! Audio cues — the ride music and the arrival ding.
//!
//! The controller only ever plays, pauses and rewinds a track; how a track
//! is decoded and where the sound goes is up to the backend.  Without the
//! `sound` feature the [`SilentBackend`] stands in and just logs the cues.

#[cfg(feature = "sound")]
pub mod rodio_backend;

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a track could not be prepared.
#[derive(Debug, Error)]
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
pub enum AudioError {
    #[error("audio file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("no audio output available: {0}")]
    Output(String),
}

/// A preloaded, playable / pausable / rewindable sound.
pub trait AudioTrack {
    fn play(&mut self);
    fn pause(&mut self);
    /// Seek back to the beginning without starting playback.
    fn rewind(&mut self);
}

/// Turns a resource locator into a ready-to-play track.
pub trait AudioBackend {
    fn load(&mut self, path: &Path, looping: bool) -> Result<Box<dyn AudioTrack>, AudioError>;
}

// ───────────────────────────────────────── silent ────────────

/// Backend used when the binary is built without audio output.
///
/// Still checks the file exists so a mistyped path is reported the same way
/// as with real output.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn load(&mut self, path: &Path, looping: bool) -> Result<Box<dyn AudioTrack>, AudioError> {
        if !path.is_file() {
            return Err(AudioError::NotFound(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), looping, "silent track prepared");
        Ok(Box::new(SilentTrack {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            playing: false,
        }))
    }
}

struct SilentTrack {
    name: String,
    playing: bool,
}

impl AudioTrack for SilentTrack {
    fn play(&mut self) {
        self.playing = true;
        tracing::info!(track = %self.name, "♪ play");
    }

    fn pause(&mut self) {
        if self.playing {
            tracing::info!(track = %self.name, "♪ pause");
        }
        self.playing = false;
    }

    fn rewind(&mut self) {
        tracing::debug!(track = %self.name, "♪ rewind");
    }
}

/// Pick the best backend this build supports, falling back to silence.
pub fn default_backend() -> Box<dyn AudioBackend> {
    #[cfg(feature = "sound")]
    {
        match rodio_backend::RodioBackend::open() {
            Ok(backend) => return Box::new(backend),
            Err(e) => tracing::warn!("{e}; continuing without sound"),
        }
    }
    Box::new(SilentBackend)
}

// ───────────────────────────────────────── test doubles ──────
