//! Real audio output through rodio.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::{AudioBackend, AudioError, AudioTrack};

/// Owns the output stream; every track gets its own sink on its mixer.
pub struct RodioBackend {
    stream: OutputStream,
}

impl RodioBackend {
    pub fn open() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::Output(e.to_string()))?;
        // rodio prints to stderr on drop otherwise, which lands in the TUI.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, path: &Path, looping: bool) -> Result<Box<dyn AudioTrack>, AudioError> {
        if !path.is_file() {
            return Err(AudioError::NotFound(path.to_path_buf()));
        }
        let bytes: Arc<[u8]> = std::fs::read(path)
            .map_err(|source| AudioError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .into();

        // Decode once up front so a bad file is reported at startup rather
        // than on the first ride.
        Decoder::new(Cursor::new(Arc::clone(&bytes))).map_err(|e| AudioError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        tracing::debug!(path = %path.display(), looping, bytes = bytes.len(), "track preloaded");

        Ok(Box::new(RodioTrack {
            bytes,
            looping,
            sink,
        }))
    }
}

struct RodioTrack {
    bytes: Arc<[u8]>,
    looping: bool,
    sink: Sink,
}

impl RodioTrack {
    fn queue_from_start(&self) {
        let Ok(decoder) = Decoder::new(Cursor::new(Arc::clone(&self.bytes))) else {
            return;
        };
        if self.looping {
            self.sink.append(decoder.repeat_infinite());
        } else {
            self.sink.append(decoder);
        }
    }
}

impl AudioTrack for RodioTrack {
    fn play(&mut self) {
        if self.sink.empty() {
            self.queue_from_start();
        }
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn rewind(&mut self) {
        // `clear` drops the queued source and leaves the sink paused; the
        // next `play` queues a fresh decoder from byte zero.
        self.sink.clear();
    }
}
