//! Boundary to the external synthesis engine.
//!
//! The engine is an opaque text-in/audio-out service driven by raw status
//! codes. This module narrows it to two operations plus a status-message
//! lookup, and wraps its call-until-idle output protocol as a pull-based
//! sequence of audio chunks.

/// Raw engine status code. Zero is success; anything else is an error
/// to be resolved via [`SynthesisEngine::describe_status`].
pub type RawStatus = i32;

pub const STATUS_OK: RawStatus = 0;

/// Bytes pulled per drain call.
pub const CHUNK_CAPACITY: usize = 1 << 10;

/// Reserved terminator byte signalling end-of-input to the engine.
pub const FLUSH_BYTE: u8 = 0;

/// Outcome of one pull: the engine has more output pending, is idle,
/// or failed with a raw status. Bytes handed back alongside a failure
/// are still valid audio and are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStep {
    Busy,
    Idle,
    Failed(RawStatus),
}

/// Narrow interface to the text-to-speech engine.
///
/// Handles are single-owner and non-reentrant: at most one synthesis may
/// be in flight against a given engine at a time.
pub trait SynthesisEngine {
    /// Feed UTF-8 text bytes to the engine. Returns how many bytes it
    /// actually consumed, which may be less than offered, or the raw
    /// status code on failure.
    fn feed_text(&mut self, text: &[u8]) -> Result<usize, RawStatus>;

    /// Pull one chunk of produced PCM audio into `out`. Returns the byte
    /// count written and the step outcome.
    fn pull_chunk(&mut self, out: &mut [u8]) -> (usize, EngineStep);

    /// Resolve a raw status code to the engine's human-readable message.
    fn describe_status(&self, status: RawStatus) -> String;
}

enum ChunksState {
    Pulling,
    Erroring(RawStatus),
    Done,
}

/// Finite pull of the audio an engine has produced so far.
///
/// Not restartable: it is tied to the one-shot feed state of the engine
/// it borrows. Yields chunks until the engine reports idle; on a failing
/// status it yields the bytes that came with the failure first, then the
/// status, then ends.
pub struct AudioChunks<'e, E: ?Sized> {
    engine: &'e mut E,
    buf: [u8; CHUNK_CAPACITY],
    state: ChunksState,
}

impl<'e, E: SynthesisEngine + ?Sized> AudioChunks<'e, E> {
    pub fn new(engine: &'e mut E) -> Self {
        Self {
            engine,
            buf: [0u8; CHUNK_CAPACITY],
            state: ChunksState::Pulling,
        }
    }

    /// Pull the next chunk. Borrows the internal scratch buffer, so this
    /// is a lending pull rather than an `Iterator`.
    pub fn next_chunk(&mut self) -> Option<Result<&[u8], RawStatus>> {
        match self.state {
            ChunksState::Done => None,
            ChunksState::Erroring(status) => {
                self.state = ChunksState::Done;
                Some(Err(status))
            }
            ChunksState::Pulling => {
                let (n, step) = self.engine.pull_chunk(&mut self.buf);
                match step {
                    EngineStep::Busy => {}
                    EngineStep::Idle => self.state = ChunksState::Done,
                    EngineStep::Failed(status) => self.state = ChunksState::Erroring(status),
                }
                Some(Ok(&self.buf[..n]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed script of pull outcomes.
    struct ScriptedEngine {
        script: Vec<(Vec<u8>, EngineStep)>,
        at: usize,
    }

    impl SynthesisEngine for ScriptedEngine {
        fn feed_text(&mut self, text: &[u8]) -> Result<usize, RawStatus> {
            Ok(text.len())
        }

        fn pull_chunk(&mut self, out: &mut [u8]) -> (usize, EngineStep) {
            let (bytes, step) = &self.script[self.at];
            self.at += 1;
            out[..bytes.len()].copy_from_slice(bytes);
            (bytes.len(), *step)
        }

        fn describe_status(&self, status: RawStatus) -> String {
            format!("scripted status {status}")
        }
    }

    #[test]
    fn test_chunks_stop_at_idle() {
        let mut engine = ScriptedEngine {
            script: vec![
                (vec![1, 2], EngineStep::Busy),
                (vec![3], EngineStep::Busy),
                (vec![4, 5, 6], EngineStep::Idle),
            ],
            at: 0,
        };

        let mut chunks = AudioChunks::new(&mut engine);
        let mut collected = Vec::new();
        while let Some(chunk) = chunks.next_chunk() {
            collected.extend_from_slice(chunk.unwrap());
        }
        assert_eq!(collected, vec![1, 2, 3, 4, 5, 6]);
        assert!(chunks.next_chunk().is_none());
    }

    #[test]
    fn test_failed_pull_yields_its_bytes_before_the_status() {
        let mut engine = ScriptedEngine {
            script: vec![
                (vec![9], EngineStep::Busy),
                (vec![7, 8], EngineStep::Failed(-20)),
            ],
            at: 0,
        };

        let mut chunks = AudioChunks::new(&mut engine);
        assert_eq!(chunks.next_chunk().unwrap().unwrap(), &[9]);
        assert_eq!(chunks.next_chunk().unwrap().unwrap(), &[7, 8]);
        assert_eq!(chunks.next_chunk().unwrap().unwrap_err(), -20);
        assert!(chunks.next_chunk().is_none());
    }
}
