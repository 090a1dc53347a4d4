//! Streaming WAV assembly for a text-to-speech engine.
//!
//! This crate sits between an external synthesis engine and a caller
//! that wants one well-formed PCM WAV byte stream. It accumulates the
//! engine's small, irregular audio chunks into a growable buffer with
//! amortized-doubling appends, writes the WAV header speculatively
//! before the audio length is known, and patches the length fields once
//! the stream is flushed.
//!
//! The engine is reached through the [`SynthesisEngine`] trait; the one
//! public operation is [`synthesize`].

pub mod buffer;
pub mod config;
pub mod engine;
pub mod error;
pub mod stream;
pub mod wav;

pub use buffer::AudioBuffer;
pub use config::EngineOptions;
pub use engine::{
    AudioChunks, EngineStep, RawStatus, SynthesisEngine, CHUNK_CAPACITY, FLUSH_BYTE, STATUS_OK,
};
pub use error::SynthesisError;
pub use stream::synthesize;
pub use wav::{encode_wav_base64, finalize_header, make_header, HEADER_LEN, SAMPLE_RATE};
