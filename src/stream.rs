//! The synthesis loop: feed text to the engine, drain its audio output
//! into a WAV buffer, flush, and finalize the header.
//!
//! Everything here is synchronous and single-threaded; the stream is
//! driven by explicit loop iteration, one blocking engine call at a
//! time. Errors abort immediately and leave the audio collected so far
//! in the caller's buffer.

use std::mem;

use tracing::{debug, trace};

use crate::buffer::AudioBuffer;
use crate::engine::{AudioChunks, RawStatus, SynthesisEngine, FLUSH_BYTE};
use crate::error::SynthesisError;
use crate::wav;

/// Convert `text` to 16-bit/mono/16 kHz WAV audio in `out`.
///
/// If `out` is empty its storage is replaced with a fresh header buffer,
/// so a default-constructed buffer starts a new stream. A non-empty
/// `out` is treated as an ongoing stream: new audio is appended after
/// the existing payload and the header is left alone until finalization.
///
/// On success the header length fields are patched and `out` holds a
/// complete WAV byte sequence. On error `out` still holds the header
/// plus whatever audio was collected before the failure.
pub fn synthesize<E>(
    engine: &mut E,
    text: &str,
    out: &mut AudioBuffer,
) -> Result<(), SynthesisError>
where
    E: SynthesisEngine + ?Sized,
{
    if out.is_empty() {
        *out = wav::make_header();
    }

    debug!(text_len = text.len(), "starting synthesis");

    let mut remaining = text.as_bytes();
    while !remaining.is_empty() {
        let consumed = match engine.feed_text(remaining) {
            Ok(n) => n,
            Err(status) => {
                return Err(feed_error(engine, "synthesize: feed text", status));
            }
        };
        trace!(consumed, remaining = remaining.len() - consumed, "fed text");

        // Partial consumption is normal; the shrunk window is retried on
        // the next iteration. Zero consumed is valid too, once pending
        // output has been drained.
        remaining = &remaining[consumed..];
        drain(engine, out, "synthesize: drain")?;
    }

    flush(engine, out)?;
    wav::finalize_header(out);

    debug!(wav_len = out.len(), "synthesis complete");
    Ok(())
}

/// Signal end-of-input with the reserved terminator byte, then collect
/// any residual audio.
fn flush<E>(engine: &mut E, out: &mut AudioBuffer) -> Result<(), SynthesisError>
where
    E: SynthesisEngine + ?Sized,
{
    if let Err(status) = engine.feed_text(&[FLUSH_BYTE]) {
        return Err(feed_error(engine, "flush: feed terminator", status));
    }
    drain(engine, out, "flush: drain")
}

/// Pull chunks until the engine reports idle, appending each one as a
/// borrowed span. A failing status aborts after the bytes that came
/// with it have been kept.
fn drain<E>(
    engine: &mut E,
    out: &mut AudioBuffer,
    context: &'static str,
) -> Result<(), SynthesisError>
where
    E: SynthesisEngine + ?Sized,
{
    let mut failed: Option<RawStatus> = None;
    {
        let mut chunks = AudioChunks::new(engine);
        while let Some(chunk) = chunks.next_chunk() {
            match chunk {
                Ok(bytes) => {
                    trace!(chunk_len = bytes.len(), "drained chunk");
                    *out = mem::take(out).append(bytes);
                }
                Err(status) => {
                    failed = Some(status);
                    break;
                }
            }
        }
    }

    match failed {
        Some(status) => Err(SynthesisError::drain(
            context,
            status,
            engine.describe_status(status),
        )),
        None => Ok(()),
    }
}

fn feed_error<E>(engine: &E, context: &'static str, status: RawStatus) -> SynthesisError
where
    E: SynthesisEngine + ?Sized,
{
    SynthesisError::feed(context, status, engine.describe_status(status))
}
