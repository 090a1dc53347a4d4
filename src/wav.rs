//! PCM WAV container framing.
//!
//! The header is written speculatively before any audio exists: the two
//! length fields hold an oversized placeholder so the header is
//! syntactically valid from the start, and [`finalize_header`] patches
//! them in place once the payload size is known.

use crate::buffer::AudioBuffer;

use base64::{engine::general_purpose, Engine as _};

/// Canonical PCM WAV header length.
pub const HEADER_LEN: usize = 44;
/// The one fixed output format: 16-bit mono at 16 kHz.
pub const SAMPLE_RATE: u32 = 16_000;

const FORMAT_PCM: u16 = 1;
const CHANNELS: u16 = 1;
const BYTES_PER_SAMPLE: u32 = 2;
const BITS_PER_SAMPLE: u16 = 16;

/// Stand-in data length written at creation time, patched on finalize.
const PLACEHOLDER_DATA_LEN: u32 = BYTES_PER_SAMPLE * 100_000_000;

/// Real streams are usually at least a few KiB, so start with headroom.
const INITIAL_CAPACITY: usize = 4 << 10;

/// Build a fresh buffer holding the 44-byte header for 16-bit mono
/// 16 kHz PCM, with placeholder length fields.
pub fn make_header() -> AudioBuffer {
    let byte_rate = SAMPLE_RATE * BYTES_PER_SAMPLE;
    let block_align = BYTES_PER_SAMPLE as u16;

    AudioBuffer::with_capacity(INITIAL_CAPACITY)
        .append_str("RIFF")
        .append_le32(PLACEHOLDER_DATA_LEN + 36)
        .append_str("WAVE")
        .append_str("fmt ")
        .append_le32(16)
        .append_le16(FORMAT_PCM)
        .append_le16(CHANNELS)
        .append_le32(SAMPLE_RATE)
        .append_le32(byte_rate)
        .append_le16(block_align)
        .append_le16(BITS_PER_SAMPLE)
        .append_str("data")
        .append_le32(PLACEHOLDER_DATA_LEN)
}

/// Patch the two length fields once all audio has been appended.
///
/// Offset 4 receives the total buffer length. Strict RIFF wants
/// `total - 8` there; the reference encoder has always written the
/// total, and downstream consumers depend on the byte-exact output,
/// so the deviation is kept.
pub fn finalize_header(buf: &mut AudioBuffer) {
    let total = buf.len() as u32;
    buf.put_le32(4, total);
    buf.put_le32(40, total - HEADER_LEN as u32);
}

/// Encode a finished WAV buffer as standard Base64, for transports
/// that ship audio inside JSON.
pub fn encode_wav_base64(buf: &AudioBuffer) -> String {
    general_purpose::STANDARD.encode(buf.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le16(b: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([b[at], b[at + 1]])
    }

    fn le32(b: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
    }

    #[test]
    fn test_header_is_exactly_44_bytes() {
        assert_eq!(make_header().len(), HEADER_LEN);
    }

    #[test]
    fn test_header_fields_match_canonical_layout() {
        let hdr = make_header();
        let b = hdr.as_slice();

        assert_eq!(&b[0..4], b"RIFF");
        assert_eq!(le32(b, 4), 200_000_000 + 36);
        assert_eq!(&b[8..12], b"WAVE");
        assert_eq!(&b[12..16], b"fmt ");
        assert_eq!(le32(b, 16), 16);
        assert_eq!(le16(b, 20), 1); // PCM
        assert_eq!(le16(b, 22), 1); // mono
        assert_eq!(le32(b, 24), 16_000);
        assert_eq!(le32(b, 28), 32_000);
        assert_eq!(le16(b, 32), 2);
        assert_eq!(le16(b, 34), 16);
        assert_eq!(&b[36..40], b"data");
        assert_eq!(le32(b, 40), 200_000_000);
    }

    #[test]
    fn test_header_has_headroom_for_audio() {
        let hdr = make_header();
        assert!(hdr.capacity() > (4 << 10));
    }

    // Strict RIFF would put total - 8 at offset 4; the encoder has always
    // written the total there and the output must stay byte-identical.
    #[test]
    fn test_finalize_writes_total_length_not_riff_chunk_size() {
        let mut buf = make_header().append(&[0u8; 100]);
        finalize_header(&mut buf);

        let b = buf.as_slice();
        assert_eq!(le32(b, 4), 144);
        assert_ne!(le32(b, 4), 144 - 8);
        assert_eq!(le32(b, 40), 100);
    }

    #[test]
    fn test_finalize_touches_only_the_two_length_fields() {
        let mut buf = make_header().append(&[0x5A; 32]);
        let before = buf.as_slice().to_vec();
        let len_before = buf.len();

        finalize_header(&mut buf);

        assert_eq!(buf.len(), len_before);
        let after = buf.as_slice();
        assert_eq!(&after[0..4], &before[0..4]);
        assert_eq!(&after[8..40], &before[8..40]);
        assert_eq!(&after[44..], &before[44..]);
    }

    #[test]
    fn test_finalize_empty_payload() {
        let mut buf = make_header();
        finalize_header(&mut buf);

        let b = buf.as_slice();
        assert_eq!(le32(b, 4), 44);
        assert_eq!(le32(b, 40), 0);
    }

    #[test]
    fn test_encode_wav_base64_round_trips() {
        let buf = make_header().append(&[1, 2, 3]);
        let encoded = encode_wav_base64(&buf);
        let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, buf.as_slice());
    }
}
