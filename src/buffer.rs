//! Growable append-only byte buffer used to assemble WAV output.
//!
//! Appends consume the buffer handle and return the buffer to use going
//! forward; a reallocating append drops the old storage, so no alias of it
//! can survive. One byte past the logical length is always reserved and
//! zeroed after every append, so the content can be handed to text-style
//! consumers as a null-terminated span.

/// Byte container with amortized-doubling growth.
///
/// `capacity()` counts the reserved terminator byte; `len()` does not.
#[derive(Debug, Default)]
pub struct AudioBuffer {
    buf: Box<[u8]>,
    len: usize,
}

impl AudioBuffer {
    /// Create an empty buffer with room for `capacity` content bytes
    /// plus the terminator.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity + 1].into_boxed_slice(),
            len: 0,
        }
    }

    /// Logical content length, excluding the terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated size, including the terminator slot.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The logical content, without the terminator.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Hand the finished bytes to the caller, dropping the spare capacity.
    pub fn into_vec(self) -> Vec<u8> {
        let mut v = self.buf.into_vec();
        v.truncate(self.len);
        v
    }

    /// Append `src`, growing if needed. The source is borrowed and never
    /// mutated; appending an empty slice is a no-op that reallocates
    /// nothing and rewrites nothing.
    pub fn append(mut self, src: &[u8]) -> Self {
        if src.is_empty() {
            return self;
        }

        let new_len = self.len + src.len();
        // Strict compare: grow when the terminator would land on the
        // final allocated byte.
        if new_len + 1 < self.capacity() {
            self.buf[self.len..new_len].copy_from_slice(src);
            self.len = new_len;
            self.buf[new_len] = 0;
            return self;
        }

        // Double relative to the post-append size, not the old capacity.
        let cap = new_len * 2 + 1;
        let mut next = vec![0u8; cap].into_boxed_slice();
        next[..self.len].copy_from_slice(&self.buf[..self.len]);
        next[self.len..new_len].copy_from_slice(src);
        next[new_len] = 0;
        Self {
            buf: next,
            len: new_len,
        }
    }

    /// Append the UTF-8 bytes of `src`.
    pub fn append_str(self, src: &str) -> Self {
        self.append(src.as_bytes())
    }
}

/// Little-endian encoders for building binary headers.
impl AudioBuffer {
    /// Append `v` as two bytes, low byte first.
    pub fn append_le16(self, v: u16) -> Self {
        self.append(&v.to_le_bytes())
    }

    /// Append `v` as four bytes, low byte first.
    pub fn append_le32(self, v: u32) -> Self {
        self.append(&v.to_le_bytes())
    }

    /// Overwrite four already-written bytes at `offset` with `v` in
    /// little-endian order. Never moves storage or changes the length;
    /// `offset + 4` must lie within the written region.
    pub fn put_le32(&mut self, offset: usize, v: u32) {
        assert!(offset + 4 <= self.len, "put_le32 out of written range");
        self.buf[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
    }
}
