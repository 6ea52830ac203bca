//! Append-only little-endian sink.

use bytes::BufMut;

use super::IntWidth;

/// Growable output buffer. Writes never fail; range checks on count fields
/// happen in the schema engine before anything reaches the writer.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the buffer, usually with the structure's computed `size()`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16_le(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.put_u64_le(value);
    }

    /// Writes the low `width` bytes of `value`. Callers check the range.
    pub fn write_uint(&mut self, width: IntWidth, value: u64) {
        self.buf.put_uint_le(value, width.bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    pub fn write_zeros(&mut self, count: usize) {
        self.buf.put_bytes(0, count);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
