//! Bounded little-endian cursor over a borrowed byte slice.
//!
//! Every read checks the remaining length first and reports the field that
//! ran short, so truncated payloads fail with a useful
//! [`CodecError::Truncated`] instead of a panic inside `bytes`.

use bytes::Buf;

use super::IntWidth;
use crate::error::{CodecError, CodecResult};

/// Read cursor. Cheap to create; holds only the unread tail of the input.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    len: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            buf: bytes,
            len: bytes.len(),
        }
    }

    /// Bytes consumed since this reader was created.
    pub fn position(&self) -> usize {
        self.len - self.buf.len()
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn ensure(&self, field: &'static str, required: usize) -> CodecResult<()> {
        if self.buf.len() < required {
            return Err(CodecError::Truncated {
                field,
                required,
                remaining: self.buf.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self, field: &'static str) -> CodecResult<u8> {
        self.ensure(field, 1)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_u16(&mut self, field: &'static str) -> CodecResult<u16> {
        self.ensure(field, 2)?;
        Ok(self.buf.get_u16_le())
    }

    pub fn read_u32(&mut self, field: &'static str) -> CodecResult<u32> {
        self.ensure(field, 4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn read_u64(&mut self, field: &'static str) -> CodecResult<u64> {
        self.ensure(field, 8)?;
        Ok(self.buf.get_u64_le())
    }

    /// Reads an unsigned integer of the given width, widened to `u64`.
    pub fn read_uint(&mut self, field: &'static str, width: IntWidth) -> CodecResult<u64> {
        match width {
            IntWidth::U8 => self.read_u8(field).map(u64::from),
            IntWidth::U16 => self.read_u16(field).map(u64::from),
            IntWidth::U32 => self.read_u32(field).map(u64::from),
            IntWidth::U64 => self.read_u64(field),
        }
    }

    /// Peeks a little-endian `u32` without consuming it.
    pub fn peek_u32(&self, field: &'static str) -> CodecResult<u32> {
        self.ensure(field, 4)?;
        let mut head = &self.buf[..4];
        Ok(head.get_u32_le())
    }

    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> CodecResult<[u8; N]> {
        self.ensure(field, N)?;
        let mut out = [0u8; N];
        self.buf.copy_to_slice(&mut out);
        Ok(out)
    }

    /// Copies `len` bytes out of the input. The result does not borrow from
    /// the reader.
    pub fn read_bytes(&mut self, field: &'static str, len: usize) -> CodecResult<Vec<u8>> {
        self.ensure(field, len)?;
        let out = self.buf[..len].to_vec();
        self.buf.advance(len);
        Ok(out)
    }

    /// Splits off the next `len` bytes as an independent reader and advances
    /// past them.
    pub fn split(&mut self, field: &'static str, len: usize) -> CodecResult<Reader<'a>> {
        self.ensure(field, len)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(Reader::new(head))
    }

    /// Fails unless every byte has been consumed.
    pub fn finish(&self) -> CodecResult<()> {
        match self.remaining() {
            0 => Ok(()),
            count => Err(CodecError::TrailingBytes { count }),
        }
    }
}
