//! # Schema Engine
//!
//! catbuffer describes ~50 transaction kinds that differ only in which
//! fields they carry. Rather than hand-writing a codec per kind, every
//! structure here is a [`FieldSpec`] table interpreted by one engine.
//!
//! ```text
//! field.rs  — FieldSpec / FieldKind: the layout vocabulary
//! value.rs  — Value / Record: a structure as dynamic data
//! engine.rs — size / encode / decode over any layout
//! ```
//!
//! Typed structures implement [`Schema`]: they declare their layout and a
//! mapping to and from [`Record`], and inherit sizing and serialization.

pub mod engine;
mod field;
mod value;

pub use field::{fixed_layout_size, FieldKind, FieldSpec, UnionArm};
pub use value::{Record, Value};

use crate::error::CodecResult;
use crate::io::{Reader, Writer};
use crate::registry::DecodeContext;

/// A structure with a declared wire layout.
///
/// Implementors provide the layout and the record mapping. Everything else
/// is derived, so size, encode and decode can never disagree about field
/// order.
pub trait Schema: Sized {
    /// Human-readable structure name.
    const NAME: &'static str;

    /// Fields in wire order.
    const LAYOUT: &'static [FieldSpec];

    /// Field values by name. Count and size prefixes may be omitted; the
    /// engine derives them.
    fn to_record(&self) -> Record;

    /// Rebuilds the structure from a decoded record.
    fn from_record(record: Record) -> CodecResult<Self>;

    /// Encoded size, computed without encoding.
    fn size(&self) -> usize {
        engine::size(Self::LAYOUT, &self.to_record())
    }

    fn write(&self, writer: &mut Writer) -> CodecResult<()> {
        engine::encode(Self::LAYOUT, &self.to_record(), writer)
    }

    fn read(reader: &mut Reader<'_>, ctx: &DecodeContext<'_>) -> CodecResult<Self> {
        Self::from_record(engine::decode(Self::LAYOUT, reader, ctx)?)
    }

    /// Encodes into a fresh buffer of exactly `size()` bytes.
    fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut writer = Writer::with_capacity(self.size());
        self.write(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Decodes from the front of `bytes` with the standard registry and
    /// default configuration. Returns the value and the bytes consumed.
    fn from_bytes(bytes: &[u8]) -> CodecResult<(Self, usize)> {
        Self::from_bytes_with(bytes, &DecodeContext::standard())
    }

    fn from_bytes_with(bytes: &[u8], ctx: &DecodeContext<'_>) -> CodecResult<(Self, usize)> {
        let mut reader = Reader::new(bytes);
        let value = Self::read(&mut reader, ctx)?;
        Ok((value, reader.position()))
    }
}
