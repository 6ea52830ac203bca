//! # Transaction Envelopes
//!
//! The header wrapped around every body. Two shapes exist:
//!
//! ```text
//! standalone (128 bytes)                     embedded (48 bytes)
//! ─────────────────────────────              ─────────────────────────────
//! size                     u32               size                     u32
//! reserved                 u32               reserved                 u32
//! signature                 64               signer_public_key         32
//! signer_public_key         32               reserved                 u32
//! reserved                 u32               version                   u8
//! version                   u8               network                   u8
//! network                   u8               type                     u16
//! type                     u16               body ...
//! fee                      u64
//! deadline                 u64
//! body ...
//! ```
//!
//! `size` covers the header and the body. It is always derived on encode,
//! and on decode it bounds the body: the body decoder gets a reader that
//! ends exactly where the envelope ends, and must consume all of it.
//!
//! Standalone transactions are what gets signed and announced. Embedded
//! transactions only ever live inside an aggregate, which is why they carry
//! no signature, fee or deadline of their own.

mod embedded;
mod standalone;

pub use embedded::{EmbeddedTransaction, EMBEDDED_HEADER_LAYOUT};
pub use standalone::{Transaction, TRANSACTION_HEADER_LAYOUT};

use tracing::trace;

use crate::error::{CodecError, CodecResult};
use crate::io::Reader;
use crate::primitives::EntityType;
use crate::registry::DecodeContext;
use crate::transaction::TransactionBody;

/// Converts an envelope size to its wire field.
fn declared_size(size: usize) -> CodecResult<u32> {
    u32::try_from(size).map_err(|_| CodecError::LengthOverflow {
        field: "size",
        len: size,
        max: u64::from(u32::MAX),
    })
}

/// Decodes the body that follows an already decoded header.
///
/// `declared` is the header's `size` field and `header_size` the number of
/// header bytes already consumed.
fn read_body(
    reader: &mut Reader<'_>,
    ctx: &DecodeContext<'_>,
    entity_type: EntityType,
    embedded: bool,
    declared: usize,
    header_size: usize,
) -> CodecResult<TransactionBody> {
    let entry = ctx.registry.lookup(entity_type, embedded)?;
    let body_size = declared.checked_sub(header_size).ok_or(CodecError::SizeMismatch {
        declared,
        actual: header_size,
    })?;

    let mut body_reader = reader.split("body", body_size)?;
    let body = entry.decode_body(&mut body_reader, ctx)?;
    if !body_reader.is_empty() {
        return Err(CodecError::SizeMismatch {
            declared,
            actual: declared - body_reader.remaining(),
        });
    }

    trace!(
        entity_type = %entity_type,
        kind = entry.name(),
        embedded,
        size = declared,
        "decoded envelope"
    );
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_beyond_u32_overflow() {
        assert_eq!(declared_size(128).unwrap(), 128);
        assert!(matches!(
            declared_size(u32::MAX as usize + 1),
            Err(CodecError::LengthOverflow { field: "size", .. })
        ));
    }
}
