//! # Primitive Value Codecs
//!
//! Fixed-width scalars that every transaction layout is built from. A
//! primitive's size is a property of its type, never of its value:
//! `to_bytes` always yields exactly [`Primitive::SIZE`] bytes.
//!
//! ```text
//! fixed.rs   — opaque byte strings (Key, Hash256, Signature, UnresolvedAddress)
//! scalars.rs — u64/u32/u16/u8 newtypes (Amount, Timestamp, MosaicId, ...)
//! enums.rs   — closed wire enums (NetworkType, LockHashAlgorithm, ...)
//! ```
//!
//! Primitives also know how to move in and out of the schema engine's
//! dynamic [`Value`], which is how typed bodies hand their fields to the
//! generic encoder.

mod enums;
mod fixed;
mod scalars;

pub use enums::{LockHashAlgorithm, MosaicSupplyChangeAction, NamespaceRegistrationType, NetworkType};
pub use fixed::{Hash256, Key, Signature, UnresolvedAddress};
pub use scalars::{
    AccountRestrictionFlags, Amount, BlockDuration, EntityType, MosaicFlags, MosaicId,
    MosaicNonce, NamespaceId, Timestamp, UnresolvedMosaicId,
};

use crate::error::{CodecError, CodecResult};
use crate::io::{Reader, Writer};
use crate::schema::{FieldKind, Value};

/// A fixed-width wire scalar.
pub trait Primitive: Sized + Copy {
    /// Name used in error messages when the value is decoded on its own.
    const NAME: &'static str;
    /// Encoded size in bytes.
    const SIZE: usize;
    /// How the schema engine lays the value out.
    const KIND: FieldKind;

    fn write(&self, writer: &mut Writer);

    fn read(reader: &mut Reader<'_>, field: &'static str) -> CodecResult<Self>;

    /// Converts into the engine's dynamic representation.
    fn to_value(&self) -> Value;

    /// Converts back, validating width and (for enums) the discriminant.
    fn from_value(field: &'static str, value: Value) -> CodecResult<Self>;

    /// Encodes into exactly `SIZE` bytes.
    fn to_bytes(&self) -> Vec<u8> {
        let mut writer = Writer::with_capacity(Self::SIZE);
        self.write(&mut writer);
        writer.into_bytes()
    }

    /// Decodes from the front of `bytes`, returning the value and the number
    /// of bytes consumed (always `SIZE`).
    fn from_bytes(bytes: &[u8]) -> CodecResult<(Self, usize)> {
        let mut reader = Reader::new(bytes);
        let value = Self::read(&mut reader, Self::NAME)?;
        Ok((value, reader.position()))
    }
}

/// Extracts the integer from a [`Value`] and checks it fits in `max`.
pub(crate) fn int_from_value(field: &'static str, value: Value, max: u64) -> CodecResult<u64> {
    match value {
        Value::Int(v) if v <= max => Ok(v),
        Value::Int(_) => Err(CodecError::SchemaMismatch {
            field,
            reason: "integer exceeds field width",
        }),
        _ => Err(CodecError::SchemaMismatch {
            field,
            reason: "expected an integer",
        }),
    }
}

/// Serializes bytes as a lowercase hex string. Used for every opaque byte
/// field so JSON dumps stay readable.
pub(crate) fn serialize_hex<S: serde::Serializer>(
    bytes: &[u8],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_produces_exactly_size_bytes() {
        assert_eq!(Key::default().to_bytes().len(), Key::SIZE);
        assert_eq!(Signature::default().to_bytes().len(), Signature::SIZE);
        assert_eq!(UnresolvedAddress::default().to_bytes().len(), 24);
        assert_eq!(Amount(u64::MAX).to_bytes().len(), 8);
        assert_eq!(MosaicNonce(7).to_bytes().len(), 4);
        assert_eq!(EntityType::new(0x4154).to_bytes().len(), 2);
        assert_eq!(NetworkType::Testnet.to_bytes().len(), 1);
    }

    #[test]
    fn deserialize_reports_consumed_bytes() {
        let mut bytes = Amount(1_000).to_bytes();
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let (amount, consumed) = Amount::from_bytes(&bytes).unwrap();
        assert_eq!(amount, Amount(1_000));
        assert_eq!(consumed, 8);
    }

    #[test]
    fn deserialize_fails_on_short_input() {
        let err = Hash256::from_bytes(&[0u8; 31]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated {
                field: "hash256",
                required: 32,
                remaining: 31
            }
        );
    }

    #[test]
    fn int_values_are_range_checked() {
        assert!(int_from_value("x", Value::Int(255), u8::MAX as u64).is_ok());
        assert!(int_from_value("x", Value::Int(256), u8::MAX as u64).is_err());
        assert!(int_from_value("x", Value::Bytes(vec![1]), u8::MAX as u64).is_err());
    }
}
