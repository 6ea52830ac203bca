//! Opaque fixed-width byte strings.
//!
//! Keys, hashes, signatures and addresses are never interpreted by the
//! codec. They are copied in and out verbatim and rendered as hex.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::Primitive;
use crate::config::{ADDRESS_SIZE, HASH256_SIZE, KEY_SIZE, SIGNATURE_SIZE};
use crate::error::{CodecError, CodecResult};
use crate::io::{Reader, Writer};
use crate::schema::{FieldKind, Value};

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $size:expr, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; $size]);

        impl $name {
            pub const fn new(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Copies from a slice of exactly the right length.
            pub fn from_slice(bytes: &[u8]) -> Option<Self> {
                <[u8; $size]>::try_from(bytes).ok().map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self([0u8; $size])
            }
        }

        impl From<[u8; $size]> for $name {
            fn from(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = CodecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let invalid = CodecError::InvalidHex { expected_len: $size };
                let bytes = hex::decode(s.trim()).map_err(|_| invalid.clone())?;
                Self::from_slice(&bytes).ok_or(invalid)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl Primitive for $name {
            const NAME: &'static str = $label;
            const SIZE: usize = $size;
            const KIND: FieldKind = FieldKind::Fixed($size);

            fn write(&self, writer: &mut Writer) {
                writer.write_bytes(&self.0);
            }

            fn read(reader: &mut Reader<'_>, field: &'static str) -> CodecResult<Self> {
                reader.read_array::<$size>(field).map(Self)
            }

            fn to_value(&self) -> Value {
                Value::Fixed(self.0.to_vec())
            }

            fn from_value(field: &'static str, value: Value) -> CodecResult<Self> {
                match value {
                    Value::Fixed(bytes) => Self::from_slice(&bytes).ok_or(CodecError::SchemaMismatch {
                        field,
                        reason: "fixed field has the wrong length",
                    }),
                    _ => Err(CodecError::SchemaMismatch {
                        field,
                        reason: "expected fixed-width bytes",
                    }),
                }
            }
        }

        impl From<$name> for Value {
            fn from(v: $name) -> Value {
                v.to_value()
            }
        }
    };
}

fixed_bytes!(
    /// 32-byte public key.
    Key,
    KEY_SIZE,
    "key"
);

fixed_bytes!(
    /// 32-byte SHA3-256 digest.
    Hash256,
    HASH256_SIZE,
    "hash256"
);

fixed_bytes!(
    /// 64-byte signature. Carried, never verified.
    Signature,
    SIGNATURE_SIZE,
    "signature"
);

fixed_bytes!(
    /// 24-byte address, possibly an alias that the chain resolves later.
    UnresolvedAddress,
    ADDRESS_SIZE,
    "unresolved_address"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let key = Key::new([0xAB; 32]);
        let parsed: Key = key.to_hex().parse().unwrap();
        assert_eq!(key, parsed);
        assert_eq!(key.to_string(), "ab".repeat(32));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(
            "abcd".parse::<Hash256>(),
            Err(CodecError::InvalidHex { expected_len: 32 })
        );
        assert!("zz".repeat(32).parse::<Key>().is_err());
    }

    #[test]
    fn signature_default_is_zeroed() {
        assert_eq!(Signature::default().as_bytes(), &[0u8; 64]);
    }

    #[test]
    fn value_conversion_checks_length() {
        let addr = UnresolvedAddress::new([7; 24]);
        assert_eq!(
            UnresolvedAddress::from_value("recipient", addr.to_value()).unwrap(),
            addr
        );
        assert!(UnresolvedAddress::from_value("recipient", Value::Fixed(vec![7; 23])).is_err());
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Hash256::new([1; 32])).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
    }
}
