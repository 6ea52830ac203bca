//! Closed wire enums.
//!
//! Unlike [`super::EntityType`], these have a fixed set of assigned values.
//! Any other value on the wire is a hard decode failure
//! ([`CodecError::InvalidEnumValue`]); there is no "unknown" fallback
//! variant.

use std::fmt;

use serde::Serialize;

use super::Primitive;
use crate::config::{NETWORK_MAINNET, NETWORK_PRIVATE, NETWORK_PRIVATE_TEST, NETWORK_TESTNET};
use crate::error::{CodecError, CodecResult};
use crate::io::{IntWidth, Reader, Writer};
use crate::schema::{FieldKind, Value};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "snake_case")]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            /// Every assigned variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub const fn value(self) -> u8 {
                self as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = CodecError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $(v if v == $value => Ok(Self::$variant),)+
                    other => Err(CodecError::InvalidEnumValue {
                        field: $label,
                        value: u64::from(other),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => f.write_str(stringify!($variant)),)+
                }
            }
        }

        impl Primitive for $name {
            const NAME: &'static str = $label;
            const SIZE: usize = 1;
            const KIND: FieldKind = FieldKind::Int(IntWidth::U8);

            fn write(&self, writer: &mut Writer) {
                writer.write_u8(self.value());
            }

            fn read(reader: &mut Reader<'_>, field: &'static str) -> CodecResult<Self> {
                let raw = reader.read_u8(field)?;
                Self::try_from(raw).map_err(|_| CodecError::InvalidEnumValue {
                    field,
                    value: u64::from(raw),
                })
            }

            fn to_value(&self) -> Value {
                Value::Int(u64::from(self.value()))
            }

            fn from_value(field: &'static str, value: Value) -> CodecResult<Self> {
                match value {
                    Value::Int(v) => u8::try_from(v)
                        .ok()
                        .and_then(|b| Self::try_from(b).ok())
                        .ok_or(CodecError::InvalidEnumValue { field, value: v }),
                    _ => Err(CodecError::SchemaMismatch {
                        field,
                        reason: "expected an integer",
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

wire_enum!(
    /// Network the transaction is bound to. The first byte of every address
    /// on that network.
    NetworkType, "network" {
        Mainnet = NETWORK_MAINNET,
        Testnet = NETWORK_TESTNET,
        Private = NETWORK_PRIVATE,
        PrivateTest = NETWORK_PRIVATE_TEST,
    }
);

wire_enum!(
    /// Hash function used to derive a secret lock's secret from its proof.
    LockHashAlgorithm, "hash_algorithm" {
        /// SHA3-256.
        Sha3_256 = 0,
        /// SHA-256 followed by RIPEMD-160.
        Hash160 = 1,
        /// Double SHA-256.
        Hash256 = 2,
    }
);

wire_enum!(
    MosaicSupplyChangeAction, "action" {
        Decrease = 0,
        Increase = 1,
    }
);

wire_enum!(
    /// Whether a namespace registration creates a root or a child namespace.
    NamespaceRegistrationType, "registration_type" {
        Root = 0,
        Child = 1,
    }
);
