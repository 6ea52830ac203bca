//! Integer newtypes.
//!
//! Each wraps a plain unsigned integer so that an `Amount` can never be
//! passed where a `BlockDuration` is expected. No range or business checks:
//! a zero amount or an expired deadline is still a well-formed value.

use std::fmt;

use serde::Serialize;

use super::{int_from_value, Primitive};
use crate::config;
use crate::error::CodecResult;
use crate::io::{IntWidth, Reader, Writer};
use crate::schema::{FieldKind, Value};

macro_rules! int_primitive {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $width:ident, $read:ident, $write:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl Primitive for $name {
            const NAME: &'static str = $label;
            const SIZE: usize = IntWidth::$width.bytes();
            const KIND: FieldKind = FieldKind::Int(IntWidth::$width);

            fn write(&self, writer: &mut Writer) {
                writer.$write(self.0);
            }

            fn read(reader: &mut Reader<'_>, field: &'static str) -> CodecResult<Self> {
                reader.$read(field).map(Self)
            }

            fn to_value(&self) -> Value {
                Value::Int(u64::from(self.0))
            }

            fn from_value(field: &'static str, value: Value) -> CodecResult<Self> {
                // The range check makes the narrowing cast lossless.
                int_from_value(field, value, <$inner>::MAX as u64).map(|v| Self(v as $inner))
            }
        }

        impl From<$name> for Value {
            fn from(v: $name) -> Value {
                v.to_value()
            }
        }
    };
}

int_primitive!(
    /// Quantity of a mosaic in its smallest unit.
    Amount, u64, U64, read_u64, write_u64, "amount"
);
int_primitive!(
    /// Number of blocks.
    BlockDuration, u64, U64, read_u64, write_u64, "block_duration"
);
int_primitive!(
    /// Milliseconds since the network epoch.
    Timestamp, u64, U64, read_u64, write_u64, "timestamp"
);
int_primitive!(MosaicId, u64, U64, read_u64, write_u64, "mosaic_id");
int_primitive!(
    /// Mosaic id or namespace alias, resolved by the chain.
    UnresolvedMosaicId, u64, U64, read_u64, write_u64, "unresolved_mosaic_id"
);
int_primitive!(NamespaceId, u64, U64, read_u64, write_u64, "namespace_id");
int_primitive!(MosaicNonce, u32, U32, read_u32, write_u32, "mosaic_nonce");
int_primitive!(
    /// Bit set: supply mutable, transferable, restrictable, revokable.
    MosaicFlags, u8, U8, read_u8, write_u8, "mosaic_flags"
);
int_primitive!(
    /// Bit set selecting address/mosaic/operation restrictions and the
    /// outgoing/block modifiers.
    AccountRestrictionFlags, u16, U16, read_u16, write_u16, "account_restriction_flags"
);
int_primitive!(
    /// Transaction type discriminator. Deliberately open: whether a value is
    /// known is decided by the [`crate::registry::Registry`], not the type.
    EntityType, u16, U16, read_u16, write_u16, "entity_type"
);

// Plain integers that appear directly in layouts (divisibility, deltas,
// small counters). Signed values travel as two's complement.
macro_rules! native_int {
    ($inner:ty, $wire:ty, $width:ident, $label:literal) => {
        impl Primitive for $inner {
            const NAME: &'static str = $label;
            const SIZE: usize = IntWidth::$width.bytes();
            const KIND: FieldKind = FieldKind::Int(IntWidth::$width);

            fn write(&self, writer: &mut Writer) {
                writer.write_uint(IntWidth::$width, u64::from(*self as $wire));
            }

            fn read(reader: &mut Reader<'_>, field: &'static str) -> CodecResult<Self> {
                reader
                    .read_uint(field, IntWidth::$width)
                    .map(|v| v as $wire as $inner)
            }

            fn to_value(&self) -> Value {
                Value::Int(u64::from(*self as $wire))
            }

            fn from_value(field: &'static str, value: Value) -> CodecResult<Self> {
                int_from_value(field, value, <$wire>::MAX as u64).map(|v| v as $wire as $inner)
            }
        }

        impl From<$inner> for Value {
            fn from(v: $inner) -> Value {
                v.to_value()
            }
        }
    };
}

native_int!(u8, u8, U8, "u8");
native_int!(u16, u16, U16, "u16");
native_int!(u32, u32, U32, "u32");
native_int!(u64, u64, U64, "u64");
native_int!(i8, u8, U8, "i8");
native_int!(i16, u16, U16, "i16");

impl EntityType {
    pub const TRANSFER: Self = Self(config::ENTITY_TYPE_TRANSFER);
    pub const MOSAIC_DEFINITION: Self = Self(config::ENTITY_TYPE_MOSAIC_DEFINITION);
    pub const MOSAIC_SUPPLY_CHANGE: Self = Self(config::ENTITY_TYPE_MOSAIC_SUPPLY_CHANGE);
    pub const NAMESPACE_REGISTRATION: Self = Self(config::ENTITY_TYPE_NAMESPACE_REGISTRATION);
    pub const SECRET_LOCK: Self = Self(config::ENTITY_TYPE_SECRET_LOCK);
    pub const SECRET_PROOF: Self = Self(config::ENTITY_TYPE_SECRET_PROOF);
    pub const HASH_LOCK: Self = Self(config::ENTITY_TYPE_HASH_LOCK);
    pub const ACCOUNT_METADATA: Self = Self(config::ENTITY_TYPE_ACCOUNT_METADATA);
    pub const MOSAIC_METADATA: Self = Self(config::ENTITY_TYPE_MOSAIC_METADATA);
    pub const ACCOUNT_ADDRESS_RESTRICTION: Self = Self(config::ENTITY_TYPE_ACCOUNT_ADDRESS_RESTRICTION);
    pub const MULTISIG_ACCOUNT_MODIFICATION: Self = Self(config::ENTITY_TYPE_MULTISIG_ACCOUNT_MODIFICATION);
    pub const AGGREGATE_COMPLETE: Self = Self(config::ENTITY_TYPE_AGGREGATE_COMPLETE);
    pub const AGGREGATE_BONDED: Self = Self(config::ENTITY_TYPE_AGGREGATE_BONDED);

    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl MosaicFlags {
    pub const NONE: Self = Self(0);
    pub const SUPPLY_MUTABLE: Self = Self(0x01);
    pub const TRANSFERABLE: Self = Self(0x02);
    pub const RESTRICTABLE: Self = Self(0x04);
    pub const REVOKABLE: Self = Self(0x08);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl AccountRestrictionFlags {
    pub const ADDRESS: Self = Self(0x0001);
    pub const MOSAIC_ID: Self = Self(0x0002);
    pub const TRANSACTION_TYPE: Self = Self(0x0004);
    pub const OUTGOING: Self = Self(0x4000);
    pub const BLOCK: Self = Self(0x8000);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}
