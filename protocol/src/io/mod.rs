//! # Wire I/O
//!
//! The two ends of every codec in the crate: [`Reader`] walks a borrowed byte
//! slice, [`Writer`] appends to an owned buffer. Both speak little-endian
//! only, because nothing in the catbuffer family is big-endian.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use serde::Serialize;

/// Width of an unsigned integer field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IntWidth {
    U8,
    U16,
    U32,
    U64,
}

impl IntWidth {
    /// Encoded size in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    /// Largest value representable at this width.
    pub const fn max_value(self) -> u64 {
        match self {
            Self::U8 => u8::MAX as u64,
            Self::U16 => u16::MAX as u64,
            Self::U32 => u32::MAX as u64,
            Self::U64 => u64::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_bounds() {
        assert_eq!(IntWidth::U8.bytes(), 1);
        assert_eq!(IntWidth::U64.bytes(), 8);
        assert_eq!(IntWidth::U16.max_value(), 65_535);
    }
}
