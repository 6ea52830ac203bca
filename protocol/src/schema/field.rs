//! Field descriptors.
//!
//! A layout is a `&'static [FieldSpec]` listing a structure's fields in wire
//! order. Layouts are plain data: the engine in [`super::engine`] is the only
//! code that interprets them.

use std::fmt;

use serde::Serialize;

use crate::io::IntWidth;
use crate::primitives::Primitive;

/// One field of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Wire shape of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Unsigned little-endian integer.
    Int(IntWidth),
    /// Opaque bytes of a fixed length.
    Fixed(usize),
    /// Alignment padding. Written as zero.
    Reserved(IntWidth),
    /// Element count of the array named `target`. Derived on encode.
    Count {
        target: &'static str,
        width: IntWidth,
    },
    /// Byte length of the buffer or embedded block named `target`. Derived on
    /// encode.
    ByteSize {
        target: &'static str,
        width: IntWidth,
    },
    /// Raw bytes whose length is held by the `ByteSize` field `size`.
    Buffer { size: &'static str },
    /// `count` elements, each laid out by `element`. Elements may be
    /// variable length.
    Array {
        count: &'static str,
        element: &'static [FieldSpec],
    },
    /// Elements laid out by `element` until the input is exhausted. The count
    /// is never stored.
    TrailingArray { element: &'static [FieldSpec] },
    /// Embedded transactions filling exactly the number of bytes held by the
    /// `ByteSize` field `size`.
    Embedded { size: &'static str },
    /// One integer slot whose meaning depends on `selector`, a field that may
    /// come later in the same structure. The decoded value is stored under the
    /// name of the matching arm.
    Union {
        selector: &'static str,
        width: IntWidth,
        arms: &'static [UnionArm],
    },
}

/// One interpretation of a [`FieldKind::Union`] slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnionArm {
    pub selector_value: u64,
    pub name: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    /// Field holding a primitive; the kind comes from the type.
    pub const fn of<T: Primitive>(name: &'static str) -> Self {
        Self::new(name, T::KIND)
    }

    pub const fn reserved(name: &'static str, width: IntWidth) -> Self {
        Self::new(name, FieldKind::Reserved(width))
    }

    pub const fn count(name: &'static str, target: &'static str, width: IntWidth) -> Self {
        Self::new(name, FieldKind::Count { target, width })
    }

    pub const fn byte_size(name: &'static str, target: &'static str, width: IntWidth) -> Self {
        Self::new(name, FieldKind::ByteSize { target, width })
    }

    pub const fn buffer(name: &'static str, size: &'static str) -> Self {
        Self::new(name, FieldKind::Buffer { size })
    }

    pub const fn array(name: &'static str, count: &'static str, element: &'static [FieldSpec]) -> Self {
        Self::new(name, FieldKind::Array { count, element })
    }

    pub const fn trailing(name: &'static str, element: &'static [FieldSpec]) -> Self {
        Self::new(name, FieldKind::TrailingArray { element })
    }

    pub const fn embedded(name: &'static str, size: &'static str) -> Self {
        Self::new(name, FieldKind::Embedded { size })
    }

    /// Encoded size when it does not depend on the value.
    pub fn fixed_size(&self) -> Option<usize> {
        match self.kind {
            FieldKind::Int(w)
            | FieldKind::Reserved(w)
            | FieldKind::Count { width: w, .. }
            | FieldKind::ByteSize { width: w, .. }
            | FieldKind::Union { width: w, .. } => Some(w.bytes()),
            FieldKind::Fixed(n) => Some(n),
            FieldKind::Buffer { .. }
            | FieldKind::Array { .. }
            | FieldKind::TrailingArray { .. }
            | FieldKind::Embedded { .. } => None,
        }
    }
}

/// Size of a layout made only of fixed-size fields, `None` otherwise.
pub fn fixed_layout_size(layout: &[FieldSpec]) -> Option<usize> {
    layout.iter().map(FieldSpec::fixed_size).sum()
}

fn width_name(width: IntWidth) -> &'static str {
    match width {
        IntWidth::U8 => "u8",
        IntWidth::U16 => "u16",
        IntWidth::U32 => "u32",
        IntWidth::U64 => "u64",
    }
}

fn write_element(f: &mut fmt::Formatter<'_>, element: &[FieldSpec]) -> fmt::Result {
    f.write_str("{")?;
    for (i, spec) in element.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {}", spec.name, spec.kind)?;
    }
    f.write_str("}")
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(w) => f.write_str(width_name(*w)),
            Self::Fixed(n) => write!(f, "bytes[{}]", n),
            Self::Reserved(w) => write!(f, "reserved {}", width_name(*w)),
            Self::Count { target, width } => write!(f, "{} count of {}", width_name(*width), target),
            Self::ByteSize { target, width } => write!(f, "{} size of {}", width_name(*width), target),
            Self::Buffer { size } => write!(f, "bytes[{}]", size),
            Self::Array { count, element } => {
                write!(f, "array[{}] ", count)?;
                write_element(f, element)
            }
            Self::TrailingArray { element } => {
                f.write_str("array[..] ")?;
                write_element(f, element)
            }
            Self::Embedded { size } => write!(f, "embedded transactions[{} bytes]", size),
            Self::Union { selector, width, arms } => {
                write!(f, "{} ", width_name(*width))?;
                for (i, arm) in arms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{} if {} == {}", arm.name, selector, arm.selector_value)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Amount, Key};

    const PAIR: &[FieldSpec] = &[FieldSpec::of::<Key>("signer"), FieldSpec::of::<Amount>("amount")];

    #[test]
    fn fixed_layouts_have_a_size() {
        assert_eq!(fixed_layout_size(PAIR), Some(40));
    }

    #[test]
    fn variable_layouts_do_not() {
        const VAR: &[FieldSpec] = &[
            FieldSpec::byte_size("data_size", "data", IntWidth::U8),
            FieldSpec::buffer("data", "data_size"),
        ];
        assert_eq!(fixed_layout_size(VAR), None);
    }

    #[test]
    fn kinds_render_readably() {
        assert_eq!(FieldKind::Int(IntWidth::U16).to_string(), "u16");
        assert_eq!(FieldKind::Fixed(32).to_string(), "bytes[32]");
        let array = FieldKind::Array {
            count: "pairs_count",
            element: PAIR,
        };
        assert_eq!(array.to_string(), "array[pairs_count] {signer: bytes[32], amount: u64}");
    }
}
