//! Error types for the catbuf codec.
//!
//! Every fallible operation in this crate returns a [`CodecError`]. Decoding
//! is all-or-nothing: the first failing field aborts the whole call and no
//! partially decoded value is ever handed back. Encoding only fails when a
//! collection is too long for the width of its count field, or when a record
//! does not match the layout it is being written against.

use thiserror::Error;

use crate::primitives::EntityType;

/// Shorthand for results produced by the codec.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while encoding or decoding catbuf structures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Fewer bytes remain than the field requires.
    #[error("truncated input while reading `{field}`: need {required} bytes, {remaining} remain")]
    Truncated {
        /// The field being decoded when the input ran out.
        field: &'static str,
        /// Bytes the field needs.
        required: usize,
        /// Bytes actually left in the input.
        remaining: usize,
    },

    /// The `type` discriminator is not registered, or names a kind that
    /// cannot appear in the requested position (an aggregate inside an
    /// aggregate).
    #[error("unknown transaction type {entity_type} (embedded: {embedded})")]
    UnknownTransactionType {
        /// The discriminator found on the wire.
        entity_type: EntityType,
        /// Whether the header was an embedded header.
        embedded: bool,
    },

    /// The embedded transactions of an aggregate do not tile `payload_size`
    /// exactly.
    #[error("corrupt aggregate: payload_size is {payload_size} but embedded transactions need {consumed}")]
    CorruptAggregate {
        /// Payload size declared by the aggregate body.
        payload_size: usize,
        /// Bytes the embedded transactions would consume.
        consumed: usize,
    },

    /// A structure with mutually exclusive optional fields was built with
    /// neither or both of them present.
    #[error("exactly one of `{field_a}` and `{field_b}` must be present")]
    InvalidConditionalFields {
        field_a: &'static str,
        field_b: &'static str,
    },

    /// A typed enum field holds a value with no assigned meaning.
    #[error("invalid value {value:#x} for `{field}`")]
    InvalidEnumValue { field: &'static str, value: u64 },

    /// A reserved padding field is non-zero under the strict policy.
    #[error("reserved field `{field}` must be zero, found {value:#x}")]
    NonZeroReserved { field: &'static str, value: u64 },

    /// An envelope's declared size disagrees with the bytes its header and
    /// body actually occupy.
    #[error("declared size {declared} does not match actual size {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    /// A collection is too long to be described by its count or size field.
    #[error("`{field}` has length {len}, which exceeds the maximum of {max}")]
    LengthOverflow {
        field: &'static str,
        len: usize,
        max: u64,
    },

    /// A record handed to the schema engine does not fit the layout.
    #[error("record does not match layout at `{field}`: {reason}")]
    SchemaMismatch {
        field: &'static str,
        reason: &'static str,
    },

    /// A whole-buffer decode finished with bytes left over.
    #[error("{count} trailing bytes after a complete structure")]
    TrailingBytes { count: usize },

    /// A fixed-width value could not be parsed from hex.
    #[error("invalid hex for {expected_len}-byte value")]
    InvalidHex { expected_len: usize },
}

impl CodecError {
    /// Returns `true` for failures caused by running out of input.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_message_names_the_field() {
        let err = CodecError::Truncated {
            field: "message",
            required: 2,
            remaining: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("`message`"));
        assert!(msg.contains("need 2 bytes"));
        assert!(err.is_truncation());
    }

    #[test]
    fn unknown_type_renders_hex_discriminator() {
        let err = CodecError::UnknownTransactionType {
            entity_type: EntityType::new(0xFFFF),
            embedded: true,
        };
        assert_eq!(
            err.to_string(),
            "unknown transaction type 0xFFFF (embedded: true)"
        );
        assert!(!err.is_truncation());
    }
}
