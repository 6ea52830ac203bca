//! # Transaction Bodies
//!
//! The kind-specific part of a transaction: everything after the envelope
//! header. Each kind is a typed struct plus a `const` [`FieldSpec`] table;
//! the schema engine does the actual byte work, so a kind is mostly a
//! declaration of field order and a mapping to and from a [`Record`].
//!
//! ## Architecture
//!
//! ```text
//! kind.rs        — TransactionKind: entity type, version, embeddability
//! body.rs        — TransactionBody: the tagged union the envelopes carry
//! transfer.rs    — 0x4154 transfer
//! mosaic.rs      — 0x414D definition, 0x424D supply change, UnresolvedMosaic
//! namespace.rs   — 0x414E registration (root or child)
//! lock.rs        — 0x4152 secret lock, 0x4252 secret proof, 0x4148 hash lock
//! metadata.rs    — 0x4144 account, 0x4244 mosaic metadata
//! restriction.rs — 0x4150 account address restriction
//! multisig.rs    — 0x4155 multisig account modification
//! aggregate.rs   — 0x4141 complete, 0x4241 bonded, cosignatures
//! ```
//!
//! ## Conventions
//!
//! - Bodies are immutable values. Fields are read through accessors; there
//!   are no setters.
//! - Constructors do no business validation. A zero-amount transfer is a
//!   perfectly encodable transfer. The one exception is a structure whose
//!   optional fields are mutually exclusive (namespace registration).
//! - Count and size prefixes are never stored on a body. They are derived
//!   from the collections on encode and dropped on decode.

pub mod aggregate;
mod body;
mod kind;
mod lock;
mod metadata;
mod mosaic;
mod multisig;
mod namespace;
mod restriction;
mod transfer;

pub use aggregate::{AggregateBody, Cosignature};
pub use body::{GenericBody, TransactionBody};
pub use kind::TransactionKind;
pub use lock::{HashLockBody, SecretLockBody, SecretProofBody};
pub use metadata::{AccountMetadataBody, MosaicMetadataBody};
pub use mosaic::{MosaicDefinitionBody, MosaicSupplyChangeBody, UnresolvedMosaic};
pub use multisig::MultisigAccountModificationBody;
pub use namespace::NamespaceRegistrationBody;
pub use restriction::AccountAddressRestrictionBody;
pub use transfer::TransferBody;

use crate::error::{CodecError, CodecResult};
use crate::primitives::{Primitive, UnresolvedAddress};
use crate::schema::{FieldSpec, Record, Value};

/// Element layout for arrays of bare addresses.
pub(crate) const ADDRESS_ELEMENT: &[FieldSpec] = &[FieldSpec::of::<UnresolvedAddress>("address")];

pub(crate) fn address_list(addresses: &[UnresolvedAddress]) -> Value {
    Value::Array(
        addresses
            .iter()
            .map(|a| Record::new().with("address", *a))
            .collect(),
    )
}

pub(crate) fn take_address_list(record: &mut Record, name: &'static str) -> CodecResult<Vec<UnresolvedAddress>> {
    match record.remove(name) {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|mut item| item.take::<UnresolvedAddress>("address"))
            .collect(),
        Some(_) => Err(CodecError::SchemaMismatch {
            field: name,
            reason: "expected an array",
        }),
        None => Err(CodecError::SchemaMismatch {
            field: name,
            reason: "field is missing from the record",
        }),
    }
}
