//! Namespace registration.
//!
//! A root namespace is rented for a `duration`; a child namespace hangs off a
//! `parent_id`. Both share the first eight bytes of the body, and which one
//! they hold is decided by `registration_type`, which comes *after* the
//! slot. The schema engine handles that with a [`FieldKind::Union`].

use serde::Serialize;

use super::{TransactionBody, TransactionKind};
use crate::error::{CodecError, CodecResult};
use crate::io::IntWidth;
use crate::primitives::{BlockDuration, EntityType, NamespaceId, NamespaceRegistrationType};
use crate::schema::{FieldKind, FieldSpec, Record, Schema, UnionArm, Value};

const TARGET_ARMS: &[UnionArm] = &[
    UnionArm {
        selector_value: NamespaceRegistrationType::Root.value() as u64,
        name: "duration",
    },
    UnionArm {
        selector_value: NamespaceRegistrationType::Child.value() as u64,
        name: "parent_id",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceRegistrationBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<BlockDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<NamespaceId>,
    id: NamespaceId,
    #[serde(serialize_with = "crate::primitives::serialize_hex")]
    name: Vec<u8>,
}

impl NamespaceRegistrationBody {
    /// Builds a registration from its two mutually exclusive fields.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidConditionalFields`] unless exactly one of
    /// `duration` and `parent_id` is given.
    pub fn new(
        duration: Option<BlockDuration>,
        parent_id: Option<NamespaceId>,
        id: NamespaceId,
        name: Vec<u8>,
    ) -> CodecResult<Self> {
        if duration.is_some() == parent_id.is_some() {
            return Err(CodecError::InvalidConditionalFields {
                field_a: "duration",
                field_b: "parent_id",
            });
        }
        Ok(Self {
            duration,
            parent_id,
            id,
            name,
        })
    }

    pub fn root(duration: BlockDuration, id: NamespaceId, name: Vec<u8>) -> Self {
        Self {
            duration: Some(duration),
            parent_id: None,
            id,
            name,
        }
    }

    pub fn child(parent_id: NamespaceId, id: NamespaceId, name: Vec<u8>) -> Self {
        Self {
            duration: None,
            parent_id: Some(parent_id),
            id,
            name,
        }
    }

    /// Rental duration. `Some` exactly for root registrations.
    pub fn duration(&self) -> Option<BlockDuration> {
        self.duration
    }

    /// Parent namespace. `Some` exactly for child registrations.
    pub fn parent_id(&self) -> Option<NamespaceId> {
        self.parent_id
    }

    pub fn id(&self) -> NamespaceId {
        self.id
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn registration_type(&self) -> NamespaceRegistrationType {
        match self.duration {
            Some(_) => NamespaceRegistrationType::Root,
            None => NamespaceRegistrationType::Child,
        }
    }
}

impl Schema for NamespaceRegistrationBody {
    const NAME: &'static str = "namespace_registration";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::new(
            "duration_or_parent_id",
            FieldKind::Union {
                selector: "registration_type",
                width: IntWidth::U64,
                arms: TARGET_ARMS,
            },
        ),
        FieldSpec::of::<NamespaceId>("id"),
        FieldSpec::of::<NamespaceRegistrationType>("registration_type"),
        FieldSpec::byte_size("name_size", "name", IntWidth::U8),
        FieldSpec::buffer("name", "name_size"),
    ];

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        if let Some(duration) = self.duration {
            record.insert("duration", duration);
        }
        if let Some(parent_id) = self.parent_id {
            record.insert("parent_id", parent_id);
        }
        record
            .with("id", self.id)
            .with("registration_type", self.registration_type())
            .with("name", Value::Bytes(self.name.clone()))
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        // Validates the selector even though the union already resolved it.
        let _: NamespaceRegistrationType = record.take("registration_type")?;
        Self::new(
            record.take_optional("duration")?,
            record.take_optional("parent_id")?,
            record.take("id")?,
            record.take_bytes("name")?,
        )
    }
}

impl TransactionKind for NamespaceRegistrationBody {
    const ENTITY_TYPE: EntityType = EntityType::NAMESPACE_REGISTRATION;

    fn into_body(self) -> TransactionBody {
        TransactionBody::NamespaceRegistration(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_or_neither_is_rejected() {
        let both = NamespaceRegistrationBody::new(
            Some(BlockDuration(1)),
            Some(NamespaceId(2)),
            NamespaceId(3),
            b"x".to_vec(),
        );
        let neither = NamespaceRegistrationBody::new(None, None, NamespaceId(3), b"x".to_vec());
        let expected = CodecError::InvalidConditionalFields {
            field_a: "duration",
            field_b: "parent_id",
        };
        assert_eq!(both.unwrap_err(), expected);
        assert_eq!(neither.unwrap_err(), expected);
    }

    #[test]
    fn root_slot_holds_the_duration() {
        let body = NamespaceRegistrationBody::root(BlockDuration(1000), NamespaceId(0x55), b"nem".to_vec());
        let bytes = body.to_bytes().unwrap();
        assert_eq!(bytes.len(), 8 + 8 + 1 + 1 + 3);
        assert_eq!(&bytes[..2], &[0xE8, 0x03]);
        assert_eq!(bytes[16], 0);
        assert_eq!(bytes[17], 3);
        let (decoded, _) = NamespaceRegistrationBody::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.duration(), Some(BlockDuration(1000)));
        assert_eq!(decoded.parent_id(), None);
        assert_eq!(decoded, body);
    }

    #[test]
    fn child_slot_holds_the_parent() {
        let body = NamespaceRegistrationBody::child(NamespaceId(0x77), NamespaceId(0x88), b"sub".to_vec());
        let bytes = body.to_bytes().unwrap();
        assert_eq!(bytes[0], 0x77);
        assert_eq!(bytes[16], 1);
        let (decoded, _) = NamespaceRegistrationBody::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.registration_type(), NamespaceRegistrationType::Child);
        assert_eq!(decoded.parent_id(), Some(NamespaceId(0x77)));
    }

    #[test]
    fn unknown_registration_type_fails() {
        let mut bytes = NamespaceRegistrationBody::root(BlockDuration(1), NamespaceId(1), vec![])
            .to_bytes()
            .unwrap();
        bytes[16] = 9;
        assert_eq!(
            NamespaceRegistrationBody::from_bytes(&bytes),
            Err(CodecError::InvalidEnumValue {
                field: "registration_type",
                value: 9
            })
        );
    }
}
