//! Metadata kinds.
//!
//! Metadata values are stored on chain as a key-value pair scoped to an
//! account or a mosaic. The transaction carries the *new* value plus
//! `value_size_delta`, the change in size against whatever value was there
//! before. The codec carries both as given; nothing checks that they agree.

use serde::Serialize;

use super::{TransactionBody, TransactionKind};
use crate::error::CodecResult;
use crate::io::IntWidth;
use crate::primitives::{EntityType, UnresolvedAddress, UnresolvedMosaicId};
use crate::schema::{FieldSpec, Record, Schema, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountMetadataBody {
    target_address: UnresolvedAddress,
    scoped_metadata_key: u64,
    value_size_delta: i16,
    #[serde(serialize_with = "crate::primitives::serialize_hex")]
    value: Vec<u8>,
}

impl AccountMetadataBody {
    pub fn new(target_address: UnresolvedAddress, scoped_metadata_key: u64, value_size_delta: i16, value: Vec<u8>) -> Self {
        Self {
            target_address,
            scoped_metadata_key,
            value_size_delta,
            value,
        }
    }

    pub fn target_address(&self) -> &UnresolvedAddress {
        &self.target_address
    }

    pub fn scoped_metadata_key(&self) -> u64 {
        self.scoped_metadata_key
    }

    pub fn value_size_delta(&self) -> i16 {
        self.value_size_delta
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

impl Schema for AccountMetadataBody {
    const NAME: &'static str = "account_metadata";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<UnresolvedAddress>("target_address"),
        FieldSpec::of::<u64>("scoped_metadata_key"),
        FieldSpec::of::<i16>("value_size_delta"),
        FieldSpec::byte_size("value_size", "value", IntWidth::U16),
        FieldSpec::buffer("value", "value_size"),
    ];

    fn to_record(&self) -> Record {
        Record::new()
            .with("target_address", self.target_address)
            .with("scoped_metadata_key", self.scoped_metadata_key)
            .with("value_size_delta", self.value_size_delta)
            .with("value", Value::Bytes(self.value.clone()))
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            target_address: record.take("target_address")?,
            scoped_metadata_key: record.take("scoped_metadata_key")?,
            value_size_delta: record.take("value_size_delta")?,
            value: record.take_bytes("value")?,
        })
    }
}

impl TransactionKind for AccountMetadataBody {
    const ENTITY_TYPE: EntityType = EntityType::ACCOUNT_METADATA;

    fn into_body(self) -> TransactionBody {
        TransactionBody::AccountMetadata(self)
    }
}

/// Same as [`AccountMetadataBody`], scoped to one mosaic of the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MosaicMetadataBody {
    target_address: UnresolvedAddress,
    scoped_metadata_key: u64,
    target_mosaic_id: UnresolvedMosaicId,
    value_size_delta: i16,
    #[serde(serialize_with = "crate::primitives::serialize_hex")]
    value: Vec<u8>,
}

impl MosaicMetadataBody {
    pub fn new(
        target_address: UnresolvedAddress,
        scoped_metadata_key: u64,
        target_mosaic_id: UnresolvedMosaicId,
        value_size_delta: i16,
        value: Vec<u8>,
    ) -> Self {
        Self {
            target_address,
            scoped_metadata_key,
            target_mosaic_id,
            value_size_delta,
            value,
        }
    }

    pub fn target_address(&self) -> &UnresolvedAddress {
        &self.target_address
    }

    pub fn scoped_metadata_key(&self) -> u64 {
        self.scoped_metadata_key
    }

    pub fn target_mosaic_id(&self) -> UnresolvedMosaicId {
        self.target_mosaic_id
    }

    pub fn value_size_delta(&self) -> i16 {
        self.value_size_delta
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

impl Schema for MosaicMetadataBody {
    const NAME: &'static str = "mosaic_metadata";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<UnresolvedAddress>("target_address"),
        FieldSpec::of::<u64>("scoped_metadata_key"),
        FieldSpec::of::<UnresolvedMosaicId>("target_mosaic_id"),
        FieldSpec::of::<i16>("value_size_delta"),
        FieldSpec::byte_size("value_size", "value", IntWidth::U16),
        FieldSpec::buffer("value", "value_size"),
    ];

    fn to_record(&self) -> Record {
        Record::new()
            .with("target_address", self.target_address)
            .with("scoped_metadata_key", self.scoped_metadata_key)
            .with("target_mosaic_id", self.target_mosaic_id)
            .with("value_size_delta", self.value_size_delta)
            .with("value", Value::Bytes(self.value.clone()))
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            target_address: record.take("target_address")?,
            scoped_metadata_key: record.take("scoped_metadata_key")?,
            target_mosaic_id: record.take("target_mosaic_id")?,
            value_size_delta: record.take("value_size_delta")?,
            value: record.take_bytes("value")?,
        })
    }
}

impl TransactionKind for MosaicMetadataBody {
    const ENTITY_TYPE: EntityType = EntityType::MOSAIC_METADATA;

    fn into_body(self) -> TransactionBody {
        TransactionBody::MosaicMetadata(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_metadata_carries_a_negative_delta() {
        let body = AccountMetadataBody::new(UnresolvedAddress::new([0xA8; 24]), 0xDEAD_BEEF, -3, b"abc".to_vec());
        let bytes = body.to_bytes().unwrap();
        assert_eq!(bytes.len(), 24 + 8 + 2 + 2 + 3);
        assert_eq!(&bytes[32..34], &[0xFD, 0xFF]);
        assert_eq!(&bytes[34..36], &[3, 0]);
        let (decoded, used) = AccountMetadataBody::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.value_size_delta(), -3);
        assert_eq!(decoded, body);
        assert_eq!(used, bytes.len());
    }

    #[test]
    fn mosaic_metadata_puts_the_mosaic_after_the_key() {
        let body = MosaicMetadataBody::new(UnresolvedAddress::default(), 1, UnresolvedMosaicId(0x42), 0, vec![]);
        let bytes = body.to_bytes().unwrap();
        assert_eq!(bytes.len(), 24 + 8 + 8 + 2 + 2);
        assert_eq!(bytes[32], 0x42);
        assert_eq!(MosaicMetadataBody::from_bytes(&bytes).unwrap().0, body);
    }

    #[test]
    fn truncated_value_fails() {
        let bytes = AccountMetadataBody::new(UnresolvedAddress::default(), 0, 4, b"four".to_vec())
            .to_bytes()
            .unwrap();
        assert!(AccountMetadataBody::from_bytes(&bytes[..bytes.len() - 1])
            .unwrap_err()
            .is_truncation());
    }
}
