//! Transfer: moves mosaics to a recipient, with an optional message.
//!
//! ```text
//! recipient_address  24
//! mosaics_count       1
//! message_size        2
//! reserved            4   zero, aligns the mosaics to 8 bytes
//! mosaics            16 × mosaics_count
//! message             message_size
//! ```
//!
//! The message is opaque. By convention its first byte says whether the rest
//! is plain text or encrypted, but nothing here looks.

use serde::Serialize;

use super::{TransactionBody, TransactionKind, UnresolvedMosaic};
use crate::error::CodecResult;
use crate::io::IntWidth;
use crate::primitives::{EntityType, UnresolvedAddress};
use crate::schema::{FieldSpec, Record, Schema, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferBody {
    recipient_address: UnresolvedAddress,
    mosaics: Vec<UnresolvedMosaic>,
    #[serde(serialize_with = "crate::primitives::serialize_hex")]
    message: Vec<u8>,
}

impl TransferBody {
    pub fn new(recipient_address: UnresolvedAddress, mosaics: Vec<UnresolvedMosaic>, message: Vec<u8>) -> Self {
        Self {
            recipient_address,
            mosaics,
            message,
        }
    }

    pub fn recipient_address(&self) -> &UnresolvedAddress {
        &self.recipient_address
    }

    /// Mosaics in wire order. Duplicates are not merged.
    pub fn mosaics(&self) -> &[UnresolvedMosaic] {
        &self.mosaics
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }
}

impl Schema for TransferBody {
    const NAME: &'static str = "transfer";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<UnresolvedAddress>("recipient_address"),
        FieldSpec::count("mosaics_count", "mosaics", IntWidth::U8),
        FieldSpec::byte_size("message_size", "message", IntWidth::U16),
        FieldSpec::reserved("transfer_transaction_body_reserved_1", IntWidth::U32),
        FieldSpec::array("mosaics", "mosaics_count", UnresolvedMosaic::LAYOUT),
        FieldSpec::buffer("message", "message_size"),
    ];

    fn to_record(&self) -> Record {
        Record::new()
            .with("recipient_address", self.recipient_address)
            .with("mosaics", Value::array(&self.mosaics))
            .with("message", Value::Bytes(self.message.clone()))
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            recipient_address: record.take("recipient_address")?,
            mosaics: record.take_array("mosaics")?,
            message: record.take_bytes("message")?,
        })
    }
}

impl TransactionKind for TransferBody {
    const ENTITY_TYPE: EntityType = EntityType::TRANSFER;

    fn into_body(self) -> TransactionBody {
        TransactionBody::Transfer(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use crate::error::CodecError;
    use crate::primitives::{Amount, UnresolvedMosaicId};
    use crate::registry::DecodeContext;

    fn recipient() -> UnresolvedAddress {
        let mut bytes = [0u8; 24];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        UnresolvedAddress::new(bytes)
    }

    #[test]
    fn no_mosaics_two_byte_message() {
        let body = TransferBody::new(recipient(), vec![], b"hi".to_vec());
        let bytes = body.to_bytes().unwrap();

        let mut expected = recipient().as_bytes().to_vec();
        expected.push(0x00);
        expected.extend_from_slice(&[0x02, 0x00]);
        expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        expected.extend_from_slice(b"hi");
        assert_eq!(bytes, expected);
        assert_eq!(body.size(), 33);

        let (decoded, used) = TransferBody::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, body);
        assert_eq!(used, 33);
    }

    #[test]
    fn empty_transfer_decodes_to_empty_collections() {
        let body = TransferBody::new(recipient(), Vec::new(), Vec::new());
        let bytes = body.to_bytes().unwrap();
        assert_eq!(bytes.len(), 31);
        let (decoded, _) = TransferBody::from_bytes(&bytes).unwrap();
        assert!(decoded.mosaics().is_empty());
        assert!(decoded.message().is_empty());
    }

    #[test]
    fn mosaics_follow_the_reserved_padding() {
        let body = TransferBody::new(
            recipient(),
            vec![
                UnresolvedMosaic::new(UnresolvedMosaicId(0xAA), Amount(1)),
                UnresolvedMosaic::new(UnresolvedMosaicId(0xBB), Amount(2)),
            ],
            Vec::new(),
        );
        let bytes = body.to_bytes().unwrap();
        assert_eq!(bytes[24], 2);
        assert_eq!(bytes.len(), 31 + 32);
        // First mosaic id starts right after the padding, on an 8-byte
        // boundary relative to the body start.
        assert_eq!(bytes[31], 0xAA);
        assert_eq!(bytes[47], 0xBB);
        assert_eq!(TransferBody::from_bytes(&bytes).unwrap().0.mosaics(), body.mosaics());
    }

    #[test]
    fn short_message_is_truncation() {
        let bytes = TransferBody::new(recipient(), vec![], b"hello".to_vec()).to_bytes().unwrap();
        let err = TransferBody::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated {
                field: "message",
                required: 5,
                remaining: 4
            }
        );
    }

    #[test]
    fn too_many_mosaics_overflow_the_count() {
        let mosaics = vec![UnresolvedMosaic::default(); 256];
        let err = TransferBody::new(recipient(), mosaics, vec![]).to_bytes().unwrap_err();
        assert_eq!(
            err,
            CodecError::LengthOverflow {
                field: "mosaics",
                len: 256,
                max: 255
            }
        );
    }

    #[test]
    fn strict_policy_rejects_dirty_padding() {
        let mut bytes = TransferBody::new(recipient(), vec![], vec![]).to_bytes().unwrap();
        bytes[27] = 0x01;
        assert!(TransferBody::from_bytes(&bytes).is_ok());
        let strict = DecodeContext::with_config(CodecConfig::strict());
        assert_eq!(
            TransferBody::from_bytes_with(&bytes, &strict),
            Err(CodecError::NonZeroReserved {
                field: "transfer_transaction_body_reserved_1",
                value: 1
            })
        );
    }
}
