use serde::Serialize;

use super::{declared_size, read_body};
use crate::config::EMBEDDED_TRANSACTION_HEADER_SIZE;
use crate::error::{CodecError, CodecResult};
use crate::io::{IntWidth, Reader, Writer};
use crate::primitives::{EntityType, Key, NetworkType};
use crate::registry::DecodeContext;
use crate::schema::{engine, FieldSpec, Record};
use crate::transaction::TransactionBody;

/// Header of an embedded transaction, in wire order.
pub const EMBEDDED_HEADER_LAYOUT: &[FieldSpec] = &[
    FieldSpec::of::<u32>("size"),
    FieldSpec::reserved("embedded_transaction_header_reserved_1", IntWidth::U32),
    FieldSpec::of::<Key>("signer_public_key"),
    FieldSpec::reserved("entity_body_reserved_1", IntWidth::U32),
    FieldSpec::of::<u8>("version"),
    FieldSpec::of::<NetworkType>("network"),
    FieldSpec::of::<EntityType>("type"),
];

/// A transaction inside an aggregate.
///
/// Signed as part of the aggregate, so it has no signature, fee or deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedTransaction {
    signer_public_key: Key,
    version: u8,
    network: NetworkType,
    body: TransactionBody,
}

impl EmbeddedTransaction {
    /// Wraps a body, using the kind's default version.
    pub fn new(signer_public_key: Key, network: NetworkType, body: TransactionBody) -> Self {
        Self {
            signer_public_key,
            version: body.version(),
            network,
            body,
        }
    }

    /// Returns a copy with a different header version.
    pub fn with_version(&self, version: u8) -> Self {
        Self {
            version,
            ..self.clone()
        }
    }

    pub fn signer_public_key(&self) -> &Key {
        &self.signer_public_key
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn entity_type(&self) -> EntityType {
        self.body.entity_type()
    }

    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    /// Header plus body.
    pub fn size(&self) -> usize {
        EMBEDDED_TRANSACTION_HEADER_SIZE + self.body.size()
    }

    /// # Errors
    ///
    /// [`CodecError::UnknownTransactionType`] if the body's kind cannot be
    /// embedded (aggregates, and layout kinds registered as standalone only),
    /// plus any body encode failure.
    pub fn write(&self, writer: &mut Writer) -> CodecResult<()> {
        if !self.body.embeddable() {
            return Err(CodecError::UnknownTransactionType {
                entity_type: self.entity_type(),
                embedded: true,
            });
        }
        let header = Record::new()
            .with("size", declared_size(self.size())?)
            .with("signer_public_key", self.signer_public_key)
            .with("version", self.version)
            .with("network", self.network)
            .with("type", self.entity_type());
        engine::encode(EMBEDDED_HEADER_LAYOUT, &header, writer)?;
        self.body.write(writer)
    }

    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut writer = Writer::with_capacity(self.size());
        self.write(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Decodes one embedded transaction from the front of `reader`.
    pub fn read(reader: &mut Reader<'_>, ctx: &DecodeContext<'_>) -> CodecResult<Self> {
        let mut header = engine::decode(EMBEDDED_HEADER_LAYOUT, reader, ctx)?;
        let declared = header.take::<u32>("size")? as usize;
        let entity_type: EntityType = header.take("type")?;
        let signer_public_key = header.take("signer_public_key")?;
        let version = header.take("version")?;
        let network = header.take("network")?;
        let body = read_body(
            reader,
            ctx,
            entity_type,
            true,
            declared,
            EMBEDDED_TRANSACTION_HEADER_SIZE,
        )?;
        Ok(Self {
            signer_public_key,
            version,
            network,
            body,
        })
    }

    /// Decodes with the standard registry. Returns the transaction and the
    /// bytes consumed.
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<(Self, usize)> {
        Self::from_bytes_with(bytes, &DecodeContext::standard())
    }

    pub fn from_bytes_with(bytes: &[u8], ctx: &DecodeContext<'_>) -> CodecResult<(Self, usize)> {
        let mut reader = Reader::new(bytes);
        let transaction = Self::read(&mut reader, ctx)?;
        Ok((transaction, reader.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TRANSACTION_HEADER_SIZE;
    use crate::primitives::{Amount, Hash256, UnresolvedAddress, UnresolvedMosaicId};
    use crate::schema::fixed_layout_size;
    use crate::transaction::{AggregateBody, GenericBody, HashLockBody, TransferBody, UnresolvedMosaic};

    fn transfer() -> EmbeddedTransaction {
        EmbeddedTransaction::new(
            Key::new([0x11; 32]),
            NetworkType::Testnet,
            TransferBody::new(UnresolvedAddress::new([0x22; 24]), vec![], b"hi".to_vec()).into(),
        )
    }

    #[test]
    fn header_layout_is_48_bytes() {
        assert_eq!(fixed_layout_size(EMBEDDED_HEADER_LAYOUT), Some(EMBEDDED_TRANSACTION_HEADER_SIZE));
        assert!(EMBEDDED_TRANSACTION_HEADER_SIZE < TRANSACTION_HEADER_SIZE);
    }

    #[test]
    fn header_fields_land_where_expected() {
        let tx = transfer();
        let bytes = tx.to_bytes().unwrap();
        assert_eq!(bytes.len(), 48 + 33);
        assert_eq!(&bytes[..4], &(81u32).to_le_bytes());
        assert_eq!(&bytes[8..40], &[0x11; 32]);
        assert_eq!(bytes[44], 1);
        assert_eq!(bytes[45], 0x98);
        assert_eq!(&bytes[46..48], &[0x54, 0x41]);

        let (decoded, used) = EmbeddedTransaction::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(used, 81);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut bytes = transfer().to_bytes().unwrap();
        bytes[46..48].copy_from_slice(&[0xFF, 0xFF]);
        assert_eq!(
            EmbeddedTransaction::from_bytes(&bytes),
            Err(CodecError::UnknownTransactionType {
                entity_type: EntityType::new(0xFFFF),
                embedded: true
            })
        );
    }

    #[test]
    fn aggregates_cannot_be_embedded() {
        let tx = EmbeddedTransaction::new(
            Key::default(),
            NetworkType::Mainnet,
            TransactionBody::AggregateComplete(AggregateBody::default()),
        );
        assert!(matches!(
            tx.to_bytes(),
            Err(CodecError::UnknownTransactionType { embedded: true, .. })
        ));
    }

    #[test]
    fn standalone_only_layout_kinds_cannot_be_embedded() {
        const PING: &[FieldSpec] = &[FieldSpec::of::<u32>("nonce")];
        let body = GenericBody::new(
            EntityType::new(0x4E50),
            "ping",
            1,
            false,
            PING,
            Record::new().with("nonce", 7u32),
        );
        let tx = EmbeddedTransaction::new(Key::default(), NetworkType::Testnet, body.clone().into());
        assert_eq!(
            tx.to_bytes(),
            Err(CodecError::UnknownTransactionType {
                entity_type: EntityType::new(0x4E50),
                embedded: true
            })
        );
        assert!(matches!(
            AggregateBody::with_computed_hash(vec![tx], vec![]),
            Err(CodecError::UnknownTransactionType { embedded: true, .. })
        ));

        let embeddable = GenericBody::new(EntityType::new(0x4E50), "ping", 1, true, PING, body.fields().clone());
        let tx = EmbeddedTransaction::new(Key::default(), NetworkType::Testnet, embeddable.into());
        assert_eq!(tx.to_bytes().unwrap().len(), 48 + 4);
    }

    #[test]
    fn declared_size_must_match_the_body() {
        let tx = EmbeddedTransaction::new(
            Key::default(),
            NetworkType::Mainnet,
            HashLockBody::new(
                UnresolvedMosaic::new(UnresolvedMosaicId(1), Amount(1)),
                Default::default(),
                Hash256::default(),
            )
            .into(),
        );
        let mut bytes = tx.to_bytes().unwrap();
        let inflated = (tx.size() + 4) as u32;
        bytes[..4].copy_from_slice(&inflated.to_le_bytes());
        bytes.extend_from_slice(&[0; 4]);
        assert_eq!(
            EmbeddedTransaction::from_bytes(&bytes),
            Err(CodecError::SizeMismatch {
                declared: tx.size() + 4,
                actual: tx.size()
            })
        );
    }

    #[test]
    fn declared_size_smaller_than_header_is_a_mismatch() {
        let mut bytes = transfer().to_bytes().unwrap();
        bytes[..4].copy_from_slice(&10u32.to_le_bytes());
        assert_eq!(
            EmbeddedTransaction::from_bytes(&bytes),
            Err(CodecError::SizeMismatch { declared: 10, actual: 48 })
        );
    }

    #[test]
    fn invalid_network_fails() {
        let mut bytes = transfer().to_bytes().unwrap();
        bytes[45] = 0x01;
        assert_eq!(
            EmbeddedTransaction::from_bytes(&bytes),
            Err(CodecError::InvalidEnumValue { field: "network", value: 1 })
        );
    }
}
