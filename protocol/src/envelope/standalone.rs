use serde::Serialize;
use tracing::debug;

use super::{declared_size, read_body};
use crate::config::{network_name, TRANSACTION_HEADER_SIZE};
use crate::error::CodecResult;
use crate::io::{IntWidth, Reader, Writer};
use crate::primitives::{Amount, EntityType, Key, NetworkType, Signature, Timestamp};
use crate::registry::DecodeContext;
use crate::schema::{engine, FieldSpec, Record};
use crate::transaction::TransactionBody;

/// Header of a standalone transaction, in wire order.
pub const TRANSACTION_HEADER_LAYOUT: &[FieldSpec] = &[
    FieldSpec::of::<u32>("size"),
    FieldSpec::reserved("verifiable_entity_header_reserved_1", IntWidth::U32),
    FieldSpec::of::<Signature>("signature"),
    FieldSpec::of::<Key>("signer_public_key"),
    FieldSpec::reserved("entity_body_reserved_1", IntWidth::U32),
    FieldSpec::of::<u8>("version"),
    FieldSpec::of::<NetworkType>("network"),
    FieldSpec::of::<EntityType>("type"),
    FieldSpec::of::<Amount>("fee"),
    FieldSpec::of::<Timestamp>("deadline"),
];

/// A top-level transaction.
///
/// The signature is carried as bytes. Producing or checking it is someone
/// else's job; a fresh transaction simply has an all-zero signature until
/// [`Transaction::with_signature`] supplies one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    signature: Signature,
    signer_public_key: Key,
    version: u8,
    network: NetworkType,
    fee: Amount,
    deadline: Timestamp,
    body: TransactionBody,
}

impl Transaction {
    /// Wraps a body, using the kind's default version and a zero signature.
    pub fn new(
        signer_public_key: Key,
        network: NetworkType,
        fee: Amount,
        deadline: Timestamp,
        body: TransactionBody,
    ) -> Self {
        Self {
            signature: Signature::default(),
            signer_public_key,
            version: body.version(),
            network,
            fee,
            deadline,
            body,
        }
    }

    /// Returns a copy carrying `signature`.
    pub fn with_signature(&self, signature: Signature) -> Self {
        Self {
            signature,
            ..self.clone()
        }
    }

    /// Returns a copy with a different header version.
    pub fn with_version(&self, version: u8) -> Self {
        Self {
            version,
            ..self.clone()
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
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

    /// Maximum fee the signer is willing to pay.
    pub fn fee(&self) -> Amount {
        self.fee
    }

    pub fn deadline(&self) -> Timestamp {
        self.deadline
    }

    pub fn entity_type(&self) -> EntityType {
        self.body.entity_type()
    }

    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    /// Header plus body.
    pub fn size(&self) -> usize {
        TRANSACTION_HEADER_SIZE + self.body.size()
    }

    pub fn write(&self, writer: &mut Writer) -> CodecResult<()> {
        let header = Record::new()
            .with("size", declared_size(self.size())?)
            .with("signature", self.signature)
            .with("signer_public_key", self.signer_public_key)
            .with("version", self.version)
            .with("network", self.network)
            .with("type", self.entity_type())
            .with("fee", self.fee)
            .with("deadline", self.deadline);
        engine::encode(TRANSACTION_HEADER_LAYOUT, &header, writer)?;
        self.body.write(writer)
    }

    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut writer = Writer::with_capacity(self.size());
        self.write(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Decodes one transaction from the front of `reader`.
    ///
    /// # Errors
    ///
    /// - [`crate::CodecError::Truncated`] when the input ends early.
    /// - [`crate::CodecError::UnknownTransactionType`] for an unregistered
    ///   `type`.
    /// - [`crate::CodecError::SizeMismatch`] when the body does not fill the
    ///   declared size exactly.
    pub fn read(reader: &mut Reader<'_>, ctx: &DecodeContext<'_>) -> CodecResult<Self> {
        let mut header = engine::decode(TRANSACTION_HEADER_LAYOUT, reader, ctx)?;
        let declared = header.take::<u32>("size")? as usize;
        let entity_type: EntityType = header.take("type")?;
        let signature = header.take("signature")?;
        let signer_public_key = header.take("signer_public_key")?;
        let version = header.take("version")?;
        let network = header.take("network")?;
        let fee = header.take("fee")?;
        let deadline = header.take("deadline")?;
        let body = read_body(reader, ctx, entity_type, false, declared, TRANSACTION_HEADER_SIZE)?;
        Ok(Self {
            signature,
            signer_public_key,
            version,
            network,
            fee,
            deadline,
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
        debug!(
            entity_type = %transaction.entity_type(),
            network = %network_name(transaction.network().value()),
            size = reader.position(),
            "decoded transaction"
        );
        Ok((transaction, reader.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use crate::error::CodecError;
    use crate::primitives::{BlockDuration, MosaicFlags, MosaicId, MosaicNonce, UnresolvedAddress};
    use crate::schema::fixed_layout_size;
    use crate::transaction::{MosaicDefinitionBody, TransferBody};

    fn definition() -> Transaction {
        Transaction::new(
            Key::new([0x0A; 32]),
            NetworkType::Mainnet,
            Amount(150),
            Timestamp(1_700_000_000_000),
            MosaicDefinitionBody::new(MosaicId(9), BlockDuration(0), MosaicNonce(1), MosaicFlags::NONE, 0).into(),
        )
    }

    #[test]
    fn header_layout_is_128_bytes() {
        assert_eq!(fixed_layout_size(TRANSACTION_HEADER_LAYOUT), Some(TRANSACTION_HEADER_SIZE));
    }

    #[test]
    fn header_fields_land_where_expected() {
        let tx = definition().with_signature(Signature::new([0x5C; 64]));
        let bytes = tx.to_bytes().unwrap();
        assert_eq!(bytes.len(), 128 + 22);
        assert_eq!(&bytes[..4], &150u32.to_le_bytes());
        assert_eq!(&bytes[8..72], &[0x5C; 64]);
        assert_eq!(&bytes[72..104], &[0x0A; 32]);
        assert_eq!(bytes[108], 1);
        assert_eq!(bytes[109], 0x68);
        assert_eq!(&bytes[110..112], &[0x4D, 0x41]);
        assert_eq!(&bytes[112..120], &150u64.to_le_bytes());

        let (decoded, used) = Transaction::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(used, 150);
    }

    #[test]
    fn with_signature_does_not_touch_the_original() {
        let tx = definition();
        let signed = tx.with_signature(Signature::new([1; 64]));
        assert_eq!(tx.signature(), &Signature::default());
        assert_eq!(signed.signature(), &Signature::new([1; 64]));
        assert_eq!(signed.size(), tx.size());
    }

    #[test]
    fn every_truncation_fails() {
        let tx = Transaction::new(
            Key::default(),
            NetworkType::Testnet,
            Amount(0),
            Timestamp(0),
            TransferBody::new(UnresolvedAddress::default(), vec![], b"abc".to_vec()).into(),
        );
        let bytes = tx.to_bytes().unwrap();
        for cut in 0..bytes.len() {
            assert!(Transaction::from_bytes(&bytes[..cut]).is_err(), "cut at {}", cut);
        }
    }

    #[test]
    fn dirty_header_padding_only_fails_when_strict() {
        let mut bytes = definition().to_bytes().unwrap();
        bytes[4] = 0xFF;
        assert!(Transaction::from_bytes(&bytes).is_ok());
        let strict = DecodeContext::with_config(CodecConfig::strict());
        assert_eq!(
            Transaction::from_bytes_with(&bytes, &strict),
            Err(CodecError::NonZeroReserved {
                field: "verifiable_entity_header_reserved_1",
                value: 0xFF
            })
        );
    }

    #[test]
    fn version_override_is_carried() {
        let bytes = definition().with_version(3).to_bytes().unwrap();
        assert_eq!(bytes[108], 3);
        assert_eq!(Transaction::from_bytes(&bytes).unwrap().0.version(), 3);
    }
}
