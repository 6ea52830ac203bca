//! # Aggregate Composition
//!
//! An aggregate wraps a list of embedded transactions, of any embeddable
//! kind, and the cosignatures collected for them. Complete and bonded
//! aggregates share this body and differ only in the header `type`.
//!
//! ```text
//! transactions_hash   32
//! payload_size         4   bytes of embedded transactions that follow
//! reserved             4
//! transactions         payload_size bytes, one embedded envelope after another
//! cosignatures         96 × n, until the enclosing body ends
//! ```
//!
//! There is no transaction count. The only way to find the boundary between
//! the transactions and the cosignatures is to walk the embedded envelopes,
//! each of which declares its own size, and check they land exactly on
//! `payload_size`. Anything else is a corrupt aggregate.
//!
//! Cosignatures have no count either: they run to the end of the body. A
//! partial trailing cosignature is a truncation error.

use serde::Serialize;
use tracing::trace;

use super::TransactionBody;
use crate::envelope::EmbeddedTransaction;
use crate::error::{CodecError, CodecResult};
use crate::hash;
use crate::io::{IntWidth, Reader};
use crate::primitives::{Hash256, Key, Signature};
use crate::registry::DecodeContext;
use crate::schema::{FieldSpec, Record, Schema, Value};

/// Header version of both aggregate kinds.
pub const AGGREGATE_VERSION: u8 = 1;

// ---------------------------------------------------------------------------
// Cosignature
// ---------------------------------------------------------------------------

/// A cosignatory's signature over the aggregate. Carried, never verified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Cosignature {
    signer_public_key: Key,
    signature: Signature,
}

impl Cosignature {
    pub fn new(signer_public_key: Key, signature: Signature) -> Self {
        Self {
            signer_public_key,
            signature,
        }
    }

    pub fn signer_public_key(&self) -> &Key {
        &self.signer_public_key
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

impl Schema for Cosignature {
    const NAME: &'static str = "cosignature";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<Key>("signer_public_key"),
        FieldSpec::of::<Signature>("signature"),
    ];

    fn to_record(&self) -> Record {
        Record::new()
            .with("signer_public_key", self.signer_public_key)
            .with("signature", self.signature)
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            signer_public_key: record.take("signer_public_key")?,
            signature: record.take("signature")?,
        })
    }
}

// ---------------------------------------------------------------------------
// AggregateBody
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateBody {
    transactions_hash: Hash256,
    transactions: Vec<EmbeddedTransaction>,
    cosignatures: Vec<Cosignature>,
}

impl AggregateBody {
    /// Builds an aggregate with the given hash, taken as is.
    pub fn new(
        transactions_hash: Hash256,
        transactions: Vec<EmbeddedTransaction>,
        cosignatures: Vec<Cosignature>,
    ) -> Self {
        Self {
            transactions_hash,
            transactions,
            cosignatures,
        }
    }

    /// Builds an aggregate whose hash is the merkle root of `transactions`.
    pub fn with_computed_hash(
        transactions: Vec<EmbeddedTransaction>,
        cosignatures: Vec<Cosignature>,
    ) -> CodecResult<Self> {
        let transactions_hash = hash::transactions_hash(&transactions)?;
        Ok(Self::new(transactions_hash, transactions, cosignatures))
    }

    pub fn transactions_hash(&self) -> &Hash256 {
        &self.transactions_hash
    }

    /// Embedded transactions in wire order.
    pub fn transactions(&self) -> &[EmbeddedTransaction] {
        &self.transactions
    }

    pub fn cosignatures(&self) -> &[Cosignature] {
        &self.cosignatures
    }

    /// Bytes occupied by the embedded transactions.
    pub fn payload_size(&self) -> usize {
        self.transactions.iter().map(EmbeddedTransaction::size).sum()
    }

    /// Returns a copy with one more cosignature appended.
    pub fn with_cosignature(&self, cosignature: Cosignature) -> Self {
        let mut next = self.clone();
        next.cosignatures.push(cosignature);
        next
    }

    /// Returns `true` if `transactions_hash` matches the transactions.
    pub fn hash_matches(&self) -> CodecResult<bool> {
        Ok(hash::transactions_hash(&self.transactions)? == self.transactions_hash)
    }
}

impl Schema for AggregateBody {
    const NAME: &'static str = "aggregate";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<Hash256>("transactions_hash"),
        FieldSpec::byte_size("payload_size", "transactions", IntWidth::U32),
        FieldSpec::reserved("aggregate_transaction_header_reserved_1", IntWidth::U32),
        FieldSpec::embedded("transactions", "payload_size"),
        FieldSpec::trailing("cosignatures", Cosignature::LAYOUT),
    ];

    fn to_record(&self) -> Record {
        Record::new()
            .with("transactions_hash", self.transactions_hash)
            .with("transactions", Value::Embedded(self.transactions.clone()))
            .with("cosignatures", Value::array(&self.cosignatures))
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            transactions_hash: record.take("transactions_hash")?,
            transactions: record.take_embedded("transactions")?,
            cosignatures: record.take_array("cosignatures")?,
        })
    }
}

pub(crate) fn decode_complete(reader: &mut Reader<'_>, ctx: &DecodeContext<'_>) -> CodecResult<TransactionBody> {
    AggregateBody::read(reader, ctx).map(TransactionBody::AggregateComplete)
}

pub(crate) fn decode_bonded(reader: &mut Reader<'_>, ctx: &DecodeContext<'_>) -> CodecResult<TransactionBody> {
    AggregateBody::read(reader, ctx).map(TransactionBody::AggregateBonded)
}

/// Decodes the embedded transactions filling the next `payload_size` bytes.
///
/// Each envelope is bounded by its own declared size. The walk must land
/// exactly on `payload_size`: an envelope that would run past it, or a tail
/// too short to hold a size prefix, is [`CodecError::CorruptAggregate`].
pub(crate) fn decode_embedded_block(
    reader: &mut Reader<'_>,
    payload_size: usize,
    ctx: &DecodeContext<'_>,
) -> CodecResult<Vec<EmbeddedTransaction>> {
    let mut region = reader.split("transactions", payload_size)?;
    let mut transactions = Vec::new();

    while !region.is_empty() {
        let consumed = region.position();
        let declared = match region.peek_u32("size") {
            Ok(size) => size as usize,
            Err(_) => {
                return Err(CodecError::CorruptAggregate {
                    payload_size,
                    consumed: consumed + IntWidth::U32.bytes(),
                })
            }
        };
        if declared > region.remaining() {
            return Err(CodecError::CorruptAggregate {
                payload_size,
                consumed: consumed + declared,
            });
        }

        let transaction = EmbeddedTransaction::read(&mut region, ctx)?;
        trace!(
            index = transactions.len(),
            entity_type = %transaction.entity_type(),
            size = declared,
            "decoded embedded transaction"
        );
        transactions.push(transaction);
    }

    trace!(count = transactions.len(), payload_size, "aggregate payload decoded");
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{NetworkType, UnresolvedAddress};
    use crate::transaction::TransferBody;

    fn embedded_transfer(tag: u8) -> EmbeddedTransaction {
        EmbeddedTransaction::new(
            Key::new([tag; 32]),
            NetworkType::Testnet,
            TransferBody::new(UnresolvedAddress::new([tag; 24]), vec![], vec![tag]).into(),
        )
    }

    #[test]
    fn empty_aggregate_is_header_only() {
        let body = AggregateBody::default();
        let bytes = body.to_bytes().unwrap();
        assert_eq!(bytes.len(), 40);
        let (decoded, used) = AggregateBody::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, body);
        assert_eq!(used, 40);
    }

    #[test]
    fn payload_size_is_the_sum_of_embedded_sizes() {
        let body = AggregateBody::new(
            Hash256::default(),
            vec![embedded_transfer(1), embedded_transfer(2)],
            vec![],
        );
        let bytes = body.to_bytes().unwrap();
        let each = embedded_transfer(1).size();
        assert_eq!(body.payload_size(), 2 * each);
        assert_eq!(&bytes[32..36], &(2 * each as u32).to_le_bytes());
    }

    #[test]
    fn overshooting_envelope_is_corrupt() {
        let tx = embedded_transfer(1);
        let body = AggregateBody::new(Hash256::default(), vec![tx.clone()], vec![]);
        let mut bytes = body.to_bytes().unwrap();
        // Shrink payload_size by one so the envelope runs past it.
        let payload = tx.size() as u32 - 1;
        bytes[32..36].copy_from_slice(&payload.to_le_bytes());
        assert_eq!(
            AggregateBody::from_bytes(&bytes),
            Err(CodecError::CorruptAggregate {
                payload_size: tx.size() - 1,
                consumed: tx.size()
            })
        );
    }

    #[test]
    fn tail_shorter_than_a_size_prefix_is_corrupt() {
        let tx = embedded_transfer(1);
        let mut bytes = AggregateBody::new(Hash256::default(), vec![tx.clone()], vec![])
            .to_bytes()
            .unwrap();
        let payload = tx.size() as u32 + 2;
        bytes[32..36].copy_from_slice(&payload.to_le_bytes());
        bytes.extend_from_slice(&[0, 0]);
        assert!(matches!(
            AggregateBody::from_bytes(&bytes),
            Err(CodecError::CorruptAggregate { .. })
        ));
    }

    #[test]
    fn partial_cosignature_is_truncation() {
        let body = AggregateBody::new(Hash256::default(), vec![], vec![Cosignature::default()]);
        let bytes = body.to_bytes().unwrap();
        assert_eq!(bytes.len(), 40 + 96);
        let err = AggregateBody::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn computed_hash_matches_transactions() {
        let body = AggregateBody::with_computed_hash(vec![embedded_transfer(1)], vec![]).unwrap();
        assert_ne!(body.transactions_hash(), &Hash256::default());
        assert!(body.hash_matches().unwrap());
        let stale = AggregateBody::new(Hash256::default(), vec![embedded_transfer(1)], vec![]);
        assert!(!stale.hash_matches().unwrap());
    }

    #[test]
    fn with_cosignature_leaves_the_original_alone() {
        let body = AggregateBody::default();
        let cosigned = body.with_cosignature(Cosignature::new(Key::new([1; 32]), Signature::new([2; 64])));
        assert!(body.cosignatures().is_empty());
        assert_eq!(cosigned.cosignatures().len(), 1);
    }
}
