//! Lock kinds: secret lock and proof for cross-chain swaps, and the hash
//! lock that funds an aggregate bonded while it collects cosignatures.
//!
//! Locks carry a single mosaic inline (id then amount), not as an array.

use serde::Serialize;

use super::{TransactionBody, TransactionKind, UnresolvedMosaic};
use crate::error::CodecResult;
use crate::io::IntWidth;
use crate::primitives::{
    Amount, BlockDuration, EntityType, Hash256, LockHashAlgorithm, UnresolvedAddress, UnresolvedMosaicId,
};
use crate::schema::{FieldSpec, Record, Schema, Value};

// ---------------------------------------------------------------------------
// SecretLock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SecretLockBody {
    recipient_address: UnresolvedAddress,
    secret: Hash256,
    mosaic: UnresolvedMosaic,
    duration: BlockDuration,
    hash_algorithm: LockHashAlgorithm,
}

impl SecretLockBody {
    pub fn new(
        recipient_address: UnresolvedAddress,
        secret: Hash256,
        mosaic: UnresolvedMosaic,
        duration: BlockDuration,
        hash_algorithm: LockHashAlgorithm,
    ) -> Self {
        Self {
            recipient_address,
            secret,
            mosaic,
            duration,
            hash_algorithm,
        }
    }

    pub fn recipient_address(&self) -> &UnresolvedAddress {
        &self.recipient_address
    }

    pub fn secret(&self) -> &Hash256 {
        &self.secret
    }

    pub fn mosaic(&self) -> UnresolvedMosaic {
        self.mosaic
    }

    pub fn duration(&self) -> BlockDuration {
        self.duration
    }

    pub fn hash_algorithm(&self) -> LockHashAlgorithm {
        self.hash_algorithm
    }
}

impl Schema for SecretLockBody {
    const NAME: &'static str = "secret_lock";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<UnresolvedAddress>("recipient_address"),
        FieldSpec::of::<Hash256>("secret"),
        FieldSpec::of::<UnresolvedMosaicId>("mosaic_id"),
        FieldSpec::of::<Amount>("amount"),
        FieldSpec::of::<BlockDuration>("duration"),
        FieldSpec::of::<LockHashAlgorithm>("hash_algorithm"),
    ];

    fn to_record(&self) -> Record {
        let record = Record::new()
            .with("recipient_address", self.recipient_address)
            .with("secret", self.secret);
        self.mosaic
            .inline_into(record)
            .with("duration", self.duration)
            .with("hash_algorithm", self.hash_algorithm)
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            recipient_address: record.take("recipient_address")?,
            secret: record.take("secret")?,
            mosaic: UnresolvedMosaic::take_inline(&mut record)?,
            duration: record.take("duration")?,
            hash_algorithm: record.take("hash_algorithm")?,
        })
    }
}

impl TransactionKind for SecretLockBody {
    const ENTITY_TYPE: EntityType = EntityType::SECRET_LOCK;

    fn into_body(self) -> TransactionBody {
        TransactionBody::SecretLock(self)
    }
}

// ---------------------------------------------------------------------------
// SecretProof
// ---------------------------------------------------------------------------

/// Reveals the proof that unlocks a secret lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretProofBody {
    recipient_address: UnresolvedAddress,
    secret: Hash256,
    hash_algorithm: LockHashAlgorithm,
    #[serde(serialize_with = "crate::primitives::serialize_hex")]
    proof: Vec<u8>,
}

impl SecretProofBody {
    pub fn new(
        recipient_address: UnresolvedAddress,
        secret: Hash256,
        hash_algorithm: LockHashAlgorithm,
        proof: Vec<u8>,
    ) -> Self {
        Self {
            recipient_address,
            secret,
            hash_algorithm,
            proof,
        }
    }

    pub fn recipient_address(&self) -> &UnresolvedAddress {
        &self.recipient_address
    }

    pub fn secret(&self) -> &Hash256 {
        &self.secret
    }

    pub fn hash_algorithm(&self) -> LockHashAlgorithm {
        self.hash_algorithm
    }

    pub fn proof(&self) -> &[u8] {
        &self.proof
    }
}

impl Schema for SecretProofBody {
    const NAME: &'static str = "secret_proof";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<UnresolvedAddress>("recipient_address"),
        FieldSpec::of::<Hash256>("secret"),
        FieldSpec::byte_size("proof_size", "proof", IntWidth::U16),
        FieldSpec::of::<LockHashAlgorithm>("hash_algorithm"),
        FieldSpec::buffer("proof", "proof_size"),
    ];

    fn to_record(&self) -> Record {
        Record::new()
            .with("recipient_address", self.recipient_address)
            .with("secret", self.secret)
            .with("hash_algorithm", self.hash_algorithm)
            .with("proof", Value::Bytes(self.proof.clone()))
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            recipient_address: record.take("recipient_address")?,
            secret: record.take("secret")?,
            hash_algorithm: record.take("hash_algorithm")?,
            proof: record.take_bytes("proof")?,
        })
    }
}

impl TransactionKind for SecretProofBody {
    const ENTITY_TYPE: EntityType = EntityType::SECRET_PROOF;

    fn into_body(self) -> TransactionBody {
        TransactionBody::SecretProof(self)
    }
}

// ---------------------------------------------------------------------------
// HashLock
// ---------------------------------------------------------------------------

/// Locks funds against the hash of an aggregate bonded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HashLockBody {
    mosaic: UnresolvedMosaic,
    duration: BlockDuration,
    hash: Hash256,
}

impl HashLockBody {
    pub fn new(mosaic: UnresolvedMosaic, duration: BlockDuration, hash: Hash256) -> Self {
        Self { mosaic, duration, hash }
    }

    pub fn mosaic(&self) -> UnresolvedMosaic {
        self.mosaic
    }

    pub fn duration(&self) -> BlockDuration {
        self.duration
    }

    /// Hash of the aggregate bonded being funded.
    pub fn hash(&self) -> &Hash256 {
        &self.hash
    }
}

impl Schema for HashLockBody {
    const NAME: &'static str = "hash_lock";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<UnresolvedMosaicId>("mosaic_id"),
        FieldSpec::of::<Amount>("amount"),
        FieldSpec::of::<BlockDuration>("duration"),
        FieldSpec::of::<Hash256>("hash"),
    ];

    fn to_record(&self) -> Record {
        self.mosaic
            .inline_into(Record::new())
            .with("duration", self.duration)
            .with("hash", self.hash)
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            mosaic: UnresolvedMosaic::take_inline(&mut record)?,
            duration: record.take("duration")?,
            hash: record.take("hash")?,
        })
    }
}

impl TransactionKind for HashLockBody {
    const ENTITY_TYPE: EntityType = EntityType::HASH_LOCK;

    fn into_body(self) -> TransactionBody {
        TransactionBody::HashLock(self)
    }
}
