//! Deterministic sample payloads, one per built-in kind.
//!
//! The byte values are arbitrary but fixed, so the hex output of `sample`
//! can be pasted into test fixtures and stays stable between runs.

use anyhow::{anyhow, Result};

use catbuf_protocol::primitives::{
    AccountRestrictionFlags, Amount, BlockDuration, EntityType, Hash256, Key, LockHashAlgorithm,
    MosaicFlags, MosaicId, MosaicNonce, MosaicSupplyChangeAction, NamespaceId, NetworkType,
    Signature, Timestamp, UnresolvedAddress, UnresolvedMosaicId,
};
use catbuf_protocol::transaction::{
    AccountAddressRestrictionBody, AccountMetadataBody, AggregateBody, Cosignature, HashLockBody,
    MosaicDefinitionBody, MosaicMetadataBody, MosaicSupplyChangeBody,
    MultisigAccountModificationBody, NamespaceRegistrationBody, SecretLockBody, SecretProofBody,
    TransferBody, UnresolvedMosaic,
};
use catbuf_protocol::{EmbeddedTransaction, Transaction, TransactionBody};

const SIGNER: Key = Key::new([0x1D; 32]);
const NETWORK: NetworkType = NetworkType::Testnet;

fn address(tag: u8) -> UnresolvedAddress {
    let mut bytes = [tag; 24];
    bytes[0] = NETWORK.value();
    UnresolvedAddress::new(bytes)
}

fn currency(amount: u64) -> UnresolvedMosaic {
    UnresolvedMosaic::new(UnresolvedMosaicId(0x72C0_212E_67A0_8BCE), Amount(amount))
}

fn embedded_transfer(tag: u8) -> EmbeddedTransaction {
    EmbeddedTransaction::new(
        Key::new([tag; 32]),
        NETWORK,
        TransferBody::new(address(tag), vec![currency(u64::from(tag) * 1_000)], vec![]).into(),
    )
}

/// Sample body for a built-in entity type.
pub fn sample_body(entity_type: EntityType) -> Result<TransactionBody> {
    let body = match entity_type {
        EntityType::TRANSFER => {
            TransferBody::new(address(0xA1), vec![currency(1_000_000)], b"sample".to_vec()).into()
        }
        EntityType::MOSAIC_DEFINITION => MosaicDefinitionBody::new(
            MosaicId(0x1234_5678_9ABC_DEF0),
            BlockDuration(0),
            MosaicNonce(0xCAFE),
            MosaicFlags::SUPPLY_MUTABLE.union(MosaicFlags::TRANSFERABLE),
            6,
        )
        .into(),
        EntityType::MOSAIC_SUPPLY_CHANGE => MosaicSupplyChangeBody::new(
            UnresolvedMosaicId(0x1234_5678_9ABC_DEF0),
            Amount(1_000),
            MosaicSupplyChangeAction::Increase,
        )
        .into(),
        EntityType::NAMESPACE_REGISTRATION => {
            NamespaceRegistrationBody::root(BlockDuration(86_400), NamespaceId(0x85BB_EA6C_C462_B244), b"sample".to_vec())
                .into()
        }
        EntityType::SECRET_LOCK => SecretLockBody::new(
            address(0xB2),
            Hash256::new([0x5E; 32]),
            currency(10),
            BlockDuration(480),
            LockHashAlgorithm::Sha3_256,
        )
        .into(),
        EntityType::SECRET_PROOF => SecretProofBody::new(
            address(0xB2),
            Hash256::new([0x5E; 32]),
            LockHashAlgorithm::Sha3_256,
            b"open sesame".to_vec(),
        )
        .into(),
        EntityType::HASH_LOCK => {
            HashLockBody::new(currency(10_000_000), BlockDuration(480), Hash256::new([0xA6; 32])).into()
        }
        EntityType::ACCOUNT_METADATA => AccountMetadataBody::new(address(0xC3), 0x0D, 5, b"hello".to_vec()).into(),
        EntityType::MOSAIC_METADATA => MosaicMetadataBody::new(
            address(0xC3),
            0x0D,
            UnresolvedMosaicId(0x1234_5678_9ABC_DEF0),
            5,
            b"hello".to_vec(),
        )
        .into(),
        EntityType::ACCOUNT_ADDRESS_RESTRICTION => AccountAddressRestrictionBody::new(
            AccountRestrictionFlags::ADDRESS.union(AccountRestrictionFlags::BLOCK),
            vec![address(0xD4)],
            vec![],
        )
        .into(),
        EntityType::MULTISIG_ACCOUNT_MODIFICATION => {
            MultisigAccountModificationBody::new(1, 1, vec![address(0xE5), address(0xE6)], vec![]).into()
        }
        EntityType::AGGREGATE_COMPLETE | EntityType::AGGREGATE_BONDED => {
            let aggregate = AggregateBody::with_computed_hash(
                vec![embedded_transfer(1), embedded_transfer(2)],
                vec![Cosignature::new(Key::new([0x2C; 32]), Signature::new([0x5B; 64]))],
            )?;
            if entity_type == EntityType::AGGREGATE_COMPLETE {
                TransactionBody::AggregateComplete(aggregate)
            } else {
                TransactionBody::AggregateBonded(aggregate)
            }
        }
        other => return Err(anyhow!("no sample for transaction type {}", other)),
    };
    Ok(body)
}

/// Encodes a sample of `entity_type`, standalone or embedded.
pub fn sample_bytes(entity_type: EntityType, embedded: bool) -> Result<Vec<u8>> {
    let body = sample_body(entity_type)?;
    let bytes = if embedded {
        EmbeddedTransaction::new(SIGNER, NETWORK, body).to_bytes()?
    } else {
        Transaction::new(SIGNER, NETWORK, Amount(100_000), Timestamp(1_700_000_000_000), body).to_bytes()?
    };
    Ok(bytes)
}
