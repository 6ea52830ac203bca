//! Integration tests for the codec's structural laws.
//!
//! These go through the public API only: build a transaction, encode it,
//! poke at the bytes, decode it back. Every supported kind shows up at least
//! once so that a layout typo in any of them breaks something here.

use catbuf_protocol::config::CodecConfig;
use catbuf_protocol::primitives::{
    AccountRestrictionFlags, Amount, BlockDuration, Hash256, Key, LockHashAlgorithm, MosaicFlags,
    MosaicId, MosaicNonce, MosaicSupplyChangeAction, NamespaceId, NetworkType, Signature, Timestamp,
    UnresolvedAddress, UnresolvedMosaicId,
};
use catbuf_protocol::transaction::{
    AccountAddressRestrictionBody, AccountMetadataBody, HashLockBody, MosaicDefinitionBody,
    MosaicMetadataBody, MosaicSupplyChangeBody, MultisigAccountModificationBody,
    NamespaceRegistrationBody, SecretLockBody, SecretProofBody, TransferBody, UnresolvedMosaic,
};
use catbuf_protocol::{CodecError, DecodeContext, Schema, Transaction, TransactionBody};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn address(tag: u8) -> UnresolvedAddress {
    UnresolvedAddress::new([tag; 24])
}

fn mosaic(id: u64, amount: u64) -> UnresolvedMosaic {
    UnresolvedMosaic::new(UnresolvedMosaicId(id), Amount(amount))
}

/// One body of every typed kind.
fn every_kind() -> Vec<TransactionBody> {
    vec![
        TransferBody::new(address(1), vec![mosaic(1, 10), mosaic(2, 20)], b"hello".to_vec()).into(),
        MosaicDefinitionBody::new(
            MosaicId(0x1234),
            BlockDuration(1000),
            MosaicNonce(7),
            MosaicFlags::SUPPLY_MUTABLE.union(MosaicFlags::TRANSFERABLE),
            6,
        )
        .into(),
        MosaicSupplyChangeBody::new(UnresolvedMosaicId(0x1234), Amount(500), MosaicSupplyChangeAction::Increase)
            .into(),
        NamespaceRegistrationBody::root(BlockDuration(86_400), NamespaceId(0xAA), b"catbuf".to_vec()).into(),
        NamespaceRegistrationBody::child(NamespaceId(0xAA), NamespaceId(0xBB), b"codec".to_vec()).into(),
        SecretLockBody::new(
            address(2),
            Hash256::new([3; 32]),
            mosaic(9, 1),
            BlockDuration(100),
            LockHashAlgorithm::Sha3_256,
        )
        .into(),
        SecretProofBody::new(address(2), Hash256::new([3; 32]), LockHashAlgorithm::Hash160, vec![0xDE, 0xAD]).into(),
        HashLockBody::new(mosaic(9, 10_000_000), BlockDuration(480), Hash256::new([4; 32])).into(),
        AccountMetadataBody::new(address(5), 42, 3, b"abc".to_vec()).into(),
        MosaicMetadataBody::new(address(5), 42, UnresolvedMosaicId(9), -2, b"x".to_vec()).into(),
        AccountAddressRestrictionBody::new(
            AccountRestrictionFlags::ADDRESS,
            vec![address(6), address(7)],
            vec![address(8)],
        )
        .into(),
        MultisigAccountModificationBody::new(1, 1, vec![address(9)], vec![]).into(),
    ]
}

fn wrap(body: TransactionBody) -> Transaction {
    Transaction::new(
        Key::new([0x42; 32]),
        NetworkType::Testnet,
        Amount(2_000),
        Timestamp(123_456_789),
        body,
    )
    .with_signature(Signature::new([0x5A; 64]))
}

// ---------------------------------------------------------------------------
// Laws
// ---------------------------------------------------------------------------

#[test]
fn size_matches_encoded_length_for_every_kind() {
    for body in every_kind() {
        let name = body.name();
        let tx = wrap(body);
        let bytes = tx.to_bytes().unwrap();
        assert_eq!(bytes.len(), tx.size(), "{}", name);
        assert_eq!(&bytes[..4], &(tx.size() as u32).to_le_bytes(), "{}", name);
    }
}

#[test]
fn decode_reconstructs_every_kind() {
    for body in every_kind() {
        let tx = wrap(body);
        let bytes = tx.to_bytes().unwrap();
        let (decoded, used) = Transaction::from_bytes(&bytes).unwrap();
        assert_eq!(used, bytes.len());
        assert_eq!(decoded, tx);
    }
}

#[test]
fn every_proper_prefix_fails_to_decode() {
    for body in every_kind() {
        let bytes = wrap(body).to_bytes().unwrap();
        for cut in 0..bytes.len() {
            assert!(Transaction::from_bytes(&bytes[..cut]).is_err(), "cut at {} of {}", cut, bytes.len());
        }
    }
}

#[test]
fn trailing_bytes_are_left_unconsumed() {
    let tx = wrap(every_kind().remove(0));
    let mut bytes = tx.to_bytes().unwrap();
    bytes.extend_from_slice(&[0xEE; 7]);
    let (decoded, used) = Transaction::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(used, bytes.len() - 7);
}

#[test]
fn empty_collections_encode_as_zero_counts() {
    let body = TransferBody::new(address(1), vec![], vec![]);
    let bytes = body.to_bytes().unwrap();
    assert_eq!(bytes.len(), 24 + 1 + 2 + 4);
    assert_eq!(&bytes[24..], &[0; 7]);
    let (decoded, used) = TransferBody::from_bytes(&bytes).unwrap();
    assert!(decoded.mosaics().is_empty());
    assert!(decoded.message().is_empty());
    assert_eq!(used, 31);
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn transfer_body_matches_the_reference_bytes() {
    let recipient = address(0xAB);
    let mut expected = recipient.as_bytes().to_vec();
    expected.extend_from_slice(&[0x00]);
    expected.extend_from_slice(&[0x02, 0x00]);
    expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    expected.extend_from_slice(b"hi");

    let body = TransferBody::new(recipient, vec![], b"hi".to_vec());
    assert_eq!(body.to_bytes().unwrap(), expected);

    let (decoded, used) = TransferBody::from_bytes(&expected).unwrap();
    assert_eq!(used, expected.len());
    assert_eq!(decoded.recipient_address(), &recipient);
    assert!(decoded.mosaics().is_empty());
    assert_eq!(decoded.message(), b"hi");
}

#[test]
fn namespace_registration_needs_exactly_one_of_duration_and_parent() {
    let neither = NamespaceRegistrationBody::new(None, None, NamespaceId(1), b"a".to_vec());
    let both = NamespaceRegistrationBody::new(
        Some(BlockDuration(1)),
        Some(NamespaceId(2)),
        NamespaceId(1),
        b"a".to_vec(),
    );
    for result in [neither, both] {
        assert_eq!(
            result.unwrap_err(),
            CodecError::InvalidConditionalFields {
                field_a: "duration",
                field_b: "parent_id"
            }
        );
    }
}

#[test]
fn reserved_bytes_are_tolerated_unless_strict() {
    let tx = wrap(TransferBody::new(address(1), vec![], b"hi".to_vec()).into());
    let mut bytes = tx.to_bytes().unwrap();
    // First byte of the transfer body's reserved padding.
    let offset = 128 + 24 + 1 + 2;
    bytes[offset] = 1;

    let (lenient, _) = Transaction::from_bytes(&bytes).unwrap();
    assert_eq!(lenient, tx);

    let strict = DecodeContext::with_config(CodecConfig::strict());
    assert!(matches!(
        Transaction::from_bytes_with(&bytes, &strict),
        Err(CodecError::NonZeroReserved { value: 1, .. })
    ));
}

#[test]
fn json_view_tags_the_kind() {
    let tx = wrap(MosaicSupplyChangeBody::new(UnresolvedMosaicId(5), Amount(1), MosaicSupplyChangeAction::Decrease).into());
    let json = serde_json::to_value(&tx).unwrap();
    assert_eq!(json["body"]["kind"], "mosaic_supply_change");
}
