//! Multisig account modification.
//!
//! The two deltas are signed: they move the current approval and removal
//! thresholds up or down rather than setting them.

use serde::Serialize;

use super::{address_list, take_address_list, TransactionBody, TransactionKind, ADDRESS_ELEMENT};
use crate::error::CodecResult;
use crate::io::IntWidth;
use crate::primitives::{EntityType, UnresolvedAddress};
use crate::schema::{FieldSpec, Record, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultisigAccountModificationBody {
    min_removal_delta: i8,
    min_approval_delta: i8,
    address_additions: Vec<UnresolvedAddress>,
    address_deletions: Vec<UnresolvedAddress>,
}

impl MultisigAccountModificationBody {
    pub fn new(
        min_removal_delta: i8,
        min_approval_delta: i8,
        address_additions: Vec<UnresolvedAddress>,
        address_deletions: Vec<UnresolvedAddress>,
    ) -> Self {
        Self {
            min_removal_delta,
            min_approval_delta,
            address_additions,
            address_deletions,
        }
    }

    pub fn min_removal_delta(&self) -> i8 {
        self.min_removal_delta
    }

    pub fn min_approval_delta(&self) -> i8 {
        self.min_approval_delta
    }

    /// Cosignatories to add.
    pub fn address_additions(&self) -> &[UnresolvedAddress] {
        &self.address_additions
    }

    /// Cosignatories to remove.
    pub fn address_deletions(&self) -> &[UnresolvedAddress] {
        &self.address_deletions
    }
}

impl Schema for MultisigAccountModificationBody {
    const NAME: &'static str = "multisig_account_modification";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<i8>("min_removal_delta"),
        FieldSpec::of::<i8>("min_approval_delta"),
        FieldSpec::count("address_additions_count", "address_additions", IntWidth::U8),
        FieldSpec::count("address_deletions_count", "address_deletions", IntWidth::U8),
        FieldSpec::reserved("multisig_account_modification_transaction_body_reserved_1", IntWidth::U32),
        FieldSpec::array("address_additions", "address_additions_count", ADDRESS_ELEMENT),
        FieldSpec::array("address_deletions", "address_deletions_count", ADDRESS_ELEMENT),
    ];

    fn to_record(&self) -> Record {
        Record::new()
            .with("min_removal_delta", self.min_removal_delta)
            .with("min_approval_delta", self.min_approval_delta)
            .with("address_additions", address_list(&self.address_additions))
            .with("address_deletions", address_list(&self.address_deletions))
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            min_removal_delta: record.take("min_removal_delta")?,
            min_approval_delta: record.take("min_approval_delta")?,
            address_additions: take_address_list(&mut record, "address_additions")?,
            address_deletions: take_address_list(&mut record, "address_deletions")?,
        })
    }
}

impl TransactionKind for MultisigAccountModificationBody {
    const ENTITY_TYPE: EntityType = EntityType::MULTISIG_ACCOUNT_MODIFICATION;

    fn into_body(self) -> TransactionBody {
        TransactionBody::MultisigAccountModification(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn deltas_are_twos_complement() {
        let body = MultisigAccountModificationBody::new(-1, 2, vec![UnresolvedAddress::new([7; 24])], vec![]);
        let bytes = body.to_bytes().unwrap();
        assert_eq!(&bytes[..8], &[0xFF, 0x02, 1, 0, 0, 0, 0, 0]);
        assert_eq!(bytes.len(), 32);
        let (decoded, _) = MultisigAccountModificationBody::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.min_removal_delta(), -1);
        assert_eq!(decoded, body);
    }

    #[test]
    fn count_larger_than_input_is_truncation() {
        let bytes = [0, 0, 3, 0, 0, 0, 0, 0, 1, 2, 3];
        assert!(matches!(
            MultisigAccountModificationBody::from_bytes(&bytes),
            Err(CodecError::Truncated { field: "address", .. })
        ));
    }
}
