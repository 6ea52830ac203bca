use serde::Serialize;

use super::{address_list, take_address_list, TransactionBody, TransactionKind, ADDRESS_ELEMENT};
use crate::error::CodecResult;
use crate::io::IntWidth;
use crate::primitives::{AccountRestrictionFlags, EntityType, UnresolvedAddress};
use crate::schema::{FieldSpec, Record, Schema};

/// Adds and removes addresses from an account's address allow/block list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountAddressRestrictionBody {
    restriction_flags: AccountRestrictionFlags,
    restriction_additions: Vec<UnresolvedAddress>,
    restriction_deletions: Vec<UnresolvedAddress>,
}

impl AccountAddressRestrictionBody {
    pub fn new(
        restriction_flags: AccountRestrictionFlags,
        restriction_additions: Vec<UnresolvedAddress>,
        restriction_deletions: Vec<UnresolvedAddress>,
    ) -> Self {
        Self {
            restriction_flags,
            restriction_additions,
            restriction_deletions,
        }
    }

    pub fn restriction_flags(&self) -> AccountRestrictionFlags {
        self.restriction_flags
    }

    pub fn restriction_additions(&self) -> &[UnresolvedAddress] {
        &self.restriction_additions
    }

    pub fn restriction_deletions(&self) -> &[UnresolvedAddress] {
        &self.restriction_deletions
    }
}

impl Schema for AccountAddressRestrictionBody {
    const NAME: &'static str = "account_address_restriction";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<AccountRestrictionFlags>("restriction_flags"),
        FieldSpec::count("restriction_additions_count", "restriction_additions", IntWidth::U8),
        FieldSpec::count("restriction_deletions_count", "restriction_deletions", IntWidth::U8),
        FieldSpec::reserved("account_restriction_transaction_body_reserved_1", IntWidth::U32),
        FieldSpec::array("restriction_additions", "restriction_additions_count", ADDRESS_ELEMENT),
        FieldSpec::array("restriction_deletions", "restriction_deletions_count", ADDRESS_ELEMENT),
    ];

    fn to_record(&self) -> Record {
        Record::new()
            .with("restriction_flags", self.restriction_flags)
            .with("restriction_additions", address_list(&self.restriction_additions))
            .with("restriction_deletions", address_list(&self.restriction_deletions))
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            restriction_flags: record.take("restriction_flags")?,
            restriction_additions: take_address_list(&mut record, "restriction_additions")?,
            restriction_deletions: take_address_list(&mut record, "restriction_deletions")?,
        })
    }
}

impl TransactionKind for AccountAddressRestrictionBody {
    const ENTITY_TYPE: EntityType = EntityType::ACCOUNT_ADDRESS_RESTRICTION;

    fn into_body(self) -> TransactionBody {
        TransactionBody::AccountAddressRestriction(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additions_precede_deletions() {
        let body = AccountAddressRestrictionBody::new(
            AccountRestrictionFlags::ADDRESS.union(AccountRestrictionFlags::BLOCK),
            vec![UnresolvedAddress::new([1; 24]), UnresolvedAddress::new([2; 24])],
            vec![UnresolvedAddress::new([3; 24])],
        );
        let bytes = body.to_bytes().unwrap();
        assert_eq!(&bytes[..4], &[0x01, 0x80, 2, 1]);
        assert_eq!(bytes.len(), 8 + 3 * 24);
        assert_eq!(bytes[8], 1);
        assert_eq!(bytes[8 + 48], 3);
        assert_eq!(AccountAddressRestrictionBody::from_bytes(&bytes).unwrap().0, body);
    }

    #[test]
    fn empty_lists_are_empty_not_absent() {
        let body = AccountAddressRestrictionBody::new(AccountRestrictionFlags::ADDRESS, vec![], vec![]);
        let bytes = body.to_bytes().unwrap();
        assert_eq!(bytes.len(), 8);
        let (decoded, _) = AccountAddressRestrictionBody::from_bytes(&bytes).unwrap();
        assert!(decoded.restriction_additions().is_empty());
        assert!(decoded.restriction_deletions().is_empty());
    }
}
