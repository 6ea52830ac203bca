//! The tagged union of transaction bodies.
//!
//! Envelopes own exactly one [`TransactionBody`]. Dispatch over the variants
//! happens through `with_body!`, so adding a kind means adding one variant
//! and one line to the macro.

use serde::Serialize;

use super::aggregate::{AggregateBody, AGGREGATE_VERSION};
use super::{
    AccountAddressRestrictionBody, AccountMetadataBody, HashLockBody, MosaicDefinitionBody,
    MosaicMetadataBody, MosaicSupplyChangeBody, MultisigAccountModificationBody,
    NamespaceRegistrationBody, SecretLockBody, SecretProofBody, TransactionKind, TransferBody,
};
use crate::error::CodecResult;
use crate::io::{Reader, Writer};
use crate::primitives::EntityType;
use crate::registry::DecodeContext;
use crate::schema::{engine, FieldSpec, Record, Schema};

/// Body of a kind known only by its layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericBody {
    entity_type: EntityType,
    name: &'static str,
    version: u8,
    #[serde(skip)]
    embeddable: bool,
    #[serde(skip)]
    layout: &'static [FieldSpec],
    fields: Record,
}

impl GenericBody {
    /// Builds a body from its field values. Count and size prefixes are
    /// derived on encode; any present in `fields` are dropped.
    pub fn new(
        entity_type: EntityType,
        name: &'static str,
        version: u8,
        embeddable: bool,
        layout: &'static [FieldSpec],
        fields: Record,
    ) -> Self {
        Self {
            entity_type,
            name,
            version,
            embeddable,
            layout,
            fields: engine::strip_prefixes(layout, fields),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Whether the kind may appear inside an aggregate.
    pub fn embeddable(&self) -> bool {
        self.embeddable
    }

    pub fn layout(&self) -> &'static [FieldSpec] {
        self.layout
    }

    /// Field values, without count or size prefixes.
    pub fn fields(&self) -> &Record {
        &self.fields
    }

    pub fn size(&self) -> usize {
        engine::size(self.layout, &self.fields)
    }

    pub fn write(&self, writer: &mut Writer) -> CodecResult<()> {
        engine::encode(self.layout, &self.fields, writer)
    }

    pub fn to_record(&self) -> Record {
        self.fields.clone()
    }
}

/// Kind-specific payload of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionBody {
    Transfer(TransferBody),
    MosaicDefinition(MosaicDefinitionBody),
    MosaicSupplyChange(MosaicSupplyChangeBody),
    NamespaceRegistration(NamespaceRegistrationBody),
    SecretLock(SecretLockBody),
    SecretProof(SecretProofBody),
    HashLock(HashLockBody),
    AccountMetadata(AccountMetadataBody),
    MosaicMetadata(MosaicMetadataBody),
    AccountAddressRestriction(AccountAddressRestrictionBody),
    MultisigAccountModification(MultisigAccountModificationBody),
    AggregateComplete(AggregateBody),
    AggregateBonded(AggregateBody),
    Generic(GenericBody),
}

// Expands `$e` once per variant with `$b` bound to the inner body.
macro_rules! with_body {
    ($body:expr, $b:ident => $e:expr) => {
        match $body {
            TransactionBody::Transfer($b) => $e,
            TransactionBody::MosaicDefinition($b) => $e,
            TransactionBody::MosaicSupplyChange($b) => $e,
            TransactionBody::NamespaceRegistration($b) => $e,
            TransactionBody::SecretLock($b) => $e,
            TransactionBody::SecretProof($b) => $e,
            TransactionBody::HashLock($b) => $e,
            TransactionBody::AccountMetadata($b) => $e,
            TransactionBody::MosaicMetadata($b) => $e,
            TransactionBody::AccountAddressRestriction($b) => $e,
            TransactionBody::MultisigAccountModification($b) => $e,
            TransactionBody::AggregateComplete($b) | TransactionBody::AggregateBonded($b) => $e,
            TransactionBody::Generic($b) => $e,
        }
    };
}

// Per-kind dispatch on the type rather than the value: `$t` names the body
// type. Aggregates and generic bodies get their own arms.
macro_rules! with_kind {
    (
        $body:expr,
        $t:ident => $e:expr,
        complete => $complete:expr,
        bonded => $bonded:expr,
        generic($g:ident) => $gen:expr
    ) => {
        match $body {
            TransactionBody::Transfer(_) => {
                type $t = TransferBody;
                $e
            }
            TransactionBody::MosaicDefinition(_) => {
                type $t = MosaicDefinitionBody;
                $e
            }
            TransactionBody::MosaicSupplyChange(_) => {
                type $t = MosaicSupplyChangeBody;
                $e
            }
            TransactionBody::NamespaceRegistration(_) => {
                type $t = NamespaceRegistrationBody;
                $e
            }
            TransactionBody::SecretLock(_) => {
                type $t = SecretLockBody;
                $e
            }
            TransactionBody::SecretProof(_) => {
                type $t = SecretProofBody;
                $e
            }
            TransactionBody::HashLock(_) => {
                type $t = HashLockBody;
                $e
            }
            TransactionBody::AccountMetadata(_) => {
                type $t = AccountMetadataBody;
                $e
            }
            TransactionBody::MosaicMetadata(_) => {
                type $t = MosaicMetadataBody;
                $e
            }
            TransactionBody::AccountAddressRestriction(_) => {
                type $t = AccountAddressRestrictionBody;
                $e
            }
            TransactionBody::MultisigAccountModification(_) => {
                type $t = MultisigAccountModificationBody;
                $e
            }
            TransactionBody::AggregateComplete(_) => $complete,
            TransactionBody::AggregateBonded(_) => $bonded,
            TransactionBody::Generic($g) => $gen,
        }
    };
}

impl TransactionBody {
    /// Header `type` this body is written under.
    pub fn entity_type(&self) -> EntityType {
        with_kind!(
            self,
            K => K::ENTITY_TYPE,
            complete => EntityType::AGGREGATE_COMPLETE,
            bonded => EntityType::AGGREGATE_BONDED,
            generic(g) => g.entity_type()
        )
    }

    pub fn name(&self) -> &'static str {
        with_kind!(
            self,
            K => K::NAME,
            complete => "aggregate_complete",
            bonded => "aggregate_bonded",
            generic(g) => g.name()
        )
    }

    /// Default header `version` for this kind.
    pub fn version(&self) -> u8 {
        with_kind!(
            self,
            K => K::VERSION,
            complete => AGGREGATE_VERSION,
            bonded => AGGREGATE_VERSION,
            generic(g) => g.version()
        )
    }

    /// Body layout in wire order.
    pub fn layout(&self) -> &'static [FieldSpec] {
        with_kind!(
            self,
            K => K::LAYOUT,
            complete => AggregateBody::LAYOUT,
            bonded => AggregateBody::LAYOUT,
            generic(g) => g.layout()
        )
    }

    /// Whether this body may be wrapped in an embedded envelope.
    pub fn embeddable(&self) -> bool {
        with_kind!(
            self,
            K => K::EMBEDDABLE,
            complete => false,
            bonded => false,
            generic(g) => g.embeddable()
        )
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::AggregateComplete(_) | Self::AggregateBonded(_))
    }

    /// The aggregate payload, if this is an aggregate.
    pub fn as_aggregate(&self) -> Option<&AggregateBody> {
        match self {
            Self::AggregateComplete(body) | Self::AggregateBonded(body) => Some(body),
            _ => None,
        }
    }

    /// Encoded size of the body alone.
    pub fn size(&self) -> usize {
        with_body!(self, b => b.size())
    }

    pub fn write(&self, writer: &mut Writer) -> CodecResult<()> {
        with_body!(self, b => b.write(writer))
    }

    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut writer = Writer::with_capacity(self.size());
        self.write(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// The body as a dynamic record, without count or size prefixes.
    pub fn to_record(&self) -> Record {
        with_body!(self, b => b.to_record())
    }

    /// Decodes a bare body of the given type from the front of `reader`.
    ///
    /// # Errors
    ///
    /// [`crate::CodecError::UnknownTransactionType`] when the type is not in
    /// the context's registry, plus any body decode failure.
    pub fn read(entity_type: EntityType, reader: &mut Reader<'_>, ctx: &DecodeContext<'_>) -> CodecResult<Self> {
        ctx.registry.lookup(entity_type, false)?.decode_body(reader, ctx)
    }

    /// Decodes a bare body from the front of `bytes`. Returns the body and
    /// the bytes consumed.
    pub fn from_bytes_with(
        entity_type: EntityType,
        bytes: &[u8],
        ctx: &DecodeContext<'_>,
    ) -> CodecResult<(Self, usize)> {
        let mut reader = Reader::new(bytes);
        let body = Self::read(entity_type, &mut reader, ctx)?;
        Ok((body, reader.position()))
    }
}

macro_rules! into_body {
    ($($t:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$t> for TransactionBody {
                fn from(body: $t) -> Self {
                    Self::$variant(body)
                }
            }
        )+
    };
}

into_body!(
    TransferBody => Transfer,
    MosaicDefinitionBody => MosaicDefinition,
    MosaicSupplyChangeBody => MosaicSupplyChange,
    NamespaceRegistrationBody => NamespaceRegistration,
    SecretLockBody => SecretLock,
    SecretProofBody => SecretProof,
    HashLockBody => HashLock,
    AccountMetadataBody => AccountMetadata,
    MosaicMetadataBody => MosaicMetadata,
    AccountAddressRestrictionBody => AccountAddressRestriction,
    MultisigAccountModificationBody => MultisigAccountModification,
    GenericBody => Generic,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::IntWidth;
    use crate::primitives::{Amount, UnresolvedAddress, UnresolvedMosaicId};
    use crate::schema::{FieldKind, Value};
    use crate::transaction::UnresolvedMosaic;

    fn transfer() -> TransactionBody {
        TransferBody::new(
            UnresolvedAddress::new([0x98; 24]),
            vec![UnresolvedMosaic::new(UnresolvedMosaicId(7), Amount(100))],
            b"hi".to_vec(),
        )
        .into()
    }

    #[test]
    fn dispatch_reaches_the_typed_body() {
        let body = transfer();
        assert_eq!(body.entity_type(), EntityType::TRANSFER);
        assert_eq!(body.name(), "transfer");
        assert_eq!(body.version(), 1);
        assert_eq!(body.size(), 24 + 1 + 2 + 4 + 16 + 2);
        assert_eq!(body.to_bytes().unwrap().len(), body.size());
        assert!(!body.is_aggregate());
        assert!(body.embeddable());
        assert!(body.as_aggregate().is_none());
    }

    #[test]
    fn aggregate_variants_share_a_body_type() {
        let complete = TransactionBody::AggregateComplete(AggregateBody::default());
        let bonded = TransactionBody::AggregateBonded(AggregateBody::default());
        assert_eq!(complete.entity_type(), EntityType::AGGREGATE_COMPLETE);
        assert_eq!(bonded.entity_type(), EntityType::AGGREGATE_BONDED);
        assert_eq!(complete.to_bytes().unwrap(), bonded.to_bytes().unwrap());
        assert_eq!(complete.layout(), AggregateBody::LAYOUT);
        assert!(!complete.embeddable());
        assert!(!bonded.embeddable());
    }

    #[test]
    fn read_uses_the_registry() {
        let bytes = transfer().to_bytes().unwrap();
        let (decoded, used) =
            TransactionBody::from_bytes_with(EntityType::TRANSFER, &bytes, &DecodeContext::standard()).unwrap();
        assert_eq!(decoded, transfer());
        assert_eq!(used, bytes.len());
    }

    #[test]
    fn generic_bodies_encode_from_their_record() {
        const TAG: &[FieldSpec] = &[FieldSpec::new("tag", FieldKind::Int(IntWidth::U16))];
        let body: TransactionBody =
            GenericBody::new(EntityType::new(0x4F01), "tag", 3, true, TAG, Record::new().with("tag", Value::Int(0x0102)))
                .into();
        assert_eq!(body.to_bytes().unwrap(), vec![0x02, 0x01]);
        assert_eq!(body.version(), 3);
        assert_eq!(body.entity_type(), EntityType::new(0x4F01));
    }

    #[test]
    fn serializes_with_a_kind_tag() {
        let json = serde_json::to_value(transfer()).unwrap();
        assert_eq!(json["kind"], "transfer");
        assert_eq!(json["message"], "6869");
    }
}
