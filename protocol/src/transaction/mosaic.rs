//! Mosaic references and the two mosaic lifecycle kinds.

use serde::Serialize;

use super::{TransactionBody, TransactionKind};
use crate::error::CodecResult;
use crate::primitives::{
    Amount, BlockDuration, EntityType, MosaicFlags, MosaicId, MosaicNonce, MosaicSupplyChangeAction,
    UnresolvedMosaicId,
};
use crate::schema::{FieldSpec, Record, Schema};

// ---------------------------------------------------------------------------
// UnresolvedMosaic
// ---------------------------------------------------------------------------

/// A quantity of one mosaic. Appears as an array element in transfers and
/// inline in locks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct UnresolvedMosaic {
    mosaic_id: UnresolvedMosaicId,
    amount: Amount,
}

impl UnresolvedMosaic {
    pub fn new(mosaic_id: UnresolvedMosaicId, amount: Amount) -> Self {
        Self { mosaic_id, amount }
    }

    pub fn mosaic_id(&self) -> UnresolvedMosaicId {
        self.mosaic_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Adds this mosaic's fields to a record that inlines it.
    pub(crate) fn inline_into(&self, record: Record) -> Record {
        record.with("mosaic_id", self.mosaic_id).with("amount", self.amount)
    }

    /// Reads the fields written by [`UnresolvedMosaic::inline_into`].
    pub(crate) fn take_inline(record: &mut Record) -> CodecResult<Self> {
        Ok(Self {
            mosaic_id: record.take("mosaic_id")?,
            amount: record.take("amount")?,
        })
    }
}

impl Schema for UnresolvedMosaic {
    const NAME: &'static str = "unresolved_mosaic";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<UnresolvedMosaicId>("mosaic_id"),
        FieldSpec::of::<Amount>("amount"),
    ];

    fn to_record(&self) -> Record {
        self.inline_into(Record::new())
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Self::take_inline(&mut record)
    }
}

// ---------------------------------------------------------------------------
// MosaicDefinition
// ---------------------------------------------------------------------------

/// Creates a mosaic, or changes the properties of one the signer owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MosaicDefinitionBody {
    id: MosaicId,
    duration: BlockDuration,
    nonce: MosaicNonce,
    flags: MosaicFlags,
    divisibility: u8,
}

impl MosaicDefinitionBody {
    pub fn new(id: MosaicId, duration: BlockDuration, nonce: MosaicNonce, flags: MosaicFlags, divisibility: u8) -> Self {
        Self {
            id,
            duration,
            nonce,
            flags,
            divisibility,
        }
    }

    pub fn id(&self) -> MosaicId {
        self.id
    }

    /// Zero means the mosaic never expires.
    pub fn duration(&self) -> BlockDuration {
        self.duration
    }

    pub fn nonce(&self) -> MosaicNonce {
        self.nonce
    }

    pub fn flags(&self) -> MosaicFlags {
        self.flags
    }

    pub fn divisibility(&self) -> u8 {
        self.divisibility
    }
}

impl Schema for MosaicDefinitionBody {
    const NAME: &'static str = "mosaic_definition";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<MosaicId>("id"),
        FieldSpec::of::<BlockDuration>("duration"),
        FieldSpec::of::<MosaicNonce>("nonce"),
        FieldSpec::of::<MosaicFlags>("flags"),
        FieldSpec::of::<u8>("divisibility"),
    ];

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("duration", self.duration)
            .with("nonce", self.nonce)
            .with("flags", self.flags)
            .with("divisibility", self.divisibility)
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            id: record.take("id")?,
            duration: record.take("duration")?,
            nonce: record.take("nonce")?,
            flags: record.take("flags")?,
            divisibility: record.take("divisibility")?,
        })
    }
}

impl TransactionKind for MosaicDefinitionBody {
    const ENTITY_TYPE: EntityType = EntityType::MOSAIC_DEFINITION;

    fn into_body(self) -> TransactionBody {
        TransactionBody::MosaicDefinition(self)
    }
}

// ---------------------------------------------------------------------------
// MosaicSupplyChange
// ---------------------------------------------------------------------------

/// Mints or burns units of a mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MosaicSupplyChangeBody {
    mosaic_id: UnresolvedMosaicId,
    delta: Amount,
    action: MosaicSupplyChangeAction,
}

impl MosaicSupplyChangeBody {
    pub fn new(mosaic_id: UnresolvedMosaicId, delta: Amount, action: MosaicSupplyChangeAction) -> Self {
        Self {
            mosaic_id,
            delta,
            action,
        }
    }

    pub fn mosaic_id(&self) -> UnresolvedMosaicId {
        self.mosaic_id
    }

    pub fn delta(&self) -> Amount {
        self.delta
    }

    pub fn action(&self) -> MosaicSupplyChangeAction {
        self.action
    }
}

impl Schema for MosaicSupplyChangeBody {
    const NAME: &'static str = "mosaic_supply_change";
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::of::<UnresolvedMosaicId>("mosaic_id"),
        FieldSpec::of::<Amount>("delta"),
        FieldSpec::of::<MosaicSupplyChangeAction>("action"),
    ];

    fn to_record(&self) -> Record {
        Record::new()
            .with("mosaic_id", self.mosaic_id)
            .with("delta", self.delta)
            .with("action", self.action)
    }

    fn from_record(mut record: Record) -> CodecResult<Self> {
        Ok(Self {
            mosaic_id: record.take("mosaic_id")?,
            delta: record.take("delta")?,
            action: record.take("action")?,
        })
    }
}

impl TransactionKind for MosaicSupplyChangeBody {
    const ENTITY_TYPE: EntityType = EntityType::MOSAIC_SUPPLY_CHANGE;

    fn into_body(self) -> TransactionBody {
        TransactionBody::MosaicSupplyChange(self)
    }
}
