use crate::primitives::EntityType;
use crate::schema::Schema;

use super::TransactionBody;

/// A transaction body that can stand behind an envelope header.
///
/// Implementing this (and [`Schema`]) is all it takes for a kind to be
/// registered with [`crate::Registry::register`].
pub trait TransactionKind: Schema {
    /// Header `type` discriminator.
    const ENTITY_TYPE: EntityType;

    /// Header `version` written by default.
    const VERSION: u8 = 1;

    /// Whether the kind may appear inside an aggregate.
    const EMBEDDABLE: bool = true;

    /// Wraps the body in the tagged union.
    fn into_body(self) -> TransactionBody;
}
