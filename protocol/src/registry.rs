//! # Transaction Type Registry
//!
//! The `type` field of an envelope header is just a `u16`. Turning it into a
//! body decoder is the registry's job, and it is the *only* place in the
//! crate that knows which discriminators exist. There is no `match` over
//! entity types anywhere in the decode path: envelopes and aggregates both
//! ask the registry handed to them through a [`DecodeContext`].
//!
//! ```text
//!   header.type ──► Registry::lookup(type, embedded) ──► RegistryEntry
//!                                                            │
//!                           typed kind  ◄── decoder ─────────┤
//!                           Generic     ◄── layout only ─────┘
//! ```
//!
//! The built-in kinds live in [`Registry::standard`], which is built once per
//! process. Anything else (a newer network's transaction types, a private
//! chain's custom kinds) goes into a registry of your own, either as a typed
//! [`TransactionKind`] or as a bare [`FieldSpec`] table.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::io::Reader;
use crate::primitives::EntityType;
use crate::schema::{engine, FieldSpec, Schema};
use crate::transaction::{
    aggregate, AccountAddressRestrictionBody, AccountMetadataBody, AggregateBody, GenericBody,
    HashLockBody, MosaicDefinitionBody, MosaicMetadataBody, MosaicSupplyChangeBody,
    MultisigAccountModificationBody, NamespaceRegistrationBody, SecretLockBody, SecretProofBody,
    TransactionBody, TransactionKind, TransferBody,
};

/// Signature of a typed body decoder.
pub type BodyDecoder = fn(&mut Reader<'_>, &DecodeContext<'_>) -> CodecResult<TransactionBody>;

// ---------------------------------------------------------------------------
// DecodeContext
// ---------------------------------------------------------------------------

/// Everything a decode call needs besides the bytes: which kinds exist and
/// how strict to be.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'r> {
    pub registry: &'r Registry,
    pub config: CodecConfig,
}

impl<'r> DecodeContext<'r> {
    pub fn new(registry: &'r Registry, config: CodecConfig) -> Self {
        Self { registry, config }
    }
}

impl DecodeContext<'static> {
    /// Standard registry, default configuration.
    pub fn standard() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Standard registry with a custom configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self::new(Registry::standard(), config)
    }
}

impl Default for DecodeContext<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// RegistryEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Decoder {
    Typed(BodyDecoder),
    Layout,
}

/// One registered transaction kind.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    entity_type: EntityType,
    name: &'static str,
    version: u8,
    embeddable: bool,
    layout: &'static [FieldSpec],
    decoder: Decoder,
}

impl RegistryEntry {
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Version written by default when building envelopes of this kind.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Whether this kind may appear inside an aggregate.
    pub fn embeddable(&self) -> bool {
        self.embeddable
    }

    /// Body layout in wire order.
    pub fn layout(&self) -> &'static [FieldSpec] {
        self.layout
    }

    /// Returns `true` when the kind has no typed body and decodes to
    /// [`TransactionBody::Generic`].
    pub fn is_layout_only(&self) -> bool {
        matches!(self.decoder, Decoder::Layout)
    }

    /// Decodes one body of this kind from the front of `reader`.
    pub fn decode_body(&self, reader: &mut Reader<'_>, ctx: &DecodeContext<'_>) -> CodecResult<TransactionBody> {
        match self.decoder {
            Decoder::Typed(decode) => decode(reader, ctx),
            Decoder::Layout => {
                let fields = engine::decode(self.layout, reader, ctx)?;
                Ok(TransactionBody::Generic(GenericBody::new(
                    self.entity_type,
                    self.name,
                    self.version,
                    self.embeddable,
                    self.layout,
                    fields,
                )))
            }
        }
    }
}

fn decode_typed<K: TransactionKind>(reader: &mut Reader<'_>, ctx: &DecodeContext<'_>) -> CodecResult<TransactionBody> {
    K::read(reader, ctx).map(K::into_body)
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Map from entity type to body decoder.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<EntityType, RegistryEntry>,
}

static STANDARD: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// An empty registry. Nothing decodes until kinds are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry of built-in kinds.
    pub fn standard() -> &'static Registry {
        STANDARD.get_or_init(|| {
            let registry = Self::builtin();
            debug!(kinds = registry.len(), "standard transaction registry built");
            registry
        })
    }

    fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register::<TransferBody>()
            .register::<MosaicDefinitionBody>()
            .register::<MosaicSupplyChangeBody>()
            .register::<NamespaceRegistrationBody>()
            .register::<SecretLockBody>()
            .register::<SecretProofBody>()
            .register::<HashLockBody>()
            .register::<AccountMetadataBody>()
            .register::<MosaicMetadataBody>()
            .register::<AccountAddressRestrictionBody>()
            .register::<MultisigAccountModificationBody>()
            .register_with(
                EntityType::AGGREGATE_COMPLETE,
                "aggregate_complete",
                aggregate::AGGREGATE_VERSION,
                false,
                AggregateBody::LAYOUT,
                aggregate::decode_complete,
            )
            .register_with(
                EntityType::AGGREGATE_BONDED,
                "aggregate_bonded",
                aggregate::AGGREGATE_VERSION,
                false,
                AggregateBody::LAYOUT,
                aggregate::decode_bonded,
            );
        registry
    }

    /// Registers a typed kind, replacing any previous entry for its type.
    pub fn register<K: TransactionKind>(&mut self) -> &mut Self {
        self.register_with(
            K::ENTITY_TYPE,
            K::NAME,
            K::VERSION,
            K::EMBEDDABLE,
            K::LAYOUT,
            decode_typed::<K>,
        )
    }

    /// Registers a kind with an explicit decoder. Used for kinds that share a
    /// body type, like the two aggregates.
    pub fn register_with(
        &mut self,
        entity_type: EntityType,
        name: &'static str,
        version: u8,
        embeddable: bool,
        layout: &'static [FieldSpec],
        decoder: BodyDecoder,
    ) -> &mut Self {
        self.insert(RegistryEntry {
            entity_type,
            name,
            version,
            embeddable,
            layout,
            decoder: Decoder::Typed(decoder),
        })
    }

    /// Registers a kind described only by its layout. Bodies of this kind
    /// decode to [`TransactionBody::Generic`].
    pub fn register_layout(
        &mut self,
        entity_type: EntityType,
        name: &'static str,
        version: u8,
        embeddable: bool,
        layout: &'static [FieldSpec],
    ) -> &mut Self {
        self.insert(RegistryEntry {
            entity_type,
            name,
            version,
            embeddable,
            layout,
            decoder: Decoder::Layout,
        })
    }

    fn insert(&mut self, entry: RegistryEntry) -> &mut Self {
        if let Some(previous) = self.entries.insert(entry.entity_type, entry) {
            debug!(
                entity_type = %entry.entity_type,
                replaced = previous.name,
                name = entry.name,
                "transaction kind re-registered"
            );
        }
        self
    }

    pub fn get(&self, entity_type: EntityType) -> Option<&RegistryEntry> {
        self.entries.get(&entity_type)
    }

    /// Resolves a header discriminator.
    ///
    /// # Errors
    ///
    /// [`CodecError::UnknownTransactionType`] when the type is not
    /// registered, or when `embedded` is set and the kind cannot be embedded.
    pub fn lookup(&self, entity_type: EntityType, embedded: bool) -> CodecResult<&RegistryEntry> {
        match self.entries.get(&entity_type) {
            Some(entry) if !embedded || entry.embeddable => Ok(entry),
            _ => Err(CodecError::UnknownTransactionType { entity_type, embedded }),
        }
    }

    /// Finds a kind by its snake_case name, ignoring ASCII case.
    pub fn find_by_name(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.values().find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Entries in ascending entity type order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::IntWidth;
    use crate::schema::Value;

    const PING: &[FieldSpec] = &[
        FieldSpec::new("nonce", crate::schema::FieldKind::Int(IntWidth::U32)),
        FieldSpec::byte_size("memo_size", "memo", IntWidth::U8),
        FieldSpec::buffer("memo", "memo_size"),
    ];

    #[test]
    fn standard_registry_has_every_builtin_kind() {
        let registry = Registry::standard();
        assert_eq!(registry.len(), 13);
        assert_eq!(registry.get(EntityType::TRANSFER).unwrap().name(), "transfer");
        assert!(std::ptr::eq(registry, Registry::standard()));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let err = Registry::standard().lookup(EntityType::new(0xFFFF), true).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownTransactionType {
                entity_type: EntityType::new(0xFFFF),
                embedded: true
            }
        );
    }

    #[test]
    fn aggregates_are_not_embeddable() {
        let registry = Registry::standard();
        assert!(registry.lookup(EntityType::AGGREGATE_BONDED, false).is_ok());
        assert!(matches!(
            registry.lookup(EntityType::AGGREGATE_BONDED, true),
            Err(CodecError::UnknownTransactionType { embedded: true, .. })
        ));
    }

    #[test]
    fn find_by_name_ignores_case() {
        let entry = Registry::standard().find_by_name("Secret_Lock").unwrap();
        assert_eq!(entry.entity_type(), EntityType::SECRET_LOCK);
        assert!(Registry::standard().find_by_name("nope").is_none());
    }

    #[test]
    fn layout_only_kinds_decode_to_generic_bodies() {
        let mut registry = Registry::new();
        registry.register_layout(EntityType::new(0x4F50), "ping", 1, true, PING);
        let ctx = DecodeContext::new(&registry, CodecConfig::default());

        let bytes = [7, 0, 0, 0, 2, b'o', b'k'];
        let entry = registry.lookup(EntityType::new(0x4F50), true).unwrap();
        assert!(entry.is_layout_only());
        let body = entry.decode_body(&mut Reader::new(&bytes), &ctx).unwrap();
        match body {
            TransactionBody::Generic(generic) => {
                assert_eq!(generic.name(), "ping");
                assert_eq!(generic.fields().int("nonce"), Some(7));
                assert_eq!(generic.fields().get("memo"), Some(&Value::Bytes(b"ok".to_vec())));
            }
            other => panic!("expected a generic body, got {:?}", other),
        }
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut registry = Registry::standard().clone();
        registry.register_layout(EntityType::TRANSFER, "raw_transfer", 2, true, PING);
        assert_eq!(registry.len(), 13);
        assert_eq!(registry.get(EntityType::TRANSFER).unwrap().version(), 2);
    }

    #[test]
    fn entries_are_ordered_by_type() {
        let types: Vec<u16> = Registry::standard().entries().map(|e| e.entity_type().value()).collect();
        let mut sorted = types.clone();
        sorted.sort_unstable();
        assert_eq!(types, sorted);
    }
}
