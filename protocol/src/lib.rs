// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # catbuf — Layered Transaction Codec
//!
//! A byte-exact codec for catbuffer-style blockchain transactions: fixed
//! little-endian layouts, no self-description, no mercy. Feed it bytes that
//! are one byte short and it will tell you which field ran dry.
//!
//! Nothing here signs, verifies, or validates business rules. Signatures are
//! opaque 64-byte blobs, hashes are only computed when asked for, and a
//! transfer of zero mosaics to yourself is as welcome as any other.
//!
//! ## Architecture
//!
//! The crate is layered bottom-up, each layer only talking to the one below:
//!
//! - **io** — Bounded little-endian reader and writer.
//! - **primitives** — Fixed-width scalars, byte strings and wire enums.
//! - **schema** — Declarative field layouts and the engine that walks them.
//! - **transaction** — Typed bodies for every supported kind, plus aggregates.
//! - **envelope** — Standalone and embedded headers around a body.
//! - **registry** — `type` discriminator to body decoder, open for extension.
//! - **hash** — SHA3-256 merkle root for aggregate `transactions_hash`.
//! - **config** — Wire constants and decode policy.
//!
//! ## Design Philosophy
//!
//! 1. One layout description drives size, encode, and decode. They cannot
//!    drift apart because there is only one of them.
//! 2. Decoding is all-or-nothing. No half-built values leak out.
//! 3. Values are immutable; "modifying" a transaction returns a new one.
//! 4. No `unsafe`, no panics on untrusted input.

pub mod config;
pub mod envelope;
pub mod error;
pub mod hash;
pub mod io;
pub mod primitives;
pub mod registry;
pub mod schema;
pub mod transaction;

pub use config::{CodecConfig, ReservedPolicy};
pub use envelope::{EmbeddedTransaction, Transaction};
pub use error::{CodecError, CodecResult};
pub use primitives::Primitive;
pub use registry::{DecodeContext, Registry, RegistryEntry};
pub use schema::Schema;
pub use transaction::{TransactionBody, TransactionKind};
