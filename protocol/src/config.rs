//! # Codec Configuration & Constants
//!
//! Every wire-level magic number in catbuf lives here: field widths, header
//! sizes, entity type discriminators and network identifiers. If you find a
//! literal `32` or `0x4154` somewhere else in the crate, it should probably
//! be one of these.
//!
//! The only runtime knob is [`CodecConfig`], which controls how strictly
//! decoding treats reserved padding fields.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Primitive Widths
// ---------------------------------------------------------------------------

/// Public key length in bytes.
pub const KEY_SIZE: usize = 32;

/// SHA3-256 digest length in bytes.
pub const HASH256_SIZE: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Unresolved address length in bytes: network byte, 20-byte ripemd of the
/// key hash, 3-byte checksum.
pub const ADDRESS_SIZE: usize = 24;

/// One mosaic reference on the wire: 8-byte id plus 8-byte amount.
pub const UNRESOLVED_MOSAIC_SIZE: usize = 16;

/// One cosignature on the wire: signer key plus signature.
pub const COSIGNATURE_SIZE: usize = KEY_SIZE + SIGNATURE_SIZE;

// ---------------------------------------------------------------------------
// Envelope Headers
// ---------------------------------------------------------------------------

/// Standalone header: size, reserved, signature, signer, reserved, version,
/// network, type, fee, deadline.
pub const TRANSACTION_HEADER_SIZE: usize = 4 + 4 + SIGNATURE_SIZE + KEY_SIZE + 4 + 1 + 1 + 2 + 8 + 8;

/// Embedded header: size, reserved, signer, reserved, version, network, type.
pub const EMBEDDED_TRANSACTION_HEADER_SIZE: usize = 4 + 4 + KEY_SIZE + 4 + 1 + 1 + 2;

/// Fixed prefix of an aggregate body: transactions hash, payload size,
/// reserved.
pub const AGGREGATE_BODY_HEADER_SIZE: usize = HASH256_SIZE + 4 + 4;

// ---------------------------------------------------------------------------
// Entity Types
// ---------------------------------------------------------------------------

pub const ENTITY_TYPE_TRANSFER: u16 = 0x4154;
pub const ENTITY_TYPE_MOSAIC_DEFINITION: u16 = 0x414D;
pub const ENTITY_TYPE_MOSAIC_SUPPLY_CHANGE: u16 = 0x424D;
pub const ENTITY_TYPE_NAMESPACE_REGISTRATION: u16 = 0x414E;
pub const ENTITY_TYPE_SECRET_LOCK: u16 = 0x4152;
pub const ENTITY_TYPE_SECRET_PROOF: u16 = 0x4252;
pub const ENTITY_TYPE_HASH_LOCK: u16 = 0x4148;
pub const ENTITY_TYPE_ACCOUNT_METADATA: u16 = 0x4144;
pub const ENTITY_TYPE_MOSAIC_METADATA: u16 = 0x4244;
pub const ENTITY_TYPE_ACCOUNT_ADDRESS_RESTRICTION: u16 = 0x4150;
pub const ENTITY_TYPE_MULTISIG_ACCOUNT_MODIFICATION: u16 = 0x4155;
pub const ENTITY_TYPE_AGGREGATE_COMPLETE: u16 = 0x4141;
pub const ENTITY_TYPE_AGGREGATE_BONDED: u16 = 0x4241;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

pub const NETWORK_MAINNET: u8 = 0x68;
pub const NETWORK_TESTNET: u8 = 0x98;
pub const NETWORK_PRIVATE: u8 = 0x78;
pub const NETWORK_PRIVATE_TEST: u8 = 0xA8;

// ---------------------------------------------------------------------------
// Runtime Configuration
// ---------------------------------------------------------------------------

/// How reserved padding fields are treated on decode.
///
/// Reserved fields are always written as zero. Older payloads in the wild
/// were never checked, so [`ReservedPolicy::Ignore`] is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservedPolicy {
    /// Read and discard, whatever the value.
    #[default]
    Ignore,
    /// Fail with [`crate::CodecError::NonZeroReserved`] unless zero.
    RequireZero,
}

/// Decoder configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Treatment of reserved padding fields.
    #[serde(default)]
    pub reserved_policy: ReservedPolicy,
}

impl CodecConfig {
    /// Configuration that rejects non-zero reserved fields.
    pub fn strict() -> Self {
        Self {
            reserved_policy: ReservedPolicy::RequireZero,
        }
    }
}

/// Returns a friendly name for a network byte, mainly for logging.
pub fn network_name(network: u8) -> String {
    match network {
        NETWORK_MAINNET => "mainnet".to_string(),
        NETWORK_TESTNET => "testnet".to_string(),
        NETWORK_PRIVATE => "private".to_string(),
        NETWORK_PRIVATE_TEST => "private-test".to_string(),
        other => format!("unknown(0x{:02X})", other),
    }
}
