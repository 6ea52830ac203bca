//! SHA3-256 merkle root over embedded transactions.
//!
//! Aggregates commit to their contents through `transactions_hash`. The
//! codec never checks it on decode; it only offers the computation so that
//! builders and tools can fill the field in or compare against it.

use sha3::{Digest, Sha3_256};

use crate::envelope::EmbeddedTransaction;
use crate::error::CodecResult;
use crate::primitives::Hash256;

/// SHA3-256 of `data`.
pub fn sha3_256(data: &[u8]) -> Hash256 {
    Hash256::new(Sha3_256::digest(data).into())
}

fn hash_pair(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut hasher = Sha3_256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Hash256::new(hasher.finalize().into())
}

/// Binary merkle root over `leaves`.
///
/// An empty list gives the all-zero hash and a single leaf is its own root.
/// On levels with an odd count, the last node is paired with itself.
pub fn merkle_root(leaves: &[Hash256]) -> Hash256 {
    if leaves.is_empty() {
        return Hash256::default();
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = &pair[0];
                hash_pair(left, pair.get(1).unwrap_or(left))
            })
            .collect();
    }
    level[0]
}

/// Merkle root whose leaves are the SHA3-256 hashes of each transaction's
/// encoded bytes.
pub fn transactions_hash(transactions: &[EmbeddedTransaction]) -> CodecResult<Hash256> {
    let leaves = transactions
        .iter()
        .map(|tx| tx.to_bytes().map(|bytes| sha3_256(&bytes)))
        .collect::<CodecResult<Vec<_>>>()?;
    Ok(merkle_root(&leaves))
}
