//! Blake2b hashing for transactions and blocks.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use nis_types::Hash;

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b digest of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Hash multiple byte slices in sequence without concatenating them.
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Hash a canonical byte layout into a [`Hash`].
pub fn hash_bytes(bytes: &[u8]) -> Hash {
    Hash::new(blake2b_256(bytes))
}
