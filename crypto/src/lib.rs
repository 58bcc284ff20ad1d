//! Cryptographic collaborators for the NIS core.
//!
//! - **Ed25519** for signing and signature verification
//! - **Blake2b-256** for transaction and block hashes
//! - Address derivation: network byte + key digest + checksum, base32 encoded

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{account_from_public_key, derive_address, validate_address};
pub use hash::{blake2b_256, blake2b_256_multi, hash_bytes};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
