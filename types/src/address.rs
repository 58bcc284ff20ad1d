//! Account addresses and signer accounts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::NisError;
use crate::keys::PublicKey;
use crate::network::NetworkId;

/// A 40-character account address.
///
/// The first character identifies the network (`N`, `T` or `M`); the rest is the
/// base32 encoding of the public-key digest and checksum. Derivation lives in
/// `nis_crypto::address`; this type only guarantees the textual shape.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Number of characters in an encoded address.
    pub const ENCODED_LEN: usize = 40;

    /// Parse an encoded address, checking length, network prefix and alphabet.
    pub fn parse(raw: &str) -> Result<Self, NisError> {
        let candidate = Self(raw.to_ascii_uppercase());
        if candidate.is_valid() {
            Ok(candidate)
        } else {
            Err(NisError::InvalidAddress(raw.to_string()))
        }
    }

    /// Wrap an already-encoded address without re-validating it.
    pub fn from_encoded_unchecked(encoded: String) -> Self {
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The network this address belongs to, if the prefix is known.
    pub fn network(&self) -> Option<NetworkId> {
        self.0.chars().next().and_then(NetworkId::from_address_prefix)
    }

    pub fn is_valid(&self) -> bool {
        self.0.len() == Self::ENCODED_LEN
            && self.network().is_some()
            && self.0.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transaction signer: an address together with the public key that controls it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    pub public_key: PublicKey,
}

impl Account {
    pub fn new(address: Address, public_key: PublicKey) -> Self {
        Self { address, public_key }
    }
}
