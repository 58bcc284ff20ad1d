//! Network identifier.

use serde::{Deserialize, Serialize};

/// Identifies which network an address or transaction belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production network.
    Main,
    /// The public test network.
    Test,
    /// Private deployments.
    Mijin,
}

impl NetworkId {
    /// Version byte mixed into addresses and transaction versions.
    pub fn version_byte(&self) -> u8 {
        match self {
            Self::Main => 0x68,
            Self::Test => 0x98,
            Self::Mijin => 0x60,
        }
    }

    /// First character of every encoded address on this network.
    pub fn address_prefix(&self) -> char {
        match self {
            Self::Main => 'N',
            Self::Test => 'T',
            Self::Mijin => 'M',
        }
    }

    pub fn from_address_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'N' => Some(Self::Main),
            'T' => Some(Self::Test),
            'M' => Some(Self::Mijin),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Test => "test",
            Self::Mijin => "mijin",
        }
    }
}
