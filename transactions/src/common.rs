//! Fields shared by every transaction kind.

use nis_types::{Account, Amount, NetworkId, Signature, TimeInstant};
use serde::{Deserialize, Serialize};

/// Default validity window of a freshly built transaction.
pub const DEFAULT_DEADLINE_HOURS: i64 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCommon {
    pub version: u8,
    pub network: NetworkId,
    pub timestamp: TimeInstant,
    pub deadline: TimeInstant,
    pub signer: Account,
    pub fee: Amount,
    /// Absent until signed. Never part of the hash.
    pub signature: Option<Signature>,
}

impl TransactionCommon {
    pub fn new(network: NetworkId, signer: Account, timestamp: TimeInstant) -> Self {
        Self {
            version: 1,
            network,
            timestamp,
            deadline: timestamp.add_hours(DEFAULT_DEADLINE_HOURS),
            signer,
            fee: Amount::ZERO,
            signature: None,
        }
    }

    pub fn with_deadline(mut self, deadline: TimeInstant) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_fee(mut self, fee: Amount) -> Self {
        self.fee = fee;
        self
    }

    /// Canonical prefix of the signed data.
    ///
    /// Format: `type_tag_le || version || network_byte || timestamp_le || signer_key || fee_le || deadline_le`
    pub(crate) fn write_signing_data(&self, type_tag: u32, data: &mut Vec<u8>) {
        data.extend_from_slice(&type_tag.to_le_bytes());
        data.push(self.version);
        data.push(self.network.version_byte());
        data.extend_from_slice(&self.timestamp.raw().to_le_bytes());
        data.extend_from_slice(self.signer.public_key.as_bytes());
        data.extend_from_slice(&self.fee.micro().to_le_bytes());
        data.extend_from_slice(&self.deadline.raw().to_le_bytes());
    }
}

/// Length-prefixed string field.
pub(crate) fn write_str(data: &mut Vec<u8>, value: &str) {
    data.extend_from_slice(&(value.len() as u32).to_le_bytes());
    data.extend_from_slice(value.as_bytes());
}

/// Length-prefixed byte field.
pub(crate) fn write_bytes(data: &mut Vec<u8>, value: &[u8]) {
    data.extend_from_slice(&(value.len() as u32).to_le_bytes());
    data.extend_from_slice(value);
}
