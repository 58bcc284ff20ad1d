//! Blocks as seen by the validation core: a signed, ordered list of transactions.

use nis_crypto::{hash_bytes, sign_message, verify_signature};
use nis_types::{Account, Amount, BlockHeight, Hash, NetworkId, PrivateKey, Signature, TimeInstant};
use serde::{Deserialize, Serialize};

use crate::Transaction;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub version: u8,
    pub network: NetworkId,
    pub height: BlockHeight,
    pub timestamp: TimeInstant,
    pub previous_hash: Hash,
    /// The harvester.
    pub signer: Account,
    pub transactions: Vec<Transaction>,
    pub signature: Option<Signature>,
}

impl Block {
    pub fn new(
        network: NetworkId,
        height: BlockHeight,
        timestamp: TimeInstant,
        previous_hash: Hash,
        signer: Account,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self { version: 1, network, height, timestamp, previous_hash, signer, transactions, signature: None }
    }

    /// Format: `version || network_byte || height_le || timestamp_le || previous_hash || signer_key || count_le || tx_hash...`
    pub fn signing_data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(88 + self.transactions.len() * 32);
        data.push(self.version);
        data.push(self.network.version_byte());
        data.extend_from_slice(&self.height.raw().to_le_bytes());
        data.extend_from_slice(&self.timestamp.raw().to_le_bytes());
        data.extend_from_slice(self.previous_hash.as_bytes());
        data.extend_from_slice(self.signer.public_key.as_bytes());
        data.extend_from_slice(&(self.transactions.len() as u32).to_le_bytes());
        for tx in &self.transactions {
            data.extend_from_slice(tx.hash().as_bytes());
        }
        data
    }

    pub fn hash(&self) -> Hash {
        hash_bytes(&self.signing_data())
    }

    pub fn sign(&mut self, private_key: &PrivateKey) {
        self.signature = Some(sign_message(&self.signing_data(), private_key));
    }

    pub fn verify(&self) -> bool {
        self.signature
            .as_ref()
            .is_some_and(|sig| verify_signature(&self.signing_data(), sig, &self.signer.public_key))
    }

    /// Sum of all fees paid in the block, including child transactions.
    pub fn total_fee(&self) -> Amount {
        self.transactions
            .iter()
            .fold(Amount::ZERO, |total, tx| total.saturating_add(tx.total_fee()))
    }
}
