//! Cosignatory approval of a pending multisig transaction.

use std::cmp::Ordering;

use nis_types::{Address, Hash};
use serde::{Deserialize, Serialize};

use crate::common::{write_str, TransactionCommon};
use crate::effect::Effect;

/// A cosignatory's approval of the transaction with hash `other_hash`,
/// paid for by the `multisig` account.
///
/// Equality and ordering consider only the signer address and the approved
/// hash, so a set holds at most one approval per signer and transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisigSignatureTransaction {
    pub common: TransactionCommon,
    pub other_hash: Hash,
    pub multisig: Address,
}

impl MultisigSignatureTransaction {
    pub fn new(common: TransactionCommon, other_hash: Hash, multisig: Address) -> Self {
        Self { common, other_hash, multisig }
    }

    fn key(&self) -> (&Address, &Hash) {
        (&self.common.signer.address, &self.other_hash)
    }

    pub(crate) fn write_signing_data(&self, data: &mut Vec<u8>) {
        data.extend_from_slice(self.other_hash.as_bytes());
        write_str(data, self.multisig.as_str());
    }

    pub(crate) fn effects(&self) -> Vec<Effect> {
        vec![Effect::BalanceDebit { account: self.multisig.clone(), amount: self.common.fee }]
    }
}

impl PartialEq for MultisigSignatureTransaction {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for MultisigSignatureTransaction {}

impl PartialOrd for MultisigSignatureTransaction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MultisigSignatureTransaction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
