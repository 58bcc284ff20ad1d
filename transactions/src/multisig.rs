//! Multisig wrapper: a transaction initiated by one cosignatory on behalf of a
//! multisig account, collecting approvals from the others.

use std::collections::BTreeSet;

use nis_types::{Address, Hash};
use serde::{Deserialize, Serialize};

use crate::common::{write_bytes, TransactionCommon};
use crate::effect::Effect;
use crate::error::TransactionError;
use crate::multisig_signature::MultisigSignatureTransaction;
use crate::Transaction;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigTransaction {
    pub common: TransactionCommon,
    other_transaction: Box<Transaction>,
    signatures: BTreeSet<MultisigSignatureTransaction>,
}

impl MultisigTransaction {
    pub fn new(common: TransactionCommon, other_transaction: Transaction) -> Self {
        Self { common, other_transaction: Box::new(other_transaction), signatures: BTreeSet::new() }
    }

    pub fn other_transaction(&self) -> &Transaction {
        &self.other_transaction
    }

    pub fn other_transaction_hash(&self) -> Hash {
        self.other_transaction.hash()
    }

    /// The multisig account on whose behalf the inner transaction acts.
    pub fn multisig(&self) -> &Address {
        &self.other_transaction.signer().address
    }

    /// Attach a cosignatory approval.
    ///
    /// Approvals from the initiator and repeated approvals from the same
    /// cosignatory are ignored; the first one wins.
    pub fn add_signature(&mut self, signature: MultisigSignatureTransaction) -> Result<(), TransactionError> {
        let expected = self.other_transaction_hash();
        if signature.other_hash != expected {
            return Err(TransactionError::SignatureHashMismatch { expected, actual: signature.other_hash });
        }
        if &signature.multisig != self.multisig() {
            return Err(TransactionError::SignatureDebtorMismatch {
                expected: self.multisig().to_string(),
                actual: signature.multisig.to_string(),
            });
        }
        if signature.common.signer.address == self.common.signer.address {
            return Ok(());
        }
        if self.signers().any(|s| s == &signature.common.signer.address) {
            return Ok(());
        }
        self.signatures.insert(signature);
        Ok(())
    }

    /// Attached approvals in signer order.
    pub fn cosigner_signatures(&self) -> impl Iterator<Item = &MultisigSignatureTransaction> {
        self.signatures.iter()
    }

    /// Addresses of the attached approvals; never includes the initiator.
    pub fn signers(&self) -> impl Iterator<Item = &Address> {
        self.signatures.iter().map(|s| &s.common.signer.address)
    }

    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Wrapper signature and every attached approval must verify.
    pub(crate) fn verify_cosignatures(&self) -> bool {
        self.signatures
            .iter()
            .all(|s| Transaction::MultisigSignature(s.clone()).verify())
    }

    pub(crate) fn write_signing_data(&self, data: &mut Vec<u8>) {
        write_bytes(data, &self.other_transaction.signing_data());
    }

    pub(crate) fn effects(&self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self.signatures.iter().flat_map(|s| s.effects()).collect();
        effects.extend(self.other_transaction.effects());
        effects.push(Effect::BalanceDebit { account: self.multisig().clone(), amount: self.common.fee });
        effects
    }
}
