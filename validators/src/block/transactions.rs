//! Block-level rules over the contained transactions.

use std::collections::{BTreeMap, BTreeSet};

use nis_transactions::{Block, Transaction};
use nis_types::Address;

use crate::result::ValidationResult;
use crate::traits::BlockValidator;

/// The harvester may not include transactions it signed, directly or as a child.
#[derive(Clone, Debug, Default)]
pub struct NoSelfSignedTransactionsBlockValidator;

impl BlockValidator for NoSelfSignedTransactionsBlockValidator {
    fn name(&self) -> String {
        "NoSelfSignedTransactionsBlockValidator".into()
    }

    fn validate(&self, block: &Block) -> ValidationResult {
        let harvester = &block.signer.public_key;
        let self_signed = block.transactions.iter().any(|tx| {
            tx.signer().public_key == *harvester
                || tx.child_transactions().iter().any(|child| child.signer().public_key == *harvester)
        });
        if self_signed {
            ValidationResult::FailureSelfSignedTransaction
        } else {
            ValidationResult::Success
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BlockUniqueHashTransactionValidator;

impl BlockValidator for BlockUniqueHashTransactionValidator {
    fn name(&self) -> String {
        "BlockUniqueHashTransactionValidator".into()
    }

    fn validate(&self, block: &Block) -> ValidationResult {
        let mut hashes = BTreeSet::new();
        if block.transactions.iter().all(|tx| hashes.insert(tx.hash())) {
            ValidationResult::Success
        } else {
            ValidationResult::FailureTransactionDuplicateInChain
        }
    }
}

/// At most one aggregate modification per multisig account and block.
#[derive(Clone, Debug, Default)]
pub struct BlockMultisigAggregateModificationValidator;

impl BlockMultisigAggregateModificationValidator {
    fn modified_account(tx: &Transaction) -> Option<&Address> {
        match tx {
            Transaction::MultisigAggregateModification(modification) => Some(&modification.common.signer.address),
            Transaction::Multisig(wrapper) => match wrapper.other_transaction() {
                Transaction::MultisigAggregateModification(modification) => Some(&modification.common.signer.address),
                _ => None,
            },
            _ => None,
        }
    }
}

impl BlockValidator for BlockMultisigAggregateModificationValidator {
    fn name(&self) -> String {
        "BlockMultisigAggregateModificationValidator".into()
    }

    fn validate(&self, block: &Block) -> ValidationResult {
        let mut counts: BTreeMap<&Address, usize> = BTreeMap::new();
        for account in block.transactions.iter().filter_map(Self::modified_account) {
            let count = counts.entry(account).or_default();
            *count += 1;
            if *count > 1 {
                return ValidationResult::FailureConflictingMultisigModification;
            }
        }
        ValidationResult::Success
    }
}

/// Approvals travel inside their multisig wrapper, never on their own.
#[derive(Clone, Debug, Default)]
pub struct BlockMultisigSignaturesAttachedValidator;

impl BlockValidator for BlockMultisigSignaturesAttachedValidator {
    fn name(&self) -> String {
        "BlockMultisigSignaturesAttachedValidator".into()
    }

    fn validate(&self, block: &Block) -> ValidationResult {
        if block.transactions.iter().any(|tx| matches!(tx, Transaction::MultisigSignature(_))) {
            ValidationResult::FailureMultisigNoMatchingMultisig
        } else {
            ValidationResult::Success
        }
    }
}
