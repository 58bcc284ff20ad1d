//! Rules for multisig aggregate modifications.

use std::collections::BTreeSet;

use nis_state::MultisigLinks;
use nis_transactions::{ModificationKind, Transaction};
use nis_types::{Address, BlockHeight};

use crate::context::ValidationContext;
use crate::result::ValidationResult;
use crate::traits::SingleTransactionValidator;

fn current_links(context: &ValidationContext, address: &Address) -> MultisigLinks {
    context
        .state
        .cache()
        .accounts
        .get(address)
        .map(|account| account.multisig_links.clone())
        .unwrap_or_default()
}

/// Consistency of the individual cosignatory additions and removals.
#[derive(Clone, Debug, Default)]
pub struct MultisigCosignatoryModificationValidator;

impl SingleTransactionValidator for MultisigCosignatoryModificationValidator {
    fn name(&self) -> String {
        "MultisigCosignatoryModificationValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        let Transaction::MultisigAggregateModification(modification) = tx else {
            return ValidationResult::Success;
        };

        let mut added = BTreeSet::new();
        let mut deleted = BTreeSet::new();
        for change in modification.modifications() {
            let set = match change.kind {
                ModificationKind::Add => &mut added,
                ModificationKind::Delete => &mut deleted,
            };
            if !set.insert(&change.cosignatory) {
                return ValidationResult::FailureMultisigModificationRedundantModifications;
            }
        }
        if added.intersection(&deleted).next().is_some() {
            return ValidationResult::FailureConflictingMultisigModification;
        }
        if deleted.len() > 1 {
            return ValidationResult::FailureMultisigModificationMultipleDeletes;
        }

        let multisig = &modification.common.signer.address;
        let links = current_links(context, multisig);
        if !added.is_empty() && links.is_cosignatory() {
            return ValidationResult::FailureMultisigAccountCannotBeCosigner;
        }
        for cosignatory in added {
            if cosignatory == multisig || current_links(context, cosignatory).is_multisig() {
                return ValidationResult::FailureMultisigAccountCannotBeCosigner;
            }
            if links.has_cosignatory(cosignatory) {
                return ValidationResult::FailureMultisigAlreadyACosigner;
            }
        }
        if deleted.iter().any(|cosignatory| !links.has_cosignatory(cosignatory)) {
            return ValidationResult::FailureMultisigNotACosigner;
        }
        ValidationResult::Success
    }
}

/// Cosignatory count and threshold after the modification, simulated on a copy of the links.
///
/// A multisig account with cosignatories left must keep a threshold of at
/// least one. Accounts still carrying a zero threshold have to raise it before
/// any cosignatory can be deleted, since a removal under a zero threshold
/// cannot be undone exactly.
#[derive(Clone, Debug)]
pub struct NumCosignatoryRangeValidator {
    max_cosignatories: usize,
}

impl NumCosignatoryRangeValidator {
    pub fn new(max_cosignatories: usize) -> Self {
        Self { max_cosignatories }
    }
}

impl SingleTransactionValidator for NumCosignatoryRangeValidator {
    fn name(&self) -> String {
        "NumCosignatoryRangeValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        let Transaction::MultisigAggregateModification(modification) = tx else {
            return ValidationResult::Success;
        };

        let mut links = current_links(context, &modification.common.signer.address);
        for change in modification.modifications() {
            match change.kind {
                ModificationKind::Add => {
                    if links.add_cosignatory(change.cosignatory.clone()).is_err() {
                        return ValidationResult::FailureMultisigAccountCannotBeCosigner;
                    }
                }
                ModificationKind::Delete => {
                    if links.min_cosignatories() == 0 {
                        return ValidationResult::FailureMultisigMinCosignatoriesOutOfRange;
                    }
                    links.remove_cosignatory(&change.cosignatory);
                }
            }
        }

        let count = links.cosignatories().len();
        if count > self.max_cosignatories {
            return ValidationResult::FailureTooManyMultisigCosigners;
        }
        if let Some(min_change) = modification.min_cosignatories() {
            if links.increment_min_cosignatories_by(min_change.relative_change).is_err() {
                return ValidationResult::FailureMultisigMinCosignatoriesOutOfRange;
            }
        }
        if count > 0 && links.min_cosignatories() == 0 {
            return ValidationResult::FailureMultisigMinCosignatoriesOutOfRange;
        }
        if links.min_cosignatories() as usize > count {
            return ValidationResult::FailureMultisigMinCosignatoriesOutOfRange;
        }
        ValidationResult::Success
    }
}

/// Threshold changes only exist from the M-of-N fork on.
#[derive(Clone, Debug)]
pub struct MultisigAggregateModificationVersionValidator {
    m_of_n_fork: BlockHeight,
}

impl MultisigAggregateModificationVersionValidator {
    pub fn new(m_of_n_fork: BlockHeight) -> Self {
        Self { m_of_n_fork }
    }
}

impl SingleTransactionValidator for MultisigAggregateModificationVersionValidator {
    fn name(&self) -> String {
        "MultisigAggregateModificationVersionValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        match tx {
            Transaction::MultisigAggregateModification(modification)
                if modification.min_cosignatories().is_some() && context.block_height < self.m_of_n_fork =>
            {
                ValidationResult::FailureMultisigV2AggregateModificationBeforeFork
            }
            _ => ValidationResult::Success,
        }
    }
}
