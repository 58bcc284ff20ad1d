//! Multisig account rules: who may act for a multisig account and when
//! enough approvals are present.

use std::collections::BTreeSet;

use nis_state::{AccountStateCache, MultisigLinks};
use nis_transactions::{Transaction, TransactionKind};
use nis_types::{Address, BlockHeight};

use crate::context::ValidationContext;
use crate::result::ValidationResult;
use crate::traits::SingleTransactionValidator;

fn links_of<'a>(accounts: &'a AccountStateCache, address: &Address) -> Option<&'a MultisigLinks> {
    accounts.get(address).map(|account| &account.multisig_links)
}

/// A multisig account cannot sign ordinary transactions itself. Apply only
/// to top-level transactions; the inner transaction of a wrapper is signed by
/// the multisig account by construction.
#[derive(Clone, Debug, Default)]
pub struct MultisigNonOperationalValidator;

impl SingleTransactionValidator for MultisigNonOperationalValidator {
    fn name(&self) -> String {
        "MultisigNonOperationalValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        if matches!(tx.kind(), TransactionKind::Multisig | TransactionKind::MultisigSignature) {
            return ValidationResult::Success;
        }
        let is_multisig = links_of(&context.state.cache().accounts, &tx.signer().address)
            .is_some_and(MultisigLinks::is_multisig);
        if is_multisig {
            ValidationResult::FailureTransactionNotAllowedForMultisig
        } else {
            ValidationResult::Success
        }
    }
}

/// The signer of a wrapper or an approval must be a cosignatory of the multisig account.
#[derive(Clone, Debug, Default)]
pub struct MultisigCosignerValidator;

impl SingleTransactionValidator for MultisigCosignerValidator {
    fn name(&self) -> String {
        "MultisigCosignerValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        let multisig = match tx {
            Transaction::Multisig(wrapper) => wrapper.multisig(),
            Transaction::MultisigSignature(signature) => &signature.multisig,
            _ => return ValidationResult::Success,
        };
        let is_cosigner = links_of(&context.state.cache().accounts, &tx.signer().address)
            .is_some_and(|links| links.is_cosignatory_of(multisig));
        if is_cosigner {
            ValidationResult::Success
        } else {
            ValidationResult::FailureMultisigNotACosigner
        }
    }
}

/// How to treat a wrapper that does not carry enough approvals yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureRequirement {
    /// Missing approvals are a failure. Used for block inclusion.
    Complete,
    /// Missing approvals are neutral. Used while approvals are still being collected.
    AllowPending,
}

/// Decides whether a multisig wrapper carries enough approvals.
///
/// The initiator's approval is implicit. A cosignatory removed by the inner
/// transaction neither needs to approve nor counts toward the threshold.
/// Thresholds are read from the current links, not from the result of the
/// inner transaction.
#[derive(Clone, Debug)]
pub struct MultisigSignaturesPresentValidator {
    requirement: SignatureRequirement,
    m_of_n_fork: BlockHeight,
}

impl MultisigSignaturesPresentValidator {
    pub fn new(requirement: SignatureRequirement, m_of_n_fork: BlockHeight) -> Self {
        Self { requirement, m_of_n_fork }
    }
}

impl SingleTransactionValidator for MultisigSignaturesPresentValidator {
    fn name(&self) -> String {
        "MultisigSignaturesPresentValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        let Transaction::Multisig(wrapper) = tx else {
            return ValidationResult::Success;
        };
        let Some(links) = links_of(&context.state.cache().accounts, wrapper.multisig()) else {
            return ValidationResult::FailureMultisigNotACosigner;
        };

        let deleted: BTreeSet<&Address> = match wrapper.other_transaction() {
            Transaction::MultisigAggregateModification(modification) => {
                modification.deleted().filter(|address| links.has_cosignatory(address)).collect()
            }
            _ => BTreeSet::new(),
        };

        if wrapper.signers().any(|signer| !links.has_cosignatory(signer)) {
            return ValidationResult::FailureMultisigNotACosigner;
        }
        let approvals = std::iter::once(&wrapper.common.signer.address)
            .chain(wrapper.signers())
            .filter(|signer| !deleted.contains(signer))
            .collect::<BTreeSet<_>>()
            .len();

        let count = links.cosignatories().len();
        let min = links.min_cosignatories() as usize;
        let effective_min = if min == 0 { count } else { min };
        let required = effective_min.min(count - deleted.len());

        if context.block_height < self.m_of_n_fork && required > 1 {
            return ValidationResult::FailureTransactionBeforeSecondFork;
        }
        if approvals >= required {
            return ValidationResult::Success;
        }
        match self.requirement {
            SignatureRequirement::Complete => ValidationResult::FailureMultisigMissingCosigners,
            SignatureRequirement::AllowPending => ValidationResult::Neutral,
        }
    }
}
