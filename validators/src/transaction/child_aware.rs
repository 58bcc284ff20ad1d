use nis_transactions::Transaction;

use crate::context::ValidationContext;
use crate::result::{aggregate, ValidationResult};
use crate::traits::SingleTransactionValidator;

/// Runs the inner validator on a transaction and then on each of its children
/// (attached approvals, then the inner transaction of a multisig wrapper).
pub struct ChildAwareSingleTransactionValidator {
    inner: Box<dyn SingleTransactionValidator>,
}

impl ChildAwareSingleTransactionValidator {
    pub fn new(inner: impl SingleTransactionValidator + 'static) -> Self {
        Self { inner: Box::new(inner) }
    }
}

impl SingleTransactionValidator for ChildAwareSingleTransactionValidator {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        let children = tx.child_transactions();
        let results = std::iter::once(tx)
            .chain(children.iter())
            .map(|candidate| self.inner.validate(candidate, context));
        aggregate(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{common, transfer};
    use nis_transactions::{MultisigTransaction, TransactionKind};
    use std::sync::{Arc, Mutex};

    struct Recording {
        seen: Arc<Mutex<Vec<TransactionKind>>>,
        fail_on: Option<TransactionKind>,
    }

    impl SingleTransactionValidator for Recording {
        fn name(&self) -> String {
            "Recording".into()
        }

        fn validate(&self, tx: &Transaction, _context: &ValidationContext) -> ValidationResult {
            self.seen.lock().unwrap().push(tx.kind());
            if Some(tx.kind()) == self.fail_on {
                ValidationResult::FailureUnknown
            } else {
                ValidationResult::Success
            }
        }
    }

    #[test]
    fn visits_outer_then_children() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let validator = ChildAwareSingleTransactionValidator::new(Recording { seen: Arc::clone(&seen), fail_on: None });
        let wrapper = Transaction::Multisig(MultisigTransaction::new(common(2), transfer(1, 3, 1, 1)));

        assert_eq!(validator.validate(&wrapper, &ValidationContext::default()), ValidationResult::Success);
        assert_eq!(*seen.lock().unwrap(), vec![TransactionKind::Multisig, TransactionKind::Transfer]);
    }

    #[test]
    fn outer_failure_skips_children() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let validator = ChildAwareSingleTransactionValidator::new(Recording {
            seen: Arc::clone(&seen),
            fail_on: Some(TransactionKind::Multisig),
        });
        let wrapper = Transaction::Multisig(MultisigTransaction::new(common(2), transfer(1, 3, 1, 1)));

        assert_eq!(validator.validate(&wrapper, &ValidationContext::default()), ValidationResult::FailureUnknown);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn child_failure_is_reported() {
        let validator = ChildAwareSingleTransactionValidator::new(Recording {
            seen: Arc::new(Mutex::new(Vec::new())),
            fail_on: Some(TransactionKind::Transfer),
        });
        let wrapper = Transaction::Multisig(MultisigTransaction::new(common(2), transfer(1, 3, 1, 1)));
        assert_eq!(validator.validate(&wrapper, &ValidationContext::default()), ValidationResult::FailureUnknown);
    }
}
