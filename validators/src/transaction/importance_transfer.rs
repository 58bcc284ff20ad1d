//! Remote harvesting rules.

use nis_state::{AccountStateCache, ImportanceTransferMode, RemoteStatus};
use nis_transactions::{Transaction, TransactionKind};
use nis_types::{Address, BlockHeight};

use crate::context::ValidationContext;
use crate::result::ValidationResult;
use crate::traits::SingleTransactionValidator;

fn status_of(accounts: &AccountStateCache, address: &Address, height: BlockHeight, delay: u64) -> RemoteStatus {
    accounts
        .get(address)
        .map_or(RemoteStatus::NotSet, |account| account.remote_links.remote_status(height, delay))
}

/// Activation and deactivation preconditions of importance transfers.
#[derive(Clone, Debug)]
pub struct ImportanceTransferTransactionValidator {
    delay: u64,
}

impl ImportanceTransferTransactionValidator {
    pub fn new(remote_harvesting_delay: u64) -> Self {
        Self { delay: remote_harvesting_delay }
    }

    fn validate_activate(&self, accounts: &AccountStateCache, signer: &Address, remote: &Address, height: BlockHeight) -> ValidationResult {
        let remote_in_use = accounts.get(remote).is_some_and(|account| {
            !account.balance.is_zero() || account.multisig_links.is_multisig() || account.multisig_links.is_cosignatory()
        });
        if remote_in_use {
            return ValidationResult::FailureDestinationAccountHasPreexistingBalanceTransfer;
        }

        for address in [signer, remote] {
            match status_of(accounts, address, height, self.delay) {
                RemoteStatus::OwnerActivating
                | RemoteStatus::OwnerDeactivating
                | RemoteStatus::RemoteActivating
                | RemoteStatus::RemoteDeactivating => return ValidationResult::FailureImportanceTransferInProgress,
                RemoteStatus::OwnerActive | RemoteStatus::RemoteActive => {
                    return ValidationResult::FailureImportanceTransferNeedsToBeDeactivated
                }
                RemoteStatus::NotSet | RemoteStatus::OwnerInactive | RemoteStatus::RemoteInactive => {}
            }
        }
        ValidationResult::Success
    }

    fn validate_deactivate(&self, accounts: &AccountStateCache, signer: &Address, remote: &Address, height: BlockHeight) -> ValidationResult {
        match status_of(accounts, signer, height, self.delay) {
            RemoteStatus::OwnerActive => {
                let linked_to_remote = accounts
                    .get(signer)
                    .and_then(|account| account.remote_links.current())
                    .is_some_and(|link| link.address == *remote);
                if linked_to_remote {
                    ValidationResult::Success
                } else {
                    ValidationResult::FailureImportanceTransferIsNotActive
                }
            }
            RemoteStatus::OwnerActivating | RemoteStatus::OwnerDeactivating => {
                ValidationResult::FailureImportanceTransferInProgress
            }
            _ => ValidationResult::FailureImportanceTransferIsNotActive,
        }
    }
}

impl SingleTransactionValidator for ImportanceTransferTransactionValidator {
    fn name(&self) -> String {
        "ImportanceTransferTransactionValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        let Transaction::ImportanceTransfer(transfer) = tx else {
            return ValidationResult::Success;
        };
        let accounts = &context.state.cache().accounts;
        let signer = &transfer.common.signer.address;
        match transfer.mode {
            ImportanceTransferMode::Activate => {
                self.validate_activate(accounts, signer, &transfer.remote, context.block_height)
            }
            ImportanceTransferMode::Deactivate => {
                self.validate_deactivate(accounts, signer, &transfer.remote, context.block_height)
            }
        }
    }
}

/// Remote harvesting proxies may not take part in transactions while their
/// link is in effect. Importance transfers only check the signer.
#[derive(Clone, Debug)]
pub struct RemoteNonOperationalValidator {
    delay: u64,
}

impl RemoteNonOperationalValidator {
    pub fn new(remote_harvesting_delay: u64) -> Self {
        Self { delay: remote_harvesting_delay }
    }
}

impl SingleTransactionValidator for RemoteNonOperationalValidator {
    fn name(&self) -> String {
        "RemoteNonOperationalValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        let accounts = &context.state.cache().accounts;
        let checked = match tx.kind() {
            TransactionKind::ImportanceTransfer => vec![tx.signer().address.clone()],
            _ => tx.accounts(),
        };
        let remote_in_use = checked.iter().any(|address| {
            matches!(
                status_of(accounts, address, context.block_height, self.delay),
                RemoteStatus::RemoteActivating | RemoteStatus::RemoteActive | RemoteStatus::RemoteDeactivating
            )
        });
        if remote_in_use {
            ValidationResult::FailureTransactionNotAllowedForRemote
        } else {
            ValidationResult::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{address, common, context, funded, transfer, HEIGHT};
    use nis_state::{NisCache, RemoteLink, RemoteLinkOwner};
    use nis_transactions::ImportanceTransferTransaction;

    const DELAY: u64 = 10;

    fn link(cache: &mut NisCache, owner: u8, remote: u8, height: u64, mode: ImportanceTransferMode) {
        let effective_height = BlockHeight::new(height);
        cache.accounts.find_or_create(&address(owner)).remote_links.add_link(RemoteLink {
            address: address(remote),
            effective_height,
            mode,
            owner: RemoteLinkOwner::HarvestingRemotely,
        });
        cache.accounts.find_or_create(&address(remote)).remote_links.add_link(RemoteLink {
            address: address(owner),
            effective_height,
            mode,
            owner: RemoteLinkOwner::RemoteHarvester,
        });
    }

    fn importance(signer: u8, remote: u8, mode: ImportanceTransferMode) -> Transaction {
        Transaction::ImportanceTransfer(ImportanceTransferTransaction::new(common(signer), address(remote), mode))
    }

    fn check(cache: &NisCache, tx: Transaction) -> ValidationResult {
        ImportanceTransferTransactionValidator::new(DELAY).validate(&tx, &context(cache))
    }

    #[test]
    fn fresh_activation_passes() {
        let cache = funded(&[(1, 100)]);
        assert_eq!(check(&cache, importance(1, 2, ImportanceTransferMode::Activate)), ValidationResult::Success);
    }

    #[test]
    fn activation_to_funded_remote_fails() {
        let cache = funded(&[(1, 100), (2, 1)]);
        assert_eq!(
            check(&cache, importance(1, 2, ImportanceTransferMode::Activate)),
            ValidationResult::FailureDestinationAccountHasPreexistingBalanceTransfer
        );
    }

    #[test]
    fn activation_while_pending_is_in_progress() {
        let mut cache = funded(&[(1, 100)]);
        link(&mut cache, 1, 2, HEIGHT - DELAY + 1, ImportanceTransferMode::Activate);
        assert_eq!(
            check(&cache, importance(1, 3, ImportanceTransferMode::Activate)),
            ValidationResult::FailureImportanceTransferInProgress
        );
    }

    #[test]
    fn activation_while_active_needs_deactivation() {
        let mut cache = funded(&[(1, 100)]);
        link(&mut cache, 1, 2, HEIGHT - DELAY, ImportanceTransferMode::Activate);
        assert_eq!(
            check(&cache, importance(1, 3, ImportanceTransferMode::Activate)),
            ValidationResult::FailureImportanceTransferNeedsToBeDeactivated
        );
    }

    #[test]
    fn activation_to_someone_elses_remote_fails() {
        let mut cache = funded(&[(1, 100), (4, 100)]);
        link(&mut cache, 4, 2, 1, ImportanceTransferMode::Activate);
        assert_eq!(
            check(&cache, importance(1, 2, ImportanceTransferMode::Activate)),
            ValidationResult::FailureImportanceTransferNeedsToBeDeactivated
        );
    }

    #[test]
    fn reactivation_after_deactivation_passes() {
        let mut cache = funded(&[(1, 100)]);
        link(&mut cache, 1, 2, 1, ImportanceTransferMode::Activate);
        link(&mut cache, 1, 2, HEIGHT - DELAY, ImportanceTransferMode::Deactivate);
        assert_eq!(check(&cache, importance(1, 2, ImportanceTransferMode::Activate)), ValidationResult::Success);
    }

    #[test]
    fn deactivation_requires_active_link() {
        let cache = funded(&[(1, 100)]);
        assert_eq!(
            check(&cache, importance(1, 2, ImportanceTransferMode::Deactivate)),
            ValidationResult::FailureImportanceTransferIsNotActive
        );

        let mut cache = funded(&[(1, 100)]);
        link(&mut cache, 1, 2, HEIGHT - 1, ImportanceTransferMode::Activate);
        assert_eq!(
            check(&cache, importance(1, 2, ImportanceTransferMode::Deactivate)),
            ValidationResult::FailureImportanceTransferInProgress
        );

        let mut cache = funded(&[(1, 100)]);
        link(&mut cache, 1, 2, 1, ImportanceTransferMode::Activate);
        assert_eq!(check(&cache, importance(1, 2, ImportanceTransferMode::Deactivate)), ValidationResult::Success);
        assert_eq!(
            check(&cache, importance(1, 3, ImportanceTransferMode::Deactivate)),
            ValidationResult::FailureImportanceTransferIsNotActive
        );
    }

    #[test]
    fn active_remote_cannot_transact() {
        let mut cache = funded(&[(1, 100), (3, 100)]);
        link(&mut cache, 1, 2, 1, ImportanceTransferMode::Activate);
        let validator = RemoteNonOperationalValidator::new(DELAY);
        assert_eq!(
            validator.validate(&transfer(2, 3, 1, 1), &context(&cache)),
            ValidationResult::FailureTransactionNotAllowedForRemote
        );
        assert_eq!(
            validator.validate(&transfer(3, 2, 1, 1), &context(&cache)),
            ValidationResult::FailureTransactionNotAllowedForRemote
        );
        assert_eq!(validator.validate(&transfer(1, 3, 1, 1), &context(&cache)), ValidationResult::Success);
    }

    #[test]
    fn inactive_remote_may_transact() {
        let mut cache = funded(&[(1, 100), (3, 100)]);
        link(&mut cache, 1, 2, 1, ImportanceTransferMode::Activate);
        link(&mut cache, 1, 2, 2, ImportanceTransferMode::Deactivate);
        let validator = RemoteNonOperationalValidator::new(DELAY);
        assert_eq!(validator.validate(&transfer(2, 3, 1, 1), &context(&cache)), ValidationResult::Success);
    }

    #[test]
    fn importance_transfer_only_checks_signer() {
        let mut cache = funded(&[(1, 100), (4, 100)]);
        link(&mut cache, 1, 2, 1, ImportanceTransferMode::Activate);
        let validator = RemoteNonOperationalValidator::new(DELAY);
        assert_eq!(
            validator.validate(&importance(1, 2, ImportanceTransferMode::Deactivate), &context(&cache)),
            ValidationResult::Success
        );
    }
}
