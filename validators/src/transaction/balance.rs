//! Balance sufficiency over a transaction's effects.
//!
//! Effects are replayed in order while tallying a running net delta per
//! account, so a credit earlier in the list can fund a later debit.

use std::collections::BTreeMap;

use nis_transactions::{Effect, MosaicSupplyType, Transaction};
use nis_types::{Address, Amount, MosaicId, Quantity};

use crate::context::ValidationContext;
use crate::result::ValidationResult;
use crate::traits::SingleTransactionValidator;

/// Running per-key net change. A debit that leaves a deficit is only allowed
/// when `can_cover(key, deficit)` holds.
struct Tally<K: Ord> {
    deltas: BTreeMap<K, i128>,
}

impl<K: Ord + Clone> Tally<K> {
    fn new() -> Self {
        Self { deltas: BTreeMap::new() }
    }

    fn credit(&mut self, key: &K, amount: u64) {
        *self.deltas.entry(key.clone()).or_default() += i128::from(amount);
    }

    fn debit(&mut self, key: &K, amount: u64, can_cover: impl FnOnce(&K, u64) -> bool) -> bool {
        let delta = self.deltas.entry(key.clone()).or_default();
        *delta -= i128::from(amount);
        if *delta >= 0 {
            return true;
        }
        u64::try_from(-*delta).is_ok_and(|deficit| can_cover(key, deficit))
    }
}

#[derive(Clone, Debug, Default)]
pub struct BalanceValidator;

impl SingleTransactionValidator for BalanceValidator {
    fn name(&self) -> String {
        "BalanceValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        let mut tally = Tally::<Address>::new();
        let can_cover = |address: &Address, deficit: u64| context.state.can_debit(address, Amount::new(deficit));
        for effect in tx.effects() {
            let covered = match &effect {
                Effect::BalanceTransfer { sender, recipient, amount } => {
                    let covered = tally.debit(sender, amount.micro(), can_cover);
                    tally.credit(recipient, amount.micro());
                    covered
                }
                Effect::BalanceDebit { account, amount } => tally.debit(account, amount.micro(), can_cover),
                Effect::BalanceCredit { account, amount } => {
                    tally.credit(account, amount.micro());
                    true
                }
                _ => true,
            };
            if !covered {
                return ValidationResult::FailureInsufficientBalance;
            }
        }
        ValidationResult::Success
    }
}

/// The mosaic counterpart of [`BalanceValidator`]; supply deletes debit the supplier.
#[derive(Clone, Debug, Default)]
pub struct MosaicBalanceValidator;

impl SingleTransactionValidator for MosaicBalanceValidator {
    fn name(&self) -> String {
        "MosaicBalanceValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        let mut tally = Tally::<(Address, MosaicId)>::new();
        let can_cover = |(address, id): &(Address, MosaicId), deficit: u64| {
            context.state.can_debit_mosaic(address, id, Quantity::new(deficit))
        };
        for effect in tx.effects() {
            let covered = match effect {
                Effect::MosaicTransfer { sender, recipient, mosaic_id, quantity } => {
                    let covered = tally.debit(&(sender, mosaic_id.clone()), quantity.raw(), can_cover);
                    tally.credit(&(recipient, mosaic_id), quantity.raw());
                    covered
                }
                Effect::MosaicSupplyChange { supplier, mosaic_id, supply_type, delta } => match supply_type {
                    MosaicSupplyType::Delete => tally.debit(&(supplier, mosaic_id), delta.raw(), can_cover),
                    MosaicSupplyType::Create => {
                        tally.credit(&(supplier, mosaic_id), delta.raw());
                        true
                    }
                },
                _ => true,
            };
            if !covered {
                return ValidationResult::FailureInsufficientBalance;
            }
        }
        ValidationResult::Success
    }
}
