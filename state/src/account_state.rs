//! Per-account state.

use nis_types::{Address, Amount, BlockHeight};
use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::multisig_links::MultisigLinks;
use crate::remote_links::RemoteLinks;
use crate::weighted_balances::WeightedBalances;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub address: Address,
    pub balance: Amount,
    pub weighted_balances: WeightedBalances,
    pub multisig_links: MultisigLinks,
    pub remote_links: RemoteLinks,
    /// Height at which the account was first seen.
    pub height: Option<BlockHeight>,
    /// Number of applied transactions that touched this account.
    pub reference_count: u32,
}

impl AccountState {
    pub fn new(address: Address, blocks_per_day: u64) -> Self {
        Self {
            address,
            balance: Amount::ZERO,
            weighted_balances: WeightedBalances::new(blocks_per_day),
            multisig_links: MultisigLinks::new(),
            remote_links: RemoteLinks::new(),
            height: None,
            reference_count: 0,
        }
    }

    pub fn credit(&mut self, amount: Amount) -> Result<(), StateError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(StateError::Overflow("account balance"))?;
        Ok(())
    }

    pub fn debit(&mut self, amount: Amount) -> Result<(), StateError> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(StateError::InsufficientBalance { needed: amount, available: self.balance })?;
        Ok(())
    }

    pub fn increment_reference_count(&mut self) {
        self.reference_count = self.reference_count.saturating_add(1);
    }

    /// Returns the remaining count.
    pub fn decrement_reference_count(&mut self) -> Result<u32, StateError> {
        self.reference_count = self
            .reference_count
            .checked_sub(1)
            .ok_or_else(|| StateError::ReferenceCountUnderflow(self.address.clone()))?;
        Ok(self.reference_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_account() -> AccountState {
        AccountState::new(Address::from_encoded_unchecked(format!("T{}", "A".repeat(39))), 1440)
    }

    #[test]
    fn new_account_is_empty() {
        let account = dummy_account();
        assert_eq!(account.balance, Amount::ZERO);
        assert_eq!(account.reference_count, 0);
        assert!(account.height.is_none());
        assert!(account.weighted_balances.is_empty());
    }

    #[test]
    fn debit_beyond_balance_fails() {
        let mut account = dummy_account();
        account.credit(Amount::from_nem(5)).unwrap();
        assert!(account.debit(Amount::from_nem(6)).is_err());
        account.debit(Amount::from_nem(5)).unwrap();
        assert_eq!(account.balance, Amount::ZERO);
    }

    #[test]
    fn reference_count_underflow_is_an_error() {
        let mut account = dummy_account();
        account.increment_reference_count();
        assert_eq!(account.decrement_reference_count().unwrap(), 0);
        assert!(matches!(
            account.decrement_reference_count(),
            Err(StateError::ReferenceCountUnderflow(_))
        ));
    }
}
