//! Account and mosaic caches.
//!
//! Accounts live in an arena vector indexed by address. Cloning the whole
//! [`NisCache`] is the copy operation used for speculative validation.

use std::collections::BTreeMap;

use nis_types::{Address, Amount, BlockHeight, MosaicId, Quantity};
use serde::{Deserialize, Serialize};

use crate::account_state::AccountState;
use crate::error::StateError;
use crate::mosaics::MosaicCache;
use crate::weighted_balances::DEFAULT_BLOCKS_PER_DAY;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStateCache {
    accounts: Vec<AccountState>,
    index: BTreeMap<Address, usize>,
    blocks_per_day: u64,
}

impl Default for AccountStateCache {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKS_PER_DAY)
    }
}

impl AccountStateCache {
    pub fn new(blocks_per_day: u64) -> Self {
        Self { accounts: Vec::new(), index: BTreeMap::new(), blocks_per_day }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.index.contains_key(address)
    }

    pub fn get(&self, address: &Address) -> Option<&AccountState> {
        self.index.get(address).map(|&i| &self.accounts[i])
    }

    pub fn get_mut(&mut self, address: &Address) -> Result<&mut AccountState, StateError> {
        match self.index.get(address) {
            Some(&i) => Ok(&mut self.accounts[i]),
            None => Err(StateError::UnknownAccount(address.clone())),
        }
    }

    pub fn find_or_create(&mut self, address: &Address) -> &mut AccountState {
        let i = match self.index.get(address) {
            Some(&i) => i,
            None => {
                self.accounts.push(AccountState::new(address.clone(), self.blocks_per_day));
                let i = self.accounts.len() - 1;
                self.index.insert(address.clone(), i);
                i
            }
        };
        &mut self.accounts[i]
    }

    /// Remove an account, moving the last arena slot into its place.
    pub fn remove(&mut self, address: &Address) -> Option<AccountState> {
        let i = self.index.remove(address)?;
        let removed = self.accounts.swap_remove(i);
        if let Some(moved) = self.accounts.get(i) {
            self.index.insert(moved.address.clone(), i);
        }
        Some(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountState> {
        self.accounts.iter()
    }

    /// Balance, or zero for unknown accounts.
    pub fn balance(&self, address: &Address) -> Amount {
        self.get(address).map_or(Amount::ZERO, |a| a.balance)
    }

    /// Seed a fully vested balance, as the nemesis block does.
    pub fn seed_balance(&mut self, address: &Address, height: BlockHeight, amount: Amount) -> Result<(), StateError> {
        let account = self.find_or_create(address);
        account.credit(amount)?;
        account.weighted_balances.add_fully_vested(height, amount)?;
        account.height.get_or_insert(height);
        Ok(())
    }
}

/// Complete ledger state: accounts plus mosaics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NisCache {
    pub accounts: AccountStateCache,
    pub mosaics: MosaicCache,
}

impl NisCache {
    pub fn new(blocks_per_day: u64) -> Self {
        Self { accounts: AccountStateCache::new(blocks_per_day), mosaics: MosaicCache::new() }
    }

    /// Whether `address` holds at least `amount`.
    pub fn can_debit(&self, address: &Address, amount: Amount) -> bool {
        self.accounts.balance(address) >= amount
    }

    /// Whether `address` holds at least `quantity` of mosaic `id`.
    pub fn can_debit_mosaic(&self, address: &Address, id: &MosaicId, quantity: Quantity) -> bool {
        self.mosaics.balance(id, address) >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(c: char) -> Address {
        Address::from_encoded_unchecked(format!("T{}", c.to_string().repeat(39)))
    }

    #[test]
    fn find_or_create_is_idempotent() {
        let mut cache = AccountStateCache::default();
        cache.find_or_create(&addr('A')).balance = Amount::from_nem(3);
        assert_eq!(cache.find_or_create(&addr('A')).balance, Amount::from_nem(3));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn remove_fixes_up_moved_index() {
        let mut cache = AccountStateCache::default();
        for c in ['A', 'B', 'C'] {
            cache.find_or_create(&addr(c));
        }
        cache.get_mut(&addr('C')).unwrap().balance = Amount::from_nem(7);

        let removed = cache.remove(&addr('A')).unwrap();
        assert_eq!(removed.address, addr('A'));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&addr('A')));
        assert_eq!(cache.balance(&addr('C')), Amount::from_nem(7));
        assert!(cache.get(&addr('B')).is_some());
    }

    #[test]
    fn remove_last_slot() {
        let mut cache = AccountStateCache::default();
        cache.find_or_create(&addr('A'));
        cache.find_or_create(&addr('B'));
        cache.remove(&addr('B')).unwrap();
        assert!(cache.get(&addr('A')).is_some());
        assert!(cache.remove(&addr('B')).is_none());
    }

    #[test]
    fn unknown_account_lookup_fails() {
        let mut cache = AccountStateCache::default();
        assert!(matches!(cache.get_mut(&addr('Z')), Err(StateError::UnknownAccount(_))));
    }

    #[test]
    fn seeded_balance_is_vested() {
        let mut cache = NisCache::default();
        cache.accounts.seed_balance(&addr('N'), BlockHeight::ONE, Amount::from_nem(100)).unwrap();
        let account = cache.accounts.get(&addr('N')).unwrap();
        assert_eq!(account.weighted_balances.get_vested(BlockHeight::ONE), Amount::from_nem(100));
        assert!(cache.can_debit(&addr('N'), Amount::from_nem(100)));
        assert!(!cache.can_debit(&addr('N'), Amount::from_nem(101)));
    }

    #[test]
    fn clone_isolates_changes() {
        let mut cache = NisCache::default();
        cache.accounts.seed_balance(&addr('N'), BlockHeight::ONE, Amount::from_nem(100)).unwrap();
        let mut copy = cache.clone();
        copy.accounts.get_mut(&addr('N')).unwrap().balance = Amount::ZERO;
        assert_eq!(cache.accounts.balance(&addr('N')), Amount::from_nem(100));
    }
}
