//! Mosaic definitions, supplies and per-account mosaic balances.

use std::collections::BTreeMap;

use nis_types::{Address, MosaicId, Quantity};
use serde::{Deserialize, Serialize};

use crate::error::StateError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicProperties {
    pub supply_mutable: bool,
    pub transferable: bool,
    pub max_supply: Quantity,
}

impl Default for MosaicProperties {
    fn default() -> Self {
        Self {
            supply_mutable: true,
            transferable: true,
            max_supply: Quantity::new(9_000_000_000_000_000),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicEntry {
    pub id: MosaicId,
    pub creator: Address,
    pub properties: MosaicProperties,
    pub supply: Quantity,
    pub balances: BTreeMap<Address, Quantity>,
}

impl MosaicEntry {
    /// A definition whose entire initial supply is held by the creator.
    pub fn new(id: MosaicId, creator: Address, properties: MosaicProperties, supply: Quantity) -> Self {
        let mut balances = BTreeMap::new();
        if !supply.is_zero() {
            balances.insert(creator.clone(), supply);
        }
        Self { id, creator, properties, supply, balances }
    }

    pub fn balance(&self, owner: &Address) -> Quantity {
        self.balances.get(owner).copied().unwrap_or(Quantity::ZERO)
    }

    pub fn credit(&mut self, owner: &Address, quantity: Quantity) -> Result<(), StateError> {
        let updated = self
            .balance(owner)
            .checked_add(quantity)
            .ok_or(StateError::Overflow("mosaic balance"))?;
        if !updated.is_zero() {
            self.balances.insert(owner.clone(), updated);
        }
        Ok(())
    }

    pub fn debit(&mut self, owner: &Address, quantity: Quantity) -> Result<(), StateError> {
        let available = self.balance(owner);
        let updated = available.checked_sub(quantity).ok_or_else(|| StateError::InsufficientMosaicBalance {
            mosaic: self.id.clone(),
            needed: quantity,
            available,
        })?;
        if updated.is_zero() {
            self.balances.remove(owner);
        } else {
            self.balances.insert(owner.clone(), updated);
        }
        Ok(())
    }

    /// Mint `delta` units to the creator.
    pub fn increase_supply(&mut self, delta: Quantity) -> Result<(), StateError> {
        let supply = self
            .supply
            .checked_add(delta)
            .filter(|s| *s <= self.properties.max_supply)
            .ok_or_else(|| StateError::MosaicSupplyExceeded(self.id.clone()))?;
        let creator = self.creator.clone();
        self.credit(&creator, delta)?;
        self.supply = supply;
        Ok(())
    }

    /// Burn `delta` units from the creator.
    pub fn decrease_supply(&mut self, delta: Quantity) -> Result<(), StateError> {
        let creator = self.creator.clone();
        self.debit(&creator, delta)?;
        self.supply = self.supply.checked_sub(delta).ok_or(StateError::Overflow("mosaic supply"))?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicCache {
    entries: BTreeMap<MosaicId, MosaicEntry>,
}

impl MosaicCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a mosaic definition, replacing any previous one.
    pub fn insert(&mut self, entry: MosaicEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    pub fn get(&self, id: &MosaicId) -> Option<&MosaicEntry> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &MosaicId) -> Result<&mut MosaicEntry, StateError> {
        self.entries.get_mut(id).ok_or_else(|| StateError::UnknownMosaic(id.clone()))
    }

    pub fn contains(&self, id: &MosaicId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn balance(&self, id: &MosaicId, owner: &Address) -> Quantity {
        self.get(id).map_or(Quantity::ZERO, |e| e.balance(owner))
    }

    /// Move `quantity` of `id` between two accounts.
    pub fn transfer(
        &mut self,
        id: &MosaicId,
        sender: &Address,
        recipient: &Address,
        quantity: Quantity,
    ) -> Result<(), StateError> {
        let entry = self.get_mut(id)?;
        entry.debit(sender, quantity)?;
        entry.credit(recipient, quantity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
