//! Multisig cosignatory graph of a single account.
//!
//! An account is either a multisig account (it has cosignatories), a
//! cosignatory (of one or more multisig accounts), or neither. Never both.

use std::collections::BTreeSet;

use nis_types::Address;
use serde::{Deserialize, Serialize};

use crate::error::StateError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigLinks {
    cosignatory_of: BTreeSet<Address>,
    cosignatories: BTreeSet<Address>,
    /// Zero means every cosignatory must approve.
    min_cosignatories: u32,
}

impl MultisigLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `cosignatory` a cosignatory of this account and raise the
    /// threshold by one.
    pub fn add_cosignatory(&mut self, cosignatory: Address) -> Result<(), StateError> {
        if !self.cosignatory_of.is_empty() {
            return Err(StateError::CosignatoryCannotBeMultisig);
        }
        if self.cosignatories.insert(cosignatory) {
            self.min_cosignatories += 1;
        }
        Ok(())
    }

    pub fn remove_cosignatory(&mut self, cosignatory: &Address) {
        if self.cosignatories.remove(cosignatory) {
            self.min_cosignatories = self.min_cosignatories.saturating_sub(1);
        }
    }

    /// Record that this account cosigns for `multisig`.
    pub fn add_cosignatory_of(&mut self, multisig: Address) -> Result<(), StateError> {
        if !self.cosignatories.is_empty() {
            return Err(StateError::MultisigCannotBeCosignatory);
        }
        self.cosignatory_of.insert(multisig);
        Ok(())
    }

    pub fn remove_cosignatory_of(&mut self, multisig: &Address) {
        self.cosignatory_of.remove(multisig);
    }

    pub fn increment_min_cosignatories_by(&mut self, delta: i32) -> Result<(), StateError> {
        let count = self.cosignatories.len();
        let updated = i64::from(self.min_cosignatories) + i64::from(delta);
        if updated < 0 || updated > count as i64 {
            return Err(StateError::MinCosignatoriesOutOfRange {
                current: self.min_cosignatories,
                delta,
                count,
            });
        }
        self.min_cosignatories = updated as u32;
        Ok(())
    }

    pub fn is_multisig(&self) -> bool {
        !self.cosignatories.is_empty()
    }

    pub fn is_cosignatory(&self) -> bool {
        !self.cosignatory_of.is_empty()
    }

    pub fn is_cosignatory_of(&self, multisig: &Address) -> bool {
        self.cosignatory_of.contains(multisig)
    }

    pub fn has_cosignatory(&self, cosignatory: &Address) -> bool {
        self.cosignatories.contains(cosignatory)
    }

    pub fn cosignatories(&self) -> &BTreeSet<Address> {
        &self.cosignatories
    }

    pub fn cosignatory_of(&self) -> &BTreeSet<Address> {
        &self.cosignatory_of
    }

    pub fn min_cosignatories(&self) -> u32 {
        self.min_cosignatories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(c: char) -> Address {
        Address::from_encoded_unchecked(format!("T{}", c.to_string().repeat(39)))
    }

    #[test]
    fn new_links_are_neither_multisig_nor_cosignatory() {
        let links = MultisigLinks::new();
        assert!(!links.is_multisig());
        assert!(!links.is_cosignatory());
        assert_eq!(links.min_cosignatories(), 0);
    }

    #[test]
    fn adding_cosignatories_raises_threshold() {
        let mut links = MultisigLinks::new();
        links.add_cosignatory(addr('A')).unwrap();
        links.add_cosignatory(addr('B')).unwrap();
        assert!(links.is_multisig());
        assert_eq!(links.min_cosignatories(), 2);
        assert_eq!(links.cosignatories().len(), 2);
    }

    #[test]
    fn removing_cosignatory_lowers_threshold() {
        let mut links = MultisigLinks::new();
        links.add_cosignatory(addr('A')).unwrap();
        links.add_cosignatory(addr('B')).unwrap();
        links.remove_cosignatory(&addr('A'));
        assert_eq!(links.min_cosignatories(), 1);
        assert!(!links.has_cosignatory(&addr('A')));
    }

    #[test]
    fn remove_does_not_underflow_threshold() {
        let mut links = MultisigLinks::new();
        links.add_cosignatory(addr('A')).unwrap();
        links.increment_min_cosignatories_by(-1).unwrap();
        links.remove_cosignatory(&addr('A'));
        assert_eq!(links.min_cosignatories(), 0);
    }

    #[test]
    fn cosignatory_cannot_become_multisig() {
        let mut links = MultisigLinks::new();
        links.add_cosignatory_of(addr('M')).unwrap();
        assert!(links.add_cosignatory(addr('A')).is_err());
        assert!(links.is_cosignatory_of(&addr('M')));
    }

    #[test]
    fn multisig_cannot_become_cosignatory() {
        let mut links = MultisigLinks::new();
        links.add_cosignatory(addr('A')).unwrap();
        assert!(links.add_cosignatory_of(addr('M')).is_err());
        assert!(!links.is_cosignatory());
    }

    #[test]
    fn threshold_bounded_by_count() {
        let mut links = MultisigLinks::new();
        links.add_cosignatory(addr('A')).unwrap();
        links.add_cosignatory(addr('B')).unwrap();
        assert!(links.increment_min_cosignatories_by(1).is_err());
        assert!(links.increment_min_cosignatories_by(-3).is_err());
        links.increment_min_cosignatories_by(-1).unwrap();
        assert_eq!(links.min_cosignatories(), 1);
    }

    #[test]
    fn clone_is_independent() {
        let mut links = MultisigLinks::new();
        links.add_cosignatory(addr('A')).unwrap();
        let copy = links.clone();
        links.add_cosignatory(addr('B')).unwrap();
        assert_eq!(copy.cosignatories().len(), 1);
        assert_eq!(copy.min_cosignatories(), 1);
    }
}
