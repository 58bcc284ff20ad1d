//! Batch validators and the confirmed-hash lookup they depend on.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use nis_types::{BlockHeight, Hash};

use crate::result::ValidationResult;
use crate::traits::{BatchTransactionValidator, TransactionsContextPair};

/// Lookup of transaction hashes already confirmed in the chain.
pub trait HashCache: Send + Sync {
    /// Whether any of `hashes` was confirmed at or below `confirmed_height`.
    fn any_hash_exists(&self, hashes: &[Hash], confirmed_height: BlockHeight) -> bool;
}

/// [`HashCache`] backed by an in-memory map from hash to confirmation height.
#[derive(Debug, Default)]
pub struct InMemoryHashCache {
    entries: RwLock<BTreeMap<Hash, BlockHeight>>,
}

impl InMemoryHashCache {
    pub fn new() -> Self {
        Self::default()
    }

    // Every write is a single map operation, so a poisoned map is still
    // consistent and the guard is recovered.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<Hash, BlockHeight>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<Hash, BlockHeight>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, hash: Hash, height: BlockHeight) {
        self.write().insert(hash, height);
    }

    pub fn remove(&self, hash: &Hash) {
        self.write().remove(hash);
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.read().contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HashCache for InMemoryHashCache {
    fn any_hash_exists(&self, hashes: &[Hash], confirmed_height: BlockHeight) -> bool {
        let entries = self.read();
        hashes
            .iter()
            .any(|hash| entries.get(hash).is_some_and(|height| *height <= confirmed_height))
    }
}

/// Transactions already in the chain are neither valid nor invalid for a new
/// batch; the caller decides.
pub struct BatchUniqueHashTransactionValidator {
    hash_cache: Arc<dyn HashCache>,
}

impl BatchUniqueHashTransactionValidator {
    pub fn new(hash_cache: Arc<dyn HashCache>) -> Self {
        Self { hash_cache }
    }
}

impl BatchTransactionValidator for BatchUniqueHashTransactionValidator {
    fn name(&self) -> String {
        "BatchUniqueHashTransactionValidator".into()
    }

    fn validate(&self, groups: &[TransactionsContextPair]) -> ValidationResult {
        let hashes: Vec<Hash> = groups
            .iter()
            .flat_map(|group| group.transactions.iter().map(|tx| tx.hash()))
            .collect();
        let Some(first) = groups.first() else {
            return ValidationResult::Success;
        };
        if hashes.is_empty() {
            return ValidationResult::Success;
        }
        if self.hash_cache.any_hash_exists(&hashes, first.context.confirmed_block_height) {
            ValidationResult::Neutral
        } else {
            ValidationResult::Success
        }
    }
}
