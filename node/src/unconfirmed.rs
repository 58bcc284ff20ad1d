//! Unconfirmed transaction pool.
//!
//! Transactions are validated on arrival against the confirmed state and kept
//! in arrival order until a block includes them. A multisig transaction stays
//! in the pool while it collects cosignatory approvals; approvals arrive as
//! separate `MultisigSignature` transactions and are attached to the pending
//! wrapper they approve. Transactions whose hash is already confirmed are
//! never admitted.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use nis_state::NisCache;
use nis_transactions::{execute, Block, MultisigSignatureTransaction, StateObserver, Transaction};
use nis_types::{BlockHeight, Hash, TimeInstant};
use nis_validators::{
    AggregateSingleTransactionValidator, HashCache, SignatureRequirement, SingleTransactionValidator, TimeProvider,
    ValidationContext, ValidationResult, ValidationState, ValidatorFactory,
};

pub struct UnconfirmedTransactions {
    /// Accepts multisig wrappers that still lack approvals.
    pending: AggregateSingleTransactionValidator,
    /// Requires every approval; gates block inclusion.
    complete: AggregateSingleTransactionValidator,
    /// Confirmed hashes, shared with the block processor.
    hash_cache: Arc<dyn HashCache>,
    now: TimeProvider,
    capacity: usize,
    max_per_block: usize,
    transactions: Vec<Transaction>,
}

impl UnconfirmedTransactions {
    pub fn new(factory: &ValidatorFactory, hash_cache: Arc<dyn HashCache>, capacity: usize) -> Self {
        Self {
            pending: factory.create_single(SignatureRequirement::AllowPending),
            complete: factory.create_single(SignatureRequirement::Complete),
            hash_cache,
            now: factory.time_provider(),
            capacity,
            max_per_block: factory.params().max_transactions_per_block,
            transactions: Vec::new(),
        }
    }

    fn context(&self, state: &Arc<NisCache>, height: BlockHeight) -> ValidationContext {
        ValidationContext::with_heights(height, height.prev(), ValidationState::from_shared(Arc::clone(state)))
            .with_block_time((self.now)())
    }

    fn is_confirmed(&self, hash: Hash, height: BlockHeight) -> bool {
        self.hash_cache.any_hash_exists(&[hash], height.prev())
    }

    /// Validate `tx` against `cache` as of `height` and keep it if it passes.
    ///
    /// Returns `Neutral` for a multisig transaction that still needs approvals
    /// and for a transaction already in the pool, and `FailureHashExists` for
    /// one already confirmed below `height`. A `MultisigSignature` is
    /// attached to its pending wrapper, and the result tells whether that
    /// wrapper is now fully signed (`Success`) or still pending (`Neutral`).
    pub fn add(&mut self, tx: Transaction, cache: &NisCache, height: BlockHeight) -> ValidationResult {
        if !tx.verify() {
            return ValidationResult::FailureSignatureNotVerifiable;
        }
        let hash = tx.hash();
        if self.is_confirmed(hash, height) {
            debug!(%hash, "confirmed transaction resubmitted");
            return ValidationResult::FailureHashExists;
        }
        let context = self.context(&Arc::new(cache.clone()), height);
        if let Transaction::MultisigSignature(signature) = &tx {
            return self.attach_signature(signature, &context);
        }

        if self.contains(&hash) {
            return ValidationResult::Neutral;
        }
        if self.transactions.len() >= self.capacity {
            return ValidationResult::FailureTransactionCacheTooFull;
        }

        let result = self.pending.validate(&tx, &context);
        if result.is_failure() {
            debug!(%hash, %result, "unconfirmed transaction rejected");
            return result;
        }
        trace!(%hash, %result, pool = self.transactions.len() + 1, "unconfirmed transaction added");
        self.transactions.push(tx);
        result
    }

    fn attach_signature(
        &mut self,
        signature: &MultisigSignatureTransaction,
        context: &ValidationContext,
    ) -> ValidationResult {
        let Some(wrapper) = self.transactions.iter_mut().find_map(|tx| match tx {
            Transaction::Multisig(multisig) if multisig.other_transaction_hash() == signature.other_hash => {
                Some(multisig)
            }
            _ => None,
        }) else {
            return ValidationResult::FailureMultisigNoMatchingMultisig;
        };

        let result = self.pending.validate(&Transaction::MultisigSignature(signature.clone()), context);
        if result.is_failure() {
            debug!(other_hash = %signature.other_hash, %result, "cosignature rejected");
            return result;
        }

        let mut updated = wrapper.clone();
        if let Err(err) = updated.add_signature(signature.clone()) {
            debug!(other_hash = %signature.other_hash, error = %err, "cosignature does not match");
            return ValidationResult::FailureMultisigMismatchedSignature;
        }
        let updated_tx = Transaction::Multisig(updated.clone());
        let result = self.pending.validate(&updated_tx, context);
        if result.is_failure() {
            return result;
        }
        trace!(
            other_hash = %signature.other_hash,
            signatures = updated.signature_count(),
            complete = result.is_success(),
            "cosignature attached"
        );
        *wrapper = updated;
        result
    }

    /// Transactions that may go into a block at `height` on top of `cache`, in
    /// arrival order. Each candidate is checked against the state left by the
    /// ones picked before it; incomplete multisig transactions and ones
    /// confirmed since they were added are skipped.
    pub fn ready_for_block(&self, cache: &NisCache, height: BlockHeight) -> Vec<Transaction> {
        let mut scratch = Arc::new(cache.clone());
        let mut ready = Vec::new();
        for tx in &self.transactions {
            if ready.len() >= self.max_per_block {
                break;
            }
            if self.is_confirmed(tx.hash(), height) {
                continue;
            }
            if !self.complete.validate(tx, &self.context(&scratch, height)).is_success() {
                continue;
            }
            if execute(tx, &mut StateObserver::new(Arc::make_mut(&mut scratch)), height).is_err() {
                continue;
            }
            ready.push(tx.clone());
        }
        ready
    }

    /// Drop every transaction included in `block`. Returns how many were removed.
    pub fn remove_confirmed(&mut self, block: &Block) -> usize {
        let confirmed: HashSet<Hash> = block.transactions.iter().map(Transaction::hash).collect();
        let before = self.transactions.len();
        self.transactions.retain(|tx| !confirmed.contains(&tx.hash()));
        before - self.transactions.len()
    }

    /// Drop transactions whose deadline is before `now`. Returns how many were removed.
    pub fn prune_expired(&mut self, now: TimeInstant) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.deadline() >= now);
        before - self.transactions.len()
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.get(hash).is_some()
    }

    pub fn get(&self, hash: &Hash) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| &tx.hash() == hash)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
