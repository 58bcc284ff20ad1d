//! Block validation, application and rollback against a [`NisCache`].
//!
//! Application is atomic: effects are applied to a copy of the cache, which
//! replaces the original only once every transaction and the harvest reward
//! went through.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use nis_state::{NisCache, RemoteStatus};
use nis_transactions::observer::ReversingObserver;
use nis_transactions::{
    execute, undo, Block, Effect, EffectObserver, NotificationContext, StateObserver, Transaction, TransactionError,
};
use nis_types::{Address, BlockHeight, ChainParams, TimeInstant};
use nis_validators::{
    AggregateBatchTransactionValidator, AggregateBlockValidator, AggregateSingleTransactionValidator,
    BatchTransactionValidator, BlockValidator, InMemoryHashCache, SignatureRequirement, SingleTransactionValidator,
    TimeProvider, TransactionsContextPair, ValidationContext, ValidationResult, ValidationState, ValidatorFactory,
};

use crate::NodeError;

pub struct BlockProcessor {
    params: ChainParams,
    single: AggregateSingleTransactionValidator,
    block: AggregateBlockValidator,
    batch: AggregateBatchTransactionValidator,
    hash_cache: Arc<InMemoryHashCache>,
    now: TimeProvider,
    pool: Option<rayon::ThreadPool>,
}

impl BlockProcessor {
    pub fn new(factory: &ValidatorFactory) -> Self {
        let hash_cache = Arc::new(InMemoryHashCache::new());
        Self {
            params: factory.params().clone(),
            single: factory.create_single(SignatureRequirement::Complete),
            block: factory.create_block(),
            batch: factory.create_batch(hash_cache.clone()),
            hash_cache,
            now: factory.time_provider(),
            pool: None,
        }
    }

    /// Run parallel validation on a dedicated pool of `workers` threads
    /// (0 picks one per core) instead of the global rayon pool.
    pub fn with_workers(mut self, workers: usize) -> Result<Self, NodeError> {
        self.pool = Some(rayon::ThreadPoolBuilder::new().num_threads(workers).build()?);
        Ok(self)
    }

    /// Hashes of every transaction in a processed block.
    pub fn hash_cache(&self) -> &Arc<InMemoryHashCache> {
        &self.hash_cache
    }

    fn context(height: BlockHeight, time: TimeInstant, state: &Arc<NisCache>) -> ValidationContext {
        ValidationContext::with_heights(height, height.prev(), ValidationState::from_shared(Arc::clone(state)))
            .with_block_time(time)
    }

    /// Full validation of `block` on top of `cache`. Only `Success` means the
    /// block may be applied.
    pub fn validate_block(&self, block: &Block, cache: &NisCache) -> ValidationResult {
        match self.validate_and_execute(block, cache) {
            Ok(_) => ValidationResult::Success,
            Err(result) => result,
        }
    }

    /// Validate `block` and return the state after its transactions, before
    /// the harvest reward. Any result other than `Success` is returned as the error.
    fn validate_and_execute(&self, block: &Block, cache: &NisCache) -> Result<NisCache, ValidationResult> {
        let _span = info_span!("block_validate", height = %block.height).entered();

        if !block.verify() {
            return Err(ValidationResult::FailureBlockUnverifiable);
        }
        let structural = self.block.validate(block);
        if structural.is_failure() {
            return Err(structural);
        }

        // One copy per block. Validation contexts share it and are dropped
        // before each execution, so `make_mut` mutates it in place.
        let mut scratch = Arc::new(cache.clone());
        let context = Self::context(block.height, block.timestamp, &scratch);
        let batch = self.batch.validate(&[TransactionsContextPair::new(block.transactions.clone(), context)]);
        if batch.is_failure() {
            return Err(batch);
        }

        // Later transactions observe the effects of earlier ones.
        let mut results = vec![structural, batch];
        for tx in &block.transactions {
            if !tx.verify() {
                return Err(ValidationResult::FailureTransactionUnverifiable);
            }
            let result = self.single.validate(tx, &Self::context(block.height, block.timestamp, &scratch));
            if result.is_failure() {
                debug!(hash = %tx.hash(), %result, "transaction rejected");
                return Err(result);
            }
            results.push(result);
            if let Err(err) = execute(tx, &mut StateObserver::new(Arc::make_mut(&mut scratch)), block.height) {
                warn!(hash = %tx.hash(), error = %err, "validated transaction failed to apply");
                return Err(ValidationResult::FailureUnknown);
            }
        }

        match nis_validators::aggregate(results) {
            ValidationResult::Success => Ok(Arc::unwrap_or_clone(scratch)),
            other => Err(other),
        }
    }

    /// Validate and apply `block`, crediting the fees to the harvester.
    pub fn process_block(&self, block: &Block, cache: &mut NisCache) -> Result<(), NodeError> {
        let _span = info_span!("block_process", height = %block.height).entered();

        let mut scratch = match self.validate_and_execute(block, cache) {
            Ok(scratch) => scratch,
            Err(result) => {
                warn!(height = %block.height, %result, "block rejected");
                return Err(NodeError::BlockRejected { height: block.height, result });
            }
        };
        let effects = self.harvest_effects(block, &scratch);
        notify_all(&effects, &mut StateObserver::new(&mut scratch), NotificationContext::execute(block.height))?;
        *cache = scratch;

        for tx in &block.transactions {
            self.hash_cache.insert(tx.hash(), block.height);
        }
        info!(
            height = %block.height,
            transactions = block.transactions.len(),
            fees = %block.total_fee(),
            "block applied"
        );
        Ok(())
    }

    /// Revert a block previously applied with [`process_block`](Self::process_block).
    /// Fails without touching `cache` if the state does not match.
    pub fn undo_block(&self, block: &Block, cache: &mut NisCache) -> Result<(), NodeError> {
        let _span = info_span!("block_undo", height = %block.height).entered();

        let mut scratch = cache.clone();
        let effects = self.harvest_effects(block, &scratch);
        {
            let mut observer = StateObserver::new(&mut scratch);
            let mut reversing = ReversingObserver::new(&mut observer);
            let context = NotificationContext::undo(block.height);
            for effect in &effects {
                reversing.notify(&effect.invert(), &context)?;
            }
            reversing.commit()?;
            for tx in block.transactions.iter().rev() {
                undo(tx, &mut observer, block.height)?;
            }
        }
        *cache = scratch;

        for tx in &block.transactions {
            self.hash_cache.remove(&tx.hash());
        }
        info!(height = %block.height, "block undone");
        Ok(())
    }

    /// Validate independent transactions concurrently against one snapshot of `cache`.
    pub fn validate_batch_parallel(
        &self,
        transactions: &[Transaction],
        cache: &NisCache,
        height: BlockHeight,
    ) -> Vec<ValidationResult> {
        let context = Self::context(height, (self.now)(), &Arc::new(cache.clone()));
        let validate = || {
            transactions
                .par_iter()
                .map(|tx| self.single.validate(tx, &context))
                .collect::<Vec<_>>()
        };
        match &self.pool {
            Some(pool) => pool.install(validate),
            None => validate(),
        }
    }

    /// The account credited with the block's fees: the lessor when the signer
    /// harvests remotely on its behalf, the signer otherwise.
    fn beneficiary(&self, block: &Block, cache: &NisCache) -> Address {
        let signer = &block.signer.address;
        cache
            .accounts
            .get(signer)
            .and_then(|account| {
                let status = account.remote_links.remote_status(block.height, self.params.remote_harvesting_delay);
                match status {
                    RemoteStatus::RemoteActive | RemoteStatus::RemoteDeactivating => {
                        account.remote_links.current().map(|link| link.address.clone())
                    }
                    _ => None,
                }
            })
            .unwrap_or_else(|| signer.clone())
    }

    fn harvest_effects(&self, block: &Block, cache: &NisCache) -> Vec<Effect> {
        let fees = block.total_fee();
        if fees.is_zero() {
            return Vec::new();
        }
        let account = self.beneficiary(block, cache);
        vec![
            Effect::AccountTouched { account: account.clone() },
            Effect::BalanceCredit { account, amount: fees },
        ]
    }
}

fn notify_all(
    effects: &[Effect],
    observer: &mut dyn EffectObserver,
    context: NotificationContext,
) -> Result<(), TransactionError> {
    effects.iter().try_for_each(|effect| observer.notify(effect, &context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{account, address, common, factory, funded, keypair, nem, signed, transfer};
    use nis_state::ImportanceTransferMode;
    use nis_transactions::ImportanceTransferTransaction;
    use nis_types::{Amount, Hash, NetworkId};

    fn block(height: u64, transactions: Vec<Transaction>) -> Block {
        let mut block = Block::new(
            NetworkId::Test,
            BlockHeight::new(height),
            TimeInstant::new(1000),
            Hash::ZERO,
            account(9),
            transactions,
        );
        block.sign(&keypair(9).private);
        block
    }

    #[test]
    fn applies_transfers_and_credits_harvester() {
        let processor = BlockProcessor::new(&factory());
        let mut cache = funded(&[(1, 100)]);
        let tx = signed(transfer(1, 2, 10, 1), 1);
        processor.process_block(&block(2, vec![tx.clone()]), &mut cache).unwrap();

        assert_eq!(cache.accounts.balance(&address(1)), nem(89));
        assert_eq!(cache.accounts.balance(&address(2)), nem(10));
        assert_eq!(cache.accounts.balance(&address(9)), nem(1));
        assert!(processor.hash_cache().contains(&tx.hash()));
    }

    #[test]
    fn undo_restores_previous_state() {
        let processor = BlockProcessor::new(&factory());
        let mut cache = funded(&[(1, 100)]);
        let before = cache.clone();
        let block = block(2, vec![signed(transfer(1, 2, 10, 1), 1), signed(transfer(1, 3, 5, 1), 1)]);

        processor.process_block(&block, &mut cache).unwrap();
        processor.undo_block(&block, &mut cache).unwrap();

        assert_eq!(cache, before);
        assert!(processor.hash_cache().is_empty());
    }

    #[test]
    fn undo_of_unapplied_block_fails_without_changes() {
        let processor = BlockProcessor::new(&factory());
        let mut cache = funded(&[(1, 100)]);
        let before = cache.clone();
        let block = block(2, vec![signed(transfer(1, 2, 10, 1), 1)]);

        assert!(processor.undo_block(&block, &mut cache).is_err());
        assert_eq!(cache, before);
    }

    #[test]
    fn unsigned_block_is_unverifiable() {
        let processor = BlockProcessor::new(&factory());
        let cache = funded(&[(1, 100)]);
        let mut unsigned = block(2, vec![signed(transfer(1, 2, 10, 1), 1)]);
        unsigned.signature = None;
        assert_eq!(processor.validate_block(&unsigned, &cache), ValidationResult::FailureBlockUnverifiable);
    }

    #[test]
    fn unsigned_transaction_is_unverifiable() {
        let processor = BlockProcessor::new(&factory());
        let cache = funded(&[(1, 100)]);
        assert_eq!(
            processor.validate_block(&block(2, vec![transfer(1, 2, 10, 1)]), &cache),
            ValidationResult::FailureTransactionUnverifiable
        );
    }

    #[test]
    fn later_transactions_see_earlier_effects() {
        let processor = BlockProcessor::new(&factory());
        let mut cache = funded(&[(1, 20)]);
        let before = cache.clone();
        let block = block(2, vec![signed(transfer(1, 2, 15, 1), 1), signed(transfer(1, 3, 4, 1), 1)]);

        assert_eq!(processor.validate_block(&block, &cache), ValidationResult::FailureInsufficientBalance);
        let err = processor.process_block(&block, &mut cache).unwrap_err();
        assert!(matches!(
            err,
            NodeError::BlockRejected { result: ValidationResult::FailureInsufficientBalance, .. }
        ));
        assert_eq!(cache, before);
    }

    #[test]
    fn confirmed_transaction_cannot_be_replayed() {
        let processor = BlockProcessor::new(&factory());
        let mut cache = funded(&[(1, 100)]);
        let tx = signed(transfer(1, 2, 10, 1), 1);
        processor.process_block(&block(2, vec![tx.clone()]), &mut cache).unwrap();

        assert_eq!(processor.validate_block(&block(3, vec![tx]), &cache), ValidationResult::Neutral);
    }

    #[test]
    fn remote_harvester_fees_go_to_lessor() {
        let processor = BlockProcessor::new(&factory());
        let mut cache = funded(&[(1, 100), (2, 100)]);
        let activate = Transaction::ImportanceTransfer(ImportanceTransferTransaction::new(
            common(1).with_fee(nem(1)),
            address(9),
            ImportanceTransferMode::Activate,
        ));
        execute(&activate, &mut StateObserver::new(&mut cache), BlockHeight::new(2)).unwrap();

        let block = block(1500, vec![signed(transfer(2, 3, 10, 2), 2)]);
        processor.process_block(&block, &mut cache).unwrap();

        assert_eq!(cache.accounts.balance(&address(1)), nem(101));
        assert_eq!(cache.accounts.balance(&address(9)), Amount::ZERO);
    }

    #[test]
    fn parallel_validation_matches_sequential() {
        let processor = BlockProcessor::new(&factory()).with_workers(2).unwrap();
        let cache = funded(&[(1, 100), (2, 5)]);
        let transactions = vec![
            signed(transfer(1, 3, 10, 1), 1),
            signed(transfer(2, 3, 10, 1), 2),
            signed(transfer(1, 4, 10, 1), 1),
        ];
        let results = processor.validate_batch_parallel(&transactions, &cache, BlockHeight::new(2));
        assert_eq!(
            results,
            vec![ValidationResult::Success, ValidationResult::FailureInsufficientBalance, ValidationResult::Success]
        );
    }
}
