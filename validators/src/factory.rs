//! Standard validator cascades.

use std::sync::Arc;

use nis_transactions::FeeCalculator;
use nis_types::{ChainParams, NetworkId};

use crate::aggregate::{
    AggregateBatchTransactionValidator, AggregateBatchTransactionValidatorBuilder, AggregateBlockValidator,
    AggregateBlockValidatorBuilder, AggregateSingleTransactionValidator, AggregateSingleTransactionValidatorBuilder,
};
use crate::batch::{BatchUniqueHashTransactionValidator, HashCache};
use crate::block::{
    system_time_provider, BlockMultisigAggregateModificationValidator, BlockMultisigSignaturesAttachedValidator,
    BlockUniqueHashTransactionValidator, NoSelfSignedTransactionsBlockValidator, NonFutureBlockValidator,
    TimeProvider, TransactionCountBlockValidator,
};
use crate::transaction::{
    BalanceValidator, ChildAwareSingleTransactionValidator, DeadlineValidator, ImportanceTransferTransactionValidator,
    MinimumFeeValidator, MosaicBalanceValidator, MosaicSupplyChangeTransactionValidator,
    MultisigAggregateModificationVersionValidator, MultisigCosignatoryModificationValidator,
    MultisigCosignerValidator, MultisigNonOperationalValidator, MultisigSignaturesPresentValidator,
    NetworkValidator, NonFutureEntityValidator, NumCosignatoryRangeValidator, RemoteNonOperationalValidator,
    SignatureRequirement, TransferTransactionValidator,
};

/// Builds the validator aggregates used by block processing and the unconfirmed pool.
pub struct ValidatorFactory {
    params: ChainParams,
    network: NetworkId,
    fee_calculator: Arc<dyn FeeCalculator>,
    now: TimeProvider,
}

impl ValidatorFactory {
    pub fn new(params: ChainParams, fee_calculator: Arc<dyn FeeCalculator>) -> Self {
        Self { params, network: NetworkId::Test, fee_calculator, now: system_time_provider() }
    }

    pub fn with_network(mut self, network: NetworkId) -> Self {
        self.network = network;
        self
    }

    pub fn with_time_provider(mut self, now: TimeProvider) -> Self {
        self.now = now;
        self
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    pub fn network(&self) -> NetworkId {
        self.network
    }

    pub fn time_provider(&self) -> TimeProvider {
        Arc::clone(&self.now)
    }

    /// Top level: the multisig-operational check, then the child-aware cascade.
    pub fn create_single(&self, requirement: SignatureRequirement) -> AggregateSingleTransactionValidator {
        let params = &self.params;
        let cascade = AggregateSingleTransactionValidatorBuilder::new()
            .add(DeadlineValidator::new(params.max_deadline_window_secs))
            .add(NonFutureEntityValidator::new(params.future_time_tolerance_secs))
            .add(NetworkValidator::new(self.network))
            .add(MinimumFeeValidator::new(Arc::clone(&self.fee_calculator)))
            .add(BalanceValidator)
            .add(MosaicBalanceValidator)
            .add(TransferTransactionValidator::new(params.max_message_size, params.max_mosaics_per_transfer))
            .add(ImportanceTransferTransactionValidator::new(params.remote_harvesting_delay))
            .add(RemoteNonOperationalValidator::new(params.remote_harvesting_delay))
            .add(MultisigCosignerValidator)
            .add(MultisigSignaturesPresentValidator::new(requirement, params.multisig_m_of_n_fork))
            .add(MultisigCosignatoryModificationValidator)
            .add(NumCosignatoryRangeValidator::new(params.max_cosignatories))
            .add(MultisigAggregateModificationVersionValidator::new(params.multisig_m_of_n_fork))
            .add(MosaicSupplyChangeTransactionValidator)
            .build();

        AggregateSingleTransactionValidatorBuilder::new()
            .add(MultisigNonOperationalValidator)
            .add(ChildAwareSingleTransactionValidator::new(cascade))
            .build()
    }

    pub fn create_block(&self) -> AggregateBlockValidator {
        AggregateBlockValidatorBuilder::new()
            .add(TransactionCountBlockValidator::new(self.params.max_transactions_per_block))
            .add(NonFutureBlockValidator::new(self.params.future_time_tolerance_secs, Arc::clone(&self.now)))
            .add(NoSelfSignedTransactionsBlockValidator)
            .add(BlockUniqueHashTransactionValidator)
            .add(BlockMultisigAggregateModificationValidator)
            .add(BlockMultisigSignaturesAttachedValidator)
            .build()
    }

    pub fn create_batch(&self, hash_cache: Arc<dyn HashCache>) -> AggregateBatchTransactionValidator {
        AggregateBatchTransactionValidatorBuilder::new()
            .add(BatchUniqueHashTransactionValidator::new(hash_cache))
            .build()
    }
}
