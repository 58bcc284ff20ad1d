//! Composable validation for NIS transactions, blocks and batches.
//!
//! Validators never mutate state and never return errors: every outcome is a
//! [`ValidationResult`]. Aggregates fold child results with precedence
//! failure > neutral > success, stopping at the first failure.

pub mod aggregate;
pub mod batch;
pub mod block;
pub mod context;
pub mod factory;
pub mod result;
pub mod traits;
pub mod transaction;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::{
    AggregateBatchTransactionValidator, AggregateBatchTransactionValidatorBuilder, AggregateBlockValidator,
    AggregateBlockValidatorBuilder, AggregateSingleTransactionValidator, AggregateSingleTransactionValidatorBuilder,
};
pub use block::{system_time_provider, TimeProvider};
pub use batch::{BatchUniqueHashTransactionValidator, HashCache, InMemoryHashCache};
pub use context::{DebitPredicate, MosaicDebitPredicate, ValidationContext, ValidationState};
pub use factory::ValidatorFactory;
pub use result::{aggregate, aggregate_no_short_circuit, ValidationResult};
pub use traits::{BatchTransactionValidator, BlockValidator, SingleTransactionValidator, TransactionsContextPair};
pub use transaction::SignatureRequirement;
