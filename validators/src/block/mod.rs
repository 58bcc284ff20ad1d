//! Block validators.

pub mod limits;
pub mod transactions;

pub use limits::{
    system_time_provider, NonFutureBlockValidator, TimeProvider, TransactionCountBlockValidator,
    NETWORK_EPOCH_UNIX_SECS,
};
pub use transactions::{
    BlockMultisigAggregateModificationValidator, BlockMultisigSignaturesAttachedValidator,
    BlockUniqueHashTransactionValidator, NoSelfSignedTransactionsBlockValidator,
};
