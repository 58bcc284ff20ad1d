use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use nis_transactions::Block;
use nis_types::TimeInstant;

use crate::result::ValidationResult;
use crate::traits::BlockValidator;

/// Source of the current network time.
pub type TimeProvider = Arc<dyn Fn() -> TimeInstant + Send + Sync>;

/// Unix timestamp of the network epoch (2015-03-29 00:06:25 UTC).
pub const NETWORK_EPOCH_UNIX_SECS: u64 = 1_427_587_585;

/// Wall-clock time in seconds since the network epoch.
pub fn system_time_provider() -> TimeProvider {
    Arc::new(|| {
        let unix = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs());
        let since_epoch = unix.saturating_sub(NETWORK_EPOCH_UNIX_SECS);
        TimeInstant::new(u32::try_from(since_epoch).unwrap_or(u32::MAX))
    })
}

#[derive(Clone, Debug)]
pub struct TransactionCountBlockValidator {
    max_transactions: usize,
}

impl TransactionCountBlockValidator {
    pub fn new(max_transactions: usize) -> Self {
        Self { max_transactions }
    }
}

impl BlockValidator for TransactionCountBlockValidator {
    fn name(&self) -> String {
        "TransactionCountBlockValidator".into()
    }

    fn validate(&self, block: &Block) -> ValidationResult {
        if block.transactions.len() > self.max_transactions {
            ValidationResult::FailureTooManyTransactions
        } else {
            ValidationResult::Success
        }
    }
}

/// A block timestamp may lead the local clock by at most the tolerance.
pub struct NonFutureBlockValidator {
    tolerance_secs: u32,
    now: TimeProvider,
}

impl NonFutureBlockValidator {
    pub fn new(tolerance_secs: u32, now: TimeProvider) -> Self {
        Self { tolerance_secs, now }
    }
}

impl BlockValidator for NonFutureBlockValidator {
    fn name(&self) -> String {
        "NonFutureBlockValidator".into()
    }

    fn validate(&self, block: &Block) -> ValidationResult {
        if block.timestamp > (self.now)().add_seconds(i64::from(self.tolerance_secs)) {
            ValidationResult::FailureTimestampTooFarInFuture
        } else {
            ValidationResult::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{account, transfer};
    use nis_types::{BlockHeight, Hash, NetworkId};

    fn block(timestamp: u32, count: usize) -> Block {
        let transactions = (0..count).map(|i| transfer(1, 2, i as u64 + 1, 1)).collect();
        Block::new(NetworkId::Test, BlockHeight::new(2), TimeInstant::new(timestamp), Hash::ZERO, account(9), transactions)
    }

    #[test]
    fn transaction_count_is_bounded() {
        let validator = TransactionCountBlockValidator::new(2);
        assert_eq!(validator.validate(&block(0, 2)), ValidationResult::Success);
        assert_eq!(validator.validate(&block(0, 3)), ValidationResult::FailureTooManyTransactions);
    }

    #[test]
    fn future_block_is_rejected() {
        let validator = NonFutureBlockValidator::new(10, Arc::new(|| TimeInstant::new(1000)));
        assert_eq!(validator.validate(&block(1010, 0)), ValidationResult::Success);
        assert_eq!(validator.validate(&block(1011, 0)), ValidationResult::FailureTimestampTooFarInFuture);
    }

    #[test]
    fn system_time_is_after_epoch() {
        assert!(system_time_provider()() > TimeInstant::new(0));
    }
}
