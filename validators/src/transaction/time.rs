//! Deadline and timestamp checks.

use nis_transactions::Transaction;

use crate::context::ValidationContext;
use crate::result::ValidationResult;
use crate::traits::SingleTransactionValidator;

/// A deadline must not precede the block time and must lie within the window
/// after the transaction timestamp. A deadline equal to the block time is valid.
#[derive(Clone, Debug)]
pub struct DeadlineValidator {
    max_window_secs: u32,
}

impl DeadlineValidator {
    pub fn new(max_window_secs: u32) -> Self {
        Self { max_window_secs }
    }
}

impl SingleTransactionValidator for DeadlineValidator {
    fn name(&self) -> String {
        "DeadlineValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        if tx.deadline() < context.block_time {
            return ValidationResult::FailurePastDeadline;
        }
        if tx.deadline() > tx.timestamp().add_seconds(i64::from(self.max_window_secs)) {
            return ValidationResult::FailureFutureDeadline;
        }
        ValidationResult::Success
    }
}

#[derive(Clone, Debug)]
pub struct NonFutureEntityValidator {
    tolerance_secs: u32,
}

impl NonFutureEntityValidator {
    pub fn new(tolerance_secs: u32) -> Self {
        Self { tolerance_secs }
    }
}

impl SingleTransactionValidator for NonFutureEntityValidator {
    fn name(&self) -> String {
        "NonFutureEntityValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        if tx.timestamp() > context.block_time.add_seconds(i64::from(self.tolerance_secs)) {
            ValidationResult::FailureTimestampTooFarInFuture
        } else {
            ValidationResult::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{common, context, nem};
    use nis_state::NisCache;
    use nis_transactions::TransferTransaction;
    use nis_types::TimeInstant;

    const DAY: u32 = 24 * 60 * 60;

    fn with_times(timestamp: u32, deadline: u32) -> Transaction {
        let mut common = common(1).with_deadline(TimeInstant::new(deadline));
        common.timestamp = TimeInstant::new(timestamp);
        Transaction::Transfer(TransferTransaction::new(common, crate::test_support::address(2), nem(1)))
    }

    fn at(block_time: u32) -> ValidationContext {
        context(&NisCache::default()).with_block_time(TimeInstant::new(block_time))
    }

    #[test]
    fn deadline_equal_to_block_time_is_valid() {
        let validator = DeadlineValidator::new(DAY);
        assert_eq!(validator.validate(&with_times(900, 1000), &at(1000)), ValidationResult::Success);
    }

    #[test]
    fn deadline_before_block_time_is_past() {
        let validator = DeadlineValidator::new(DAY);
        assert_eq!(validator.validate(&with_times(900, 999), &at(1000)), ValidationResult::FailurePastDeadline);
    }

    #[test]
    fn deadline_beyond_window_is_future() {
        let validator = DeadlineValidator::new(DAY);
        assert_eq!(validator.validate(&with_times(1000, 1000 + DAY), &at(1000)), ValidationResult::Success);
        assert_eq!(
            validator.validate(&with_times(1000, 1001 + DAY), &at(1000)),
            ValidationResult::FailureFutureDeadline
        );
    }

    #[test]
    fn timestamp_within_tolerance_is_accepted() {
        let validator = NonFutureEntityValidator::new(10);
        assert_eq!(validator.validate(&with_times(1010, 5000), &at(1000)), ValidationResult::Success);
        assert_eq!(
            validator.validate(&with_times(1011, 5000), &at(1000)),
            ValidationResult::FailureTimestampTooFarInFuture
        );
    }
}
