use std::sync::Arc;

use nis_transactions::{FeeCalculator, Transaction};

use crate::context::ValidationContext;
use crate::result::ValidationResult;
use crate::traits::SingleTransactionValidator;

/// Rejects fees the calculator considers invalid at the block height.
pub struct MinimumFeeValidator {
    calculator: Arc<dyn FeeCalculator>,
}

impl MinimumFeeValidator {
    pub fn new(calculator: Arc<dyn FeeCalculator>) -> Self {
        Self { calculator }
    }
}

impl SingleTransactionValidator for MinimumFeeValidator {
    fn name(&self) -> String {
        "MinimumFeeValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        if self.calculator.is_fee_valid(tx, context.block_height) {
            ValidationResult::Success
        } else {
            ValidationResult::FailureInsufficientFee
        }
    }
}
