//! The three validator shapes.

use nis_transactions::{Block, Transaction};

use crate::context::ValidationContext;
use crate::result::ValidationResult;

/// Validates one transaction in isolation against a context.
pub trait SingleTransactionValidator: Send + Sync {
    fn name(&self) -> String;

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult;
}

/// Validates the structure of a block, independent of account state.
pub trait BlockValidator: Send + Sync {
    fn name(&self) -> String;

    fn validate(&self, block: &Block) -> ValidationResult;
}

/// Transactions sharing one validation context.
#[derive(Clone, Debug)]
pub struct TransactionsContextPair {
    pub transactions: Vec<Transaction>,
    pub context: ValidationContext,
}

impl TransactionsContextPair {
    pub fn new(transactions: Vec<Transaction>, context: ValidationContext) -> Self {
        Self { transactions, context }
    }
}

/// Validates groups of transactions together, e.g. for chain-wide uniqueness.
pub trait BatchTransactionValidator: Send + Sync {
    fn name(&self) -> String;

    fn validate(&self, groups: &[TransactionsContextPair]) -> ValidationResult;
}
