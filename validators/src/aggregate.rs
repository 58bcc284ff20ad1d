//! Composite validators built from an ordered list of children.
//!
//! A composite runs its children in registration order, stops at the first
//! failure and reports `Neutral` if any child was neutral.

use tracing::debug;

use nis_transactions::{Block, Transaction};

use crate::context::ValidationContext;
use crate::result::{aggregate, ValidationResult};
use crate::traits::{BatchTransactionValidator, BlockValidator, SingleTransactionValidator, TransactionsContextPair};

fn joined_names<'a>(names: impl Iterator<Item = String> + 'a) -> String {
    names.collect::<Vec<_>>().join(",")
}

fn traced(name: String, result: ValidationResult) -> ValidationResult {
    if result.is_failure() {
        debug!(validator = %name, %result, "validation failed");
    }
    result
}

// ── Single transaction ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct AggregateSingleTransactionValidatorBuilder {
    validators: Vec<Box<dyn SingleTransactionValidator>>,
}

impl AggregateSingleTransactionValidatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, validator: impl SingleTransactionValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn add_boxed(mut self, validator: Box<dyn SingleTransactionValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn build(self) -> AggregateSingleTransactionValidator {
        AggregateSingleTransactionValidator { validators: self.validators }
    }
}

pub struct AggregateSingleTransactionValidator {
    validators: Vec<Box<dyn SingleTransactionValidator>>,
}

impl AggregateSingleTransactionValidator {
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl SingleTransactionValidator for AggregateSingleTransactionValidator {
    fn name(&self) -> String {
        joined_names(self.validators.iter().map(|v| v.name()))
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        aggregate(self.validators.iter().map(|v| traced(v.name(), v.validate(tx, context))))
    }
}

// ── Block ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct AggregateBlockValidatorBuilder {
    validators: Vec<Box<dyn BlockValidator>>,
}

impl AggregateBlockValidatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, validator: impl BlockValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn build(self) -> AggregateBlockValidator {
        AggregateBlockValidator { validators: self.validators }
    }
}

pub struct AggregateBlockValidator {
    validators: Vec<Box<dyn BlockValidator>>,
}

impl BlockValidator for AggregateBlockValidator {
    fn name(&self) -> String {
        joined_names(self.validators.iter().map(|v| v.name()))
    }

    fn validate(&self, block: &Block) -> ValidationResult {
        aggregate(self.validators.iter().map(|v| traced(v.name(), v.validate(block))))
    }
}

// ── Batch ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct AggregateBatchTransactionValidatorBuilder {
    validators: Vec<Box<dyn BatchTransactionValidator>>,
}

impl AggregateBatchTransactionValidatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, validator: impl BatchTransactionValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn build(self) -> AggregateBatchTransactionValidator {
        AggregateBatchTransactionValidator { validators: self.validators }
    }
}

pub struct AggregateBatchTransactionValidator {
    validators: Vec<Box<dyn BatchTransactionValidator>>,
}

impl BatchTransactionValidator for AggregateBatchTransactionValidator {
    fn name(&self) -> String {
        joined_names(self.validators.iter().map(|v| v.name()))
    }

    fn validate(&self, groups: &[TransactionsContextPair]) -> ValidationResult {
        aggregate(self.validators.iter().map(|v| traced(v.name(), v.validate(groups))))
    }
}
