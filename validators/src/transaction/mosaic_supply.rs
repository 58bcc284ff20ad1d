use nis_transactions::{MosaicSupplyType, Transaction};

use crate::context::ValidationContext;
use crate::result::ValidationResult;
use crate::traits::SingleTransactionValidator;

/// Only the creator may change the supply of a mutable mosaic, within `[0, max_supply]`.
#[derive(Clone, Debug, Default)]
pub struct MosaicSupplyChangeTransactionValidator;

impl SingleTransactionValidator for MosaicSupplyChangeTransactionValidator {
    fn name(&self) -> String {
        "MosaicSupplyChangeTransactionValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        let Transaction::MosaicSupplyChange(change) = tx else {
            return ValidationResult::Success;
        };
        let Some(entry) = context.state.cache().mosaics.get(&change.mosaic_id) else {
            return ValidationResult::FailureMosaicUnknown;
        };
        if entry.creator != change.common.signer.address {
            return ValidationResult::FailureMosaicCreatorConflict;
        }
        if !entry.properties.supply_mutable {
            return ValidationResult::FailureMosaicSupplyImmutable;
        }
        match change.supply_type {
            MosaicSupplyType::Create => match entry.supply.checked_add(change.delta) {
                Some(supply) if supply <= entry.properties.max_supply => ValidationResult::Success,
                _ => ValidationResult::FailureMosaicMaxSupplyExceeded,
            },
            MosaicSupplyType::Delete if change.delta > entry.balance(&entry.creator) => {
                ValidationResult::FailureMosaicSupplyNegative
            }
            MosaicSupplyType::Delete => ValidationResult::Success,
        }
    }
}
