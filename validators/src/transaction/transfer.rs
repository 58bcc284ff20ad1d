use nis_transactions::Transaction;

use crate::context::ValidationContext;
use crate::result::ValidationResult;
use crate::traits::SingleTransactionValidator;

/// Message size, mosaic count and mosaic transferability of transfers.
#[derive(Clone, Debug)]
pub struct TransferTransactionValidator {
    max_message_size: usize,
    max_mosaics: usize,
}

impl TransferTransactionValidator {
    pub fn new(max_message_size: usize, max_mosaics: usize) -> Self {
        Self { max_message_size, max_mosaics }
    }
}

impl SingleTransactionValidator for TransferTransactionValidator {
    fn name(&self) -> String {
        "TransferTransactionValidator".into()
    }

    fn validate(&self, tx: &Transaction, context: &ValidationContext) -> ValidationResult {
        let Transaction::Transfer(transfer) = tx else {
            return ValidationResult::Success;
        };
        if transfer.message_len() > self.max_message_size {
            return ValidationResult::FailureMessageTooLarge;
        }
        if transfer.mosaics.len() > self.max_mosaics {
            return ValidationResult::FailureTooManyMosaicTransfers;
        }

        let sender = &transfer.common.signer.address;
        let mosaics = &context.state.cache().mosaics;
        for mosaic in &transfer.mosaics {
            let Some(entry) = mosaics.get(&mosaic.id) else {
                return ValidationResult::FailureMosaicUnknown;
            };
            // Non-transferable mosaics only move to or from their creator.
            if !entry.properties.transferable && *sender != entry.creator && transfer.recipient != entry.creator {
                return ValidationResult::FailureMosaicNotTransferable;
            }
        }
        ValidationResult::Success
    }
}
