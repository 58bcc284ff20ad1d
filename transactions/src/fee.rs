//! Minimum-fee policy.

use nis_types::{Amount, BlockHeight, ChainParams};

use crate::Transaction;

/// Decides the minimum fee of a transaction and whether an offered fee is acceptable.
pub trait FeeCalculator: Send + Sync {
    fn calculate_minimum_fee(&self, tx: &Transaction) -> Amount;

    fn is_fee_valid(&self, tx: &Transaction, height: BlockHeight) -> bool;
}

const FEE_UNIT: u64 = 50_000;
const TRANSFER_TIER_COINS: u64 = 10_000;
const MAX_TRANSFER_TIERS: u64 = 25;
const MESSAGE_CHUNK_BYTES: usize = 32;
const MULTISIG_MODIFICATION_FEE: u64 = 10 * FEE_UNIT;
const DEFAULT_FEE: u64 = 3 * FEE_UNIT;

/// Integer fee schedule:
///
/// - transfer: 0.05 per started 10,000 coins (at least 0.05, at most 1.25),
///   plus `0.05 * (len / 32 + 1)` for a non-empty message, plus 0.05 per attached mosaic
/// - multisig aggregate modification: 0.5
/// - everything else: 0.15
///
/// Multisig signature fees are additionally capped.
#[derive(Clone, Debug)]
pub struct DefaultFeeCalculator {
    max_multisig_signature_fee: Amount,
}

impl DefaultFeeCalculator {
    pub fn new(params: &ChainParams) -> Self {
        Self { max_multisig_signature_fee: params.max_multisig_signature_fee }
    }
}

impl Default for DefaultFeeCalculator {
    fn default() -> Self {
        Self::new(&ChainParams::default())
    }
}

impl FeeCalculator for DefaultFeeCalculator {
    fn calculate_minimum_fee(&self, tx: &Transaction) -> Amount {
        match tx {
            Transaction::Transfer(transfer) => {
                let tiers = (transfer.amount.num_nem() / TRANSFER_TIER_COINS).clamp(1, MAX_TRANSFER_TIERS);
                let message_len = transfer.message_len();
                let message_chunks = if message_len == 0 { 0 } else { message_len / MESSAGE_CHUNK_BYTES + 1 };
                let units = tiers + message_chunks as u64 + transfer.mosaics.len() as u64;
                Amount::new(units * FEE_UNIT)
            }
            Transaction::MultisigAggregateModification(_) => Amount::new(MULTISIG_MODIFICATION_FEE),
            _ => Amount::new(DEFAULT_FEE),
        }
    }

    fn is_fee_valid(&self, tx: &Transaction, _height: BlockHeight) -> bool {
        let fee = tx.fee();
        let minimum = self.calculate_minimum_fee(tx);
        match tx {
            Transaction::MultisigSignature(_) => minimum <= fee && fee <= self.max_multisig_signature_fee,
            _ => minimum <= fee,
        }
    }
}

/// Assign the policy minimum fee to `tx`.
pub fn with_minimum_fee(mut tx: Transaction, calculator: &dyn FeeCalculator) -> Transaction {
    let fee = calculator.calculate_minimum_fee(&tx);
    tx.common_mut().fee = fee;
    tx
}
