//! Chain parameters.
//!
//! Every value that validators and execution depend on is carried here and passed
//! explicitly; nothing is read from process-wide state.

use crate::amount::Amount;
use crate::height::BlockHeight;
use serde::{Deserialize, Serialize};

/// Tunable consensus-relevant constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainParams {
    // ── Time ───────────────────────────────────────────────────────────────
    /// Estimated number of blocks per day. Vesting advances once per day.
    pub blocks_per_day: u64,

    /// Maximum number of seconds a deadline may lie beyond the transaction timestamp.
    pub max_deadline_window_secs: u32,

    /// Maximum number of seconds an entity timestamp may lie in the future.
    pub future_time_tolerance_secs: u32,

    // ── Remote harvesting ──────────────────────────────────────────────────
    /// Blocks an importance transfer takes to become (in)active.
    pub remote_harvesting_delay: u64,

    // ── Multisig ───────────────────────────────────────────────────────────
    /// Maximum number of cosignatories of a single multisig account.
    pub max_cosignatories: usize,

    /// Height from which M-of-N multisig accounts and min-cosignatory changes are allowed.
    pub multisig_m_of_n_fork: BlockHeight,

    /// Upper bound on the fee of a multisig signature transaction.
    pub max_multisig_signature_fee: Amount,

    // ── Transfers and blocks ───────────────────────────────────────────────
    /// Maximum message payload, in bytes.
    pub max_message_size: usize,

    /// Maximum number of mosaics attached to one transfer.
    pub max_mosaics_per_transfer: usize,

    /// Maximum number of top-level transactions in a block.
    pub max_transactions_per_block: usize,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            blocks_per_day: 1440,
            max_deadline_window_secs: 24 * 60 * 60,
            future_time_tolerance_secs: 10,
            remote_harvesting_delay: 1440,
            max_cosignatories: 32,
            multisig_m_of_n_fork: BlockHeight::ONE,
            max_multisig_signature_fee: Amount::from_nem(1000),
            max_message_size: 1024,
            max_mosaics_per_transfer: 10,
            max_transactions_per_block: 120,
        }
    }
}
