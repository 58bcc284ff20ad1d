//! Chain files: a nemesis allocation followed by the blocks built on it.
//!
//! Stored as JSON. The nemesis state is height 1; the first block in
//! `blocks` must be height 2 and every later block must link to the hash of
//! its predecessor.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use nis_state::{MosaicEntry, NisCache};
use nis_transactions::Block;
use nis_types::{Address, Amount, BlockHeight};
use nis_validators::ValidationResult;

use crate::processor::BlockProcessor;
use crate::NodeError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NemesisBalance {
    pub address: Address,
    pub amount: Amount,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nemesis {
    #[serde(default)]
    pub balances: Vec<NemesisBalance>,
    #[serde(default)]
    pub mosaics: Vec<MosaicEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainFile {
    pub nemesis: Nemesis,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl ChainFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), NodeError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// State at the nemesis height.
    pub fn seed(&self) -> Result<NisCache, NodeError> {
        let mut cache = NisCache::default();
        for balance in &self.nemesis.balances {
            cache.accounts.seed_balance(&balance.address, BlockHeight::ONE, balance.amount)?;
        }
        for mosaic in &self.nemesis.mosaics {
            cache.mosaics.insert(mosaic.clone());
        }
        Ok(cache)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub blocks: usize,
    pub transactions: usize,
    pub height: Option<BlockHeight>,
}

/// Apply every block of `chain` to `cache` in order. Stops at the first
/// block that is out of sequence or rejected; blocks before it stay applied.
pub fn replay(processor: &BlockProcessor, chain: &ChainFile, cache: &mut NisCache) -> Result<ReplaySummary, NodeError> {
    let mut summary = ReplaySummary::default();
    let mut expected = BlockHeight::ONE.next();
    let mut previous: Option<&Block> = None;

    for block in &chain.blocks {
        if block.height != expected {
            return Err(NodeError::UnexpectedHeight { expected, actual: block.height });
        }
        if previous.is_some_and(|prev| prev.hash() != block.previous_hash) {
            return Err(NodeError::BlockRejected { height: block.height, result: ValidationResult::FailureChainInvalid });
        }
        processor.process_block(block, cache)?;

        summary.blocks += 1;
        summary.transactions += block.transactions.len();
        summary.height = Some(block.height);
        expected = block.height.next();
        previous = Some(block);
    }

    info!(blocks = summary.blocks, transactions = summary.transactions, "chain replayed");
    Ok(summary)
}
