//! Block height.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based block height. The nemesis block is at height 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(u64);

impl BlockHeight {
    pub const ONE: Self = Self(1);
    /// Unbounded height, used by contexts that are not tied to a specific block.
    pub const MAX: Self = Self(u64::MAX);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn prev(&self) -> Self {
        Self(self.0.saturating_sub(1).max(1))
    }

    /// Number of blocks from `earlier` to `self` (zero if `earlier` is later).
    pub fn blocks_since(&self, earlier: BlockHeight) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Default for BlockHeight {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
