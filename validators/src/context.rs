//! The immutable context a validator sees.

use std::fmt;
use std::sync::Arc;

use nis_state::NisCache;
use nis_types::{Address, Amount, BlockHeight, MosaicId, Quantity, TimeInstant};

pub type DebitPredicate = Arc<dyn Fn(&Address, Amount) -> bool + Send + Sync>;
pub type MosaicDebitPredicate = Arc<dyn Fn(&Address, &MosaicId, Quantity) -> bool + Send + Sync>;

/// Debit predicates plus the read-only account state the stateful validators consult.
#[derive(Clone)]
pub struct ValidationState {
    can_debit: DebitPredicate,
    can_debit_mosaic: MosaicDebitPredicate,
    cache: Arc<NisCache>,
}

impl ValidationState {
    /// Custom predicates over an empty account state.
    pub fn new(can_debit: DebitPredicate, can_debit_mosaic: MosaicDebitPredicate) -> Self {
        Self { can_debit, can_debit_mosaic, cache: Arc::new(NisCache::default()) }
    }

    pub fn deny_all() -> Self {
        Self::new(Arc::new(|_, _| false), Arc::new(|_, _, _| false))
    }

    /// Answer every query from `snapshot`. The snapshot is owned, so later
    /// mutations of the source cache are not observed.
    pub fn from_cache(snapshot: NisCache) -> Self {
        Self::from_shared(Arc::new(snapshot))
    }

    /// Answer every query from a snapshot shared with the caller. Callers
    /// that mutate through [`Arc::make_mut`] copy only while a state is alive.
    pub fn from_shared(cache: Arc<NisCache>) -> Self {
        let accounts = Arc::clone(&cache);
        let mosaics = Arc::clone(&cache);
        Self {
            can_debit: Arc::new(move |address, amount| accounts.can_debit(address, amount)),
            can_debit_mosaic: Arc::new(move |address, id, quantity| mosaics.can_debit_mosaic(address, id, quantity)),
            cache,
        }
    }

    pub fn can_debit(&self, address: &Address, amount: Amount) -> bool {
        (self.can_debit)(address, amount)
    }

    pub fn can_debit_mosaic(&self, address: &Address, id: &MosaicId, quantity: Quantity) -> bool {
        (self.can_debit_mosaic)(address, id, quantity)
    }

    pub fn cache(&self) -> &NisCache {
        &self.cache
    }
}

impl Default for ValidationState {
    fn default() -> Self {
        Self::deny_all()
    }
}

impl fmt::Debug for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationState")
            .field("accounts", &self.cache.accounts.len())
            .field("mosaics", &self.cache.mosaics.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub struct ValidationContext {
    pub block_height: BlockHeight,
    pub confirmed_block_height: BlockHeight,
    pub block_time: TimeInstant,
    pub state: ValidationState,
}

impl ValidationContext {
    pub fn new(state: ValidationState) -> Self {
        Self::with_heights(BlockHeight::MAX, BlockHeight::MAX, state)
    }

    pub fn with_heights(block_height: BlockHeight, confirmed_block_height: BlockHeight, state: ValidationState) -> Self {
        Self { block_height, confirmed_block_height, block_time: TimeInstant::MAX, state }
    }

    pub fn with_block_time(mut self, block_time: TimeInstant) -> Self {
        self.block_time = block_time;
        self
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(ValidationState::deny_all())
    }
}
