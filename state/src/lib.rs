//! Account state consulted by validators and mutated by transaction effects.
//!
//! Everything here is plain owned data: cloning a [`NisCache`] yields an
//! independent copy that can be mutated speculatively and thrown away.

pub mod account_state;
pub mod cache;
pub mod error;
pub mod mosaics;
pub mod multisig_links;
pub mod remote_links;
pub mod weighted_balances;

pub use account_state::AccountState;
pub use cache::{AccountStateCache, NisCache};
pub use error::StateError;
pub use mosaics::{MosaicCache, MosaicEntry, MosaicProperties};
pub use multisig_links::MultisigLinks;
pub use remote_links::{ImportanceTransferMode, RemoteLink, RemoteLinkOwner, RemoteLinks, RemoteStatus};
pub use weighted_balances::{WeightedBalance, WeightedBalances, DEFAULT_BLOCKS_PER_DAY};
