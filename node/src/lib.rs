//! NIS node services on top of the validation core.
//!
//! - [`BlockProcessor`]: validates blocks, applies them atomically to a
//!   [`NisCache`](nis_state::NisCache) and undoes them on rollback
//! - [`UnconfirmedTransactions`]: the pool of transactions waiting for a block,
//!   including multisig transactions still collecting approvals
//! - [`ChainFile`] and [`replay`]: load a nemesis allocation plus blocks and apply them
//! - [`NodeConfig`] and [`init_logging`]: TOML configuration and tracing setup

pub mod chain;
pub mod config;
pub mod error;
pub mod logging;
pub mod processor;
pub mod unconfirmed;

#[cfg(test)]
pub(crate) mod test_support;

pub use chain::{replay, ChainFile, Nemesis, NemesisBalance, ReplaySummary};
pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use processor::BlockProcessor;
pub use unconfirmed::UnconfirmedTransactions;
