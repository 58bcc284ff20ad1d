//! Fundamental types for the NIS ledger core.
//!
//! This crate defines the value types shared across every other crate in the workspace:
//! addresses and accounts, amounts, heights, time instants, hashes, keys, mosaic ids and
//! the chain parameters that replace global configuration.

pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod height;
pub mod keys;
pub mod mosaic;
pub mod network;
pub mod params;
pub mod time;

pub use address::{Account, Address};
pub use amount::{Amount, Quantity};
pub use error::NisError;
pub use hash::Hash;
pub use height::BlockHeight;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use mosaic::{Mosaic, MosaicId};
pub use network::NetworkId;
pub use params::ChainParams;
pub use time::TimeInstant;
