//! Errors raised while constructing core value types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NisError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),
}
