use thiserror::Error;

use nis_state::StateError;
use nis_transactions::TransactionError;
use nis_types::BlockHeight;
use nis_validators::ValidationResult;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("state error: {0}")]
    State(#[from] StateError),

    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("block {height} rejected: {result}")]
    BlockRejected { height: BlockHeight, result: ValidationResult },

    #[error("unexpected block height: expected {expected}, got {actual}")]
    UnexpectedHeight { expected: BlockHeight, actual: BlockHeight },

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
