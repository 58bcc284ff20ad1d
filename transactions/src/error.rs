use nis_state::StateError;
use nis_types::Hash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error("signature approves {actual}, expected {expected}")]
    SignatureHashMismatch { expected: Hash, actual: Hash },

    #[error("signature names debtor {actual}, expected {expected}")]
    SignatureDebtorMismatch { expected: String, actual: String },

    #[error("aggregate modification changes nothing")]
    EmptyModification,

    #[error("min cosignatories change must be non-zero")]
    ZeroMinCosignatoriesChange,

    #[error("mosaic supply delta must be positive")]
    ZeroSupplyDelta,

    #[error("unknown transaction type tag {0:#06x}")]
    UnknownTypeTag(u32),

    #[error("truncated transaction: {0} bytes")]
    Truncated(usize),

    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("{0}")]
    Other(String),
}
