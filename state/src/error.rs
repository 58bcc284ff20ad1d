//! State mutation errors.
//!
//! These are invariant violations, never validation outcomes: a validated
//! transaction applied to the state it was validated against cannot raise them.

use nis_types::{Address, Amount, BlockHeight, MosaicId, Quantity};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("height {requested} precedes last vesting entry at {last}")]
    HeightDecreasing { last: BlockHeight, requested: BlockHeight },

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("undo mismatch: {0}")]
    UndoMismatch(String),

    #[error("vesting ledger cannot be converted to fully vested")]
    NotConvertible,

    #[error("a cosignatory cannot become a multisig account")]
    CosignatoryCannotBeMultisig,

    #[error("a multisig account cannot become a cosignatory")]
    MultisigCannotBeCosignatory,

    #[error("min cosignatories {current} {delta:+} out of range for {count} cosignatories")]
    MinCosignatoriesOutOfRange { current: u32, delta: i32, count: usize },

    #[error("removing cosignatory {0} from a zero threshold cannot be undone")]
    IrreversibleCosignatoryRemoval(Address),

    #[error("remote link does not match the current link")]
    RemoteLinkMismatch,

    #[error("unknown account {0}")]
    UnknownAccount(Address),

    #[error("reference count underflow for {0}")]
    ReferenceCountUnderflow(Address),

    #[error("unknown mosaic {0}")]
    UnknownMosaic(MosaicId),

    #[error("insufficient {mosaic} balance: need {needed}, available {available}")]
    InsufficientMosaicBalance { mosaic: MosaicId, needed: Quantity, available: Quantity },

    #[error("mosaic {0} supply limit exceeded")]
    MosaicSupplyExceeded(MosaicId),

    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),
}
