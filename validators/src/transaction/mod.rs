//! Single-transaction validators.

pub mod balance;
pub mod child_aware;
pub mod fee;
pub mod importance_transfer;
pub mod mosaic_supply;
pub mod multisig;
pub mod multisig_modification;
pub mod network;
pub mod time;
pub mod transfer;

pub use balance::{BalanceValidator, MosaicBalanceValidator};
pub use child_aware::ChildAwareSingleTransactionValidator;
pub use fee::MinimumFeeValidator;
pub use importance_transfer::{ImportanceTransferTransactionValidator, RemoteNonOperationalValidator};
pub use mosaic_supply::MosaicSupplyChangeTransactionValidator;
pub use multisig::{
    MultisigCosignerValidator, MultisigNonOperationalValidator, MultisigSignaturesPresentValidator,
    SignatureRequirement,
};
pub use multisig_modification::{
    MultisigAggregateModificationVersionValidator, MultisigCosignatoryModificationValidator,
    NumCosignatoryRangeValidator,
};
pub use network::NetworkValidator;
pub use time::{DeadlineValidator, NonFutureEntityValidator};
pub use transfer::TransferTransactionValidator;
