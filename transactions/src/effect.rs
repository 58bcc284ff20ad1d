//! Reversible state mutations described by transactions.
//!
//! A transaction's effects carry no direction. Execution notifies them in
//! order; undo notifies their inverses in reverse order.

use nis_state::ImportanceTransferMode;
use nis_types::{Address, Amount, MosaicId, Quantity};
use serde::{Deserialize, Serialize};

use crate::mosaic_supply::MosaicSupplyType;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// The account is referenced by a transaction and must exist.
    AccountTouched { account: Address },
    AccountReleased { account: Address },
    BalanceTransfer { sender: Address, recipient: Address, amount: Amount },
    BalanceCredit { account: Address, amount: Amount },
    BalanceDebit { account: Address, amount: Amount },
    MosaicTransfer { sender: Address, recipient: Address, mosaic_id: MosaicId, quantity: Quantity },
    MosaicSupplyChange { supplier: Address, mosaic_id: MosaicId, supply_type: MosaicSupplyType, delta: Quantity },
    CosignatoryAdded { multisig: Address, cosignatory: Address },
    CosignatoryRemoved { multisig: Address, cosignatory: Address },
    MinCosignatoriesChanged { multisig: Address, delta: i32 },
    RemoteLinkAdded { lessor: Address, lessee: Address, mode: ImportanceTransferMode },
    RemoteLinkRemoved { lessor: Address, lessee: Address, mode: ImportanceTransferMode },
}

impl Effect {
    pub fn invert(&self) -> Self {
        match self.clone() {
            Self::AccountTouched { account } => Self::AccountReleased { account },
            Self::AccountReleased { account } => Self::AccountTouched { account },
            Self::BalanceTransfer { sender, recipient, amount } => {
                Self::BalanceTransfer { sender: recipient, recipient: sender, amount }
            }
            Self::BalanceCredit { account, amount } => Self::BalanceDebit { account, amount },
            Self::BalanceDebit { account, amount } => Self::BalanceCredit { account, amount },
            Self::MosaicTransfer { sender, recipient, mosaic_id, quantity } => {
                Self::MosaicTransfer { sender: recipient, recipient: sender, mosaic_id, quantity }
            }
            Self::MosaicSupplyChange { supplier, mosaic_id, supply_type, delta } => Self::MosaicSupplyChange {
                supplier,
                mosaic_id,
                supply_type: supply_type.flipped(),
                delta,
            },
            Self::CosignatoryAdded { multisig, cosignatory } => Self::CosignatoryRemoved { multisig, cosignatory },
            Self::CosignatoryRemoved { multisig, cosignatory } => Self::CosignatoryAdded { multisig, cosignatory },
            Self::MinCosignatoriesChanged { multisig, delta } => Self::MinCosignatoriesChanged { multisig, delta: -delta },
            Self::RemoteLinkAdded { lessor, lessee, mode } => Self::RemoteLinkRemoved { lessor, lessee, mode },
            Self::RemoteLinkRemoved { lessor, lessee, mode } => Self::RemoteLinkAdded { lessor, lessee, mode },
        }
    }
}
