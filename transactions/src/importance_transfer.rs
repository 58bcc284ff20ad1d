//! Importance transfer: (de)activates delegated harvesting through a remote account.

use nis_state::ImportanceTransferMode;
use nis_types::Address;
use serde::{Deserialize, Serialize};

use crate::common::{write_str, TransactionCommon};
use crate::effect::Effect;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportanceTransferTransaction {
    pub common: TransactionCommon,
    pub remote: Address,
    pub mode: ImportanceTransferMode,
}

impl ImportanceTransferTransaction {
    pub fn new(common: TransactionCommon, remote: Address, mode: ImportanceTransferMode) -> Self {
        Self { common, remote, mode }
    }

    pub(crate) fn write_signing_data(&self, data: &mut Vec<u8>) {
        data.push(match self.mode {
            ImportanceTransferMode::Activate => 1,
            ImportanceTransferMode::Deactivate => 2,
        });
        write_str(data, self.remote.as_str());
    }

    pub(crate) fn effects(&self) -> Vec<Effect> {
        let lessor = &self.common.signer.address;
        vec![
            Effect::AccountTouched { account: self.remote.clone() },
            Effect::RemoteLinkAdded { lessor: lessor.clone(), lessee: self.remote.clone(), mode: self.mode },
            Effect::BalanceDebit { account: lessor.clone(), amount: self.common.fee },
        ]
    }
}
