//! Multisig aggregate modification: converts an account to multisig, edits its
//! cosignatories and adjusts the approval threshold.

use nis_types::Address;
use serde::{Deserialize, Serialize};

use crate::common::{write_str, TransactionCommon};
use crate::effect::Effect;
use crate::error::TransactionError;

/// Version of a modification that carries a min-cosignatories change.
pub const MIN_COSIGNATORIES_VERSION: u8 = 2;

/// `Add` sorts before `Delete`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModificationKind {
    Add,
    Delete,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CosignatoryModification {
    pub kind: ModificationKind,
    pub cosignatory: Address,
}

impl CosignatoryModification {
    pub fn add(cosignatory: Address) -> Self {
        Self { kind: ModificationKind::Add, cosignatory }
    }

    pub fn delete(cosignatory: Address) -> Self {
        Self { kind: ModificationKind::Delete, cosignatory }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCosignatoriesModification {
    pub relative_change: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigAggregateModificationTransaction {
    pub common: TransactionCommon,
    modifications: Vec<CosignatoryModification>,
    min_cosignatories: Option<MinCosignatoriesModification>,
}

impl MultisigAggregateModificationTransaction {
    pub fn new(
        mut common: TransactionCommon,
        mut modifications: Vec<CosignatoryModification>,
        min_cosignatories: Option<MinCosignatoriesModification>,
    ) -> Result<Self, TransactionError> {
        if min_cosignatories.is_some_and(|m| m.relative_change == 0) {
            return Err(TransactionError::ZeroMinCosignatoriesChange);
        }
        if modifications.is_empty() && min_cosignatories.is_none() {
            return Err(TransactionError::EmptyModification);
        }
        modifications.sort();
        if min_cosignatories.is_some() {
            common.version = common.version.max(MIN_COSIGNATORIES_VERSION);
        }
        Ok(Self { common, modifications, min_cosignatories })
    }

    /// Modifications ordered `Add` before `Delete`, then by address.
    pub fn modifications(&self) -> &[CosignatoryModification] {
        &self.modifications
    }

    pub fn min_cosignatories(&self) -> Option<MinCosignatoriesModification> {
        self.min_cosignatories
    }

    pub fn added(&self) -> impl Iterator<Item = &Address> {
        self.modifications
            .iter()
            .filter(|m| m.kind == ModificationKind::Add)
            .map(|m| &m.cosignatory)
    }

    pub fn deleted(&self) -> impl Iterator<Item = &Address> {
        self.modifications
            .iter()
            .filter(|m| m.kind == ModificationKind::Delete)
            .map(|m| &m.cosignatory)
    }

    pub(crate) fn write_signing_data(&self, data: &mut Vec<u8>) {
        data.extend_from_slice(&(self.modifications.len() as u32).to_le_bytes());
        for modification in &self.modifications {
            data.push(match modification.kind {
                ModificationKind::Add => 1,
                ModificationKind::Delete => 2,
            });
            write_str(data, modification.cosignatory.as_str());
        }
        match self.min_cosignatories {
            Some(m) => {
                data.push(1);
                data.extend_from_slice(&m.relative_change.to_le_bytes());
            }
            None => data.push(0),
        }
    }

    pub(crate) fn effects(&self) -> Vec<Effect> {
        let multisig = &self.common.signer.address;
        let mut effects = Vec::with_capacity(self.modifications.len() * 2 + 2);
        for modification in &self.modifications {
            effects.push(Effect::AccountTouched { account: modification.cosignatory.clone() });
            effects.push(match modification.kind {
                ModificationKind::Add => Effect::CosignatoryAdded {
                    multisig: multisig.clone(),
                    cosignatory: modification.cosignatory.clone(),
                },
                ModificationKind::Delete => Effect::CosignatoryRemoved {
                    multisig: multisig.clone(),
                    cosignatory: modification.cosignatory.clone(),
                },
            });
        }
        if let Some(m) = self.min_cosignatories {
            effects.push(Effect::MinCosignatoriesChanged { multisig: multisig.clone(), delta: m.relative_change });
        }
        effects.push(Effect::BalanceDebit { account: multisig.clone(), amount: self.common.fee });
        effects
    }
}
