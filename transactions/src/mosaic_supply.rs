//! Mosaic supply change: the creator mints or burns units of a mosaic.

use nis_types::{MosaicId, Quantity};
use serde::{Deserialize, Serialize};

use crate::common::{write_str, TransactionCommon};
use crate::effect::Effect;
use crate::error::TransactionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MosaicSupplyType {
    Create,
    Delete,
}

impl MosaicSupplyType {
    pub fn flipped(self) -> Self {
        match self {
            Self::Create => Self::Delete,
            Self::Delete => Self::Create,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicSupplyChangeTransaction {
    pub common: TransactionCommon,
    pub mosaic_id: MosaicId,
    pub supply_type: MosaicSupplyType,
    pub delta: Quantity,
}

impl MosaicSupplyChangeTransaction {
    pub fn new(
        common: TransactionCommon,
        mosaic_id: MosaicId,
        supply_type: MosaicSupplyType,
        delta: Quantity,
    ) -> Result<Self, TransactionError> {
        if delta.is_zero() {
            return Err(TransactionError::ZeroSupplyDelta);
        }
        Ok(Self { common, mosaic_id, supply_type, delta })
    }

    pub(crate) fn write_signing_data(&self, data: &mut Vec<u8>) {
        write_str(data, &self.mosaic_id.namespace);
        write_str(data, &self.mosaic_id.name);
        data.push(match self.supply_type {
            MosaicSupplyType::Create => 1,
            MosaicSupplyType::Delete => 2,
        });
        data.extend_from_slice(&self.delta.raw().to_le_bytes());
    }

    pub(crate) fn effects(&self) -> Vec<Effect> {
        let supplier = &self.common.signer.address;
        vec![
            Effect::MosaicSupplyChange {
                supplier: supplier.clone(),
                mosaic_id: self.mosaic_id.clone(),
                supply_type: self.supply_type,
                delta: self.delta,
            },
            Effect::BalanceDebit { account: supplier.clone(), amount: self.common.fee },
        ]
    }
}
