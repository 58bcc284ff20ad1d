//! Binary transaction codec.
//!
//! Format: `type_tag_le (u32) || bincode(body)`. Decoding dispatches on the tag
//! alone.

use crate::error::TransactionError;
use crate::{Transaction, TransactionKind};

const TAG_LEN: usize = 4;

pub fn encode(tx: &Transaction) -> Result<Vec<u8>, TransactionError> {
    let mut bytes = tx.type_tag().to_le_bytes().to_vec();
    match tx {
        Transaction::Transfer(body) => bincode::serialize_into(&mut bytes, body)?,
        Transaction::ImportanceTransfer(body) => bincode::serialize_into(&mut bytes, body)?,
        Transaction::MultisigAggregateModification(body) => bincode::serialize_into(&mut bytes, body)?,
        Transaction::MultisigSignature(body) => bincode::serialize_into(&mut bytes, body)?,
        Transaction::Multisig(body) => bincode::serialize_into(&mut bytes, body)?,
        Transaction::MosaicSupplyChange(body) => bincode::serialize_into(&mut bytes, body)?,
    }
    Ok(bytes)
}

pub fn decode(bytes: &[u8]) -> Result<Transaction, TransactionError> {
    let (tag, body) = bytes.split_first_chunk::<TAG_LEN>().ok_or(TransactionError::Truncated(bytes.len()))?;
    let tag = u32::from_le_bytes(*tag);
    let kind = TransactionKind::from_type_tag(tag).ok_or(TransactionError::UnknownTypeTag(tag))?;
    Ok(match kind {
        TransactionKind::Transfer => Transaction::Transfer(bincode::deserialize(body)?),
        TransactionKind::ImportanceTransfer => Transaction::ImportanceTransfer(bincode::deserialize(body)?),
        TransactionKind::MultisigAggregateModification => {
            Transaction::MultisigAggregateModification(bincode::deserialize(body)?)
        }
        TransactionKind::MultisigSignature => Transaction::MultisigSignature(bincode::deserialize(body)?),
        TransactionKind::Multisig => Transaction::Multisig(bincode::deserialize(body)?),
        TransactionKind::MosaicSupplyChange => Transaction::MosaicSupplyChange(bincode::deserialize(body)?),
    })
}
