//! NIS transaction kinds, their reversible effects and multisig aggregation.
//!
//! Transaction kinds:
//! - **Transfer**: moves native currency and mosaics
//! - **ImportanceTransfer**: (de)activates remote harvesting
//! - **MultisigAggregateModification**: edits cosignatories and the approval threshold
//! - **MultisigSignature**: a cosignatory approval of a pending multisig transaction
//! - **Multisig**: wraps a transaction issued on behalf of a multisig account
//! - **MosaicSupplyChange**: mints or burns mosaic units

pub mod block;
pub mod codec;
pub mod common;
pub mod effect;
pub mod error;
pub mod fee;
pub mod importance_transfer;
pub mod mosaic_supply;
pub mod multisig;
pub mod multisig_modification;
pub mod multisig_signature;
pub mod observer;
pub mod transfer;

#[cfg(test)]
pub(crate) mod test_support;

use nis_crypto::{derive_address, hash_bytes, sign_message, verify_signature};
use nis_types::{Account, Address, Amount, Hash, PrivateKey, TimeInstant};
use serde::{Deserialize, Serialize};

pub use block::Block;
pub use common::TransactionCommon;
pub use effect::Effect;
pub use error::TransactionError;
pub use fee::{DefaultFeeCalculator, FeeCalculator};
pub use importance_transfer::ImportanceTransferTransaction;
pub use mosaic_supply::{MosaicSupplyChangeTransaction, MosaicSupplyType};
pub use multisig::MultisigTransaction;
pub use multisig_modification::{
    CosignatoryModification, MinCosignatoriesModification, ModificationKind, MultisigAggregateModificationTransaction,
};
pub use multisig_signature::MultisigSignatureTransaction;
pub use observer::{execute, undo, EffectObserver, NotificationContext, NotificationTrigger, StateObserver};
pub use transfer::{Message, MessageKind, TransferTransaction};

/// Transaction kind, one-to-one with the wire type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Transfer,
    ImportanceTransfer,
    MultisigAggregateModification,
    MultisigSignature,
    Multisig,
    MosaicSupplyChange,
}

impl TransactionKind {
    pub fn type_tag(&self) -> u32 {
        match self {
            Self::Transfer => 0x0101,
            Self::ImportanceTransfer => 0x0801,
            Self::MultisigAggregateModification => 0x1001,
            Self::MultisigSignature => 0x1002,
            Self::Multisig => 0x1004,
            Self::MosaicSupplyChange => 0x4002,
        }
    }

    pub fn from_type_tag(tag: u32) -> Option<Self> {
        match tag {
            0x0101 => Some(Self::Transfer),
            0x0801 => Some(Self::ImportanceTransfer),
            0x1001 => Some(Self::MultisigAggregateModification),
            0x1002 => Some(Self::MultisigSignature),
            0x1004 => Some(Self::Multisig),
            0x4002 => Some(Self::MosaicSupplyChange),
            _ => None,
        }
    }
}

/// The unified transaction enum wrapping all NIS transaction kinds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transaction {
    Transfer(TransferTransaction),
    ImportanceTransfer(ImportanceTransferTransaction),
    MultisigAggregateModification(MultisigAggregateModificationTransaction),
    MultisigSignature(MultisigSignatureTransaction),
    Multisig(MultisigTransaction),
    MosaicSupplyChange(MosaicSupplyChangeTransaction),
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Transfer(_) => TransactionKind::Transfer,
            Self::ImportanceTransfer(_) => TransactionKind::ImportanceTransfer,
            Self::MultisigAggregateModification(_) => TransactionKind::MultisigAggregateModification,
            Self::MultisigSignature(_) => TransactionKind::MultisigSignature,
            Self::Multisig(_) => TransactionKind::Multisig,
            Self::MosaicSupplyChange(_) => TransactionKind::MosaicSupplyChange,
        }
    }

    pub fn type_tag(&self) -> u32 {
        self.kind().type_tag()
    }

    pub fn common(&self) -> &TransactionCommon {
        match self {
            Self::Transfer(tx) => &tx.common,
            Self::ImportanceTransfer(tx) => &tx.common,
            Self::MultisigAggregateModification(tx) => &tx.common,
            Self::MultisigSignature(tx) => &tx.common,
            Self::Multisig(tx) => &tx.common,
            Self::MosaicSupplyChange(tx) => &tx.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut TransactionCommon {
        match self {
            Self::Transfer(tx) => &mut tx.common,
            Self::ImportanceTransfer(tx) => &mut tx.common,
            Self::MultisigAggregateModification(tx) => &mut tx.common,
            Self::MultisigSignature(tx) => &mut tx.common,
            Self::Multisig(tx) => &mut tx.common,
            Self::MosaicSupplyChange(tx) => &mut tx.common,
        }
    }

    pub fn signer(&self) -> &Account {
        &self.common().signer
    }

    /// The account that pays the fee.
    pub fn debtor(&self) -> &Address {
        match self {
            Self::Multisig(tx) => tx.multisig(),
            Self::MultisigSignature(tx) => &tx.multisig,
            _ => &self.signer().address,
        }
    }

    pub fn fee(&self) -> Amount {
        self.common().fee
    }

    /// Fee of this transaction plus the fees of all child transactions.
    pub fn total_fee(&self) -> Amount {
        self.child_transactions()
            .iter()
            .fold(self.fee(), |total, child| total.saturating_add(child.total_fee()))
    }

    pub fn timestamp(&self) -> TimeInstant {
        self.common().timestamp
    }

    pub fn deadline(&self) -> TimeInstant {
        self.common().deadline
    }

    /// Accounts other than the signer that this transaction affects.
    pub fn other_accounts(&self) -> Vec<Address> {
        match self {
            Self::Transfer(tx) => vec![tx.recipient.clone()],
            Self::ImportanceTransfer(tx) => vec![tx.remote.clone()],
            Self::MultisigAggregateModification(tx) => {
                tx.modifications().iter().map(|m| m.cosignatory.clone()).collect()
            }
            Self::MultisigSignature(tx) => vec![tx.multisig.clone()],
            Self::Multisig(tx) => std::iter::once(tx.multisig().clone())
                .chain(tx.signers().cloned())
                .collect(),
            Self::MosaicSupplyChange(_) => Vec::new(),
        }
    }

    /// The signer followed by [`other_accounts`](Self::other_accounts).
    pub fn accounts(&self) -> Vec<Address> {
        std::iter::once(self.signer().address.clone())
            .chain(self.other_accounts())
            .collect()
    }

    /// Attached approvals followed by the inner transaction, for a multisig
    /// wrapper; empty otherwise.
    pub fn child_transactions(&self) -> Vec<Transaction> {
        match self {
            Self::Multisig(tx) => tx
                .cosigner_signatures()
                .cloned()
                .map(Transaction::MultisigSignature)
                .chain(std::iter::once(tx.other_transaction().clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Canonical bytes covered by the signature and the hash.
    pub fn signing_data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(128);
        self.common().write_signing_data(self.type_tag(), &mut data);
        match self {
            Self::Transfer(tx) => tx.write_signing_data(&mut data),
            Self::ImportanceTransfer(tx) => tx.write_signing_data(&mut data),
            Self::MultisigAggregateModification(tx) => tx.write_signing_data(&mut data),
            Self::MultisigSignature(tx) => tx.write_signing_data(&mut data),
            Self::Multisig(tx) => tx.write_signing_data(&mut data),
            Self::MosaicSupplyChange(tx) => tx.write_signing_data(&mut data),
        }
        data
    }

    /// Blake2b-256 of [`signing_data`](Self::signing_data). Signatures, including
    /// attached cosignatures, never change the hash.
    pub fn hash(&self) -> Hash {
        hash_bytes(&self.signing_data())
    }

    pub fn sign(&mut self, private_key: &PrivateKey) {
        let signature = sign_message(&self.signing_data(), private_key);
        self.common_mut().signature = Some(signature);
    }

    /// Check the signer's address against its key and the signature against the
    /// signing data. A multisig wrapper also requires every attached approval to verify.
    pub fn verify(&self) -> bool {
        let common = self.common();
        let Some(signature) = &common.signature else {
            return false;
        };
        if derive_address(common.network, &common.signer.public_key) != common.signer.address {
            return false;
        }
        if !verify_signature(&self.signing_data(), signature, &common.signer.public_key) {
            return false;
        }
        match self {
            Self::Multisig(tx) => tx.verify_cosignatures(),
            _ => true,
        }
    }

    /// Direction-free list of the state changes this transaction makes.
    pub fn effects(&self) -> Vec<Effect> {
        match self {
            Self::Transfer(tx) => tx.effects(),
            Self::ImportanceTransfer(tx) => tx.effects(),
            Self::MultisigAggregateModification(tx) => tx.effects(),
            Self::MultisigSignature(tx) => tx.effects(),
            Self::Multisig(tx) => tx.effects(),
            Self::MosaicSupplyChange(tx) => tx.effects(),
        }
    }
}
