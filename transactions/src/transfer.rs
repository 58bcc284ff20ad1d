//! Transfer transaction: moves native currency and optionally mosaics.

use nis_types::{Address, Amount, Mosaic};
use serde::{Deserialize, Serialize};

use crate::common::{write_bytes, write_str, TransactionCommon};
use crate::effect::Effect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Plain,
    /// Payload is encrypted for the recipient; the core treats it as opaque.
    Secure,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn plain(payload: impl Into<Vec<u8>>) -> Self {
        Self { kind: MessageKind::Plain, payload: payload.into() }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTransaction {
    pub common: TransactionCommon,
    pub recipient: Address,
    pub amount: Amount,
    pub message: Option<Message>,
    pub mosaics: Vec<Mosaic>,
}

impl TransferTransaction {
    pub fn new(common: TransactionCommon, recipient: Address, amount: Amount) -> Self {
        Self { common, recipient, amount, message: None, mosaics: Vec::new() }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_mosaic(mut self, mosaic: Mosaic) -> Self {
        self.mosaics.push(mosaic);
        self
    }

    pub fn message_len(&self) -> usize {
        self.message.as_ref().map_or(0, Message::len)
    }

    pub(crate) fn write_signing_data(&self, data: &mut Vec<u8>) {
        write_str(data, self.recipient.as_str());
        data.extend_from_slice(&self.amount.micro().to_le_bytes());
        match &self.message {
            Some(message) => {
                data.push(match message.kind {
                    MessageKind::Plain => 1,
                    MessageKind::Secure => 2,
                });
                write_bytes(data, &message.payload);
            }
            None => data.push(0),
        }
        data.extend_from_slice(&(self.mosaics.len() as u32).to_le_bytes());
        for mosaic in &self.mosaics {
            write_str(data, &mosaic.id.namespace);
            write_str(data, &mosaic.id.name);
            data.extend_from_slice(&mosaic.quantity.raw().to_le_bytes());
        }
    }

    pub(crate) fn effects(&self) -> Vec<Effect> {
        let sender = &self.common.signer.address;
        let mut effects = vec![
            Effect::AccountTouched { account: self.recipient.clone() },
            Effect::BalanceTransfer {
                sender: sender.clone(),
                recipient: self.recipient.clone(),
                amount: self.amount,
            },
        ];
        effects.extend(self.mosaics.iter().map(|mosaic| Effect::MosaicTransfer {
            sender: sender.clone(),
            recipient: self.recipient.clone(),
            mosaic_id: mosaic.id.clone(),
            quantity: mosaic.quantity,
        }));
        effects.push(Effect::BalanceDebit { account: sender.clone(), amount: self.common.fee });
        effects
    }
}
