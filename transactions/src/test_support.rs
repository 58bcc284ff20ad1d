//! Builders shared by the unit tests of this crate.

use nis_crypto::{account_from_public_key, keypair_from_seed};
use nis_types::{Account, Amount, KeyPair, NetworkId, TimeInstant};

use crate::common::TransactionCommon;
use crate::multisig_signature::MultisigSignatureTransaction;
use crate::transfer::TransferTransaction;
use crate::Transaction;

pub fn keypair(seed: u8) -> KeyPair {
    keypair_from_seed(&[seed; 32])
}

pub fn account(seed: u8) -> Account {
    account_from_public_key(NetworkId::Test, keypair(seed).public)
}

pub fn nem(coins: u64) -> Amount {
    Amount::from_nem(coins)
}

pub fn common(seed: u8) -> TransactionCommon {
    TransactionCommon::new(NetworkId::Test, account(seed), TimeInstant::new(1000))
}

pub fn transfer(from: u8, to: u8, amount: u64, fee: u64) -> Transaction {
    Transaction::Transfer(TransferTransaction::new(
        common(from).with_fee(nem(fee)),
        account(to).address,
        nem(amount),
    ))
}

pub fn cosignature(signer: u8, inner: &Transaction) -> MultisigSignatureTransaction {
    MultisigSignatureTransaction::new(common(signer), inner.hash(), inner.signer().address.clone())
}
