//! Fixtures shared by the unit tests of this crate.

use nis_crypto::{account_from_public_key, keypair_from_seed};
use nis_state::NisCache;
use nis_transactions::{Transaction, TransactionCommon, TransferTransaction};
use nis_types::{Account, Address, Amount, BlockHeight, KeyPair, NetworkId, TimeInstant};

use crate::context::{ValidationContext, ValidationState};

pub const HEIGHT: u64 = 100;

pub fn keypair(seed: u8) -> KeyPair {
    keypair_from_seed(&[seed; 32])
}

pub fn account(seed: u8) -> Account {
    account_from_public_key(NetworkId::Test, keypair(seed).public)
}

pub fn address(seed: u8) -> Address {
    account(seed).address
}

pub fn nem(coins: u64) -> Amount {
    Amount::from_nem(coins)
}

pub fn common(seed: u8) -> TransactionCommon {
    TransactionCommon::new(NetworkId::Test, account(seed), TimeInstant::new(1000))
}

pub fn transfer(from: u8, to: u8, amount: u64, fee: u64) -> Transaction {
    Transaction::Transfer(TransferTransaction::new(common(from).with_fee(nem(fee)), address(to), nem(amount)))
}

/// Cache with each `(seed, coins)` account seeded at height 1.
pub fn funded(balances: &[(u8, u64)]) -> NisCache {
    let mut cache = NisCache::default();
    for &(seed, coins) in balances {
        cache.accounts.seed_balance(&address(seed), BlockHeight::ONE, nem(coins)).unwrap();
    }
    cache
}

/// Turn `multisig` into a multisig account over `cosigners` with the given threshold.
pub fn make_multisig(cache: &mut NisCache, multisig: u8, cosigners: &[u8], min: u32) {
    for &cosigner in cosigners {
        cache.accounts.find_or_create(&address(multisig)).multisig_links.add_cosignatory(address(cosigner)).unwrap();
        cache.accounts.find_or_create(&address(cosigner)).multisig_links.add_cosignatory_of(address(multisig)).unwrap();
    }
    let delta = min as i32 - cosigners.len() as i32;
    if delta != 0 {
        cache.accounts.find_or_create(&address(multisig)).multisig_links.increment_min_cosignatories_by(delta).unwrap();
    }
}

/// Context at [`HEIGHT`] with block time 1000 over a snapshot of `cache`.
pub fn context(cache: &NisCache) -> ValidationContext {
    ValidationContext::with_heights(
        BlockHeight::new(HEIGHT),
        BlockHeight::new(HEIGHT - 1),
        ValidationState::from_cache(cache.clone()),
    )
    .with_block_time(TimeInstant::new(1000))
}
