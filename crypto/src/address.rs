//! Address derivation from public keys.
//!
//! Layout of the 25 decoded bytes:
//! `network version byte || blake2b(public_key)[..20] || checksum[..4]`,
//! where the checksum is the Blake2b-256 of the first 21 bytes. The bytes are
//! base32 encoded (RFC 4648 alphabet, no padding) into exactly 40 characters,
//! so the network byte determines the leading character (`N`, `T` or `M`).

use nis_types::{Account, Address, NetworkId, PublicKey};

use crate::hash::{blake2b_256, blake2b_256_multi};

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < 32 {
        table[BASE32_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

const DIGEST_LEN: usize = 20;
const CHECKSUM_LEN: usize = 4;
const DECODED_LEN: usize = 1 + DIGEST_LEN + CHECKSUM_LEN;

fn encode_base32(bytes: &[u8]) -> String {
    let mut result = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }
    result
}

fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        if c >= 128 {
            return None;
        }
        let val = BASE32_DECODE[c as usize];
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos >= N {
                return None;
            }
            result[pos] = ((buffer >> bits_in_buffer) & 0xFF) as u8;
            pos += 1;
        }
    }
    (pos == N).then_some(result)
}

fn checksum(versioned_digest: &[u8]) -> [u8; CHECKSUM_LEN] {
    let full = blake2b_256(versioned_digest);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&full[..CHECKSUM_LEN]);
    out
}

/// Derive the address controlled by `public_key` on `network`.
pub fn derive_address(network: NetworkId, public_key: &PublicKey) -> Address {
    let digest = blake2b_256_multi(&[public_key.as_bytes()]);
    let mut decoded = [0u8; DECODED_LEN];
    decoded[0] = network.version_byte();
    decoded[1..1 + DIGEST_LEN].copy_from_slice(&digest[..DIGEST_LEN]);
    let sum = checksum(&decoded[..1 + DIGEST_LEN]);
    decoded[1 + DIGEST_LEN..].copy_from_slice(&sum);
    Address::from_encoded_unchecked(encode_base32(&decoded))
}

/// Build the signer [`Account`] for a public key.
pub fn account_from_public_key(network: NetworkId, public_key: PublicKey) -> Account {
    Account::new(derive_address(network, &public_key), public_key)
}

/// Check an address's shape, network byte and checksum.
pub fn validate_address(address: &Address) -> bool {
    if !address.is_valid() {
        return false;
    }
    let Some(decoded) = decode_base32_fixed::<DECODED_LEN>(address.as_str()) else {
        return false;
    };
    let Some(network) = address.network() else {
        return false;
    };
    decoded[0] == network.version_byte()
        && checksum(&decoded[..1 + DIGEST_LEN]) == decoded[1 + DIGEST_LEN..]
}
