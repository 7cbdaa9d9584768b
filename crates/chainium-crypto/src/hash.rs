//! SHA-256 / SHA-512 digests and deterministic action-hash derivation.
//!
//! Byte-level primitives return fixed-size arrays. The hex API mirrors
//! them and checks every digest length before handing it out; a wrong
//! length can only mean a broken hashing backend and is reported as
//! [`ChainiumError::Integrity`].

use chainium_types::{ChainiumError, Result};
use sha2::{Digest, Sha256, Sha512};

use crate::address::ADDRESS_LEN;
use crate::codec::{decode_base58, decode_hex, encode_base58};

/// SHA-256 of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-512 of arbitrary data.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// First 20 bytes of SHA-512.
///
/// Not RIPEMD-160. Addresses on the network are built from this
/// truncation, so it must stay as is.
pub fn truncated_hash160(data: &[u8]) -> [u8; 20] {
    let digest = sha512(data);
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest[..20]);
    out
}

// ---------------------------------------------------------------------------
// Hex API
// ---------------------------------------------------------------------------

fn checked_hex(digest: &[u8], expected_hex_len: usize, name: &str) -> Result<String> {
    let encoded = hex::encode(digest);
    if encoded.len() != expected_hex_len {
        return Err(ChainiumError::Integrity {
            reason: format!(
                "{name} produced {} hex chars, expected {expected_hex_len}",
                encoded.len()
            ),
        });
    }
    Ok(encoded)
}

/// SHA-256 of hex-encoded input, as 64 hex chars.
pub fn sha256_hex(hex_data: &str) -> Result<String> {
    checked_hex(&sha256(&decode_hex(hex_data)?), 64, "sha256")
}

/// SHA-512 of hex-encoded input, as 128 hex chars.
pub fn sha512_hex(hex_data: &str) -> Result<String> {
    checked_hex(&sha512(&decode_hex(hex_data)?), 128, "sha512")
}

/// Truncated SHA-512 of hex-encoded input, as 40 hex chars.
pub fn truncated_hash160_hex(hex_data: &str) -> Result<String> {
    checked_hex(&truncated_hash160(&decode_hex(hex_data)?), 40, "hash160")
}

// ---------------------------------------------------------------------------
// Base58 digests
// ---------------------------------------------------------------------------

/// Base58 SHA-256 of the bytes encoded by `hex_data`.
pub fn hash(hex_data: &str) -> Result<String> {
    Ok(encode_base58(&sha256(&decode_hex(hex_data)?)))
}

/// Deterministic identifier for the `action_number`-th action of the
/// transaction sent by `address` with `nonce`.
///
/// Formula: `Base58(SHA-256(address_bytes || nonce_be64 || action_number_be16))`.
///
/// Only the decoded address length is checked here; prefix and checksum
/// validation belong to [`crate::address::validate_address`]. Malformed
/// Base58 is a [`ChainiumError::Decode`] error.
pub fn derive_hash(address: &str, nonce: u64, action_number: u16) -> Result<String> {
    let address_bytes = decode_base58(address)?;
    if address_bytes.len() != ADDRESS_LEN {
        return Err(ChainiumError::InvalidAddress {
            reason: format!(
                "decoded address must be {ADDRESS_LEN} bytes, got {}",
                address_bytes.len()
            ),
        });
    }

    let mut preimage = Vec::with_capacity(ADDRESS_LEN + 8 + 2);
    preimage.extend_from_slice(&address_bytes);
    preimage.extend_from_slice(&nonce.to_be_bytes());
    preimage.extend_from_slice(&action_number.to_be_bytes());

    Ok(encode_base58(&sha256(&preimage)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::utf8_to_hex;

    const ADDRESS: &str = "CHGmdQdHfLPcMHtzyDzxAkTAQiRvKJrkYv8";

    #[test]
    fn sha256_abc() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn truncated_hash160_is_sha512_prefix() {
        let full = sha512(b"chainium");
        assert_eq!(truncated_hash160(b"chainium")[..], full[..20]);
    }

    #[test]
    fn hex_digest_lengths() -> std::result::Result<(), ChainiumError> {
        let input = utf8_to_hex("Chainium");
        assert_eq!(sha256_hex(&input)?.len(), 64);
        assert_eq!(sha512_hex(&input)?.len(), 128);
        assert_eq!(truncated_hash160_hex(&input)?.len(), 40);
        Ok(())
    }

    #[test]
    fn hash_known_value() -> std::result::Result<(), ChainiumError> {
        assert_eq!(
            hash(&utf8_to_hex("Chainium"))?,
            "Dp6vNLdUbRTc1Y3i9uSBritNqvqe4es9MjjGrVi1nQMu"
        );
        Ok(())
    }

    #[test]
    fn hash_of_empty_input() -> std::result::Result<(), ChainiumError> {
        assert_eq!(hash("")?, "GKot5hBsd81kMupNCXHaqbhv3huEbxAFMLnpcX2hniwn");
        Ok(())
    }

    #[test]
    fn derive_hash_known_values() -> std::result::Result<(), ChainiumError> {
        assert_eq!(
            derive_hash(ADDRESS, 1, 1)?,
            "8QkGKLhfswS21i3hbADDtTcQqbE7cazb66Hwc1yVmZoA"
        );
        assert_eq!(
            derive_hash(ADDRESS, 32, 3)?,
            "2c2FoA3XJYBAbM3SaoTQxF855gYY8oeBZj22WTcQkxnD"
        );
        Ok(())
    }

    #[test]
    fn derive_hash_rejects_short_address() {
        assert!(matches!(
            derive_hash("CGwVR5Wyya4", 1, 1),
            Err(ChainiumError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn derive_hash_rejects_non_base58() {
        assert!(matches!(
            derive_hash("0OIl", 1, 1),
            Err(ChainiumError::Decode { .. })
        ));
    }

    #[test]
    fn bad_hex_rejected() {
        assert!(matches!(sha256_hex("xyz"), Err(ChainiumError::Decode { .. })));
    }
}
