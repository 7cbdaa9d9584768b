//! Prefixed, checksummed Chainium addresses.
//!
//! Layout of the 26 decoded bytes:
//!
//! ```text
//! prefix (2) || digest (20) || checksum (4)
//! ```
//!
//! - `prefix` is the fixed network prefix `0x06 0x5A`.
//! - `digest` is the first 20 bytes of `SHA-512(SHA-256(pubkey))`, where
//!   `pubkey` is the 65-byte uncompressed SEC1 point.
//! - `checksum` is the first 4 bytes of `SHA-256(SHA-256(prefix || digest))`.
//!
//! The text form is Base58 and always starts with `CH`.

use std::fmt;

use chainium_types::{ChainiumError, Result};

use crate::codec::{decode_base58, decode_hex, encode_base58};
use crate::hash::{sha256, truncated_hash160};

/// Network prefix prepended to every address digest.
pub const ADDRESS_PREFIX: [u8; 2] = [0x06, 0x5A];

/// Length of the public-key digest.
pub const DIGEST_LEN: usize = 20;

/// Number of checksum bytes appended to `prefix || digest`.
pub const CHECKSUM_LEN: usize = 4;

/// Total decoded address length.
pub const ADDRESS_LEN: usize = ADDRESS_PREFIX.len() + DIGEST_LEN + CHECKSUM_LEN;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A parsed or freshly derived Chainium address.
///
/// Construction goes through [`Address::from_public_key`] or
/// [`Address::parse`], so an `Address` value always carries a checksum
/// that matches its digest.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Address {
    digest: [u8; DIGEST_LEN],
    checksum: [u8; CHECKSUM_LEN],
}

impl Address {
    /// Derives the address of a serialized public key.
    ///
    /// Any SEC1 encoding is hashed as given; the network convention is
    /// the 65-byte uncompressed form.
    pub fn from_public_key(public_key: &[u8]) -> Self {
        let digest = truncated_hash160(&sha256(public_key));
        Self {
            digest,
            checksum: compute_checksum(&digest),
        }
    }

    /// Parses a Base58 address, checking length, prefix and checksum.
    ///
    /// Malformed Base58 is a [`ChainiumError::Decode`] error; a well-formed
    /// string that fails any structural check is
    /// [`ChainiumError::InvalidAddress`].
    pub fn parse(address: &str) -> Result<Self> {
        Self::from_bytes(&decode_base58(address)?)
    }

    /// Validates the 26-byte binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ADDRESS_LEN {
            return Err(ChainiumError::InvalidAddress {
                reason: format!(
                    "decoded address must be {ADDRESS_LEN} bytes, got {}",
                    bytes.len()
                ),
            });
        }

        let (prefix, rest) = bytes.split_at(ADDRESS_PREFIX.len());
        if prefix != ADDRESS_PREFIX {
            return Err(ChainiumError::InvalidAddress {
                reason: format!("unexpected prefix {}", hex::encode(prefix)),
            });
        }

        let (digest_bytes, checksum_bytes) = rest.split_at(DIGEST_LEN);
        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(digest_bytes);

        let expected = compute_checksum(&digest);
        if expected.as_slice() != checksum_bytes {
            return Err(ChainiumError::InvalidAddress {
                reason: "checksum mismatch".into(),
            });
        }

        Ok(Self {
            digest,
            checksum: expected,
        })
    }

    /// The network prefix, always [`ADDRESS_PREFIX`].
    pub fn prefix(&self) -> [u8; 2] {
        ADDRESS_PREFIX
    }

    /// First 20 bytes of `SHA-512(SHA-256(public_key))`.
    pub fn digest(&self) -> &[u8; DIGEST_LEN] {
        &self.digest
    }

    /// First 4 bytes of `SHA-256(SHA-256(prefix || digest))`.
    pub fn checksum(&self) -> &[u8; CHECKSUM_LEN] {
        &self.checksum
    }

    /// Full binary form (`prefix || digest || checksum`).
    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        let mut out = [0u8; ADDRESS_LEN];
        out[..2].copy_from_slice(&ADDRESS_PREFIX);
        out[2..2 + DIGEST_LEN].copy_from_slice(&self.digest);
        out[2 + DIGEST_LEN..].copy_from_slice(&self.checksum);
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_base58(&self.to_bytes()))
    }
}

impl std::str::FromStr for Address {
    type Err = ChainiumError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn compute_checksum(digest: &[u8; DIGEST_LEN]) -> [u8; CHECKSUM_LEN] {
    let mut preimage = [0u8; 2 + DIGEST_LEN];
    preimage[..2].copy_from_slice(&ADDRESS_PREFIX);
    preimage[2..].copy_from_slice(digest);

    let double = sha256(&sha256(&preimage));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&double[..CHECKSUM_LEN]);
    out
}

// ---------------------------------------------------------------------------
// String API
// ---------------------------------------------------------------------------

/// Address of a serialized public key given as raw bytes.
pub fn address_from_public_key(public_key: &[u8]) -> String {
    Address::from_public_key(public_key).to_string()
}

/// Address of a hex-encoded public key.
pub fn blockchain_address(public_key_hex: &str) -> Result<String> {
    Ok(address_from_public_key(&decode_hex(public_key_hex)?))
}

/// Succeeds only for a well-formed address with a matching checksum.
pub fn validate_address(address: &str) -> Result<()> {
    Address::parse(address).map(|_| ())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
