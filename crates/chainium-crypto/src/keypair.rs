//! secp256k1 key generation and private-key validation.
//!
//! Private keys travel as Base58 of the raw 32-byte scalar. The
//! [`KeyPair`] wrapper owns a `k256` [`SigningKey`], which zeroizes its
//! scalar on drop.

use chainium_types::{ChainiumError, Result, Wallet};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::address::address_from_public_key;
use crate::codec::{decode_base58, encode_base58};

/// Byte length of a secp256k1 private scalar.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Byte length of an uncompressed SEC1 public key (`04 || X || Y`).
pub const PUBLIC_KEY_LEN: usize = 65;

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// secp256k1 signing key pair.
pub struct KeyPair {
    pub(crate) signing_key: SigningKey,
}

// KeyPair does not implement Clone/Debug to prevent leakage.

impl KeyPair {
    /// Generates a fresh key from the OS random source.
    ///
    /// Candidates that are not valid scalars (zero or ≥ n) are drawn
    /// again. A failing random source is reported, never retried.
    pub fn generate() -> Result<Self> {
        let mut candidate = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        loop {
            OsRng
                .try_fill_bytes(&mut candidate[..])
                .map_err(|e| ChainiumError::Entropy {
                    reason: format!("OS random source failed: {e}"),
                })?;
            if let Ok(signing_key) = SigningKey::from_slice(&candidate[..]) {
                return Ok(Self { signing_key });
            }
        }
    }

    /// Wraps a raw 32-byte scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        // k256 left-pads short slices; the wire format never does.
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(ChainiumError::InvalidPrivateKey {
                reason: format!(
                    "private key must be {PRIVATE_KEY_LEN} bytes, got {}",
                    bytes.len()
                ),
            });
        }
        let signing_key =
            SigningKey::from_slice(bytes).map_err(|_| ChainiumError::InvalidPrivateKey {
                reason: "scalar is zero or not below the curve order".into(),
            })?;
        Ok(Self { signing_key })
    }

    /// Decodes a Base58 private key. Characters outside the alphabet are
    /// a [`ChainiumError::Decode`] error.
    pub fn from_base58(private_key: &str) -> Result<Self> {
        let bytes = Zeroizing::new(decode_base58(private_key)?);
        Self::from_bytes(&bytes)
    }

    /// Base58 encoding of the private scalar.
    pub fn private_key_base58(&self) -> String {
        let bytes: Zeroizing<[u8; PRIVATE_KEY_LEN]> =
            Zeroizing::new(self.signing_key.to_bytes().into());
        encode_base58(&bytes[..])
    }

    /// Uncompressed SEC1 public key.
    pub fn public_key_uncompressed(&self) -> [u8; PUBLIC_KEY_LEN] {
        let point = self
            .signing_key
            .verifying_key()
            .as_affine()
            .to_encoded_point(false);
        let mut out = [0u8; PUBLIC_KEY_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Network address controlled by this key.
    pub fn address(&self) -> String {
        address_from_public_key(&self.public_key_uncompressed())
    }

    /// Consumes the pair into a [`Wallet`] value.
    pub fn into_wallet(self) -> Wallet {
        let address = self.address();
        Wallet::new(self.private_key_base58(), address)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generates a fresh random wallet.
pub fn generate_wallet() -> Result<Wallet> {
    let wallet = KeyPair::generate()?.into_wallet();
    tracing::debug!(address = %wallet.address(), "generated wallet");
    Ok(wallet)
}

/// Address controlled by a Base58 private key.
pub fn address_from_private_key(private_key: &str) -> Result<String> {
    Ok(KeyPair::from_base58(private_key)?.address())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
