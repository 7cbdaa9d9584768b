//! Canonical recoverable ECDSA over secp256k1.
//!
//! Signatures are deterministic (RFC 6979) and always low-S. The wire
//! token is Base58 of the 65-byte concatenation `R || S || V`, where `V`
//! is the recovery id. There is no boolean verify: verification recovers
//! the signer address and the caller compares it with the expected one.
//!
//! Two digest modes exist:
//!
//! - **message**: `SHA-256(SHA-256(message) || SHA-256(network_code))`,
//!   binding a transaction signature to one network.
//! - **plain text**: `SHA-256(text)`, for off-chain proof of ownership.

use chainium_types::{ChainiumError, Result};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::address::address_from_public_key;
use crate::codec::{decode_base58, decode_hex, encode_base58};
use crate::hash::sha256;
use crate::keypair::KeyPair;

/// Length of the digest accepted by [`sign_data`].
pub const DIGEST_LEN: usize = 32;

// ---------------------------------------------------------------------------
// RecoverableSignature
// ---------------------------------------------------------------------------

/// `(R, S, V)` triple with fixed-width, zero-padded scalars.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecoverableSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    pub v: u8,
}

impl RecoverableSignature {
    /// Decoded byte length of a signature token.
    pub const LEN: usize = 65;

    /// Encodes `R || S || V` as one Base58 token.
    pub fn to_token(&self) -> String {
        encode_base58(&self.to_bytes())
    }

    /// Raw `r || s || v` form.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// Parses a Base58 token.
    ///
    /// # Errors
    ///
    /// [`ChainiumError::InvalidSignature`] if the token does not decode to
    /// exactly 65 bytes, the recovery id exceeds 3, a scalar is out of
    /// range, or `S` is in the upper half of the curve order.
    pub fn from_token(token: &str) -> Result<Self> {
        let bytes = decode_base58(token).map_err(|e| ChainiumError::InvalidSignature {
            reason: e.to_string(),
        })?;
        if bytes.len() != Self::LEN {
            return Err(ChainiumError::InvalidSignature {
                reason: format!(
                    "signature must be {} bytes, got {}",
                    Self::LEN,
                    bytes.len()
                ),
            });
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        let parsed = Self { r, s, v: bytes[64] };

        if !parsed.is_canonical()? {
            return Err(ChainiumError::InvalidSignature {
                reason: "non-canonical (high-S) signature".into(),
            });
        }
        // Validates the recovery id as a side effect.
        parsed.recovery_id()?;
        Ok(parsed)
    }

    /// `true` when `S` is at most half the curve order.
    pub fn is_canonical(&self) -> Result<bool> {
        Ok(self.ecdsa_signature()?.normalize_s().is_none())
    }

    fn ecdsa_signature(&self) -> Result<Signature> {
        let mut rs = [0u8; 64];
        rs[..32].copy_from_slice(&self.r);
        rs[32..].copy_from_slice(&self.s);
        Signature::from_slice(&rs).map_err(|_| ChainiumError::InvalidSignature {
            reason: "R or S is zero or not below the curve order".into(),
        })
    }

    fn recovery_id(&self) -> Result<RecoveryId> {
        RecoveryId::from_byte(self.v).ok_or_else(|| ChainiumError::InvalidSignature {
            reason: format!("recovery id must be 0..=3, got {}", self.v),
        })
    }

    /// Recovers the uncompressed public key that produced this signature
    /// over `digest`.
    pub fn recover_public_key(&self, digest: &[u8; DIGEST_LEN]) -> Result<[u8; 65]> {
        let signature = self.ecdsa_signature()?;
        let recovery_id = self.recovery_id()?;
        let verifying_key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
            .map_err(|_| ChainiumError::InvalidSignature {
                reason: "public key recovery failed".into(),
            })?;

        let point = verifying_key.as_affine().to_encoded_point(false);
        let mut out = [0u8; 65];
        out.copy_from_slice(point.as_bytes());
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

fn sign_digest(key_pair: &KeyPair, digest: &[u8; DIGEST_LEN]) -> Result<RecoverableSignature> {
    let (signature, recovery_id) = key_pair
        .signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|e| ChainiumError::InvalidSignature {
            reason: format!("ECDSA signing failed: {e}"),
        })?;

    // Negating S mirrors R's y coordinate, so the parity bit flips too.
    let (signature, recovery_id) = match signature.normalize_s() {
        Some(low) => (
            low,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (signature, recovery_id),
    };

    let bytes = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);
    Ok(RecoverableSignature {
        r,
        s,
        v: recovery_id.to_byte(),
    })
}

fn digest_from_hex(digest_hex: &str) -> Result<[u8; DIGEST_LEN]> {
    let bytes = decode_hex(digest_hex)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ChainiumError::Decode {
            reason: format!("digest must be {DIGEST_LEN} bytes, got {}", bytes.len()),
        })
}

fn message_digest(network_code: &str, message: &[u8]) -> [u8; DIGEST_LEN] {
    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(&sha256(message));
    preimage[32..].copy_from_slice(&sha256(network_code.as_bytes()));
    sha256(&preimage)
}

/// Signs a 32-byte hex digest and returns the Base58 signature token.
pub fn sign_data(private_key: &str, digest_hex: &str) -> Result<String> {
    let key_pair = KeyPair::from_base58(private_key)?;
    let digest = digest_from_hex(digest_hex)?;
    Ok(sign_digest(&key_pair, &digest)?.to_token())
}

/// Signs a hex-encoded message for the network identified by
/// `network_code`.
pub fn sign_message(network_code: &str, private_key: &str, hex_message: &str) -> Result<String> {
    let key_pair = KeyPair::from_base58(private_key)?;
    let digest = message_digest(network_code, &decode_hex(hex_message)?);
    Ok(sign_digest(&key_pair, &digest)?.to_token())
}

/// Signs the UTF-8 bytes of `text` without domain separation.
pub fn sign_plain_text(private_key: &str, text: &str) -> Result<String> {
    let key_pair = KeyPair::from_base58(private_key)?;
    Ok(sign_digest(&key_pair, &sha256(text.as_bytes()))?.to_token())
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

fn recover_address(signature: &str, digest: &[u8; DIGEST_LEN]) -> Result<String> {
    let public_key = RecoverableSignature::from_token(signature)?.recover_public_key(digest)?;
    Ok(address_from_public_key(&public_key))
}

/// Address of the key that signed `text` with [`sign_plain_text`].
pub fn verify_plain_text_signature(signature: &str, text: &str) -> Result<String> {
    recover_address(signature, &sha256(text.as_bytes()))
}

/// Address of the key that signed `hex_message` with [`sign_message`]
/// under `network_code`.
pub fn verify_message_signature(
    network_code: &str,
    signature: &str,
    hex_message: &str,
) -> Result<String> {
    let digest = message_digest(network_code, &decode_hex(hex_message)?);
    recover_address(signature, &digest)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
