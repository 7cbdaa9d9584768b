//! AES-256-GCM authenticated encryption for keystore payloads.
//!
//! Nonces are 96 bits from OS entropy and must never repeat under one
//! key. Each keystore derives a fresh key from a fresh salt, so in
//! practice every key seals exactly one payload.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use chainium_types::{ChainiumError, Result};
use rand::rngs::OsRng;
use rand::RngCore;

/// GCM authentication tag length appended to every ciphertext.
pub const TAG_LEN: usize = 16;

// ---------------------------------------------------------------------------
// AeadNonce
// ---------------------------------------------------------------------------

/// 96-bit AES-GCM nonce.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AeadNonce([u8; 12]);

impl AeadNonce {
    /// Nonce length in bytes.
    pub const LEN: usize = 12;

    /// Wraps raw nonce bytes.
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }
}

/// Draws a fresh nonce from the OS random source.
pub fn generate_aead_nonce() -> Result<AeadNonce> {
    let mut bytes = [0u8; AeadNonce::LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| ChainiumError::Entropy {
            reason: format!("OS random source failed: {e}"),
        })?;
    Ok(AeadNonce(bytes))
}

// ---------------------------------------------------------------------------
// Encrypt / Decrypt
// ---------------------------------------------------------------------------

/// Encrypts `plaintext`, authenticating `aad` alongside it.
///
/// The returned buffer is the ciphertext with the 16-byte tag appended.
pub fn encrypt_aes256gcm(
    key: &[u8; 32],
    nonce: &AeadNonce,
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let payload = Payload {
        msg: plaintext,
        aad,
    };
    cipher
        .encrypt(Nonce::from_slice(&nonce.0), payload)
        .map_err(|e| ChainiumError::InvalidKeystore {
            reason: format!("AES-256-GCM encryption failed: {e}"),
        })
}

/// Decrypts and authenticates `ciphertext` (tag appended).
///
/// # Errors
///
/// [`ChainiumError::InvalidKeystore`] when the tag does not verify: wrong
/// key, wrong nonce, wrong AAD or tampered data.
pub fn decrypt_aes256gcm(
    key: &[u8; 32],
    nonce: &AeadNonce,
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let payload = Payload {
        msg: ciphertext,
        aad,
    };
    cipher
        .decrypt(Nonce::from_slice(&nonce.0), payload)
        .map_err(|e| ChainiumError::InvalidKeystore {
            reason: format!("AES-256-GCM decryption failed: {e}"),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
