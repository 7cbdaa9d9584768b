//! Core shared types for the Chainium wallet-cryptography workspace.
//!
//! Error kinds, the [`Wallet`] value type and keystore configuration
//! live here so that the crypto core and the transaction builder agree
//! on a single surface.

pub mod config;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// A Base58 private key together with the address it controls.
///
/// Produced by key generation or HD derivation and never mutated
/// afterwards. The private key is the sole signing authority, so the
/// `Debug` impl redacts it.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    private_key: String,
    address: String,
}

impl Wallet {
    /// Pairs an already-validated private key with its derived address.
    pub fn new(private_key: String, address: String) -> Self {
        Self {
            private_key,
            address,
        }
    }

    /// Base58-encoded 32-byte secp256k1 scalar.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Base58-encoded Chainium address.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// ChainiumError
// ---------------------------------------------------------------------------

/// Central error type for the Chainium wallet core.
///
/// Every failure is reported at the boundary of the operation that first
/// observes it. Nothing is retried or coerced.
#[derive(Debug, Error)]
pub enum ChainiumError {
    /// Malformed hex, Base58 or Base64 input.
    #[error("decode error: {reason}")]
    Decode { reason: String },

    /// Address has the wrong decoded length, prefix or checksum.
    #[error("invalid address: {reason}")]
    InvalidAddress { reason: String },

    /// Private key has the wrong decoded length or is not a valid scalar.
    #[error("invalid private key: {reason}")]
    InvalidPrivateKey { reason: String },

    /// Signature token is malformed, non-canonical or unrecoverable.
    #[error("invalid signature: {reason}")]
    InvalidSignature { reason: String },

    /// Mnemonic failed wordlist membership or checksum validation.
    #[error("invalid mnemonic: {reason}")]
    InvalidMnemonic { reason: String },

    /// Keystore could not be decrypted into a valid mnemonic.
    #[error("invalid keystore: {reason}")]
    InvalidKeystore { reason: String },

    /// An internal digest produced an unexpected length. Indicates a
    /// broken dependency, never a user error.
    #[error("integrity error: {reason}")]
    Integrity { reason: String },

    /// HD child-key derivation failed (bad index or invalid child).
    #[error("derivation error: {reason}")]
    Derivation { reason: String },

    /// The OS random source failed. Fatal and not retried.
    #[error("entropy error: {reason}")]
    Entropy { reason: String },

    /// The transaction builder could not produce its payload.
    #[error("invalid transaction: {reason}")]
    InvalidTransaction { reason: String },

    /// A configuration value is out of range.
    #[error("config error: {reason}")]
    Config { reason: String },
}

/// Convenience result type using [`ChainiumError`].
pub type Result<T> = std::result::Result<T, ChainiumError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
