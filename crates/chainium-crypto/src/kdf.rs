//! Argon2id key derivation for keystore encryption.
//!
//! Stretches a keystore password and random salt into a 256-bit AES key.
//! Cost parameters come from [`KeystoreConfig`]; invalid parameters
//! return [`ChainiumError::Config`].

use chainium_types::config::KeystoreConfig;
use chainium_types::{ChainiumError, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Salt length written into new keystores.
pub const SALT_LEN: usize = 16;

/// Minimum accepted salt length.
const MIN_SALT_LEN: usize = 8;

// ---------------------------------------------------------------------------
// DerivedKey
// ---------------------------------------------------------------------------

/// 256-bit key derived by Argon2id, zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; 32]);

impl DerivedKey {
    /// Key length in bytes.
    pub const LEN: usize = 32;

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

// DerivedKey does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

/// Derives a 256-bit key from `password` and `salt` using Argon2id v1.3.
///
/// # Errors
///
/// - [`ChainiumError::Config`] if the salt is shorter than 8 bytes or the
///   cost parameters are out of range.
/// - [`ChainiumError::InvalidKeystore`] if the Argon2 computation fails.
pub fn argon2id_derive_key(
    password: &[u8],
    salt: &[u8],
    config: &KeystoreConfig,
) -> Result<DerivedKey> {
    if salt.len() < MIN_SALT_LEN {
        return Err(ChainiumError::Config {
            reason: format!(
                "salt must be at least {MIN_SALT_LEN} bytes, got {}",
                salt.len()
            ),
        });
    }
    config.validate()?;

    let params = argon2::Params::new(
        config.m_cost,
        config.t_cost,
        config.p_cost,
        Some(DerivedKey::LEN),
    )
    .map_err(|e| ChainiumError::Config {
        reason: format!("invalid Argon2 parameters: {e}"),
    })?;

    let argon2 = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut output = [0u8; DerivedKey::LEN];
    argon2
        .hash_password_into(password, salt, &mut output)
        .map_err(|e| ChainiumError::InvalidKeystore {
            reason: format!("Argon2id derivation failed: {e}"),
        })?;

    Ok(DerivedKey(output))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
