//! Password-protected mnemonic keystores.
//!
//! A keystore is Base64 text over the following binary layout:
//!
//! ```text
//! "CHKS" (4) || version (1) || m_cost (4, BE) || t_cost (4, BE) || p_cost (4, BE)
//!     || salt (16) || nonce (12) || ciphertext || tag (16)
//! ```
//!
//! The encryption key is `Argon2id(password, salt)` with the recorded
//! costs, the cipher is AES-256-GCM and the whole header is bound as
//! associated data. A wrong password or any tampering fails the tag
//! check, and a decrypted payload must still pass mnemonic validation
//! before it is handed out.
//!
//! Recorded costs are bounded by [`KeystoreConfig::validate`] while the
//! header is parsed, before any key stretching.
//!
//! This format does not read keystores written by the JavaScript SDK
//! (CryptoJS `AES.encrypt(mnemonic, password)` passphrase output). Such a
//! keystore is rejected as [`ChainiumError::InvalidKeystore`]; recover it
//! by restoring from the mnemonic and writing a new keystore.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chainium_types::config::KeystoreConfig;
use chainium_types::{ChainiumError, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::aead::{decrypt_aes256gcm, encrypt_aes256gcm, generate_aead_nonce, AeadNonce, TAG_LEN};
use crate::kdf::{argon2id_derive_key, SALT_LEN};
use crate::mnemonic::{Mnemonic, Seed};

const MAGIC: &[u8; 4] = b"CHKS";
const VERSION: u8 = 1;

const HEADER_LEN: usize = MAGIC.len() + 1 + 3 * 4 + SALT_LEN + AeadNonce::LEN;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

struct Header {
    config: KeystoreConfig,
    salt: [u8; SALT_LEN],
    nonce: AeadNonce,
}

impl Header {
    fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..4].copy_from_slice(MAGIC);
        out[4] = VERSION;
        out[5..9].copy_from_slice(&self.config.m_cost.to_be_bytes());
        out[9..13].copy_from_slice(&self.config.t_cost.to_be_bytes());
        out[13..17].copy_from_slice(&self.config.p_cost.to_be_bytes());
        out[17..17 + SALT_LEN].copy_from_slice(&self.salt);
        out[17 + SALT_LEN..].copy_from_slice(self.nonce.as_bytes());
        out
    }

    fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN + TAG_LEN {
            return Err(invalid(format!(
                "keystore too short: {} bytes",
                bytes.len()
            )));
        }
        if &bytes[..4] != MAGIC {
            return Err(invalid("missing keystore magic".into()));
        }
        if bytes[4] != VERSION {
            return Err(invalid(format!("unsupported keystore version {}", bytes[4])));
        }

        let config = KeystoreConfig {
            m_cost: read_u32(&bytes[5..9]),
            t_cost: read_u32(&bytes[9..13]),
            p_cost: read_u32(&bytes[13..17]),
        };
        // Must run before the costs reach Argon2.
        config.validate().map_err(|e| invalid(e.to_string()))?;

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[17..17 + SALT_LEN]);
        let mut nonce = [0u8; AeadNonce::LEN];
        nonce.copy_from_slice(&bytes[17 + SALT_LEN..HEADER_LEN]);

        Ok(Self {
            config,
            salt,
            nonce: AeadNonce::from_bytes(nonce),
        })
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_be_bytes(buf)
}

fn invalid(reason: String) -> ChainiumError {
    ChainiumError::InvalidKeystore { reason }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Encrypts a validated mnemonic under `password` with default costs.
pub fn generate_wallet_keystore(mnemonic: &str, password: &str) -> Result<String> {
    generate_wallet_keystore_with(mnemonic, password, &KeystoreConfig::default())
}

/// Encrypts a validated mnemonic under `password` with explicit costs.
pub fn generate_wallet_keystore_with(
    mnemonic: &str,
    password: &str,
    config: &KeystoreConfig,
) -> Result<String> {
    let mnemonic = Mnemonic::parse(mnemonic)?;
    config.validate()?;

    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| ChainiumError::Entropy {
            reason: format!("OS random source failed: {e}"),
        })?;
    let header = Header {
        config: *config,
        salt,
        nonce: generate_aead_nonce()?,
    };
    let header_bytes = header.to_bytes();

    let key = argon2id_derive_key(password.as_bytes(), &header.salt, config)?;
    let ciphertext = encrypt_aes256gcm(
        key.as_bytes(),
        &header.nonce,
        mnemonic.as_str().as_bytes(),
        &header_bytes,
    )?;

    let mut blob = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    blob.extend_from_slice(&header_bytes);
    blob.extend_from_slice(&ciphertext);

    tracing::debug!(
        words = mnemonic.word_count(),
        m_cost = config.m_cost,
        t_cost = config.t_cost,
        "created keystore"
    );
    Ok(BASE64.encode(blob))
}

/// Decrypts a keystore and re-validates the recovered mnemonic.
///
/// # Errors
///
/// Every failure (bad Base64, malformed header, wrong password, tampered
/// data, invalid mnemonic) is reported as
/// [`ChainiumError::InvalidKeystore`].
pub fn decrypt_keystore(blob: &str, password: &str) -> Result<Mnemonic> {
    let result = open_keystore(blob, password);
    if let Err(e) = &result {
        tracing::warn!(error = %e, "keystore rejected");
    }
    result
}

fn open_keystore(blob: &str, password: &str) -> Result<Mnemonic> {
    let bytes = BASE64
        .decode(blob.trim())
        .map_err(|e| invalid(format!("invalid base64: {e}")))?;
    let header = Header::parse(&bytes)?;
    let (header_bytes, ciphertext) = bytes.split_at(HEADER_LEN);

    let key = argon2id_derive_key(password.as_bytes(), &header.salt, &header.config)
        .map_err(|e| invalid(e.to_string()))?;
    let plaintext = Zeroizing::new(decrypt_aes256gcm(
        key.as_bytes(),
        &header.nonce,
        ciphertext,
        header_bytes,
    )?);

    let phrase = std::str::from_utf8(&plaintext)
        .map_err(|_| invalid("decrypted payload is not UTF-8".into()))?;
    Mnemonic::parse(phrase).map_err(|e| invalid(e.to_string()))
}

/// Decrypts a keystore and stretches the mnemonic into a seed.
///
/// The password doubles as the BIP-39 passphrase, so the result equals
/// `generate_seed_from_mnemonic(mnemonic, password)`.
pub fn generate_seed_from_keystore(blob: &str, password: &str) -> Result<Seed> {
    decrypt_keystore(blob, password)?.to_seed(password)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
