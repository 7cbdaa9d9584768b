//! BIP-39 mnemonic generation, validation and seed stretching.
//!
//! Word handling and PBKDF2-HMAC-SHA512 seed stretching (2048 rounds,
//! salt `"mnemonic" || passphrase`) come from the `bip39` crate over its
//! built-in English wordlist. This module owns the zeroizing wrappers and
//! the validation gate every derivation path goes through.
//!
//! Reference: <https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki>

use bip39::Language;
use chainium_types::{ChainiumError, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Entropy size used for newly generated mnemonics (256 bits, 24 words).
pub const ENTROPY_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Mnemonic
// ---------------------------------------------------------------------------

/// A validated BIP-39 English mnemonic.
///
/// Words are stored lowercase and separated by single spaces. The phrase
/// is zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic(String);

impl Mnemonic {
    /// Parses and validates a phrase (wordlist membership, checksum and
    /// word count 12/15/18/21/24).
    pub fn parse(phrase: &str) -> Result<Self> {
        let parsed = bip39::Mnemonic::parse_in(Language::English, phrase).map_err(|e| {
            ChainiumError::InvalidMnemonic {
                reason: e.to_string(),
            }
        })?;
        Ok(Self(parsed.to_string()))
    }

    /// Builds the mnemonic encoding `entropy` (16 to 32 bytes, multiple of 4).
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        let parsed = bip39::Mnemonic::from_entropy_in(Language::English, entropy).map_err(
            |e| ChainiumError::InvalidMnemonic {
                reason: e.to_string(),
            },
        )?;
        Ok(Self(parsed.to_string()))
    }

    /// Space-separated phrase.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual words in order.
    pub fn words(&self) -> Vec<&str> {
        self.0.split(' ').collect()
    }

    /// Number of words (12 to 24).
    pub fn word_count(&self) -> usize {
        self.0.split(' ').count()
    }

    /// Stretches the phrase into a 64-byte seed.
    pub fn to_seed(&self, passphrase: &str) -> Result<Seed> {
        let parsed = bip39::Mnemonic::parse_in(Language::English, self.0.as_str()).map_err(
            |e| ChainiumError::InvalidMnemonic {
                reason: e.to_string(),
            },
        )?;
        Ok(Seed(parsed.to_seed(passphrase)))
    }
}

// Mnemonic does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// 64-byte BIP-39 seed, the input to BIP-32 master key generation.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Seed length in bytes.
    pub const LEN: usize = 64;

    /// Wraps raw seed bytes, e.g. from a test vector.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

// Seed does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generates a fresh 24-word mnemonic from 256 bits of OS entropy.
pub fn generate_mnemonic() -> Result<Mnemonic> {
    let mut entropy = Zeroizing::new([0u8; ENTROPY_LEN]);
    OsRng
        .try_fill_bytes(&mut entropy[..])
        .map_err(|e| ChainiumError::Entropy {
            reason: format!("OS random source failed: {e}"),
        })?;
    let mnemonic = Mnemonic::from_entropy(&entropy[..])?;
    tracing::debug!(words = mnemonic.word_count(), "generated mnemonic");
    Ok(mnemonic)
}

/// Validation gate applied before any seed or key derivation.
pub fn validate_mnemonic(phrase: &str) -> Result<()> {
    Mnemonic::parse(phrase).map(|_| ())
}

/// Validates `phrase` and stretches it into a seed.
pub fn generate_seed_from_mnemonic(phrase: &str, passphrase: &str) -> Result<Seed> {
    Mnemonic::parse(phrase)?.to_seed(passphrase)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_ENTROPY_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon art";

    #[test]
    fn generate_produces_24_words() -> std::result::Result<(), ChainiumError> {
        let mnemonic = generate_mnemonic()?;
        assert_eq!(mnemonic.word_count(), 24);
        validate_mnemonic(mnemonic.as_str())?;
        Ok(())
    }

    #[test]
    fn generated_mnemonics_differ() -> std::result::Result<(), ChainiumError> {
        assert_ne!(generate_mnemonic()?.as_str(), generate_mnemonic()?.as_str());
        Ok(())
    }

    #[test]
    fn zero_entropy_vector() -> std::result::Result<(), ChainiumError> {
        let mnemonic = Mnemonic::from_entropy(&[0u8; 32])?;
        assert_eq!(mnemonic.as_str(), ZERO_ENTROPY_MNEMONIC);
        Ok(())
    }

    #[test]
    fn seed_trezor_vector() -> std::result::Result<(), ChainiumError> {
        let seed = generate_seed_from_mnemonic(ZERO_ENTROPY_MNEMONIC, "TREZOR")?;
        assert_eq!(
            hex::encode(seed.as_bytes()),
            "bda85446c68413707090a52022edd26a1c9462295029f2e60cd7c4f2bbd3097170af7a4d73245cafa9c3cca8d561a7c3de6f5d4a10be8ed2a5e608d68f92fcc8"
        );
        Ok(())
    }

    #[test]
    fn passphrase_changes_seed() -> std::result::Result<(), ChainiumError> {
        let a = generate_seed_from_mnemonic(ZERO_ENTROPY_MNEMONIC, "")?;
        let b = generate_seed_from_mnemonic(ZERO_ENTROPY_MNEMONIC, "TREZOR")?;
        assert_ne!(a.as_bytes(), b.as_bytes());
        Ok(())
    }

    #[test]
    fn twelve_words_accepted() {
        let phrase = "abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon about";
        assert!(validate_mnemonic(phrase).is_ok());
    }

    #[test]
    fn wrong_word_count_rejected() {
        assert!(matches!(
            validate_mnemonic("abandon abandon abandon"),
            Err(ChainiumError::InvalidMnemonic { .. })
        ));
    }

    #[test]
    fn unknown_word_rejected() {
        let phrase = ZERO_ENTROPY_MNEMONIC.replace("art", "chainium");
        assert!(validate_mnemonic(&phrase).is_err());
    }

    #[test]
    fn bad_checksum_rejected() {
        let phrase = ZERO_ENTROPY_MNEMONIC.replace("art", "abandon");
        assert!(matches!(
            generate_seed_from_mnemonic(&phrase, ""),
            Err(ChainiumError::InvalidMnemonic { .. })
        ));
    }

    #[test]
    fn words_are_normalized() -> std::result::Result<(), ChainiumError> {
        let mnemonic = Mnemonic::parse(ZERO_ENTROPY_MNEMONIC)?;
        assert_eq!(mnemonic.words().len(), 24);
        assert!(!mnemonic.as_str().contains("  "));
        Ok(())
    }

    #[test]
    fn odd_entropy_length_rejected() {
        assert!(Mnemonic::from_entropy(&[0u8; 15]).is_err());
    }
}
