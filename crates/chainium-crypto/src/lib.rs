//! Cryptographic engine for the Chainium wallet core.
//!
//! Every key, address, signature and keystore in the workspace is
//! produced here. Higher layers (the transaction builder) hand over raw
//! bytes or hex and receive opaque Base58 / Base64 tokens back.
//!
//! # Modules
//!
//! - [`codec`]: hex, Base64 and Base58 conversions
//! - [`hash`]: SHA-256 / SHA-512 digests and action-hash derivation
//! - [`address`]: prefixed, checksummed Chainium addresses
//! - [`keypair`]: secp256k1 key generation and private-key validation
//! - [`signing`]: canonical recoverable ECDSA with network domain separation
//! - [`mnemonic`]: BIP-39 generation, validation and seed stretching
//! - [`hd_derive`]: BIP-32 derivation along `m/44'/25718'/0'/0/i`
//! - [`kdf`]: Argon2id password stretching for keystores
//! - [`aead`]: AES-256-GCM sealing of keystore payloads
//! - [`keystore`]: password-protected mnemonic blobs

pub mod address;
pub mod aead;
pub mod codec;
pub mod hash;
pub mod hd_derive;
pub mod kdf;
pub mod keypair;
pub mod keystore;
pub mod mnemonic;
pub mod signing;

pub use address::{blockchain_address, validate_address, Address};
pub use codec::{base58_to_hex, base64_to_hex, hex_to_base58, hex_to_base64, utf8_to_hex};
pub use hash::{derive_hash, hash};
pub use hd_derive::{
    generate_master_node_from_mnemonic, generate_master_node_from_seed,
    generate_wallet_from_mnemonic, generate_wallet_from_seed, restore_wallets_from_seed,
    MasterNode,
};
pub use keypair::{address_from_private_key, generate_wallet};
pub use keystore::{
    decrypt_keystore, generate_seed_from_keystore, generate_wallet_keystore,
    generate_wallet_keystore_with,
};
pub use mnemonic::{
    generate_mnemonic, generate_seed_from_mnemonic, validate_mnemonic, Mnemonic, Seed,
};
pub use signing::{
    sign_data, sign_message, sign_plain_text, verify_message_signature,
    verify_plain_text_signature, RecoverableSignature,
};
