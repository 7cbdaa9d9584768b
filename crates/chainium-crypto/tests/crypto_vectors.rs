//! Known-vector tests for codec, hashing, addresses and signatures.
//!
//! Vectors were produced by the reference Chainium SDK and must keep
//! reproducing byte for byte; they pin the wire format of addresses,
//! action hashes and signature tokens.

use chainium_crypto::address::{validate_address, Address};
use chainium_crypto::codec::{base58_to_hex, hex_to_base58, utf8_to_hex};
use chainium_crypto::generate_wallet;
use chainium_crypto::hash::{derive_hash, hash};
use chainium_crypto::keypair::address_from_private_key;
use chainium_crypto::signing::{
    sign_message, sign_plain_text, verify_message_signature, verify_plain_text_signature,
    RecoverableSignature,
};
use chainium_types::ChainiumError;

const NETWORK: &str = "UNIT_TESTS";
const ADDRESS: &str = "CHGmdQdHfLPcMHtzyDzxAkTAQiRvKJrkYv8";

// ===================================================================
// Address derivation
// ===================================================================

/// (private key, address, UNIT_TESTS signature over "Chainium")
const KEY_VECTORS: &[(&str, &str, &str)] = &[
    (
        "3rzY3EENhYrWXzUqNnMEbGUr3iEzzSZrjMwJ1CgQpJpq",
        "CHGmdQdHfLPcMHtzyDzxAkTAQiRvKJrkYv8",
        "EYzWMyZjqHkwsNFKcFEg4Q64m4jSUD7cAeKucyZ3a9MKeNmXTbRK3czqNVGj9RpkPGji9AtGiUxDtipqE3DtFPHxU",
    ),
    (
        "2C6sgXHMLkwiWeUK4fpyVFa3XG59MBa221pkW7kq2KB8",
        "CHLsVaYSPJGFi8BNGd6tP1VvB8UdKh8KB2E",
        "HzzxUvKq3ZRghq9q51zwVnFE7KKjG2KNTrh3qKRjK3WLPghxB1S6MNSZbp6HWyVeqonH9BPQcDpsqMApKg8SLNvKZ",
    ),
    (
        "3H2V8pM1h4wJEzCfuBHbNBC4w2FvXszKXx6nMEs3mUcC",
        "CHfDeuB1y1eJnWd6aWfYaRvpS9QgrfuQEpf",
        "DXKvHdvyzhUh4hJKEAsYB7sKLmpmjqCUQ4Wjdp4FUgnNBeNnv2ZD5EGUuaSyvE6XGqHWmxetWDmFHx9joDViP18EL",
    ),
    (
        "CpxNZ1YsPCmVrLwJzP7H88gHthSjBSySgVR3iK1c1VBk",
        "CHb5Sgdq1MNDVDUG8UPLHBKzUGZZ7cuCkA2",
        "9LbveLpmtFDx4bi81wrsyw4XvuKzAi6VDHis4hD6dnYCPLhh4cxcfC9wr52zEGpuvLWvGyUmAJouHZ7r1qyQvkaun",
    ),
];

#[test]
fn addresses_from_known_private_keys() -> std::result::Result<(), ChainiumError> {
    for (private_key, address, _) in KEY_VECTORS {
        assert_eq!(&address_from_private_key(private_key)?, address);
        validate_address(address)?;
    }
    Ok(())
}

#[test]
fn address_decodes_to_26_bytes() -> std::result::Result<(), ChainiumError> {
    let hex_form = base58_to_hex(ADDRESS)?;
    assert_eq!(hex_form, "065a023dcf865b02f73bbf5e72f45fbdc63c462d87cfc4f25acd");
    assert_eq!(hex_to_base58(&hex_form)?, ADDRESS);
    assert_eq!(Address::parse(ADDRESS)?.to_bytes().len(), 26);
    Ok(())
}

// ===================================================================
// Hashing
// ===================================================================

#[test]
fn hash_of_chainium() -> std::result::Result<(), ChainiumError> {
    assert_eq!(
        hash(&utf8_to_hex("Chainium"))?,
        "Dp6vNLdUbRTc1Y3i9uSBritNqvqe4es9MjjGrVi1nQMu"
    );
    Ok(())
}

#[test]
fn derive_hash_vectors() -> std::result::Result<(), ChainiumError> {
    let vectors: &[(u64, u16, &str)] = &[
        (1, 1, "8QkGKLhfswS21i3hbADDtTcQqbE7cazb66Hwc1yVmZoA"),
        (2, 1, "GUv4RJSwMNYk8E4Gane1NTiJBXf1j6gxwtUwpYcVkCtT"),
        (1, 2, "Fm53Y4aSd6SswA3sAFN4fuCMMNbbmyCim1LFkY5p1CAc"),
        (32, 3, "2c2FoA3XJYBAbM3SaoTQxF855gYY8oeBZj22WTcQkxnD"),
    ];
    for (nonce, action_number, expected) in vectors {
        assert_eq!(&derive_hash(ADDRESS, *nonce, *action_number)?, expected);
    }
    Ok(())
}

#[test]
fn derive_hash_depends_on_address() -> std::result::Result<(), ChainiumError> {
    let vectors = [
        (KEY_VECTORS[0].1, "8QkGKLhfswS21i3hbADDtTcQqbE7cazb66Hwc1yVmZoA"),
        (KEY_VECTORS[1].1, "AbNeYpeSzicUfhUR28Dzzk6QvyFL27ABqoTVLaZisCrG"),
        (KEY_VECTORS[2].1, "2DBWRhkBhZ13qBd3bxzLQZMPQyytYkMgDWdyLmmVyeoX"),
    ];
    for (address, expected) in vectors {
        assert_eq!(derive_hash(address, 1, 1)?, expected);
    }
    assert_ne!(
        derive_hash(KEY_VECTORS[0].1, 7, 3)?,
        derive_hash(KEY_VECTORS[1].1, 7, 3)?
    );
    Ok(())
}

// ===================================================================
// Signatures
// ===================================================================

#[test]
fn message_signature_vectors() -> std::result::Result<(), ChainiumError> {
    let message = utf8_to_hex("Chainium");
    for (private_key, address, signature) in KEY_VECTORS {
        assert_eq!(&sign_message(NETWORK, private_key, &message)?, signature);
        assert_eq!(&verify_message_signature(NETWORK, signature, &message)?, address);
    }
    Ok(())
}

#[test]
fn plain_text_signature_vector() -> std::result::Result<(), ChainiumError> {
    let signature = sign_plain_text(KEY_VECTORS[0].0, "Chainium")?;
    assert_eq!(
        signature,
        "EzCsWgPozyVT9o6TycYV6q1n4YK4QWixa6Lk4GFvwrj6RU3K1wHcwNPZJUMBYcsGp5oFhytHiThon5zqE8uLk8naB"
    );
    assert_eq!(verify_plain_text_signature(&signature, "Chainium")?, ADDRESS);
    Ok(())
}

#[test]
fn signing_is_deterministic() -> std::result::Result<(), ChainiumError> {
    let message = utf8_to_hex("nonce=42");
    let first = sign_message(NETWORK, KEY_VECTORS[1].0, &message)?;
    let second = sign_message(NETWORK, KEY_VECTORS[1].0, &message)?;
    assert_eq!(first, second);
    Ok(())
}

/// Fresh keys and varied messages must always yield low-S signatures that
/// recover the signer.
#[test]
fn random_signatures_are_canonical() -> std::result::Result<(), ChainiumError> {
    for i in 0..1000u32 {
        let wallet = generate_wallet()?;
        let message = utf8_to_hex(&format!("Chainium message #{i}"));
        let token = sign_message(NETWORK, wallet.private_key(), &message)?;

        let parsed = RecoverableSignature::from_token(&token)?;
        assert!(parsed.is_canonical()?, "high-S signature at iteration {i}");
        assert_eq!(
            verify_message_signature(NETWORK, &token, &message)?,
            wallet.address()
        );
    }
    Ok(())
}
