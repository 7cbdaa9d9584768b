//! HD derivation and keystore end-to-end tests.
//!
//! The mnemonic fixture and its derived wallets come from the reference
//! Chainium SDK. Keystore tests use light Argon2 costs.

use chainium_crypto::codec::utf8_to_hex;
use chainium_crypto::hd_derive::{
    generate_master_node_from_mnemonic, generate_wallet_from_mnemonic, generate_wallet_from_seed,
    restore_wallets_from_seed,
};
use chainium_crypto::keystore::{
    decrypt_keystore, generate_seed_from_keystore, generate_wallet_keystore_with,
};
use chainium_crypto::mnemonic::{generate_mnemonic, generate_seed_from_mnemonic};
use chainium_crypto::signing::{sign_message, verify_message_signature};
use chainium_types::config::KeystoreConfig;
use chainium_types::ChainiumError;

const MNEMONIC: &str = "receive raccoon rocket donkey cherry garbage medal skirt random smoke young before scale leave hold insect foster blouse mail donkey regular vital hurt april";

fn light() -> KeystoreConfig {
    KeystoreConfig {
        m_cost: 256,
        t_cost: 1,
        p_cost: 1,
    }
}

// ===================================================================
// HD derivation
// ===================================================================

#[test]
fn fixture_wallets() -> std::result::Result<(), ChainiumError> {
    let vectors = [
        (
            0,
            "ECPVXjz78oMdmLKbHVAAo7X7evtTh4EfnaW5Yc1SHWaj",
            "CHb5Z6Za34nv28Z3rLZ2Yd8LFikHaTqLhxB",
        ),
        (
            1,
            "6fSbtwNoGTc7RaCsTBAuQRdftN57aYmCfQw2gyYfDHYC",
            "CHJPwtPnuYrQipbJm1E4rEk9XytsLnUEzZh",
        ),
    ];
    for (index, private_key, address) in vectors {
        let wallet = generate_wallet_from_mnemonic(MNEMONIC, "", index)?;
        assert_eq!(wallet.private_key(), private_key);
        assert_eq!(wallet.address(), address);
    }
    Ok(())
}

#[test]
fn master_node_is_reusable() -> std::result::Result<(), ChainiumError> {
    let master = generate_master_node_from_mnemonic(MNEMONIC, "")?;
    let first = master.derive_wallet(5)?;
    let again = master.derive_wallet(5)?;
    assert_eq!(first, again);
    assert_ne!(first, master.derive_wallet(6)?);
    Ok(())
}

#[test]
fn restore_reproduces_direct_derivation() -> std::result::Result<(), ChainiumError> {
    let seed = generate_seed_from_mnemonic(MNEMONIC, "")?;
    let restored = restore_wallets_from_seed(&seed, 5)?;
    let direct = (1..=5)
        .map(|index| generate_wallet_from_seed(&seed, index))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(restored, direct);
    Ok(())
}

#[test]
fn derived_wallet_signs_and_recovers() -> std::result::Result<(), ChainiumError> {
    let wallet = generate_wallet_from_mnemonic(MNEMONIC, "", 0)?;
    let message = utf8_to_hex("Chainium");
    let signature = sign_message("UNIT_TESTS", wallet.private_key(), &message)?;
    assert_eq!(
        verify_message_signature("UNIT_TESTS", &signature, &message)?,
        wallet.address()
    );
    Ok(())
}

// ===================================================================
// Keystore
// ===================================================================

#[test]
fn keystore_restores_identical_wallet_set() -> std::result::Result<(), ChainiumError> {
    let password = "correct horse battery staple";
    let blob = generate_wallet_keystore_with(MNEMONIC, password, &light())?;

    let from_keystore = generate_seed_from_keystore(&blob, password)?;
    let from_mnemonic = generate_seed_from_mnemonic(MNEMONIC, password)?;

    assert_eq!(
        restore_wallets_from_seed(&from_keystore, 3)?,
        restore_wallets_from_seed(&from_mnemonic, 3)?
    );
    Ok(())
}

#[test]
fn keystore_wrong_password_never_yields_wallet() -> std::result::Result<(), ChainiumError> {
    let blob = generate_wallet_keystore_with(MNEMONIC, "right", &light())?;
    assert!(matches!(
        generate_seed_from_keystore(&blob, "wrong"),
        Err(ChainiumError::InvalidKeystore { .. })
    ));
    Ok(())
}

#[test]
fn generated_mnemonic_survives_keystore() -> std::result::Result<(), ChainiumError> {
    let mnemonic = generate_mnemonic()?;
    let blob = generate_wallet_keystore_with(mnemonic.as_str(), "pw", &light())?;
    assert_eq!(decrypt_keystore(&blob, "pw")?.as_str(), mnemonic.as_str());
    Ok(())
}
