//! BIP-32 hierarchical deterministic derivation for Chainium wallets.
//!
//! # Derivation path
//!
//! ```text
//! m/44'/25718'/0'/0/index
//! ```
//!
//! `25718` is the registered Chainium coin type. The first three levels
//! are hardened, the change and index levels are not. Index `0` is a
//! valid account.
//!
//! Reference: <https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki>

use bip32::{ChildNumber, XPrv};
use chainium_types::{ChainiumError, Result, Wallet};
use zeroize::Zeroizing;

use crate::keypair::{KeyPair, PRIVATE_KEY_LEN};
use crate::mnemonic::{generate_seed_from_mnemonic, Seed};

/// BIP-44 purpose level.
const PURPOSE: u32 = 44;

/// Chainium coin type.
pub const COIN_TYPE: u32 = 25718;

const ACCOUNT: u32 = 0;

/// External (receiving) chain.
const CHANGE: u32 = 0;

// ---------------------------------------------------------------------------
// MasterNode
// ---------------------------------------------------------------------------

/// BIP-32 root extended private key.
pub struct MasterNode {
    xprv: XPrv,
}

// MasterNode does not implement Clone/Debug to prevent leakage.

impl MasterNode {
    /// Derives the wallet at `m/44'/25718'/0'/0/index`.
    ///
    /// # Errors
    ///
    /// [`ChainiumError::Derivation`] if `index` is 2^31 or above, or if a
    /// child key on the path is invalid.
    pub fn derive_wallet(&self, index: u32) -> Result<Wallet> {
        let chain = self.external_chain()?;
        let wallet = derive_child_wallet(&chain, index)?;
        tracing::debug!(index, address = %wallet.address(), "derived HD wallet");
        Ok(wallet)
    }

    /// Key at `m/44'/25718'/0'/0`, the parent of every wallet index.
    fn external_chain(&self) -> Result<XPrv> {
        let path = [
            child_number(PURPOSE, true)?,
            child_number(COIN_TYPE, true)?,
            child_number(ACCOUNT, true)?,
            child_number(CHANGE, false)?,
        ];

        let mut node = self.xprv.clone();
        for child in path {
            node = node.derive_child(child).map_err(|e| ChainiumError::Derivation {
                reason: format!("child derivation failed: {e}"),
            })?;
        }
        Ok(node)
    }
}

fn child_number(index: u32, hardened: bool) -> Result<ChildNumber> {
    ChildNumber::new(index, hardened).map_err(|e| ChainiumError::Derivation {
        reason: format!("invalid child index {index}: {e}"),
    })
}

fn derive_child_wallet(chain: &XPrv, index: u32) -> Result<Wallet> {
    let child = chain
        .derive_child(child_number(index, false)?)
        .map_err(|e| ChainiumError::Derivation {
            reason: format!("child derivation failed at index {index}: {e}"),
        })?;

    let key_bytes: Zeroizing<[u8; PRIVATE_KEY_LEN]> =
        Zeroizing::new(child.private_key().to_bytes().into());
    Ok(KeyPair::from_bytes(&key_bytes[..])?.into_wallet())
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// BIP-32 root key for `seed`.
pub fn generate_master_node_from_seed(seed: &Seed) -> Result<MasterNode> {
    let xprv = XPrv::new(seed.as_bytes()).map_err(|e| ChainiumError::Derivation {
        reason: format!("failed to create master key: {e}"),
    })?;
    Ok(MasterNode { xprv })
}

/// Validates `mnemonic`, stretches it with `passphrase` and builds the
/// root key.
pub fn generate_master_node_from_mnemonic(mnemonic: &str, passphrase: &str) -> Result<MasterNode> {
    generate_master_node_from_seed(&generate_seed_from_mnemonic(mnemonic, passphrase)?)
}

/// Wallet at `index` under the seed's master node.
pub fn generate_wallet_from_seed(seed: &Seed, index: u32) -> Result<Wallet> {
    generate_master_node_from_seed(seed)?.derive_wallet(index)
}

/// Wallets for indices `1..=count`.
///
/// Bulk restore starts at 1 while [`generate_wallet_from_seed`] accepts
/// index 0; existing restored wallet sets depend on this numbering.
pub fn restore_wallets_from_seed(seed: &Seed, count: u32) -> Result<Vec<Wallet>> {
    let chain = generate_master_node_from_seed(seed)?.external_chain()?;
    let wallets = (1..=count)
        .map(|index| derive_child_wallet(&chain, index))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(count, "restored HD wallets");
    Ok(wallets)
}

/// Convenience wrapper: mnemonic and passphrase straight to a wallet.
pub fn generate_wallet_from_mnemonic(
    mnemonic: &str,
    passphrase: &str,
    index: u32,
) -> Result<Wallet> {
    generate_master_node_from_mnemonic(mnemonic, passphrase)?.derive_wallet(index)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
