//! Chainium transaction builder.
//!
//! Assembles typed actions into the JSON payload nodes expect and hands
//! the compact form to [`chainium_crypto::signing::sign_message`]. The
//! builder does no validation against chain state; action hashes for
//! newly created assets and accounts come from
//! [`chainium_crypto::hash::derive_hash`].

pub mod action;
pub mod builder;

pub use action::Action;
pub use builder::{SignedTx, Tx, TxBuilder};
