//! Transaction assembly, JSON serialization and signing.
//!
//! A [`Tx`] is signed over its compact JSON form. Field order is fixed:
//!
//! | # | Key              |
//! |---|------------------|
//! | 1 | `senderAddress`  |
//! | 2 | `nonce`          |
//! | 3 | `expirationTime` |
//! | 4 | `actionFee`      |
//! | 5 | `actions`        |
//!
//! The signed envelope carries the same bytes Base64-encoded, so the
//! node verifies exactly what was signed.

use chainium_crypto::codec::{decode_base64, encode_base64, utf8_to_hex};
use chainium_crypto::hash::derive_hash;
use chainium_crypto::signing::{sign_message, verify_message_signature};
use chainium_types::{ChainiumError, Result};
use serde::{Deserialize, Serialize};

use crate::action::{
    serialize_number, Action, AddKycProvider, ChangeKycControllerAddress, ConfigureValidator,
    CreateAccount, CreateAsset, CreateAssetEmission, DelegateStake, RemoveKycProvider,
    RemoveValidator, SetAccountController, SetAccountEligibility, SetAssetCode,
    SetAssetController, SetAssetEligibility, SubmitVote, SubmitVoteWeight, TransferAsset,
    TransferChx,
};

// ---------------------------------------------------------------------------
// Tx
// ---------------------------------------------------------------------------

/// An unsigned transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tx {
    pub sender_address: String,
    pub nonce: u64,
    pub expiration_time: u64,
    #[serde(serialize_with = "serialize_number")]
    pub action_fee: f64,
    pub actions: Vec<Action>,
}

impl Tx {
    /// Compact JSON, the form that gets signed.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(json_error)
    }

    /// Indented JSON for display. An indent of 0 gives the compact form.
    pub fn to_json_pretty(&self, indent: usize) -> Result<String> {
        if indent == 0 {
            return self.to_json();
        }
        let indent_str = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent_str.as_bytes());
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer).map_err(json_error)?;
        String::from_utf8(out).map_err(|e| ChainiumError::InvalidTransaction {
            reason: format!("JSON output is not UTF-8: {e}"),
        })
    }

    /// UTF-8 bytes of the compact JSON.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_json()?.into_bytes())
    }

    /// Signs the compact JSON for `network_code`.
    pub fn sign(&self, network_code: &str, private_key: &str) -> Result<SignedTx> {
        let json = self.to_json()?;
        let signature = sign_message(network_code, private_key, &utf8_to_hex(&json))?;
        tracing::debug!(
            sender = %self.sender_address,
            nonce = self.nonce,
            actions = self.actions.len(),
            "signed transaction"
        );
        Ok(SignedTx {
            tx: encode_base64(json.as_bytes()),
            signature,
        })
    }
}

fn json_error(e: serde_json::Error) -> ChainiumError {
    ChainiumError::InvalidTransaction {
        reason: format!("JSON serialization failed: {e}"),
    }
}

// ---------------------------------------------------------------------------
// SignedTx
// ---------------------------------------------------------------------------

/// Envelope submitted to a node: Base64 payload plus signature token.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SignedTx {
    pub tx: String,
    pub signature: String,
}

impl SignedTx {
    /// Recovers the address that signed this envelope.
    pub fn signer_address(&self, network_code: &str) -> Result<String> {
        let payload = decode_base64(&self.tx)?;
        let json = String::from_utf8(payload).map_err(|e| ChainiumError::InvalidTransaction {
            reason: format!("payload is not UTF-8: {e}"),
        })?;
        verify_message_signature(network_code, &self.signature, &utf8_to_hex(&json))
    }

    /// Parses the embedded transaction.
    pub fn decode_tx(&self) -> Result<Tx> {
        let payload = decode_base64(&self.tx)?;
        serde_json::from_slice(&payload).map_err(|e| ChainiumError::InvalidTransaction {
            reason: format!("payload is not a transaction: {e}"),
        })
    }
}

// ---------------------------------------------------------------------------
// TxBuilder
// ---------------------------------------------------------------------------

/// Append-only builder for a [`Tx`].
#[derive(Clone, Debug)]
pub struct TxBuilder {
    tx: Tx,
}

impl TxBuilder {
    /// Starts an empty transaction. A missing expiration time is 0.
    pub fn new(
        sender_address: impl Into<String>,
        nonce: u64,
        action_fee: f64,
        expiration_time: Option<u64>,
    ) -> Self {
        Self {
            tx: Tx {
                sender_address: sender_address.into(),
                nonce,
                expiration_time: expiration_time.unwrap_or(0),
                action_fee,
                actions: Vec::new(),
            },
        }
    }

    /// Actions appended so far.
    pub fn actions(&self) -> &[Action] {
        &self.tx.actions
    }

    /// Appends any action.
    pub fn add_action(&mut self, action: Action) -> &mut Self {
        self.tx.actions.push(action);
        self
    }

    /// Finished transaction.
    pub fn build(&self) -> Tx {
        self.tx.clone()
    }

    /// Hash the next appended action will be known by: derived from the
    /// sender, the nonce and its 1-based position.
    fn next_action_hash(&self) -> Result<String> {
        let position = self.tx.actions.len() + 1;
        let action_number =
            u16::try_from(position).map_err(|_| ChainiumError::InvalidTransaction {
                reason: format!("too many actions: {position}"),
            })?;
        derive_hash(&self.tx.sender_address, self.tx.nonce, action_number)
    }

    // -- Network management ------------------------------------------------

    /// Appends a `TransferChx` action.
    pub fn add_transfer_chx_action(
        &mut self,
        recipient_address: impl Into<String>,
        amount: f64,
    ) -> &mut Self {
        self.add_action(Action::TransferChx(TransferChx {
            recipient_address: recipient_address.into(),
            amount,
        }))
    }

    /// Appends a `DelegateStake` action.
    pub fn add_delegate_stake_action(
        &mut self,
        validator_address: impl Into<String>,
        amount: f64,
    ) -> &mut Self {
        self.add_action(Action::DelegateStake(DelegateStake {
            validator_address: validator_address.into(),
            amount,
        }))
    }

    /// Appends a `ConfigureValidator` action.
    pub fn add_configure_validator_action(
        &mut self,
        network_address: impl Into<String>,
        shared_reward_percent: f64,
        is_enabled: bool,
    ) -> &mut Self {
        self.add_action(Action::ConfigureValidator(ConfigureValidator {
            network_address: network_address.into(),
            shared_reward_percent,
            is_enabled,
        }))
    }

    /// Appends a `RemoveValidator` action.
    pub fn add_remove_validator_action(&mut self) -> &mut Self {
        self.add_action(Action::RemoveValidator(RemoveValidator {}))
    }

    // -- Asset management --------------------------------------------------

    /// Appends a `TransferAsset` action.
    pub fn add_transfer_asset_action(
        &mut self,
        from_account_hash: impl Into<String>,
        to_account_hash: impl Into<String>,
        asset_hash: impl Into<String>,
        amount: f64,
    ) -> &mut Self {
        self.add_action(Action::TransferAsset(TransferAsset {
            from_account_hash: from_account_hash.into(),
            to_account_hash: to_account_hash.into(),
            asset_hash: asset_hash.into(),
            amount,
        }))
    }

    /// Appends a `CreateAssetEmission` action.
    pub fn add_create_asset_emission_action(
        &mut self,
        emission_account_hash: impl Into<String>,
        asset_hash: impl Into<String>,
        amount: f64,
    ) -> &mut Self {
        self.add_action(Action::CreateAssetEmission(CreateAssetEmission {
            emission_account_hash: emission_account_hash.into(),
            asset_hash: asset_hash.into(),
            amount,
        }))
    }

    /// Appends a `CreateAsset` action and returns the new asset's hash.
    ///
    /// Nothing is appended when the hash cannot be derived (malformed
    /// sender address).
    pub fn add_create_asset_action(&mut self) -> Result<String> {
        let asset_hash = self.next_action_hash()?;
        self.add_action(Action::CreateAsset(CreateAsset {}));
        Ok(asset_hash)
    }

    /// Appends a `SetAssetCode` action.
    pub fn add_set_asset_code_action(
        &mut self,
        asset_hash: impl Into<String>,
        asset_code: impl Into<String>,
    ) -> &mut Self {
        self.add_action(Action::SetAssetCode(SetAssetCode {
            asset_hash: asset_hash.into(),
            asset_code: asset_code.into(),
        }))
    }

    /// Appends a `SetAssetController` action.
    pub fn add_set_asset_controller_action(
        &mut self,
        asset_hash: impl Into<String>,
        controller_address: impl Into<String>,
    ) -> &mut Self {
        self.add_action(Action::SetAssetController(SetAssetController {
            asset_hash: asset_hash.into(),
            controller_address: controller_address.into(),
        }))
    }

    /// Appends a `CreateAccount` action and returns the new account's hash.
    pub fn add_create_account_action(&mut self) -> Result<String> {
        let account_hash = self.next_action_hash()?;
        self.add_action(Action::CreateAccount(CreateAccount {}));
        Ok(account_hash)
    }

    /// Appends a `SetAccountController` action.
    pub fn add_set_account_controller_action(
        &mut self,
        account_hash: impl Into<String>,
        controller_address: impl Into<String>,
    ) -> &mut Self {
        self.add_action(Action::SetAccountController(SetAccountController {
            account_hash: account_hash.into(),
            controller_address: controller_address.into(),
        }))
    }

    // -- Voting ------------------------------------------------------------

    /// Appends a `SubmitVote` action.
    pub fn add_submit_vote_action(
        &mut self,
        account_hash: impl Into<String>,
        asset_hash: impl Into<String>,
        resolution_hash: impl Into<String>,
        vote_hash: impl Into<String>,
    ) -> &mut Self {
        self.add_action(Action::SubmitVote(SubmitVote {
            account_hash: account_hash.into(),
            asset_hash: asset_hash.into(),
            resolution_hash: resolution_hash.into(),
            vote_hash: vote_hash.into(),
        }))
    }

    /// Appends a `SubmitVoteWeight` action.
    pub fn add_submit_vote_weight_action(
        &mut self,
        account_hash: impl Into<String>,
        asset_hash: impl Into<String>,
        resolution_hash: impl Into<String>,
        vote_weight: f64,
    ) -> &mut Self {
        self.add_action(Action::SubmitVoteWeight(SubmitVoteWeight {
            account_hash: account_hash.into(),
            asset_hash: asset_hash.into(),
            resolution_hash: resolution_hash.into(),
            vote_weight,
        }))
    }

    // -- Eligibility and KYC -----------------------------------------------

    /// Appends a `SetAccountEligibility` action.
    pub fn add_set_account_eligibility_action(
        &mut self,
        account_hash: impl Into<String>,
        asset_hash: impl Into<String>,
        is_primary_eligible: bool,
        is_secondary_eligible: bool,
    ) -> &mut Self {
        self.add_action(Action::SetAccountEligibility(SetAccountEligibility {
            account_hash: account_hash.into(),
            asset_hash: asset_hash.into(),
            is_primary_eligible,
            is_secondary_eligible,
        }))
    }

    /// Appends a `SetAssetEligibility` action.
    pub fn add_set_asset_eligibility_action(
        &mut self,
        asset_hash: impl Into<String>,
        is_eligibility_required: bool,
    ) -> &mut Self {
        self.add_action(Action::SetAssetEligibility(SetAssetEligibility {
            asset_hash: asset_hash.into(),
            is_eligibility_required,
        }))
    }

    /// Appends a `ChangeKycControllerAddress` action.
    pub fn add_change_kyc_controller_address_action(
        &mut self,
        account_hash: impl Into<String>,
        asset_hash: impl Into<String>,
        kyc_controller_address: impl Into<String>,
    ) -> &mut Self {
        self.add_action(Action::ChangeKycControllerAddress(
            ChangeKycControllerAddress {
                account_hash: account_hash.into(),
                asset_hash: asset_hash.into(),
                kyc_controller_address: kyc_controller_address.into(),
            },
        ))
    }

    /// Appends an `AddKycProvider` action.
    pub fn add_add_kyc_provider_action(
        &mut self,
        asset_hash: impl Into<String>,
        provider_address: impl Into<String>,
    ) -> &mut Self {
        self.add_action(Action::AddKycProvider(AddKycProvider {
            asset_hash: asset_hash.into(),
            provider_address: provider_address.into(),
        }))
    }

    /// Appends a `RemoveKycProvider` action.
    pub fn add_remove_kyc_provider_action(
        &mut self,
        asset_hash: impl Into<String>,
        provider_address: impl Into<String>,
    ) -> &mut Self {
        self.add_action(Action::RemoveKycProvider(RemoveKycProvider {
            asset_hash: asset_hash.into(),
            provider_address: provider_address.into(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
