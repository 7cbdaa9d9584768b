//! Typed transaction actions.
//!
//! Every action serializes adjacently tagged:
//!
//! ```json
//! { "actionType": "TransferChx", "actionData": { "recipientAddress": "...", "amount": 1000 } }
//! ```
//!
//! Actions without parameters carry an empty `actionData` object.
//! Numeric fields are plain JSON numbers; whole values are written
//! without a fractional part (`1000`, not `1000.0`).

use serde::{Deserialize, Serialize, Serializer};

/// Largest magnitude below which every integer is exactly representable
/// as an `f64` (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes whole numbers as JSON integers and everything else as floats.
pub(crate) fn serialize_number<S: Serializer>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "actionType", content = "actionData")]
pub enum Action {
    // Network management
    TransferChx(TransferChx),
    DelegateStake(DelegateStake),
    ConfigureValidator(ConfigureValidator),
    RemoveValidator(RemoveValidator),

    // Asset management
    TransferAsset(TransferAsset),
    CreateAssetEmission(CreateAssetEmission),
    CreateAsset(CreateAsset),
    SetAssetCode(SetAssetCode),
    SetAssetController(SetAssetController),
    CreateAccount(CreateAccount),
    SetAccountController(SetAccountController),

    // Voting
    SubmitVote(SubmitVote),
    SubmitVoteWeight(SubmitVoteWeight),

    // Eligibility and KYC
    SetAccountEligibility(SetAccountEligibility),
    SetAssetEligibility(SetAssetEligibility),
    ChangeKycControllerAddress(ChangeKycControllerAddress),
    AddKycProvider(AddKycProvider),
    RemoveKycProvider(RemoveKycProvider),
}

impl Action {
    /// Value of the `actionType` tag.
    pub fn action_type(&self) -> &'static str {
        match self {
            Self::TransferChx(_) => "TransferChx",
            Self::DelegateStake(_) => "DelegateStake",
            Self::ConfigureValidator(_) => "ConfigureValidator",
            Self::RemoveValidator(_) => "RemoveValidator",
            Self::TransferAsset(_) => "TransferAsset",
            Self::CreateAssetEmission(_) => "CreateAssetEmission",
            Self::CreateAsset(_) => "CreateAsset",
            Self::SetAssetCode(_) => "SetAssetCode",
            Self::SetAssetController(_) => "SetAssetController",
            Self::CreateAccount(_) => "CreateAccount",
            Self::SetAccountController(_) => "SetAccountController",
            Self::SubmitVote(_) => "SubmitVote",
            Self::SubmitVoteWeight(_) => "SubmitVoteWeight",
            Self::SetAccountEligibility(_) => "SetAccountEligibility",
            Self::SetAssetEligibility(_) => "SetAssetEligibility",
            Self::ChangeKycControllerAddress(_) => "ChangeKycControllerAddress",
            Self::AddKycProvider(_) => "AddKycProvider",
            Self::RemoveKycProvider(_) => "RemoveKycProvider",
        }
    }
}

// ---------------------------------------------------------------------------
// Network management
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferChx {
    pub recipient_address: String,
    #[serde(serialize_with = "serialize_number")]
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateStake {
    pub validator_address: String,
    #[serde(serialize_with = "serialize_number")]
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureValidator {
    /// `host:port` the validator listens on.
    pub network_address: String,
    #[serde(serialize_with = "serialize_number")]
    pub shared_reward_percent: f64,
    pub is_enabled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoveValidator {}

// ---------------------------------------------------------------------------
// Asset management
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAsset {
    pub from_account_hash: String,
    pub to_account_hash: String,
    pub asset_hash: String,
    #[serde(serialize_with = "serialize_number")]
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetEmission {
    pub emission_account_hash: String,
    pub asset_hash: String,
    #[serde(serialize_with = "serialize_number")]
    pub amount: f64,
}

/// The new asset's hash is derived from the sender, nonce and action
/// position; see [`crate::TxBuilder::add_create_asset_action`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAsset {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAssetCode {
    pub asset_hash: String,
    pub asset_code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAssetController {
    pub asset_hash: String,
    pub controller_address: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAccount {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAccountController {
    pub account_hash: String,
    pub controller_address: String,
}

// ---------------------------------------------------------------------------
// Voting
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVote {
    pub account_hash: String,
    pub asset_hash: String,
    pub resolution_hash: String,
    pub vote_hash: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteWeight {
    pub account_hash: String,
    pub asset_hash: String,
    pub resolution_hash: String,
    #[serde(serialize_with = "serialize_number")]
    pub vote_weight: f64,
}

// ---------------------------------------------------------------------------
// Eligibility and KYC
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAccountEligibility {
    pub account_hash: String,
    pub asset_hash: String,
    pub is_primary_eligible: bool,
    pub is_secondary_eligible: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAssetEligibility {
    pub asset_hash: String,
    pub is_eligibility_required: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeKycControllerAddress {
    pub account_hash: String,
    pub asset_hash: String,
    pub kyc_controller_address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddKycProvider {
    pub asset_hash: String,
    pub provider_address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveKycProvider {
    pub asset_hash: String,
    pub provider_address: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacently_tagged_layout() -> std::result::Result<(), serde_json::Error> {
        let action = Action::TransferChx(TransferChx {
            recipient_address: "CHrecipient".into(),
            amount: 1000.0,
        });
        assert_eq!(
            serde_json::to_string(&action)?,
            r#"{"actionType":"TransferChx","actionData":{"recipientAddress":"CHrecipient","amount":1000}}"#
        );
        Ok(())
    }

    #[test]
    fn empty_action_data_is_object() -> std::result::Result<(), serde_json::Error> {
        let action = Action::RemoveValidator(RemoveValidator {});
        assert_eq!(
            serde_json::to_string(&action)?,
            r#"{"actionType":"RemoveValidator","actionData":{}}"#
        );
        Ok(())
    }

    #[test]
    fn fractional_numbers_keep_fraction() -> std::result::Result<(), serde_json::Error> {
        let action = Action::DelegateStake(DelegateStake {
            validator_address: "CHvalidator".into(),
            amount: 0.25,
        });
        assert!(serde_json::to_string(&action)?.contains(r#""amount":0.25"#));
        Ok(())
    }

    #[test]
    fn action_type_matches_tag() -> std::result::Result<(), serde_json::Error> {
        let action = Action::SetAssetEligibility(SetAssetEligibility {
            asset_hash: "AssetH1".into(),
            is_eligibility_required: true,
        });
        let value = serde_json::to_value(&action)?;
        assert_eq!(value["actionType"], action.action_type());
        Ok(())
    }

    #[test]
    fn deserializes_back() -> std::result::Result<(), serde_json::Error> {
        let json = r#"{"actionType":"SubmitVoteWeight","actionData":{"accountHash":"A","assetHash":"B","resolutionHash":"C","voteWeight":12345}}"#;
        let action: Action = serde_json::from_str(json)?;
        assert_eq!(
            action,
            Action::SubmitVoteWeight(SubmitVoteWeight {
                account_hash: "A".into(),
                asset_hash: "B".into(),
                resolution_hash: "C".into(),
                vote_weight: 12345.0,
            })
        );
        Ok(())
    }
}
