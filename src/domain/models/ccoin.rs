//! Colored coin operation bodies.
//!
//! Every operation is keyed by the caller's enrollment id and the callback
//! URL notified once the underlying transaction settles.

use serde::{Deserialize, Serialize};

use super::asset::{Fee, TokenAmount};

/// Issues new colored coins backed by an asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueBody {
    pub enrollment_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub callback_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub issuer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub asset_id: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<Fee>,
}

/// Transfers colored coins between entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferBody {
    pub enrollment_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub callback_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to: String,
    #[serde(default)]
    pub tokens: Vec<TokenAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<Fee>,
}

/// Rolls back a previously finished transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RollbackBody {
    pub enrollment_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub callback_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transaction_id: String,
}

/// Charges interest on a coin holding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterestBody {
    pub enrollment_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub callback_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub coin_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(default)]
    pub amount: i64,
}

/// Withdraws colored coins back to fiat.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WithdrawBody {
    pub enrollment_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub callback_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub coin_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<Fee>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_body_minimal() {
        let body = IssueBody {
            enrollment_id: "alice".to_string(),
            callback_url: "http://172.16.199.6:8091/v2/test".to_string(),
            ..IssueBody::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["enrollment_id"], "alice");
        assert_eq!(json["callback_url"], "http://172.16.199.6:8091/v2/test");
        assert_eq!(json["amount"], 0);
        assert!(json.get("issuer").is_none());
        assert!(json.get("fees").is_none());
    }

    #[test]
    fn test_transfer_body_tokens() {
        let body = TransferBody {
            enrollment_id: "alice".to_string(),
            from: "alice".to_string(),
            to: "bob".to_string(),
            tokens: vec![TokenAmount::new("coin-1", 100)],
            ..TransferBody::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["tokens"][0]["token_id"], "coin-1");
        assert_eq!(json["tokens"][0]["amount"], 100);
        assert!(json.get("callback_url").is_none());
    }

    #[test]
    fn test_rollback_body_decodes_without_optional_fields() {
        let body: RollbackBody = serde_json::from_str(r#"{"enrollment_id":"alice"}"#).unwrap();
        assert_eq!(body.enrollment_id, "alice");
        assert!(body.transaction_id.is_empty());
    }
}
