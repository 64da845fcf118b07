use serde::{Deserialize, Serialize};

/// Digital asset registered on the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssetBody {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Content hash of the underlying document.
    #[serde(default)]
    pub hash: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_id: String,
    #[serde(default)]
    pub owner: String,
    /// Expiry as a unix timestamp, `0` for none.
    #[serde(default)]
    pub expire_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl AssetBody {
    pub fn new(id: impl Into<String>, name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: owner.into(),
            ..Self::default()
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = parent_id.into();
        self
    }

    pub fn with_expire_time(mut self, expire_time: i64) -> Self {
        self.expire_time = expire_time;
        self
    }

    pub fn with_metadata(mut self, metadata: impl Into<serde_json::Value>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }
}

/// Asset record returned by a query. Every field tolerates being absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetPayload {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Hash")]
    pub hash: String,
    #[serde(alias = "ParentId")]
    pub parent_id: String,
    #[serde(alias = "Owner")]
    pub owner: String,
    #[serde(alias = "ExpireTime")]
    pub expire_time: i64,
    #[serde(alias = "Metadata")]
    pub metadata: Option<serde_json::Value>,
    #[serde(alias = "Status")]
    pub status: Option<i32>,
    #[serde(alias = "CreatedAt")]
    pub created_at: Option<i64>,
    #[serde(alias = "UpdatedAt")]
    pub updated_at: Option<i64>,
}

/// Amount of a single colored coin.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenAmount {
    pub token_id: String,
    pub amount: i64,
}

impl TokenAmount {
    pub fn new(token_id: impl Into<String>, amount: i64) -> Self {
        Self {
            token_id: token_id.into(),
            amount,
        }
    }
}

/// Fees charged on a transfer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Fee {
    /// Accounts receiving the fee.
    pub accounts: Vec<String>,
    pub coins: Vec<TokenAmount>,
}

/// Moves assets from one entity to another.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferAssetBody {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<Fee>,
}

impl TransferAssetBody {
    pub fn new(from: impl Into<String>, to: impl Into<String>, assets: Vec<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            assets,
            fees: None,
        }
    }

    pub fn with_fees(mut self, fees: Fee) -> Self {
        self.fees = Some(fees);
        self
    }
}
