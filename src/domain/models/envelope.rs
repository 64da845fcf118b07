use serde::{Deserialize, Serialize};

/// Status-code-in-body convention shared by every Tomago response.
///
/// Code `0` is success. Any other value is an application error whose
/// message is surfaced as the error text.
pub trait Envelope {
    fn code(&self) -> i32;

    fn message(&self) -> &str;

    fn is_success(&self) -> bool {
        self.code() == 0
    }
}

/// Generic response envelope for entity, asset and colored coin operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TomagoResponse {
    #[serde(default, alias = "ErrCode")]
    pub code: i32,
    #[serde(default, alias = "ErrMessage")]
    pub message: String,
    /// Id assigned by the server on create.
    #[serde(default, alias = "Id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, alias = "CoinId", skip_serializing_if = "String::is_empty")]
    pub coin_id: String,
    /// Blockchain transaction ids produced by the call.
    #[serde(default, alias = "TransactionIds")]
    pub transaction_ids: Vec<String>,
}

impl TomagoResponse {
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_coin_id(mut self, coin_id: impl Into<String>) -> Self {
        self.coin_id = coin_id.into();
        self
    }

    #[must_use]
    pub fn with_transaction_ids(mut self, ids: Vec<String>) -> Self {
        self.transaction_ids = ids;
        self
    }
}

impl Envelope for TomagoResponse {
    fn code(&self) -> i32 {
        self.code
    }

    fn message(&self) -> &str {
        &self.message
    }
}
