use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::envelope::Envelope;

/// Chaincode call target and arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChaincodeRequest {
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub chaincode_id: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ChaincodeRequest {
    pub fn new<I, S>(channel_id: impl Into<String>, chaincode_id: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            channel_id: channel_id.into(),
            chaincode_id: chaincode_id.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Chaincode request plus a free-form tag bag relayed with it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PayloadWithTags {
    #[serde(default)]
    pub payload: ChaincodeRequest,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, serde_json::Value>,
}

impl PayloadWithTags {
    pub fn new(payload: ChaincodeRequest) -> Self {
        Self {
            payload,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Answer to an invoke or query call.
///
/// On invoke the message carries the transaction id of the submitted call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChaincodeResponse {
    #[serde(default, alias = "ErrCode")]
    pub code: i32,
    #[serde(default, alias = "ErrMessage")]
    pub message: String,
    #[serde(default, alias = "Result")]
    pub result: serde_json::Value,
}

impl Envelope for ChaincodeResponse {
    fn code(&self) -> i32 {
        self.code
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Protobuf-style timestamp as emitted by the ledger.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Timestamp {
    #[serde(alias = "Seconds")]
    pub seconds: i64,
    #[serde(alias = "Nanos")]
    pub nanos: i32,
}

impl Timestamp {
    /// Returns `None` when the value is out of range or `nanos` is negative.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::<Utc>::from_timestamp(self.seconds, nanos)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            // subsec nanos is always below 2e9
            nanos: i32::try_from(dt.timestamp_subsec_nanos()).unwrap_or(i32::MAX),
        }
    }
}

/// Status record of a blockchain transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransactionResponse {
    #[serde(alias = "ErrCode")]
    pub code: i32,
    #[serde(alias = "ErrMessage")]
    pub message: String,
    #[serde(alias = "ChannelId")]
    pub channel_id: String,
    #[serde(alias = "ChaincodeId")]
    pub chaincode_id: String,
    #[serde(alias = "TransactionId")]
    pub transaction_id: String,
    #[serde(alias = "Timestamp")]
    pub timestamp: Option<Timestamp>,
    /// Base64 encoded creator identity bytes.
    #[serde(alias = "Creator")]
    pub creator: String,
    #[serde(alias = "PayloadSize")]
    pub payload_size: u64,
    #[serde(alias = "IsInvalid")]
    pub is_invalid: bool,
    #[serde(alias = "Payload")]
    pub payload: serde_json::Value,
}

impl Envelope for TransactionResponse {
    fn code(&self) -> i32 {
        self.code
    }

    fn message(&self) -> &str {
        &self.message
    }
}
