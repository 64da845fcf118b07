//! Mock implementations for testing.
//!
//! These mocks keep ledger state in memory and can be configured to fail
//! with a service error code, mirroring what the REST clients return.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::HeaderMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::{
    ApiError, BlockchainClient, ChaincodeResponse, CodedError, PayloadWithTags,
    TransactionResponse,
};

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Code and message returned by every call when set.
    pub failure: Option<(i32, String)>,
    /// Simulated latency in milliseconds.
    pub latency_ms: Option<u64>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config where every call fails with `code`.
    #[must_use]
    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            failure: Some((code, message.into())),
            latency_ms: None,
        }
    }

    /// Adds simulated latency.
    #[must_use]
    pub fn with_latency(mut self, ms: u64) -> Self {
        self.latency_ms = Some(ms);
        self
    }
}

/// In-memory chaincode ledger.
///
/// Invokes append a transaction and return its id in the message, the way
/// the service does. Queries echo the arguments back as the result.
///
/// # Example
///
/// ```ignore
/// use tomago_sdk::test_utils::{MockBlockchainClient, MockConfig};
///
/// // Create a mock that succeeds
/// let mock = MockBlockchainClient::new();
///
/// // Create a mock that fails
/// let failing_mock = MockBlockchainClient::with_config(MockConfig::failure(5000, "Invoke Transaction failed"));
/// ```
pub struct MockBlockchainClient {
    transactions: Mutex<HashMap<String, TransactionResponse>>,
    invoked: Mutex<Vec<Vec<String>>>,
    config: MockConfig,
    call_count: AtomicU64,
    next_txn: AtomicU64,
    forget_transactions: AtomicBool,
}

impl MockBlockchainClient {
    /// Creates a new mock with default (success) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    /// Creates a new mock with the given configuration.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            transactions: Mutex::new(HashMap::new()),
            invoked: Mutex::new(Vec::new()),
            config,
            call_count: AtomicU64::new(0),
            next_txn: AtomicU64::new(1),
            forget_transactions: AtomicBool::new(false),
        }
    }

    /// Gets the number of times any method was called.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Arguments of every invoke, in call order.
    pub fn invoked(&self) -> Vec<Vec<String>> {
        self.invoked.lock().unwrap().clone()
    }

    /// When set, invoke transactions are not stored, so lookups miss.
    pub fn forget_transactions(&self, forget: bool) {
        self.forget_transactions.store(forget, Ordering::Relaxed);
    }

    async fn enter(&self) -> Result<(), ApiError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Some(ms) = self.config.latency_ms {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        match &self.config.failure {
            Some((code, message)) => Err(CodedError::new(*code, message.clone()).into()),
            None => Ok(()),
        }
    }
}

impl Default for MockBlockchainClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockchainClient for MockBlockchainClient {
    async fn invoke(
        &self,
        _headers: &HeaderMap,
        body: &PayloadWithTags,
    ) -> Result<ChaincodeResponse, ApiError> {
        self.enter().await?;

        let txn_id = format!("txn-{}", self.next_txn.fetch_add(1, Ordering::Relaxed));
        self.invoked.lock().unwrap().push(body.payload.args.clone());

        if !self.forget_transactions.load(Ordering::Relaxed) {
            let record = TransactionResponse {
                channel_id: body.payload.channel_id.clone(),
                chaincode_id: body.payload.chaincode_id.clone(),
                transaction_id: txn_id.clone(),
                timestamp: Some(Utc::now().into()),
                ..TransactionResponse::default()
            };
            self.transactions
                .lock()
                .unwrap()
                .insert(txn_id.clone(), record);
        }

        Ok(ChaincodeResponse {
            code: 0,
            message: txn_id.clone(),
            result: txn_id.into(),
        })
    }

    async fn query(
        &self,
        _headers: &HeaderMap,
        body: &PayloadWithTags,
    ) -> Result<ChaincodeResponse, ApiError> {
        self.enter().await?;

        Ok(ChaincodeResponse {
            code: 0,
            message: String::new(),
            result: serde_json::json!(body.payload.args),
        })
    }

    async fn query_txn(
        &self,
        _headers: &HeaderMap,
        txn_id: &str,
    ) -> Result<TransactionResponse, ApiError> {
        self.enter().await?;

        self.transactions
            .lock()
            .unwrap()
            .get(txn_id)
            .cloned()
            .ok_or_else(|| CodedError::new(5004, "Transaction Not Found").into())
    }
}
