//! Tomago SDK
//!
//! An async client for the Tomago digital asset platform: entity
//! registration, asset management, colored coin operations and raw
//! chaincode calls over HTTPS.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               Application Layer              │
//! │   TomagoClient facade, chaincode workflows   │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │   Client traits, wire models, error types    │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │  Config, REST transport, resource clients    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every call returns either the decoded response or an [`domain::ApiError`].
//! A response whose envelope code is non-zero becomes
//! [`domain::ApiError::Coded`], which keeps the body so the full response
//! can still be inspected.
//!
//! # Example
//!
//! ```no_run
//! use reqwest::header::{HeaderMap, HeaderValue};
//! use tomago_sdk::app::TomagoClient;
//! use tomago_sdk::domain::{CHANNEL_ID_HEADER, ChaincodeRequest, PayloadWithTags};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TomagoClient::from_env()?;
//!
//!     let mut headers = HeaderMap::new();
//!     headers.insert(CHANNEL_ID_HEADER, HeaderValue::from_static("pubchain"));
//!
//!     let payload = PayloadWithTags::new(ChaincodeRequest::new(
//!         "pubchain",
//!         "mycc",
//!         ["invoke", "a", "b", "1"],
//!     ));
//!     let resp = client.blockchain_client().invoke(&headers, &payload).await?;
//!     println!("transaction {}", resp.message);
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod domain;
pub mod infra;

// Test utilities are available in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
