//! Domain traits defining the Tomago resource groups.
//!
//! Every method takes caller headers (auth and routing metadata such as
//! `Channel-Id` or `Callback-Url`) and returns the decoded envelope. A
//! non-zero envelope code surfaces as [`ApiError::Coded`].

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use super::error::ApiError;
use super::models::{
    AssetBody, AssetPayload, ChaincodeResponse, EntityBody, EntityPayload, InterestBody,
    IssueBody, PayloadWithTags, RollbackBody, TomagoResponse, TransactionResponse,
    TransferAssetBody, TransferBody, WithdrawBody,
};

/// Digital identity operations
#[async_trait]
pub trait EntityClient: Send + Sync {
    /// Register a new entity; the response carries the assigned id
    async fn create_entity(
        &self,
        headers: &HeaderMap,
        body: &EntityBody,
    ) -> Result<TomagoResponse, ApiError>;

    /// Replace the entity stored under `id`
    async fn update_entity(
        &self,
        headers: &HeaderMap,
        id: &str,
        body: &EntityBody,
    ) -> Result<TomagoResponse, ApiError>;

    /// Fetch entity metadata
    async fn query_entity(&self, headers: &HeaderMap, id: &str) -> Result<EntityPayload, ApiError>;
}

/// Digital asset operations
#[async_trait]
pub trait AssetClient: Send + Sync {
    async fn create_asset(
        &self,
        headers: &HeaderMap,
        body: &AssetBody,
    ) -> Result<TomagoResponse, ApiError>;

    async fn update_asset(
        &self,
        headers: &HeaderMap,
        id: &str,
        body: &AssetBody,
    ) -> Result<TomagoResponse, ApiError>;

    async fn query_asset(&self, headers: &HeaderMap, id: &str) -> Result<AssetPayload, ApiError>;

    /// Move assets from one entity to another
    async fn transfer_asset(
        &self,
        headers: &HeaderMap,
        body: &TransferAssetBody,
    ) -> Result<TomagoResponse, ApiError>;
}

/// Colored coin operations
#[async_trait]
pub trait ColoredCoinClient: Send + Sync {
    async fn issue(&self, headers: &HeaderMap, body: &IssueBody)
    -> Result<TomagoResponse, ApiError>;

    async fn transfer(
        &self,
        headers: &HeaderMap,
        body: &TransferBody,
    ) -> Result<TomagoResponse, ApiError>;

    /// Undo a previously finished transaction
    async fn rollback(
        &self,
        headers: &HeaderMap,
        body: &RollbackBody,
    ) -> Result<TomagoResponse, ApiError>;

    async fn interest(
        &self,
        headers: &HeaderMap,
        body: &InterestBody,
    ) -> Result<TomagoResponse, ApiError>;

    /// Withdraw colored coins back to fiat
    async fn withdraw(
        &self,
        headers: &HeaderMap,
        body: &WithdrawBody,
    ) -> Result<TomagoResponse, ApiError>;
}

/// Raw chaincode operations
#[async_trait]
pub trait BlockchainClient: Send + Sync {
    /// Start a transaction; the response message carries its id
    async fn invoke(
        &self,
        headers: &HeaderMap,
        body: &PayloadWithTags,
    ) -> Result<ChaincodeResponse, ApiError>;

    /// Read-only chaincode query
    async fn query(
        &self,
        headers: &HeaderMap,
        body: &PayloadWithTags,
    ) -> Result<ChaincodeResponse, ApiError>;

    /// Look up where and when a transaction was recorded
    async fn query_txn(
        &self,
        headers: &HeaderMap,
        txn_id: &str,
    ) -> Result<TransactionResponse, ApiError>;
}
