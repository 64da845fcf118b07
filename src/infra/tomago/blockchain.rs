//! Raw blockchain endpoints: chaincode invoke/query and transaction lookup.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;
use tracing::{info, instrument};

use crate::domain::{
    ApiError, BlockchainClient, ChaincodeResponse, PayloadWithTags, TransactionResponse,
};
use crate::infra::rest::RestClient;

pub struct RestBlockchainClient {
    rest: Arc<RestClient>,
}

impl RestBlockchainClient {
    #[must_use]
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl BlockchainClient for RestBlockchainClient {
    #[instrument(
        skip(self, headers, body),
        fields(channel = %body.payload.channel_id, chaincode = %body.payload.chaincode_id)
    )]
    async fn invoke(
        &self,
        headers: &HeaderMap,
        body: &PayloadWithTags,
    ) -> Result<ChaincodeResponse, ApiError> {
        let mut request = self
            .rest
            .new_request(Method::POST, &["v2", "blockchain", "invoke"]);
        request.set_headers(headers);
        request.set_body(body)?;
        let response: ChaincodeResponse = self.rest.call(request).await?;
        info!(txn_id = %response.message, "Chaincode invoked");
        Ok(response)
    }

    #[instrument(
        skip(self, headers, body),
        fields(channel = %body.payload.channel_id, chaincode = %body.payload.chaincode_id)
    )]
    async fn query(
        &self,
        headers: &HeaderMap,
        body: &PayloadWithTags,
    ) -> Result<ChaincodeResponse, ApiError> {
        let mut request = self
            .rest
            .new_request(Method::POST, &["v2", "blockchain", "query"]);
        request.set_headers(headers);
        request.set_body(body)?;
        self.rest.call(request).await
    }

    #[instrument(skip(self, headers))]
    async fn query_txn(
        &self,
        headers: &HeaderMap,
        txn_id: &str,
    ) -> Result<TransactionResponse, ApiError> {
        let mut request = self
            .rest
            .new_request(Method::GET, &["v2", "blockchain", "transaction", txn_id]);
        request.set_headers(headers);
        self.rest.call(request).await
    }
}
