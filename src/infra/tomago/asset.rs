//! Asset endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;
use tracing::instrument;

use crate::domain::{
    ApiError, AssetBody, AssetClient, AssetPayload, TomagoResponse, TransferAssetBody,
};
use crate::infra::rest::RestClient;

pub struct RestAssetClient {
    rest: Arc<RestClient>,
}

impl RestAssetClient {
    #[must_use]
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl AssetClient for RestAssetClient {
    #[instrument(skip(self, headers, body), fields(asset_id = %body.id))]
    async fn create_asset(
        &self,
        headers: &HeaderMap,
        body: &AssetBody,
    ) -> Result<TomagoResponse, ApiError> {
        let mut request = self.rest.new_request(Method::POST, &["v2", "assets"]);
        request.set_headers(headers);
        request.set_body(body)?;
        self.rest.call(request).await
    }

    #[instrument(skip(self, headers, body))]
    async fn update_asset(
        &self,
        headers: &HeaderMap,
        id: &str,
        body: &AssetBody,
    ) -> Result<TomagoResponse, ApiError> {
        let mut request = self.rest.new_request(Method::PUT, &["v2", "assets", id]);
        request.set_headers(headers);
        request.set_body(body)?;
        self.rest.call(request).await
    }

    #[instrument(skip(self, headers))]
    async fn query_asset(&self, headers: &HeaderMap, id: &str) -> Result<AssetPayload, ApiError> {
        let mut request = self.rest.new_request(Method::GET, &["v2", "assets", id]);
        request.set_headers(headers);
        self.rest.call_with_payload(request).await
    }

    #[instrument(skip(self, headers, body), fields(from = %body.from, to = %body.to))]
    async fn transfer_asset(
        &self,
        headers: &HeaderMap,
        body: &TransferAssetBody,
    ) -> Result<TomagoResponse, ApiError> {
        let mut request = self
            .rest
            .new_request(Method::POST, &["v2", "assets", "transfer"]);
        request.set_headers(headers);
        request.set_body(body)?;
        self.rest.call(request).await
    }
}
