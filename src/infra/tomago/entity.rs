//! Entity endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;
use tracing::instrument;

use crate::domain::{ApiError, EntityBody, EntityClient, EntityPayload, TomagoResponse};
use crate::infra::rest::RestClient;

pub struct RestEntityClient {
    rest: Arc<RestClient>,
}

impl RestEntityClient {
    #[must_use]
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl EntityClient for RestEntityClient {
    #[instrument(skip(self, headers, body), fields(entity_id = %body.id))]
    async fn create_entity(
        &self,
        headers: &HeaderMap,
        body: &EntityBody,
    ) -> Result<TomagoResponse, ApiError> {
        let mut request = self.rest.new_request(Method::POST, &["v2", "entities"]);
        request.set_headers(headers);
        request.set_body(body)?;
        self.rest.call(request).await
    }

    #[instrument(skip(self, headers, body))]
    async fn update_entity(
        &self,
        headers: &HeaderMap,
        id: &str,
        body: &EntityBody,
    ) -> Result<TomagoResponse, ApiError> {
        let mut request = self.rest.new_request(Method::PUT, &["v2", "entities", id]);
        request.set_headers(headers);
        request.set_body(body)?;
        self.rest.call(request).await
    }

    #[instrument(skip(self, headers))]
    async fn query_entity(&self, headers: &HeaderMap, id: &str) -> Result<EntityPayload, ApiError> {
        let mut request = self.rest.new_request(Method::GET, &["v2", "entities", id]);
        request.set_headers(headers);
        self.rest.call_with_payload(request).await
    }
}
