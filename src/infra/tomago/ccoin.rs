//! Colored coin endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;
use tracing::instrument;

use crate::domain::{
    ApiError, ColoredCoinClient, InterestBody, IssueBody, RollbackBody, TomagoResponse,
    TransferBody, WithdrawBody,
};
use crate::infra::rest::RestClient;

pub struct RestColoredCoinClient {
    rest: Arc<RestClient>,
}

impl RestColoredCoinClient {
    #[must_use]
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// All coin operations are a POST to `/v2/coins/{operation}`.
    async fn post<B: Serialize + Sync>(
        &self,
        operation: &str,
        headers: &HeaderMap,
        body: &B,
    ) -> Result<TomagoResponse, ApiError> {
        let mut request = self
            .rest
            .new_request(Method::POST, &["v2", "coins", operation]);
        request.set_headers(headers);
        request.set_body(body)?;
        self.rest.call(request).await
    }
}

#[async_trait]
impl ColoredCoinClient for RestColoredCoinClient {
    #[instrument(skip(self, headers, body), fields(enrollment_id = %body.enrollment_id))]
    async fn issue(
        &self,
        headers: &HeaderMap,
        body: &IssueBody,
    ) -> Result<TomagoResponse, ApiError> {
        self.post("issue", headers, body).await
    }

    #[instrument(skip(self, headers, body), fields(enrollment_id = %body.enrollment_id))]
    async fn transfer(
        &self,
        headers: &HeaderMap,
        body: &TransferBody,
    ) -> Result<TomagoResponse, ApiError> {
        self.post("transfer", headers, body).await
    }

    #[instrument(skip(self, headers, body), fields(enrollment_id = %body.enrollment_id))]
    async fn rollback(
        &self,
        headers: &HeaderMap,
        body: &RollbackBody,
    ) -> Result<TomagoResponse, ApiError> {
        self.post("rollback", headers, body).await
    }

    #[instrument(skip(self, headers, body), fields(enrollment_id = %body.enrollment_id))]
    async fn interest(
        &self,
        headers: &HeaderMap,
        body: &InterestBody,
    ) -> Result<TomagoResponse, ApiError> {
        self.post("interest", headers, body).await
    }

    #[instrument(skip(self, headers, body), fields(enrollment_id = %body.enrollment_id))]
    async fn withdraw(
        &self,
        headers: &HeaderMap,
        body: &WithdrawBody,
    ) -> Result<TomagoResponse, ApiError> {
        self.post("withdraw", headers, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CHANNEL_ID_HEADER, TokenAmount};
    use crate::infra::config::Config;
    use mockito::{Matcher, Server, ServerGuard};
    use reqwest::header::HeaderValue;

    const CALLBACK: &str = "http://172.16.199.6:8091/v2/test";

    fn ccoin_client(server: &ServerGuard) -> RestColoredCoinClient {
        let config = Config::new(server.url());
        RestColoredCoinClient::new(Arc::new(RestClient::new(&config).unwrap()))
    }

    fn channel_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CHANNEL_ID_HEADER, HeaderValue::from_static("dacc"));
        headers
    }

    fn success_body() -> String {
        serde_json::to_string(
            &TomagoResponse::success()
                .with_id("did:ara:001")
                .with_coin_id("33333")
                .with_transaction_ids(vec![String::new()]),
        )
        .unwrap()
    }

    async fn mock_coin_op(server: &mut ServerGuard, operation: &str) -> mockito::Mock {
        server
            .mock("POST", format!("/v2/coins/{operation}").as_str())
            .match_header("channel-id", "dacc")
            .match_body(Matcher::PartialJson(
                serde_json::json!({"enrollment_id": "alice", "callback_url": CALLBACK}),
            ))
            .with_status(200)
            .with_body(success_body())
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_issue_success() {
        let mut server = Server::new_async().await;
        let mock = mock_coin_op(&mut server, "issue").await;

        let body = IssueBody {
            enrollment_id: "alice".to_string(),
            callback_url: CALLBACK.to_string(),
            amount: 1000,
            ..IssueBody::default()
        };
        let resp = ccoin_client(&server)
            .issue(&channel_headers(), &body)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(resp.coin_id, "33333");
    }

    #[tokio::test]
    async fn test_transfer_success() {
        let mut server = Server::new_async().await;
        let mock = mock_coin_op(&mut server, "transfer").await;

        let body = TransferBody {
            enrollment_id: "alice".to_string(),
            callback_url: CALLBACK.to_string(),
            tokens: vec![TokenAmount::new("33333", 10)],
            ..TransferBody::default()
        };
        let resp = ccoin_client(&server)
            .transfer(&channel_headers(), &body)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(resp.coin_id, "33333");
    }

    #[tokio::test]
    async fn test_rollback_success() {
        let mut server = Server::new_async().await;
        let mock = mock_coin_op(&mut server, "rollback").await;

        let body = RollbackBody {
            enrollment_id: "alice".to_string(),
            callback_url: CALLBACK.to_string(),
            transaction_id: "tx-9".to_string(),
        };
        let resp = ccoin_client(&server)
            .rollback(&channel_headers(), &body)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(resp.coin_id, "33333");
    }

    #[tokio::test]
    async fn test_interest_success() {
        let mut server = Server::new_async().await;
        let mock = mock_coin_op(&mut server, "interest").await;

        let body = InterestBody {
            enrollment_id: "alice".to_string(),
            callback_url: CALLBACK.to_string(),
            ..InterestBody::default()
        };
        let resp = ccoin_client(&server)
            .interest(&channel_headers(), &body)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(resp.coin_id, "33333");
    }

    #[tokio::test]
    async fn test_withdraw_success() {
        let mut server = Server::new_async().await;
        let mock = mock_coin_op(&mut server, "withdraw").await;

        let body = WithdrawBody {
            enrollment_id: "alice".to_string(),
            callback_url: CALLBACK.to_string(),
            ..WithdrawBody::default()
        };
        let resp = ccoin_client(&server)
            .withdraw(&channel_headers(), &body)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(resp.coin_id, "33333");
    }

    const OPERATIONS: [&str; 5] = ["issue", "transfer", "rollback", "interest", "withdraw"];

    async fn run_coin_op(
        client: &RestColoredCoinClient,
        operation: &str,
    ) -> Result<TomagoResponse, ApiError> {
        let headers = channel_headers();
        match operation {
            "issue" => client.issue(&headers, &IssueBody::default()).await,
            "transfer" => client.transfer(&headers, &TransferBody::default()).await,
            "rollback" => client.rollback(&headers, &RollbackBody::default()).await,
            "interest" => client.interest(&headers, &InterestBody::default()).await,
            "withdraw" => client.withdraw(&headers, &WithdrawBody::default()).await,
            other => panic!("unknown coin operation {other}"),
        }
    }

    #[tokio::test]
    async fn test_http_failure_for_every_operation() {
        for operation in OPERATIONS {
            let mut server = Server::new_async().await;
            let mock = server
                .mock("POST", format!("/v2/coins/{operation}").as_str())
                .with_status(500)
                .create_async()
                .await;

            let err = run_coin_op(&ccoin_client(&server), operation)
                .await
                .unwrap_err();

            mock.assert_async().await;
            assert_eq!(err.status(), Some(500), "{operation}");
            assert_eq!(err.code(), None, "{operation}");
        }
    }

    #[tokio::test]
    async fn test_error_code_for_every_operation() {
        for (code, operation) in (6000..).zip(OPERATIONS) {
            let mut server = Server::new_async().await;
            let message = format!("{operation} failed");
            let mock = server
                .mock("POST", format!("/v2/coins/{operation}").as_str())
                .with_status(200)
                .with_body(
                    serde_json::json!({"code": code, "message": message, "coin_id": "33333"})
                        .to_string(),
                )
                .create_async()
                .await;

            let err = run_coin_op(&ccoin_client(&server), operation)
                .await
                .unwrap_err();

            mock.assert_async().await;
            assert_eq!(err.code(), Some(code), "{operation}");
            assert_eq!(err.to_string(), message);
            let resp: TomagoResponse = err.as_coded().unwrap().response().unwrap();
            assert_eq!(resp.coin_id, "33333");
        }
    }
}
