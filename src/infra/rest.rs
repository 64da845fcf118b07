//! HTTP transport shared by every resource client.
//!
//! Each call is a single best-effort request: build it, attach headers and a
//! JSON body, require a 2xx status, decode the envelope and map a non-zero
//! envelope code to [`CodedError`]. Nothing is retried.

use std::fs;
use std::path::Path;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Certificate, Client, Identity, Method, Response, Url};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    API_KEY_HEADER, ApiError, CALLBACK_URL_HEADER, CodedError, ConfigError, Envelope,
    ROUTE_TAG_HEADER, TomagoResponse, TransportError,
};

use super::config::{Config, TlsConfig};

/// A request under construction.
#[derive(Debug)]
pub struct RestRequest {
    method: Method,
    segments: Vec<String>,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl RestRequest {
    /// Merges caller headers over what is already set.
    pub fn set_headers(&mut self, headers: &HeaderMap) {
        self.headers.extend(headers.clone());
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    /// Returns a serialization error if `body` cannot be encoded.
    pub fn set_body<B: Serialize + ?Sized>(&mut self, body: &B) -> Result<(), ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| TransportError::Serialization(e.to_string()))?;
        self.body = Some(bytes);
        Ok(())
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Unencoded path, for logging.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Shared HTTP client for the Tomago service.
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools
/// connections.
#[derive(Debug)]
pub struct RestClient {
    http: Client,
    base_url: Url,
    default_headers: HeaderMap,
}

impl RestClient {
    /// Builds the transport from configuration.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the address is not a valid base URL, a
    /// header value is malformed, or TLS material cannot be loaded.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.address.trim())
            .map_err(|e| ConfigError::invalid("address", e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::invalid("address", "not a base URL").into());
        }

        let default_headers = default_headers(config)?;

        let http = match &config.http_client {
            Some(client) => client.clone(),
            None => build_http_client(config)?,
        };

        info!(
            address = %base_url,
            route_tag = %config.route_tag,
            mutual_tls = config.tls.is_some(),
            "Created tomago transport"
        );

        Ok(Self {
            http,
            base_url,
            default_headers,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Starts a request for the path made of `segments`.
    ///
    /// Segments are percent-encoded individually, so ids cannot alter the
    /// route.
    #[must_use]
    pub fn new_request(&self, method: Method, segments: &[&str]) -> RestRequest {
        RestRequest {
            method,
            segments: segments.iter().map(|s| (*s).to_string()).collect(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Sends a request. Caller headers take precedence over the defaults.
    ///
    /// # Errors
    /// Returns a transport error on connection failure or timeout.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path()))]
    pub async fn do_request(&self, request: RestRequest) -> Result<Response, ApiError> {
        let url = self.url_for(&request.segments)?;

        let mut headers = self.default_headers.clone();
        headers.extend(request.headers);

        let mut builder = self.http.request(request.method, url).headers(headers);
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        debug!("Sending request");
        let response = builder.send().await.map_err(TransportError::from)?;
        debug!(status = response.status().as_u16(), "Received response");
        Ok(response)
    }

    /// Passes 2xx responses through; anything else becomes a transport
    /// error carrying the status and body text.
    ///
    /// # Errors
    /// Returns `TransportError::Status` for non-2xx responses.
    pub async fn require_ok(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Unexpected response status");
        Err(TransportError::Status {
            status: status.as_u16(),
            body,
        }
        .into())
    }

    /// Decodes a JSON body.
    ///
    /// # Errors
    /// Returns `TransportError::Decode` if the bytes do not fit `T`.
    pub fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(|e| TransportError::Decode(e.to_string()).into())
    }

    /// Executes `request` and decodes the envelope `E`.
    ///
    /// # Errors
    /// Transport errors as for [`RestClient::do_request`] and
    /// [`RestClient::require_ok`], decode errors, and [`ApiError::Coded`] when
    /// the envelope code is non-zero.
    pub async fn call<E>(&self, request: RestRequest) -> Result<E, ApiError>
    where
        E: Envelope + DeserializeOwned,
    {
        let (envelope, _) = self.call_raw::<E>(request).await?;
        Ok(envelope)
    }

    /// Like [`RestClient::call`], then re-parses the same bytes as the
    /// resource payload `P`.
    ///
    /// # Errors
    /// See [`RestClient::call`].
    pub async fn call_with_payload<P>(&self, request: RestRequest) -> Result<P, ApiError>
    where
        P: DeserializeOwned,
    {
        let (_, bytes) = self.call_raw::<TomagoResponse>(request).await?;
        Self::decode_body(&bytes)
    }

    async fn call_raw<E>(&self, request: RestRequest) -> Result<(E, Vec<u8>), ApiError>
    where
        E: Envelope + DeserializeOwned,
    {
        let path = request.path();
        let response = Self::require_ok(self.do_request(request).await?).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(TransportError::from)?
            .to_vec();

        let envelope: E = Self::decode_body(&bytes)?;
        if !envelope.is_success() {
            warn!(
                path = %path,
                code = envelope.code(),
                message = %envelope.message(),
                "Service returned error code"
            );
            let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
            return Err(CodedError::new(envelope.code(), envelope.message())
                .with_body(body)
                .into());
        }

        Ok((envelope, bytes))
    }

    fn url_for(&self, segments: &[String]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn default_headers(config: &Config) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();

    let api_key = config.api_key.expose_secret();
    if !api_key.is_empty() {
        let mut value = HeaderValue::from_str(api_key)
            .map_err(|_| ConfigError::invalid("api_key", "not a valid header value"))?;
        value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, value);
    }

    if let Some(url) = config.callback_url.as_deref().filter(|u| !u.is_empty()) {
        let value = HeaderValue::from_str(url)
            .map_err(|_| ConfigError::invalid("callback_url", "not a valid header value"))?;
        headers.insert(CALLBACK_URL_HEADER, value);
    }

    if !config.route_tag.is_empty() {
        let value = HeaderValue::from_str(&config.route_tag)
            .map_err(|_| ConfigError::invalid("route_tag", "not a valid header value"))?;
        headers.insert(ROUTE_TAG_HEADER, value);
    }

    Ok(headers)
}

fn build_http_client(config: &Config) -> Result<Client, ConfigError> {
    let mut builder = Client::builder().use_rustls_tls();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(tls) = &config.tls {
        let (ca, identity) = load_tls(tls)?;
        builder = builder.add_root_certificate(ca).identity(identity);
    }

    builder
        .build()
        .map_err(|e| ConfigError::Tls(format!("failed to build HTTP client: {e}")))
}

fn load_tls(tls: &TlsConfig) -> Result<(Certificate, Identity), ConfigError> {
    let ca_pem = read_pem(&tls.ca_file)?;
    let ca = Certificate::from_pem(&ca_pem)
        .map_err(|e| ConfigError::Tls(format!("{}: {e}", tls.ca_file.display())))?;

    let mut identity_pem = read_pem(&tls.cert_file)?;
    identity_pem.push(b'\n');
    identity_pem.extend(read_pem(&tls.key_file)?);
    let identity = Identity::from_pem(&identity_pem).map_err(|e| {
        ConfigError::Tls(format!(
            "{} / {}: {e}",
            tls.cert_file.display(),
            tls.key_file.display()
        ))
    })?;

    Ok((ca, identity))
}

fn read_pem(path: &Path) -> Result<Vec<u8>, ConfigError> {
    fs::read(path).map_err(|e| ConfigError::Tls(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChaincodeResponse;
    use mockito::{Matcher, Server};

    fn client_for(config: Config) -> RestClient {
        RestClient::new(&config).unwrap()
    }

    #[test]
    fn test_rejects_invalid_address() {
        let err = RestClient::new(&Config::new("not a url")).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Config(ConfigError::InvalidValue { ref key, .. }) if key == "address"
        ));
    }

    #[test]
    fn test_rejects_missing_tls_files() {
        let config = Config::new("https://remotehost.com:443").with_tls(TlsConfig::new(
            "/nonexistent/ca.crt",
            "/nonexistent/client.pem",
            "/nonexistent/client.key",
        ));
        let err = RestClient::new(&config).unwrap_err();
        match err {
            ApiError::Config(ConfigError::Tls(msg)) => assert!(msg.contains("ca.crt")),
            other => panic!("Expected TLS config error, got {other:?}"),
        }
    }

    #[test]
    fn test_request_path_and_body() {
        let client = client_for(Config::new("http://127.0.0.1:8003"));
        let mut request = client.new_request(Method::PUT, &["v2", "assets", "zzz"]);
        assert_eq!(request.path(), "/v2/assets/zzz");
        assert_eq!(*request.method(), Method::PUT);
        assert!(request.body().is_none());

        request
            .set_body(&serde_json::json!({"name": "票据001"}))
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(request.body().unwrap()).unwrap();
        assert_eq!(body["name"], "票据001");
    }

    #[test]
    fn test_url_segments_are_encoded() {
        let client = client_for(Config::new("http://127.0.0.1:8003/gateway/"));
        let url = client
            .url_for(&["v2".to_string(), "entities".to_string(), "a/b c".to_string()])
            .unwrap();
        assert_eq!(url.path(), "/gateway/v2/entities/a%2Fb%20c");
    }

    #[tokio::test]
    async fn test_default_and_caller_headers() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/blockchain/query")
            .match_header("api-key", "xxxxxxxxxxxxx")
            .match_header("route-tag", "tomago")
            .match_header("callback-url", "http://caller/override")
            .match_header("channel-id", "dacc")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({"k": "v"})))
            .with_status(200)
            .with_body(r#"{"code":0,"message":"ok"}"#)
            .create_async()
            .await;

        let client = client_for(
            Config::new(server.url())
                .with_api_key("xxxxxxxxxxxxx")
                .with_route_tag("tomago")
                .with_callback_url("http://config/default"),
        );
        let mut caller = HeaderMap::new();
        caller.insert(
            CALLBACK_URL_HEADER,
            HeaderValue::from_static("http://caller/override"),
        );
        caller.insert(
            crate::domain::CHANNEL_ID_HEADER,
            HeaderValue::from_static("dacc"),
        );

        let mut request = client.new_request(Method::POST, &["v2", "blockchain", "query"]);
        request.set_headers(&caller);
        request.set_body(&serde_json::json!({"k": "v"})).unwrap();
        let resp: ChaincodeResponse = client.call(request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(resp.message, "ok");
    }

    #[tokio::test]
    async fn test_config_callback_url_used_when_caller_omits_it() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/entities/e1")
            .match_header("callback-url", "http://config/default")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client =
            client_for(Config::new(server.url()).with_callback_url("http://config/default"));
        let request = client.new_request(Method::GET, &["v2", "entities", "e1"]);
        let resp: TomagoResponse = client.call(request).await.unwrap();

        mock.assert_async().await;
        assert!(resp.is_success());
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/assets/zzz")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let client = client_for(Config::new(server.url()));
        let request = client.new_request(Method::GET, &["v2", "assets", "zzz"]);
        let result: Result<TomagoResponse, _> = client.call(request).await;

        mock.assert_async().await;
        match result {
            Err(ApiError::Transport(TransportError::Status { status, body })) => {
                assert_eq!(status, 401);
                assert_eq!(body, "unauthorized");
            }
            other => panic!("Expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/assets")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let client = client_for(Config::new(server.url()));
        let request = client.new_request(Method::POST, &["v2", "assets"]);
        let result: Result<TomagoResponse, _> = client.call(request).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(ApiError::Transport(TransportError::Decode(_)))
        ));
    }

    #[tokio::test]
    async fn test_coded_error_keeps_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/assets")
            .with_status(200)
            .with_body(r#"{"code":5000,"message":"Register Entity Fail","coin_id":"33333"}"#)
            .create_async()
            .await;

        let client = client_for(Config::new(server.url()));
        let request = client.new_request(Method::POST, &["v2", "assets"]);
        let err = client.call::<TomagoResponse>(request).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.code(), Some(5000));
        assert_eq!(err.to_string(), "Register Entity Fail");
        let carried: TomagoResponse = err.as_coded().unwrap().response().unwrap();
        assert_eq!(carried.code, 5000);
        assert_eq!(carried.coin_id, "33333");
    }

    #[tokio::test]
    async fn test_connection_failure() {
        // Nothing listens on port 9 (discard) on loopback
        let client = client_for(Config::new("http://127.0.0.1:9"));
        let request = client.new_request(Method::GET, &["v2", "assets", "zzz"]);
        let result = client.do_request(request).await;
        assert!(matches!(
            result,
            Err(ApiError::Transport(
                TransportError::Connection(_) | TransportError::Timeout(_)
            ))
        ));
    }
}
