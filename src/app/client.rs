//! The SDK entry point.
//!
//! [`TomagoClient`] owns the shared transport and hands out the resource
//! clients. Each resource client is built on first use and reused after that.

use std::sync::{Arc, OnceLock};

use tracing::{info, instrument};

use crate::domain::{
    ApiError, AssetClient, BlockchainClient, ColoredCoinClient, ConfigError, EntityClient,
};
use crate::infra::config::{Config, DEFAULT_ROUTE_TAG};
use crate::infra::rest::RestClient;
use crate::infra::tomago::{
    RestAssetClient, RestBlockchainClient, RestColoredCoinClient, RestEntityClient,
};

/// Facade over the Tomago resource clients.
///
/// All accessors take `&self` and are safe to call from many tasks at once;
/// concurrent first calls still produce a single instance.
///
/// # Example
///
/// ```no_run
/// use tomago_sdk::app::TomagoClient;
/// use tomago_sdk::infra::Config;
///
/// # async fn run() -> Result<(), tomago_sdk::domain::ApiError> {
/// let client = TomagoClient::new(Config::new("http://127.0.0.1:8080").with_api_key("key"))?;
/// let entity = client
///     .entity_client()
///     .query_entity(&Default::default(), "did:ara:001")
///     .await?;
/// println!("{}", entity.enrollment_id);
/// # Ok(())
/// # }
/// ```
pub struct TomagoClient {
    rest: Arc<RestClient>,
    entity: OnceLock<Arc<dyn EntityClient>>,
    asset: OnceLock<Arc<dyn AssetClient>>,
    ccoin: OnceLock<Arc<dyn ColoredCoinClient>>,
    blockchain: OnceLock<Arc<dyn BlockchainClient>>,
}

impl TomagoClient {
    /// Validates `config` and builds the shared transport.
    ///
    /// An empty route tag is replaced with [`DEFAULT_ROUTE_TAG`].
    ///
    /// # Errors
    /// Returns a `ConfigError` if the address is empty or unusable, or TLS
    /// material cannot be loaded.
    #[instrument(skip(config), fields(address = %config.address))]
    pub fn new(mut config: Config) -> Result<Self, ApiError> {
        if config.address.trim().is_empty() {
            return Err(ConfigError::invalid("address", "must not be empty").into());
        }
        if config.route_tag.trim().is_empty() {
            config.route_tag = DEFAULT_ROUTE_TAG.to_string();
        }

        let rest = Arc::new(RestClient::new(&config)?);
        info!(route_tag = %config.route_tag, "Tomago client ready");

        Ok(Self {
            rest,
            entity: OnceLock::new(),
            asset: OnceLock::new(),
            ccoin: OnceLock::new(),
            blockchain: OnceLock::new(),
        })
    }

    /// Builds a client from `TOMAGO_*` environment variables.
    ///
    /// # Errors
    /// See [`Config::from_env`] and [`TomagoClient::new`].
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(Config::from_env()?)
    }

    pub fn entity_client(&self) -> Arc<dyn EntityClient> {
        Arc::clone(
            self.entity
                .get_or_init(|| Arc::new(RestEntityClient::new(Arc::clone(&self.rest)))),
        )
    }

    pub fn asset_client(&self) -> Arc<dyn AssetClient> {
        Arc::clone(
            self.asset
                .get_or_init(|| Arc::new(RestAssetClient::new(Arc::clone(&self.rest)))),
        )
    }

    pub fn ccoin_client(&self) -> Arc<dyn ColoredCoinClient> {
        Arc::clone(
            self.ccoin
                .get_or_init(|| Arc::new(RestColoredCoinClient::new(Arc::clone(&self.rest)))),
        )
    }

    pub fn blockchain_client(&self) -> Arc<dyn BlockchainClient> {
        Arc::clone(
            self.blockchain
                .get_or_init(|| Arc::new(RestBlockchainClient::new(Arc::clone(&self.rest)))),
        )
    }

    /// The shared transport, for endpoints without a typed client.
    #[must_use]
    pub fn rest_client(&self) -> Arc<RestClient> {
        Arc::clone(&self.rest)
    }
}
