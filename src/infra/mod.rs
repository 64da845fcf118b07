//! Infrastructure layer implementations.

pub mod config;
pub mod observability;
pub mod rest;
pub mod tomago;

pub use config::{Config, DEFAULT_ROUTE_TAG, TlsConfig};
pub use observability::init_tracing;
pub use rest::{RestClient, RestRequest};
pub use tomago::{RestAssetClient, RestBlockchainClient, RestColoredCoinClient, RestEntityClient};
