//! REST implementations of the Tomago resource clients.

pub mod asset;
pub mod blockchain;
pub mod ccoin;
pub mod entity;

pub use asset::RestAssetClient;
pub use blockchain::RestBlockchainClient;
pub use ccoin::RestColoredCoinClient;
pub use entity::RestEntityClient;
