//! Domain layer: wire records, client traits and error definitions.

pub mod error;
pub mod models;
pub mod traits;

pub use error::{ApiError, CodedError, ConfigError, TransportError};
pub use models::{
    API_KEY_HEADER, AssetBody, AssetPayload, CALLBACK_URL_HEADER, CHANNEL_ID_HEADER,
    ChaincodeRequest, ChaincodeResponse, EntityBody, EntityPayload, Envelope, Fee, InterestBody,
    IssueBody, PayloadWithTags, ROUTE_TAG_HEADER, RollbackBody, Timestamp, TokenAmount,
    TomagoResponse, TransactionResponse, TransferAssetBody, TransferBody, WithdrawBody,
};
pub use traits::{AssetClient, BlockchainClient, ColoredCoinClient, EntityClient};
