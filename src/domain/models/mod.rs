//! Request and response records exchanged with the Tomago service.

pub mod asset;
pub mod blockchain;
pub mod ccoin;
pub mod entity;
pub mod envelope;

use reqwest::header::HeaderName;

pub use asset::{AssetBody, AssetPayload, Fee, TokenAmount, TransferAssetBody};
pub use blockchain::{
    ChaincodeRequest, ChaincodeResponse, PayloadWithTags, Timestamp, TransactionResponse,
};
pub use ccoin::{InterestBody, IssueBody, RollbackBody, TransferBody, WithdrawBody};
pub use entity::{EntityBody, EntityPayload};
pub use envelope::{Envelope, TomagoResponse};

/// Header naming the ledger channel a call is routed to.
pub const CHANNEL_ID_HEADER: HeaderName = HeaderName::from_static("channel-id");

/// Header naming the URL the service calls back once a transaction settles.
pub const CALLBACK_URL_HEADER: HeaderName = HeaderName::from_static("callback-url");

pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("api-key");

/// Header the service gateway routes on.
pub const ROUTE_TAG_HEADER: HeaderName = HeaderName::from_static("route-tag");
