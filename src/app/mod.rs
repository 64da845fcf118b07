//! Application layer: the client facade and chaincode workflows.

pub mod chaincode;
pub mod client;

pub use chaincode::{ChaincodeRoundTrip, RoundTripReport};
pub use client::TomagoClient;
