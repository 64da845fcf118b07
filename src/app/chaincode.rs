//! Invoke, query and confirm chaincode in one call.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use tracing::{info, instrument};

use crate::domain::{
    ApiError, BlockchainClient, ChaincodeResponse, PayloadWithTags, TransactionResponse,
};

/// Results of a [`ChaincodeRoundTrip::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTripReport {
    pub invoke: ChaincodeResponse,
    pub query: ChaincodeResponse,
    /// Ledger record of the invoke transaction.
    pub transaction: TransactionResponse,
}

impl RoundTripReport {
    /// Transaction id assigned to the invoke.
    #[must_use]
    pub fn txn_id(&self) -> &str {
        &self.invoke.message
    }
}

/// Submits an invoke, reads state back with a query, then looks up the
/// invoke transaction on the ledger.
///
/// # Example
///
/// ```ignore
/// let round_trip = ChaincodeRoundTrip::new(client.blockchain_client());
/// let report = round_trip.run(&headers, &invoke, &query).await?;
/// println!("{}", report.txn_id());
/// ```
pub struct ChaincodeRoundTrip {
    blockchain: Arc<dyn BlockchainClient>,
}

impl ChaincodeRoundTrip {
    #[must_use]
    pub fn new(blockchain: Arc<dyn BlockchainClient>) -> Self {
        Self { blockchain }
    }

    /// Runs the three calls in order, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the error of whichever call failed.
    #[instrument(skip_all, fields(chaincode = %invoke.payload.chaincode_id))]
    pub async fn run(
        &self,
        headers: &HeaderMap,
        invoke: &PayloadWithTags,
        query: &PayloadWithTags,
    ) -> Result<RoundTripReport, ApiError> {
        let invoke = self.blockchain.invoke(headers, invoke).await?;
        info!(txn_id = %invoke.message, "Invoke succeeded");

        let query = self.blockchain.query(headers, query).await?;
        info!(result = %query.result, "Query succeeded");

        let transaction = self.blockchain.query_txn(headers, &invoke.message).await?;
        info!(
            txn_id = %transaction.transaction_id,
            is_invalid = transaction.is_invalid,
            "Transaction found"
        );

        Ok(RoundTripReport {
            invoke,
            query,
            transaction,
        })
    }
}
