//! Node client.
//!
//! [`Blockchain`] knows the handful of node routes a wallet needs and how
//! the node reports failure. Everything else (HTTP, timeouts, TLS) is the
//! [`Transport`]'s problem.
//!
//! ## How the node says "no"
//!
//! - Most endpoints: a JSON object with an `error` code and a `message`.
//!   Lifted into [`ApiError::Node`].
//! - Transaction lookups: `{"status": "error", "details": "..."}`. Lifted
//!   into [`ApiError::Transaction`].
//!
//! Anything that is neither and still doesn't decode surfaces as
//! [`ApiError::Decode`] or [`ApiError::UnexpectedResponse`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::entities::{Balance, BalanceDetail, Block};
use super::transport::{HttpMethod, HttpTransport, Transport};
use crate::config::{ClientConfig, NetworkType, TX_MAX_LIMIT};
use crate::error::ApiError;
use crate::transaction::{parse_value, SignedTransaction, Transaction};

/// A connection to one node on one network.
#[derive(Clone)]
pub struct Blockchain {
    network: NetworkType,
    node_url: String,
    transport: Arc<dyn Transport>,
}

impl Blockchain {
    pub fn new(network: NetworkType, node_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            network,
            node_url: node_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// A client over the default [`HttpTransport`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config.transport)?;
        Ok(Self::new(
            config.network,
            &config.node_url,
            Arc::new(transport),
        ))
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    // -----------------------------------------------------------------------
    // Addresses
    // -----------------------------------------------------------------------

    pub async fn get_balance(&self, address: &str) -> Result<u64, ApiError> {
        let balance: Balance = self.get(&format!("/addresses/balance/{}", address)).await?;
        Ok(balance.balance)
    }

    pub async fn get_balance_detail(&self, address: &str) -> Result<BalanceDetail, ApiError> {
        self.get(&format!("/addresses/balance/details/{}", address))
            .await
    }

    /// The most recent `num` transactions touching `address`, newest first.
    ///
    /// `num <= 0` returns nothing without asking the node; anything above
    /// [`TX_MAX_LIMIT`] is clamped to it.
    pub async fn get_transaction_history(
        &self,
        address: &str,
        num: i64,
    ) -> Result<Vec<Transaction>, ApiError> {
        if num <= 0 {
            return Ok(Vec::new());
        }
        let limit = usize::try_from(num).unwrap_or(TX_MAX_LIMIT).min(TX_MAX_LIMIT);
        let body = self
            .request(
                HttpMethod::Get,
                &format!("/transactions/address/{}/limit/{}", address, limit),
                None,
            )
            .await?;

        let value: Value = serde_json::from_str(&body)?;
        lift_node_error(&value)?;

        // The node wraps the list in an outer array, one entry per
        // requested address.
        let Value::Array(outer) = value else {
            return Err(ApiError::UnexpectedResponse(body));
        };
        let Some(first) = outer.into_iter().next() else {
            return Ok(Vec::new());
        };
        let Value::Array(records) = first else {
            return Err(ApiError::UnexpectedResponse(body));
        };
        records.into_iter().map(parse_value).collect()
    }

    // -----------------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------------

    pub async fn get_transaction_by_id(&self, tx_id: &str) -> Result<Transaction, ApiError> {
        self.get_transaction(&format!("/transactions/info/{}", tx_id))
            .await
    }

    pub async fn get_unconfirmed_transaction_by_id(
        &self,
        tx_id: &str,
    ) -> Result<Transaction, ApiError> {
        self.get_transaction(&format!("/transactions/unconfirmed/info/{}", tx_id))
            .await
    }

    /// Broadcasts a signed transaction and returns the node's echo of it.
    ///
    /// Only payments, leases and lease cancellations have broadcast routes.
    pub async fn send_transaction(
        &self,
        signed: &SignedTransaction,
    ) -> Result<Transaction, ApiError> {
        let route = match &signed.transaction {
            Transaction::Payment(_) => "/vsys/broadcast/payment",
            Transaction::Lease(_) => "/leasing/broadcast/lease",
            Transaction::CancelLease(_) => "/leasing/broadcast/cancel",
            Transaction::Minting(_) | Transaction::Unknown(_) => {
                return Err(ApiError::UnsupportedTransaction(
                    signed.transaction.type_tag(),
                ));
            }
        };
        let body = signed.to_api_request_json().to_string();
        debug!(route, tx_type = signed.transaction.type_tag(), "broadcasting transaction");
        self.post(route, body).await
    }

    // -----------------------------------------------------------------------
    // Blocks
    // -----------------------------------------------------------------------

    pub async fn get_height(&self) -> Result<u64, ApiError> {
        let body = self.request(HttpMethod::Get, "/blocks/height", None).await?;
        let value: Value = serde_json::from_str(&body)?;
        lift_node_error(&value)?;
        value
            .get("height")
            .and_then(Value::as_u64)
            .ok_or(ApiError::UnexpectedResponse(body))
    }

    pub async fn get_last_block(&self) -> Result<Block, ApiError> {
        self.get("/blocks/last").await
    }

    pub async fn get_block_by_height(&self, height: u64) -> Result<Block, ApiError> {
        self.get(&format!("/blocks/at/{}", height)).await
    }

    // -----------------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------------

    async fn request(
        &self,
        method: HttpMethod,
        route: &str,
        body: Option<String>,
    ) -> Result<String, ApiError> {
        let url = format!("{}{}", self.node_url, route);
        self.transport.request(method, &url, body).await
    }

    async fn get<T: DeserializeOwned>(&self, route: &str) -> Result<T, ApiError> {
        let body = self.request(HttpMethod::Get, route, None).await?;
        parse_response(&body)
    }

    async fn post<T: DeserializeOwned>(&self, route: &str, json: String) -> Result<T, ApiError> {
        let body = self.request(HttpMethod::Post, route, Some(json)).await?;
        parse_response(&body)
    }

    async fn get_transaction(&self, route: &str) -> Result<Transaction, ApiError> {
        let body = self.request(HttpMethod::Get, route, None).await?;
        let value: Value = serde_json::from_str(&body)?;
        lift_transaction_error(&value)?;
        lift_node_error(&value)?;
        parse_value(value)
    }
}

impl std::fmt::Debug for Blockchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blockchain")
            .field("network", &self.network)
            .field("node_url", &self.node_url)
            .finish_non_exhaustive()
    }
}

/// Decodes a typed response, lifting the node's error payload first.
fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body)?;
    lift_node_error(&value)?;
    Ok(serde_json::from_value(value)?)
}

/// `{"error": 199, "message": "..."}` → [`ApiError::Node`].
fn lift_node_error(value: &Value) -> Result<(), ApiError> {
    let Some(error) = value.as_object().and_then(|obj| obj.get("error")) else {
        return Ok(());
    };
    let code = error.as_i64().unwrap_or(0);
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| error.as_str().map(str::to_string))
        .unwrap_or_default();
    warn!(code, %message, "node returned an error");
    Err(ApiError::Node { code, message })
}

/// `{"status": "error", "details": "..."}` → [`ApiError::Transaction`].
fn lift_transaction_error(value: &Value) -> Result<(), ApiError> {
    if value.get("status").and_then(Value::as_str) != Some("error") {
        return Ok(());
    }
    let details = value
        .get("details")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    warn!(%details, "transaction lookup failed");
    Err(ApiError::Transaction { details })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
