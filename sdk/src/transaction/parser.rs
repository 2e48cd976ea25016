//! Two-pass transaction decoder.
//!
//! The node returns transactions as flat JSON objects whose shape depends
//! on `type`. Pass one reads just enough to learn the tag; pass two decodes
//! the whole object as the matching variant. Tags we don't model become
//! [`Transaction::Unknown`] instead of errors, because the node will always
//! know more transaction types than any given SDK version.

use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::types::TransactionType;
use super::{
    CancelLeaseTransaction, LeaseTransaction, MintingTransaction, PaymentTransaction, Transaction,
    UnknownTransaction,
};
use crate::error::ApiError;

/// Decodes a transaction from JSON text.
pub fn parse(json: &str) -> Result<Transaction, ApiError> {
    let value: Value = serde_json::from_str(json)?;
    parse_value(value)
}

/// Decodes a transaction from an already-parsed JSON value.
pub fn parse_value(value: Value) -> Result<Transaction, ApiError> {
    let tag = peek_tag(&value)?;

    let Some(tx_type) = TransactionType::from_tag(tag) else {
        debug!(tag, "decoded transaction of unmodelled type");
        return Ok(Transaction::Unknown(serde_json::from_value::<UnknownTransaction>(
            value,
        )?));
    };

    let tx = match tx_type {
        TransactionType::Payment => {
            Transaction::Payment(serde_json::from_value::<PaymentTransaction>(value)?)
        }
        TransactionType::Lease => {
            Transaction::Lease(serde_json::from_value::<LeaseTransaction>(value)?)
        }
        TransactionType::CancelLease => {
            Transaction::CancelLease(serde_json::from_value::<CancelLeaseTransaction>(value)?)
        }
        TransactionType::Minting => {
            Transaction::Minting(serde_json::from_value::<MintingTransaction>(value)?)
        }
    };
    Ok(tx)
}

#[derive(Deserialize)]
struct TypeTag {
    #[serde(rename = "type")]
    tx_type: u8,
}

/// Pass one: just the tag, read from a borrowed value so pass two can
/// consume it.
fn peek_tag(value: &Value) -> Result<u8, serde_json::Error> {
    if !value.is_object() {
        return Err(serde_json::Error::custom(
            "transaction must be a JSON object",
        ));
    }
    TypeTag::deserialize(value).map(|tag| tag.tx_type)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
