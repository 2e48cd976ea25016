//! Lease: delegate VSYS to a minting node without transferring ownership.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::encoding::{
    encode, BytesSerializable, FieldKind, FieldSpec, FieldValue, TextEncoding,
};
use super::types::{TransactionHeader, TransactionType};
use super::{api_request_base, cold_sign_api_version, cold_sign_base};
use crate::config::NetworkType;
use crate::crypto::keys::PublicKey;
use crate::error::SerializationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseTransaction {
    #[serde(flatten)]
    pub header: TransactionHeader,

    /// Address of the node receiving the lease, Base58.
    pub recipient: String,

    pub amount: u64,
}

/// type, recipient, amount, fee, feeScale, timestamp.
pub const LEASE_SCHEMA: &[FieldSpec<LeaseTransaction>] = &[
    FieldSpec {
        name: "type",
        kind: FieldKind::Integer,
        read: |tx| Some(FieldValue::U8(tx.header.tx_type)),
    },
    FieldSpec {
        name: "recipient",
        kind: FieldKind::Text(TextEncoding::Base58Fixed),
        read: |tx| Some(FieldValue::Text(&tx.recipient)),
    },
    FieldSpec {
        name: "amount",
        kind: FieldKind::Integer,
        read: |tx| Some(FieldValue::U64(tx.amount)),
    },
    FieldSpec {
        name: "fee",
        kind: FieldKind::Integer,
        read: |tx| Some(FieldValue::U64(tx.header.fee)),
    },
    FieldSpec {
        name: "feeScale",
        kind: FieldKind::Integer,
        read: |tx| Some(FieldValue::U16(tx.header.fee_scale)),
    },
    FieldSpec {
        name: "timestamp",
        kind: FieldKind::Integer,
        read: |tx| Some(FieldValue::I64(tx.header.timestamp)),
    },
];

impl LeaseTransaction {
    pub fn new(recipient: &str, amount: u64, fee: u64, fee_scale: u16, timestamp: i64) -> Self {
        Self {
            header: TransactionHeader::new(TransactionType::Lease, fee, fee_scale, timestamp),
            recipient: recipient.to_string(),
            amount,
        }
    }

    pub fn to_api_request_json(&self, public_key: &str, signature: &str) -> Value {
        let mut json = api_request_base(&self.header, public_key, signature);
        json.insert("recipient".into(), self.recipient.clone().into());
        json.insert("amount".into(), self.amount.into());
        Value::Object(json)
    }

    /// Large leases switch the payload to cold-sign API v2; see
    /// [`cold_sign_api_version`].
    pub fn to_cold_sign_json(&self, public_key: &PublicKey, network: NetworkType) -> Value {
        let api = cold_sign_api_version(self.amount);
        let mut json = cold_sign_base(&self.header, public_key, network, api);
        json.insert("recipient".into(), self.recipient.clone().into());
        json.insert("amount".into(), self.amount.into());
        Value::Object(json)
    }
}

impl BytesSerializable for LeaseTransaction {
    fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        self.header.expect_type(TransactionType::Lease)?;
        encode(self, LEASE_SCHEMA)
    }
}
