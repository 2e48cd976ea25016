//! Cancel lease: end a lease by pointing at the lease transaction's id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::encoding::{
    encode, BytesSerializable, FieldKind, FieldSpec, FieldValue, TextEncoding,
};
use super::types::{TransactionHeader, TransactionType};
use super::{api_request_base, cold_sign_base};
use crate::config::{NetworkType, COLD_SIGN_API_V1};
use crate::crypto::keys::PublicKey;
use crate::error::SerializationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelLeaseTransaction {
    #[serde(flatten)]
    pub header: TransactionHeader,

    /// Id of the lease being cancelled. Nodes report it as `leaseId` on
    /// confirmed transactions and accept it as `txId` on broadcast.
    #[serde(rename = "txId", alias = "leaseId")]
    pub tx_id: String,
}

/// type, fee, feeScale, timestamp, txId.
pub const CANCEL_LEASE_SCHEMA: &[FieldSpec<CancelLeaseTransaction>] = &[
    FieldSpec {
        name: "type",
        kind: FieldKind::Integer,
        read: |tx| Some(FieldValue::U8(tx.header.tx_type)),
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
    FieldSpec {
        name: "txId",
        kind: FieldKind::Text(TextEncoding::Base58Fixed),
        read: |tx| Some(FieldValue::Text(&tx.tx_id)),
    },
];

impl CancelLeaseTransaction {
    pub fn new(tx_id: &str, fee: u64, fee_scale: u16, timestamp: i64) -> Self {
        Self {
            header: TransactionHeader::new(TransactionType::CancelLease, fee, fee_scale, timestamp),
            tx_id: tx_id.to_string(),
        }
    }

    pub fn to_api_request_json(&self, public_key: &str, signature: &str) -> Value {
        let mut json = api_request_base(&self.header, public_key, signature);
        json.insert("txId".into(), self.tx_id.clone().into());
        Value::Object(json)
    }

    pub fn to_cold_sign_json(&self, public_key: &PublicKey, network: NetworkType) -> Value {
        let mut json = cold_sign_base(&self.header, public_key, network, COLD_SIGN_API_V1);
        json.insert("txId".into(), self.tx_id.clone().into());
        Value::Object(json)
    }
}

impl BytesSerializable for CancelLeaseTransaction {
    fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        self.header.expect_type(TransactionType::CancelLease)?;
        encode(self, CANCEL_LEASE_SCHEMA)
    }
}
