//! Transactions of a type this SDK does not model: contracts, genesis,
//! whatever the node grows next. Only the common header survives decoding.
//!
//! Decoding is lenient: `type` is the only required field. Genesis records
//! carry no fee at all, and one of them in a block or history list must not
//! sink the whole response. Missing numbers decode as zero.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::encoding::BytesSerializable;
use super::types::{Proof, TransactionHeader};
use super::{api_request_base, cold_sign_base};
use crate::config::{NetworkType, COLD_SIGN_API_V1};
use crate::crypto::keys::PublicKey;
use crate::error::SerializationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LenientHeader")]
pub struct UnknownTransaction {
    #[serde(flatten)]
    pub header: TransactionHeader,
}

/// [`TransactionHeader`] with everything but `type` optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LenientHeader {
    #[serde(rename = "type")]
    tx_type: u8,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    fee: u64,
    #[serde(default)]
    fee_scale: u16,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    proofs: Vec<Proof>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    fee_charged: Option<u64>,
    #[serde(default)]
    height: Option<u64>,
}

impl From<LenientHeader> for UnknownTransaction {
    fn from(raw: LenientHeader) -> Self {
        Self {
            header: TransactionHeader {
                tx_type: raw.tx_type,
                id: raw.id,
                fee: raw.fee,
                fee_scale: raw.fee_scale,
                timestamp: raw.timestamp,
                proofs: raw.proofs,
                status: raw.status,
                fee_charged: raw.fee_charged,
                height: raw.height,
            },
        }
    }
}

impl UnknownTransaction {
    pub fn to_api_request_json(&self, public_key: &str, signature: &str) -> Value {
        Value::Object(api_request_base(&self.header, public_key, signature))
    }

    pub fn to_cold_sign_json(&self, public_key: &PublicKey, network: NetworkType) -> Value {
        Value::Object(cold_sign_base(
            &self.header,
            public_key,
            network,
            COLD_SIGN_API_V1,
        ))
    }
}

impl BytesSerializable for UnknownTransaction {
    /// There is no schema to encode against.
    fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        Err(SerializationError::NoSchema {
            tx_type: self.header.tx_type,
        })
    }
}
