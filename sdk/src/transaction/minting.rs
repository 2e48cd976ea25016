//! Minting: the block reward a minter pays itself. Only ever produced by a
//! node, so the SDK decodes and encodes it but never broadcasts it.

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
#[serde(rename_all = "camelCase")]
pub struct MintingTransaction {
    #[serde(flatten)]
    pub header: TransactionHeader,

    pub recipient: String,

    pub amount: u64,

    /// Height of the block this reward belongs to.
    pub current_block_height: i32,
}

/// type, recipient, amount, timestamp, currentBlockHeight.
pub const MINTING_SCHEMA: &[FieldSpec<MintingTransaction>] = &[
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
        name: "timestamp",
        kind: FieldKind::Integer,
        read: |tx| Some(FieldValue::I64(tx.header.timestamp)),
    },
    FieldSpec {
        name: "currentBlockHeight",
        kind: FieldKind::Integer,
        read: |tx| Some(FieldValue::I32(tx.current_block_height)),
    },
];

impl MintingTransaction {
    pub fn new(recipient: &str, amount: u64, timestamp: i64, current_block_height: i32) -> Self {
        Self {
            header: TransactionHeader::new(TransactionType::Minting, 0, 0, timestamp),
            recipient: recipient.to_string(),
            amount,
            current_block_height,
        }
    }

    pub fn to_api_request_json(&self, public_key: &str, signature: &str) -> Value {
        let mut json = api_request_base(&self.header, public_key, signature);
        self.insert_fields(&mut json);
        Value::Object(json)
    }

    pub fn to_cold_sign_json(&self, public_key: &PublicKey, network: NetworkType) -> Value {
        let mut json = cold_sign_base(&self.header, public_key, network, COLD_SIGN_API_V1);
        self.insert_fields(&mut json);
        Value::Object(json)
    }

    fn insert_fields(&self, json: &mut serde_json::Map<String, Value>) {
        json.insert("recipient".into(), self.recipient.clone().into());
        json.insert("amount".into(), self.amount.into());
        json.insert(
            "currentBlockHeight".into(),
            self.current_block_height.into(),
        );
    }
}

impl BytesSerializable for MintingTransaction {
    fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        self.header.expect_type(TransactionType::Minting)?;
        encode(self, MINTING_SCHEMA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT: &str = "AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F";

    #[test]
    fn canonical_layout() {
        let tx = MintingTransaction::new(RECIPIENT, 900_000_000, 11, 1024);
        let bytes = tx.to_bytes().unwrap();

        let mut expected = vec![5u8];
        expected.extend_from_slice(&bs58::decode(RECIPIENT).into_vec().unwrap());
        expected.extend_from_slice(&900_000_000u64.to_be_bytes());
        expected.extend_from_slice(&11i64.to_be_bytes());
        expected.extend_from_slice(&1024i32.to_be_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn decodes_node_shape() {
        let json = format!(
            r#"{{"type":5,"id":"x","fee":0,"feeScale":100,"timestamp":11,
                "recipient":"{}","amount":900000000,"currentBlockHeight":1024,
                "status":"Success","feeCharged":0,"height":1024}}"#,
            RECIPIENT
        );
        let tx: MintingTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx.current_block_height, 1024);
        assert_eq!(tx.header.height, Some(1024));
        assert_eq!(tx.header.status.as_deref(), Some("Success"));
    }
}
