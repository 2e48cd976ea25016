//! Payment: move VSYS from the signer to a recipient, with an optional
//! Base58 attachment.

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
pub struct PaymentTransaction {
    #[serde(flatten)]
    pub header: TransactionHeader,

    /// Recipient address, Base58.
    pub recipient: String,

    pub amount: u64,

    /// Base58-encoded attachment bytes. Canonical bytes require it, even if
    /// empty; the builder defaults it to `""`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

/// type, timestamp, amount, fee, feeScale, recipient, attachment.
pub const PAYMENT_SCHEMA: &[FieldSpec<PaymentTransaction>] = &[
    FieldSpec {
        name: "type",
        kind: FieldKind::Integer,
        read: |tx| Some(FieldValue::U8(tx.header.tx_type)),
    },
    FieldSpec {
        name: "timestamp",
        kind: FieldKind::Integer,
        read: |tx| Some(FieldValue::I64(tx.header.timestamp)),
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
        name: "recipient",
        kind: FieldKind::Text(TextEncoding::Base58Fixed),
        read: |tx| Some(FieldValue::Text(&tx.recipient)),
    },
    FieldSpec {
        name: "attachment",
        kind: FieldKind::Text(TextEncoding::Base58LengthPrefixed),
        read: |tx| tx.attachment.as_deref().map(FieldValue::Text),
    },
];

impl PaymentTransaction {
    pub fn new(recipient: &str, amount: u64, fee: u64, fee_scale: u16, timestamp: i64) -> Self {
        Self {
            header: TransactionHeader::new(TransactionType::Payment, fee, fee_scale, timestamp),
            recipient: recipient.to_string(),
            amount,
            attachment: Some(String::new()),
        }
    }

    pub fn to_api_request_json(&self, public_key: &str, signature: &str) -> Value {
        let mut json = api_request_base(&self.header, public_key, signature);
        json.insert("recipient".into(), self.recipient.clone().into());
        json.insert("amount".into(), self.amount.into());
        json.insert(
            "attachment".into(),
            self.attachment.clone().unwrap_or_default().into(),
        );
        Value::Object(json)
    }

    pub fn to_cold_sign_json(&self, public_key: &PublicKey, network: NetworkType) -> Value {
        let api = cold_sign_api_version(self.amount);
        let mut json = cold_sign_base(&self.header, public_key, network, api);
        json.insert("recipient".into(), self.recipient.clone().into());
        json.insert("amount".into(), self.amount.into());
        json.insert(
            "attachment".into(),
            self.attachment.clone().unwrap_or_default().into(),
        );
        Value::Object(json)
    }
}

impl BytesSerializable for PaymentTransaction {
    fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        self.header.expect_type(TransactionType::Payment)?;
        encode(self, PAYMENT_SCHEMA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT: &str = "AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F";

    #[test]
    fn canonical_layout() {
        let tx = PaymentTransaction::new(RECIPIENT, 5, 10_000_000, 100, 7);
        let bytes = tx.to_bytes().unwrap();

        let recipient = bs58::decode(RECIPIENT).into_vec().unwrap();
        let mut expected = vec![2u8];
        expected.extend_from_slice(&7i64.to_be_bytes());
        expected.extend_from_slice(&5u64.to_be_bytes());
        expected.extend_from_slice(&10_000_000u64.to_be_bytes());
        expected.extend_from_slice(&100u16.to_be_bytes());
        expected.extend_from_slice(&recipient);
        expected.extend_from_slice(&[0, 0]);
        assert_eq!(bytes, expected);
        assert_eq!(bytes.len(), 1 + 8 + 8 + 8 + 2 + 26 + 2);
    }

    #[test]
    fn attachment_is_length_prefixed() {
        let mut tx = PaymentTransaction::new(RECIPIENT, 5, 10_000_000, 100, 7);
        tx.attachment = Some(bs58::encode(b"memo").into_string());
        let bytes = tx.to_bytes().unwrap();
        assert_eq!(&bytes[bytes.len() - 6..], &[0, 4, b'm', b'e', b'm', b'o']);
    }

    #[test]
    fn missing_attachment_fails_to_encode() {
        let mut tx = PaymentTransaction::new(RECIPIENT, 5, 10_000_000, 100, 7);
        tx.attachment = None;
        assert_eq!(
            tx.to_bytes(),
            Err(SerializationError::MissingValue {
                field: "attachment"
            })
        );
    }

    #[test]
    fn api_request_shape() {
        let tx = PaymentTransaction::new(RECIPIENT, 5, 10_000_000, 100, 7);
        let json = tx.to_api_request_json("pk", "sig");
        assert_eq!(json["senderPublicKey"], "pk");
        assert_eq!(json["signature"], "sig");
        assert_eq!(json["recipient"], RECIPIENT);
        assert_eq!(json["amount"], 5);
        assert_eq!(json["attachment"], "");
        assert_eq!(json["feeScale"], 100);
    }

    #[test]
    fn cold_sign_includes_attachment() {
        let mut tx = PaymentTransaction::new(RECIPIENT, 5, 10_000_000, 100, 7);
        tx.attachment = Some("3yZe7d".to_string());
        let sender = PublicKey::from_bytes([1u8; 32]);
        let json = tx.to_cold_sign_json(&sender, NetworkType::Testnet);
        assert_eq!(json["attachment"], "3yZe7d");
        assert_eq!(json["transactionType"], 2);
        assert_eq!(json["api"], 1);
    }
}
