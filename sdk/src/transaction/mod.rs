//! # Transaction Module
//!
//! Building, encoding, signing and decoding ledger transactions. Every
//! record this SDK handles is one variant of [`Transaction`].
//!
//! ## Architecture
//!
//! ```text
//! types.rs       : TransactionType tags, the shared header, node proofs
//! encoding.rs    : Schema-driven canonical byte encoder
//! payment.rs     : Payment (type 2)
//! lease.rs       : Lease (type 3)
//! cancel_lease.rs: CancelLease (type 4)
//! minting.rs     : Minting (type 5), decode-only in practice
//! unknown.rs     : Everything else, header only
//! builder.rs     : Fluent TransactionBuilder with the usual defaults
//! signing.rs     : Detached signatures over canonical bytes
//! parser.rs      : Two-pass decoder: peek the tag, then decode the variant
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder`] assembles an unsigned record.
//! 2. **Encode**: [`BytesSerializable::to_bytes`] produces canonical bytes.
//! 3. **Sign**: [`sign_transaction`] returns a detached [`SignedTransaction`].
//! 4. **Project**: the signed record becomes broadcast JSON, or a cold-sign
//!    payload for an offline wallet.
//! 5. **Broadcast**: [`crate::chain::Blockchain::send_transaction`].
//!
//! Records are plain values. Nothing in this module mutates one after it is
//! built; signing hands back a new value next to the original.

pub mod builder;
pub mod cancel_lease;
pub mod encoding;
pub mod lease;
pub mod minting;
pub mod parser;
pub mod payment;
pub mod signing;
pub mod types;
pub mod unknown;

pub use builder::TransactionBuilder;
pub use cancel_lease::CancelLeaseTransaction;
pub use encoding::{BytesSerializable, FieldKind, FieldSpec, FieldValue, TextEncoding};
pub use lease::LeaseTransaction;
pub use minting::MintingTransaction;
pub use parser::{parse, parse_value};
pub use payment::PaymentTransaction;
pub use signing::{sign_transaction, SignedTransaction};
pub use types::{Proof, TransactionHeader, TransactionType};
pub use unknown::UnknownTransaction;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::config::{
    NetworkType, COLD_SIGN_API_V1, COLD_SIGN_API_V2, COLD_SIGN_OPC_TRANSACTION,
    COLD_SIGN_PROTOCOL, COLD_SIGN_V2_AMOUNT_THRESHOLD,
};
use crate::crypto::hash::transaction_id;
use crate::crypto::keys::PublicKey;
use crate::error::SerializationError;
use crate::identity::address::Address;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// Any transaction, by variant.
///
/// Serializes as the flat record the node uses (no enum wrapper) and
/// deserializes through [`parse_value`], so `type` decides the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Payment(PaymentTransaction),
    Lease(LeaseTransaction),
    CancelLease(CancelLeaseTransaction),
    Minting(MintingTransaction),
    Unknown(UnknownTransaction),
}

impl Transaction {
    pub fn header(&self) -> &TransactionHeader {
        match self {
            Self::Payment(tx) => &tx.header,
            Self::Lease(tx) => &tx.header,
            Self::CancelLease(tx) => &tx.header,
            Self::Minting(tx) => &tx.header,
            Self::Unknown(tx) => &tx.header,
        }
    }

    /// The raw on-chain tag, including tags we don't model.
    pub fn type_tag(&self) -> u8 {
        self.header().tx_type
    }

    /// `None` for [`Transaction::Unknown`].
    pub fn tx_type(&self) -> Option<TransactionType> {
        match self {
            Self::Payment(_) => Some(TransactionType::Payment),
            Self::Lease(_) => Some(TransactionType::Lease),
            Self::CancelLease(_) => Some(TransactionType::CancelLease),
            Self::Minting(_) => Some(TransactionType::Minting),
            Self::Unknown(_) => None,
        }
    }

    /// Computes the id from canonical bytes. Works offline, before signing,
    /// and matches the id the node assigns.
    pub fn id(&self) -> Result<String, SerializationError> {
        self.to_bytes().map(|bytes| transaction_id(&bytes))
    }

    /// Whether the node client knows a broadcast route for this variant.
    pub fn is_broadcastable(&self) -> bool {
        matches!(
            self,
            Self::Payment(_) | Self::Lease(_) | Self::CancelLease(_)
        )
    }

    /// The JSON body the node's broadcast endpoints expect.
    pub fn to_api_request_json(&self, public_key: &str, signature: &str) -> Value {
        match self {
            Self::Payment(tx) => tx.to_api_request_json(public_key, signature),
            Self::Lease(tx) => tx.to_api_request_json(public_key, signature),
            Self::CancelLease(tx) => tx.to_api_request_json(public_key, signature),
            Self::Minting(tx) => tx.to_api_request_json(public_key, signature),
            Self::Unknown(tx) => tx.to_api_request_json(public_key, signature),
        }
    }

    /// The payload an offline wallet scans and signs. No signature inside:
    /// that is the wallet's job.
    pub fn to_cold_sign_json(&self, public_key: &PublicKey, network: NetworkType) -> Value {
        match self {
            Self::Payment(tx) => tx.to_cold_sign_json(public_key, network),
            Self::Lease(tx) => tx.to_cold_sign_json(public_key, network),
            Self::CancelLease(tx) => tx.to_cold_sign_json(public_key, network),
            Self::Minting(tx) => tx.to_cold_sign_json(public_key, network),
            Self::Unknown(tx) => tx.to_cold_sign_json(public_key, network),
        }
    }
}

impl BytesSerializable for Transaction {
    fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        match self {
            Self::Payment(tx) => tx.to_bytes(),
            Self::Lease(tx) => tx.to_bytes(),
            Self::CancelLease(tx) => tx.to_bytes(),
            Self::Minting(tx) => tx.to_bytes(),
            Self::Unknown(tx) => tx.to_bytes(),
        }
    }
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Payment(tx) => tx.serialize(serializer),
            Self::Lease(tx) => tx.serialize(serializer),
            Self::CancelLease(tx) => tx.serialize(serializer),
            Self::Minting(tx) => tx.serialize(serializer),
            Self::Unknown(tx) => tx.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        parse_value(value).map_err(serde::de::Error::custom)
    }
}

impl From<PaymentTransaction> for Transaction {
    fn from(tx: PaymentTransaction) -> Self {
        Self::Payment(tx)
    }
}

impl From<LeaseTransaction> for Transaction {
    fn from(tx: LeaseTransaction) -> Self {
        Self::Lease(tx)
    }
}

impl From<CancelLeaseTransaction> for Transaction {
    fn from(tx: CancelLeaseTransaction) -> Self {
        Self::CancelLease(tx)
    }
}

impl From<MintingTransaction> for Transaction {
    fn from(tx: MintingTransaction) -> Self {
        Self::Minting(tx)
    }
}

impl From<UnknownTransaction> for Transaction {
    fn from(tx: UnknownTransaction) -> Self {
        Self::Unknown(tx)
    }
}

// ---------------------------------------------------------------------------
// Projection helpers
// ---------------------------------------------------------------------------

/// Cold-sign API version for an amount-carrying transaction.
///
/// Amounts above 2^53 - 1 lose precision in a JavaScript wallet that parses
/// them as doubles, so those payloads are tagged v2.
pub fn cold_sign_api_version(amount: u64) -> u8 {
    if amount > COLD_SIGN_V2_AMOUNT_THRESHOLD {
        COLD_SIGN_API_V2
    } else {
        COLD_SIGN_API_V1
    }
}

/// Common fields of every broadcast body.
pub(crate) fn api_request_base(
    header: &TransactionHeader,
    public_key: &str,
    signature: &str,
) -> Map<String, Value> {
    let mut json = Map::new();
    json.insert("senderPublicKey".into(), public_key.into());
    json.insert("fee".into(), header.fee.into());
    json.insert("feeScale".into(), header.fee_scale.into());
    json.insert("timestamp".into(), header.timestamp.into());
    json.insert("signature".into(), signature.into());
    json
}

/// Common fields of every cold-sign payload.
pub(crate) fn cold_sign_base(
    header: &TransactionHeader,
    public_key: &PublicKey,
    network: NetworkType,
    api: u8,
) -> Map<String, Value> {
    let address = Address::from_public_key(public_key, network);

    let mut json = Map::new();
    json.insert("protocol".into(), COLD_SIGN_PROTOCOL.into());
    json.insert("api".into(), api.into());
    json.insert("opc".into(), COLD_SIGN_OPC_TRANSACTION.into());
    json.insert("transactionType".into(), header.tx_type.into());
    json.insert("senderPublicKey".into(), public_key.to_base58().into());
    json.insert("address".into(), address.to_base58().into());
    json.insert("fee".into(), header.fee.into());
    json.insert("feeScale".into(), header.fee_scale.into());
    json.insert("timestamp".into(), header.timestamp.into());
    json
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::blake2b256;

    const RECIPIENT: &str = "AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F";

    #[test]
    fn id_is_blake2b_of_canonical_bytes() {
        let tx: Transaction = LeaseTransaction::new(RECIPIENT, 100, 10_000_000, 100, 1).into();
        let bytes = tx.to_bytes().unwrap();
        let expected = bs58::encode(blake2b256(&bytes)).into_string();
        assert_eq!(tx.id().unwrap(), expected);
    }

    #[test]
    fn unknown_has_no_id() {
        let tx: Transaction = serde_json::from_str(
            r#"{"type":99,"fee":1,"feeScale":100,"timestamp":2}"#,
        )
        .unwrap();
        assert!(matches!(
            tx.id(),
            Err(SerializationError::NoSchema { tx_type: 99 })
        ));
        assert_eq!(tx.type_tag(), 99);
        assert_eq!(tx.tx_type(), None);
    }

    #[test]
    fn only_user_transactions_broadcast() {
        let lease: Transaction = LeaseTransaction::new(RECIPIENT, 1, 1, 100, 1).into();
        let mint: Transaction = MintingTransaction::new(RECIPIENT, 1, 1, 1).into();
        assert!(lease.is_broadcastable());
        assert!(!mint.is_broadcastable());
    }

    #[test]
    fn serializes_flat() {
        let tx: Transaction = LeaseTransaction::new(RECIPIENT, 7, 10_000_000, 100, 1).into();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], 3);
        assert_eq!(json["amount"], 7);
        assert!(json.get("Lease").is_none());
    }

    #[test]
    fn api_version_threshold() {
        assert_eq!(cold_sign_api_version(0), 1);
        assert_eq!(cold_sign_api_version(COLD_SIGN_V2_AMOUNT_THRESHOLD), 1);
        assert_eq!(cold_sign_api_version(COLD_SIGN_V2_AMOUNT_THRESHOLD + 1), 2);
        assert_eq!(cold_sign_api_version(u64::MAX), 2);
    }

    #[test]
    fn dispatch_matches_variant_projection() {
        let lease = LeaseTransaction::new(RECIPIENT, 7, 10_000_000, 100, 1);
        let tx: Transaction = lease.clone().into();
        assert_eq!(
            tx.to_api_request_json("pk", "sig"),
            lease.to_api_request_json("pk", "sig")
        );
        assert_eq!(tx.to_bytes(), lease.to_bytes());
    }
}
