//! Core type definitions shared by every transaction variant.
//!
//! The header fields are common to all variants. The node-populated ones
//! (`proofs`, `status`, `feeCharged`, `height`) show up in lookups and
//! broadcast responses and are never part of canonical bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SerializationError;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// The transaction kinds this SDK understands, by their on-chain tag.
///
/// Anything else the node sends back decodes to
/// [`super::UnknownTransaction`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransactionType {
    Payment = 2,
    Lease = 3,
    CancelLease = 4,
    Minting = 5,
}

impl TransactionType {
    /// Resolves an on-chain tag. `None` means "not a type we model".
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            2 => Some(Self::Payment),
            3 => Some(Self::Lease),
            4 => Some(Self::CancelLease),
            5 => Some(Self::Minting),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payment => write!(f, "Payment"),
            Self::Lease => write!(f, "Lease"),
            Self::CancelLease => write!(f, "CancelLease"),
            Self::Minting => write!(f, "Minting"),
        }
    }
}

// ---------------------------------------------------------------------------
// Proof
// ---------------------------------------------------------------------------

/// A signature proof as the node reports it on confirmed transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    pub proof_type: String,
    pub public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub signature: String,
}

// ---------------------------------------------------------------------------
// TransactionHeader
// ---------------------------------------------------------------------------

/// Fields present on every transaction, whatever its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHeader {
    /// On-chain type tag.
    #[serde(rename = "type")]
    pub tx_type: u8,

    /// Transaction id as reported by the node. Locally built records carry
    /// `None`; use `Transaction::id` to compute it offline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Fee in the smallest unit (1 VSYS = 10^8).
    pub fee: u64,

    pub fee_scale: u16,

    /// Unix time in **nanoseconds**. Not milliseconds. The node will tell
    /// you about it if you forget.
    pub timestamp: i64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proofs: Vec<Proof>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_charged: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
}

impl TransactionHeader {
    /// A fresh header for a locally built transaction.
    pub fn new(tx_type: TransactionType, fee: u64, fee_scale: u16, timestamp: i64) -> Self {
        Self {
            tx_type: tx_type.tag(),
            id: None,
            fee,
            fee_scale,
            timestamp,
            proofs: Vec::new(),
            status: None,
            fee_charged: None,
            height: None,
        }
    }

    /// Fails unless the header is tagged `expected`. Guards encoders against
    /// records deserialized straight into the wrong variant struct.
    pub fn expect_type(&self, expected: TransactionType) -> Result<(), SerializationError> {
        if self.tx_type == expected.tag() {
            Ok(())
        } else {
            Err(SerializationError::TypeMismatch {
                expected: expected.tag(),
                found: self.tx_type,
            })
        }
    }
}
