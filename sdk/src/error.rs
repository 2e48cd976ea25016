//! Error types for the SDK.
//!
//! Four concerns, four enums. Local precondition failures ([`KeyError`],
//! [`SerializationError`], [`AddressFormatError`]) are programmer or input
//! errors and are never worth retrying. [`ApiError`] covers everything that
//! comes back from (or fails to come back from) a node.

use thiserror::Error;

/// An operation needed key material the account does not hold, or the key
/// material supplied was unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("no private key in account")]
    MissingPrivateKey,

    #[error("no public key in account")]
    MissingPublicKey,

    #[error("account needs at least one of private key, public key or address")]
    MissingKeyMaterial,

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// The canonical encoder could not produce bytes for a record.
///
/// Every variant means the record and its schema disagree. Fix the code,
/// not the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationError {
    /// The record type has no canonical byte schema at all.
    #[error("transaction type {tx_type} has no canonical byte schema")]
    NoSchema { tx_type: u8 },

    /// The header's tag is not the tag of the record's own schema.
    #[error("record carries type {found}, but its schema is for type {expected}")]
    TypeMismatch { expected: u8, found: u8 },

    #[error("the value of field '{field}' is not set")]
    MissingValue { field: &'static str },

    #[error("unable to serialize field '{field}': no encoding rule for its value type")]
    UnsupportedValue { field: &'static str },

    #[error("field '{field}' is not valid base58: {reason}")]
    InvalidBase58 { field: &'static str, reason: String },

    #[error("field '{field}' is {len} bytes, longer than its {max}-byte length prefix allows")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// A supplied address failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressFormatError {
    #[error("address is not valid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid address length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid address version: expected {expected}, got {got}")]
    InvalidVersion { expected: u8, got: u8 },

    #[error("address belongs to network byte 0x{got:02X}, expected 0x{expected:02X}")]
    NetworkMismatch { expected: u8, got: u8 },

    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

/// Failures talking to a node or decoding what it said.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response (or a record handed to the decoder) was malformed.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The node answered with its generic `{error, message}` payload.
    #[error("node error {code}: {message}")]
    Node { code: i64, message: String },

    /// A transaction lookup came back as `{status: "error", details}`.
    #[error("transaction error: {details}")]
    Transaction { details: String },

    /// The body was valid JSON of an unexpected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The transaction type cannot be broadcast through this client.
    #[error("unsupported transaction type: {0}")]
    UnsupportedTransaction(u8),
}

/// Any SDK failure.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    AddressFormat(#[from] AddressFormatError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
