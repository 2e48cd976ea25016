//! # Addresses
//!
//! An address is 26 bytes, shown to humans as Base58:
//!
//! ```text
//! +---------+---------+------------------------------+------------+
//! | version | network | secure_hash(public_key)[..20] | checksum   |
//! | 0x05    | 1 byte  | 20 bytes                      | 4 bytes    |
//! +---------+---------+------------------------------+------------+
//!                       checksum = secure_hash(first 22 bytes)[..4]
//! ```
//!
//! It is Base58Check with a two-byte prefix. The network byte makes a
//! testnet address fail validation on mainnet, so a valid-looking address
//! cannot be replayed across networks.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::{
    NetworkType, ADDRESS_CHECKSUM_LENGTH, ADDRESS_HASH_LENGTH, ADDRESS_LENGTH, ADDRESS_VERSION,
};
use crate::crypto::hash::secure_hash;
use crate::crypto::keys::PublicKey;
use crate::error::AddressFormatError;

const PREFIX_LENGTH: usize = ADDRESS_LENGTH - ADDRESS_CHECKSUM_LENGTH;

/// A validated 26-byte address.
///
/// The only ways to get one are deriving it from a public key or parsing
/// text that passes every check, so holding an `Address` means holding a
/// well-formed one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: [u8; ADDRESS_LENGTH],
}

/// Derives the raw address bytes for `public_key` on the network identified
/// by `network_byte`.
pub fn derive_address(public_key: &[u8], network_byte: u8) -> [u8; ADDRESS_LENGTH] {
    let key_hash = secure_hash(public_key);

    let mut bytes = [0u8; ADDRESS_LENGTH];
    bytes[0] = ADDRESS_VERSION;
    bytes[1] = network_byte;
    bytes[2..PREFIX_LENGTH].copy_from_slice(&key_hash[..ADDRESS_HASH_LENGTH]);

    let checksum = secure_hash(&bytes[..PREFIX_LENGTH]);
    bytes[PREFIX_LENGTH..].copy_from_slice(&checksum[..ADDRESS_CHECKSUM_LENGTH]);
    bytes
}

/// Checks raw address bytes against `network`.
///
/// A pure predicate: any malformed input, including the wrong length,
/// is simply `false`.
pub fn validate_address(network: NetworkType, bytes: &[u8]) -> bool {
    check(network, bytes).is_ok()
}

/// Like [`validate_address`], for Base58 text. Text that is not Base58 at
/// all is `false`, not an error.
pub fn validate_address_str(network: NetworkType, address: &str) -> bool {
    match bs58::decode(address).into_vec() {
        Ok(bytes) => validate_address(network, &bytes),
        Err(_) => false,
    }
}

/// The reason behind a `false` from [`validate_address`].
fn check(network: NetworkType, bytes: &[u8]) -> Result<(), AddressFormatError> {
    if bytes.len() != ADDRESS_LENGTH {
        return Err(AddressFormatError::InvalidLength {
            expected: ADDRESS_LENGTH,
            got: bytes.len(),
        });
    }
    if bytes[0] != ADDRESS_VERSION {
        return Err(AddressFormatError::InvalidVersion {
            expected: ADDRESS_VERSION,
            got: bytes[0],
        });
    }
    if bytes[1] != network.to_byte() {
        return Err(AddressFormatError::NetworkMismatch {
            expected: network.to_byte(),
            got: bytes[1],
        });
    }
    let checksum = secure_hash(&bytes[..PREFIX_LENGTH]);
    if bytes[PREFIX_LENGTH..] != checksum[..ADDRESS_CHECKSUM_LENGTH] {
        return Err(AddressFormatError::ChecksumMismatch);
    }
    Ok(())
}

impl Address {
    /// Derives the address of `public_key` on `network`.
    pub fn from_public_key(public_key: &PublicKey, network: NetworkType) -> Self {
        Self {
            bytes: derive_address(public_key.as_bytes(), network.to_byte()),
        }
    }

    /// Validates raw bytes and wraps them.
    pub fn from_bytes(network: NetworkType, bytes: &[u8]) -> Result<Self, AddressFormatError> {
        check(network, bytes)?;
        let mut out = [0u8; ADDRESS_LENGTH];
        out.copy_from_slice(bytes);
        Ok(Self { bytes: out })
    }

    /// Decodes and validates Base58 address text.
    pub fn from_base58(network: NetworkType, address: &str) -> Result<Self, AddressFormatError> {
        let bytes = bs58::decode(address)
            .into_vec()
            .map_err(|e| AddressFormatError::InvalidBase58(e.to_string()))?;
        Self::from_bytes(network, &bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.bytes
    }

    pub fn network_byte(&self) -> u8 {
        self.bytes[1]
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.bytes).into_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_base58())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
