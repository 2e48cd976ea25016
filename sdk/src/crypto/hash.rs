//! # Hashing Utilities
//!
//! The ledger leans on three digests and one composition of them:
//!
//! - **Blake2b-256**: transaction ids, and the inner half of the secure hash.
//! - **Keccak-256**: the outer half of the secure hash. Note: Keccak, not
//!   the NIST-padded SHA3-256. They differ in one padding byte and in every
//!   output bit.
//! - **SHA-256**: one step of seed-to-key derivation.
//! - **Secure hash**: `Keccak256(Blake2b256(data))`. Used for address key
//!   hashes, address checksums and seed derivation.
//!
//! None of these are negotiable; they are what the node computes.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use sha2::Sha256;
use sha3::Keccak256;

type Blake2b256 = Blake2b<U32>;

/// Blake2b with a 32-byte output.
pub fn blake2b256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Original Keccak-256 (pre-NIST padding).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// The ledger's "secure hash": `Keccak256(Blake2b256(data))`.
///
/// Chaining two unrelated constructions means a break in either one alone
/// is not enough to forge an address.
///
/// # Example
///
/// ```
/// use vsys_sdk::crypto::hash::{blake2b256, keccak256, secure_hash};
///
/// let digest = secure_hash(b"vsys");
/// assert_eq!(digest, keccak256(&blake2b256(b"vsys")));
/// ```
pub fn secure_hash(data: &[u8]) -> [u8; 32] {
    keccak256(&blake2b256(data))
}

/// Transaction id: Base58 of the Blake2b-256 digest of the canonical bytes.
///
/// This is the same id the node assigns on-chain, so it can be computed
/// offline before broadcasting.
pub fn transaction_id(canonical_bytes: &[u8]) -> String {
    bs58::encode(blake2b256(canonical_bytes)).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b256_empty_vector() {
        assert_eq!(
            hex::encode(blake2b256(b"")),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn keccak256_empty_vector() {
        // The famous Ethereum empty-input hash. If this ever turns into
        // a7ffc6f8..., somebody swapped in SHA3-256.
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn sha256_empty_vector() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn secure_hash_empty_vector() {
        assert_eq!(
            hex::encode(secure_hash(b"")),
            "b8ac8f9444c818d16a1b5a6f885322da4795ea2d18e0a757fd45f5723643ec33"
        );
    }

    #[test]
    fn secure_hash_is_composition() {
        let data = b"0123";
        assert_eq!(secure_hash(data), keccak256(&blake2b256(data)));
        assert_ne!(secure_hash(data), blake2b256(data));
    }

    #[test]
    fn transaction_id_is_base58_blake2b() {
        let id = transaction_id(b"canonical");
        let decoded = bs58::decode(&id).into_vec().unwrap();
        assert_eq!(decoded, blake2b256(b"canonical").to_vec());
    }
}
