//! # Key Management
//!
//! Curve25519 key material as the ledger uses it.
//!
//! Accounts are identified by a Montgomery-form (X25519-style) public key,
//! but they *sign* with Ed25519 arithmetic on the birationally equivalent
//! Edwards curve. The private key is therefore a raw 32-byte scalar rather
//! than an Ed25519 seed: there is no SHA-512 expansion step, the bytes are
//! the scalar.
//!
//! ## Security considerations
//!
//! - Private key bytes never appear in `Debug` output.
//! - Key bytes are never logged.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use std::fmt;

use crate::config::{PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::error::KeyError;

/// A Curve25519 private scalar.
///
/// Not `Serialize`. The only export path is [`PrivateKey::to_base58`].
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    bytes: [u8; PRIVATE_KEY_LENGTH],
}

/// The public half of an account: the Montgomery u-coordinate of the
/// private scalar times the base point.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

/// A detached 64-byte signature. Bit 255 carries the sign of the signer's
/// Edwards x-coordinate, which the Montgomery public key cannot express.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    bytes: [u8; SIGNATURE_LENGTH],
}

/// Clamps 32 bytes into a valid Curve25519 scalar: clear the three low
/// bits (cofactor), clear bit 255 and set bit 254.
pub fn clamp(mut bytes: [u8; PRIVATE_KEY_LENGTH]) -> [u8; PRIVATE_KEY_LENGTH] {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
    bytes
}

fn decode_base58<const N: usize>(s: &str) -> Result<[u8; N], String> {
    let decoded = bs58::decode(s).into_vec().map_err(|e| e.to_string())?;
    <[u8; N]>::try_from(decoded.as_slice())
        .map_err(|_| format!("expected {} bytes, got {}", N, decoded.len()))
}

impl PrivateKey {
    /// Wraps raw scalar bytes as-is. Use [`clamp`] first if the bytes come
    /// from a hash rather than from an existing key.
    pub fn from_bytes(bytes: [u8; PRIVATE_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parses a Base58-encoded private key.
    pub fn from_base58(s: &str) -> Result<Self, KeyError> {
        decode_base58(s)
            .map(Self::from_bytes)
            .map_err(KeyError::InvalidPrivateKey)
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LENGTH] {
        &self.bytes
    }

    /// Exports the key as Base58. **Handle with care.**
    pub fn to_base58(&self) -> String {
        bs58::encode(self.bytes).into_string()
    }

    /// The scalar reduced mod the group order. Multiplying the base point
    /// by the reduced scalar gives the same point as the unreduced bytes,
    /// since the base point has prime order.
    pub(crate) fn scalar(&self) -> Scalar {
        Scalar::from_bytes_mod_order(self.bytes)
    }

    /// The Edwards form of the public key, as used inside signatures.
    pub(crate) fn edwards_public_key(&self) -> CompressedEdwardsY {
        EdwardsPoint::mul_base(&self.scalar()).compress()
    }

    /// Derives the Montgomery public key.
    pub fn public_key(&self) -> PublicKey {
        let point = EdwardsPoint::mul_base(&self.scalar());
        PublicKey::from_bytes(point.to_montgomery().to_bytes())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(pub={})", self.public_key().to_base58())
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parses a Base58-encoded public key. Only the length is checked;
    /// every 32-byte string is a u-coordinate of *something*.
    pub fn from_base58(s: &str) -> Result<Self, KeyError> {
        decode_base58(s)
            .map(Self::from_bytes)
            .map_err(KeyError::InvalidPublicKey)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.bytes).into_string()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base58())
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parses a Base58-encoded signature, as found in transaction proofs.
    pub fn from_base58(s: &str) -> Result<Self, String> {
        decode_base58(s).map(Self::from_bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// Base58 text, the format the node expects in broadcast requests.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.bytes).into_string()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = hex::encode(self.bytes);
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_PRIVATE_KEY: &str = "ZRJZmYGYe9WJJigf8VpxhhzZojuf7vJsjH36wKRAuJn";
    const KNOWN_PUBLIC_KEY: &str = "F2xmVravRaQA55qPn6wFyorssWm7oJX4o4WNPVxgfoYN";

    #[test]
    fn clamp_sets_expected_bits() {
        let clamped = clamp([0xFF; 32]);
        assert_eq!(clamped[0] & 0b0000_0111, 0);
        assert_eq!(clamped[31] & 0x80, 0);
        assert_eq!(clamped[31] & 0x40, 0x40);

        let clamped = clamp([0x00; 32]);
        assert_eq!(clamped[31], 0x40);
    }

    #[test]
    fn clamp_is_idempotent() {
        let once = clamp([0xA5; 32]);
        assert_eq!(clamp(once), once);
    }

    #[test]
    fn known_public_key_vector() {
        let sk = PrivateKey::from_base58(KNOWN_PRIVATE_KEY).unwrap();
        assert_eq!(sk.public_key().to_base58(), KNOWN_PUBLIC_KEY);
    }

    #[test]
    fn public_key_matches_x25519_base_multiplication() {
        // The Montgomery public key must be exactly what an X25519
        // implementation derives for the same (clamped) scalar.
        let sk = PrivateKey::from_bytes(clamp([7u8; 32]));
        let secret = x25519_dalek::StaticSecret::from(*sk.as_bytes());
        let expected = x25519_dalek::PublicKey::from(&secret);
        assert_eq!(sk.public_key().as_bytes(), expected.as_bytes());
    }

    #[test]
    fn base58_roundtrips() {
        let sk = PrivateKey::from_base58(KNOWN_PRIVATE_KEY).unwrap();
        assert_eq!(sk.to_base58(), KNOWN_PRIVATE_KEY);

        let pk = PublicKey::from_base58(KNOWN_PUBLIC_KEY).unwrap();
        assert_eq!(pk.to_base58(), KNOWN_PUBLIC_KEY);
        assert_eq!(pk, sk.public_key());
    }

    #[test]
    fn wrong_length_is_rejected() {
        let short = bs58::encode([1u8; 31]).into_string();
        assert!(matches!(
            PrivateKey::from_base58(&short),
            Err(KeyError::InvalidPrivateKey(_))
        ));
        assert!(matches!(
            PublicKey::from_base58(&short),
            Err(KeyError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn invalid_base58_is_rejected() {
        // '0', 'O', 'I' and 'l' are not in the Base58 alphabet.
        assert!(PrivateKey::from_base58("0OIl").is_err());
        assert!(PublicKey::from_base58("0OIl").is_err());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let sk = PrivateKey::from_base58(KNOWN_PRIVATE_KEY).unwrap();
        let debug_str = format!("{:?}", sk);
        assert!(debug_str.starts_with("PrivateKey(pub="));
        assert!(!debug_str.contains(KNOWN_PRIVATE_KEY));
    }

    #[test]
    fn signature_base58_roundtrip() {
        let sig = Signature::from_bytes([9u8; 64]);
        let recovered = Signature::from_base58(&sig.to_base58()).unwrap();
        assert_eq!(sig, recovered);
        assert!(Signature::from_base58(&bs58::encode([9u8; 63]).into_string()).is_err());
    }
}
