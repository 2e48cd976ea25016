//! # Digital Signatures
//!
//! Curve25519 signatures in the XEdDSA style used by the ledger.
//!
//! The account key is a Montgomery u-coordinate, which drops the sign of
//! the Edwards x-coordinate. Signing therefore:
//!
//! 1. Computes the Edwards public key `A = a·B` and remembers its sign bit.
//! 2. Draws a nonce `r = SHA-512(a ‖ M ‖ Z) mod ℓ` with 64 random bytes `Z`.
//! 3. Produces a standard Ed25519 `(R, S)` pair over `M` with `A`.
//! 4. Stores the sign bit in bit 255 of the signature (always zero in a
//!    canonical `S`, so it is free real estate).
//!
//! Verification reverses step 4: it maps `u` to Edwards `y`, takes the sign
//! from the signature, clears the bit, and runs plain Ed25519 verification.
//!
//! Unlike RFC 8032 Ed25519 the signature is randomized: signing the same
//! message twice yields different (equally valid) signatures.

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::montgomery::MontgomeryPoint;
use curve25519_dalek::scalar::Scalar;
use ed25519_dalek::{Signature as DalekSignature, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha512};
use thiserror::Error;

use super::keys::{PrivateKey, PublicKey, Signature};

/// Errors during signature verification.
///
/// Carries no detail about which check failed.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid public key")]
    InvalidPublicKey,
}

fn wide_scalar(hasher: Sha512) -> Scalar {
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&hasher.finalize());
    Scalar::from_bytes_mod_order_wide(&wide)
}

/// Signs `message` with fresh randomness from the OS RNG.
pub fn sign(private_key: &PrivateKey, message: &[u8]) -> Signature {
    let mut random = [0u8; 64];
    OsRng.fill_bytes(&mut random);
    sign_with_random(private_key, message, &random)
}

/// Signs `message` using caller-supplied nonce randomness.
///
/// Exists for reproducible tests and benches. Reusing `random` for two
/// different messages leaks nothing by itself (the message is hashed into
/// the nonce), but production code should call [`sign`].
pub fn sign_with_random(private_key: &PrivateKey, message: &[u8], random: &[u8; 64]) -> Signature {
    let a = private_key.scalar();
    let edwards_public = private_key.edwards_public_key();
    let sign_bit = edwards_public.as_bytes()[31] & 0x80;

    let mut hasher = Sha512::new();
    hasher.update(private_key.as_bytes());
    hasher.update(message);
    hasher.update(random);
    let r = wide_scalar(hasher);
    let big_r = EdwardsPoint::mul_base(&r).compress();

    let mut hasher = Sha512::new();
    hasher.update(big_r.as_bytes());
    hasher.update(edwards_public.as_bytes());
    hasher.update(message);
    let k = wide_scalar(hasher);

    let s = k * a + r;

    let mut bytes = [0u8; 64];
    bytes[..32].copy_from_slice(big_r.as_bytes());
    bytes[32..].copy_from_slice(s.as_bytes());
    bytes[63] &= 0x7F;
    bytes[63] |= sign_bit;
    Signature::from_bytes(bytes)
}

/// Verifies a signature against a Montgomery public key.
///
/// Returns `true` if the signature is valid, `false` otherwise. Callers
/// who need a reason can use [`verify_raw`].
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    verify_raw(public_key.as_bytes(), message, signature.as_bytes()).is_ok()
}

/// Verifies raw signature bytes against raw public key bytes.
///
/// The "I got these off the wire" variant.
pub fn verify_raw(
    public_key_bytes: &[u8; 32],
    message: &[u8],
    signature_bytes: &[u8; 64],
) -> Result<(), SignatureError> {
    let sign = (signature_bytes[63] & 0x80) >> 7;
    let edwards = MontgomeryPoint(*public_key_bytes)
        .to_edwards(sign)
        .ok_or(SignatureError::InvalidPublicKey)?;

    let mut edwards_bytes = edwards.compress().to_bytes();
    edwards_bytes[31] = (edwards_bytes[31] & 0x7F) | (signature_bytes[63] & 0x80);
    let verifying_key =
        VerifyingKey::from_bytes(&edwards_bytes).map_err(|_| SignatureError::InvalidPublicKey)?;

    let mut stripped = *signature_bytes;
    stripped[63] &= 0x7F;
    let signature = DalekSignature::from_bytes(&stripped);

    verifying_key
        .verify(message, &signature)
        .map_err(|_| SignatureError::VerificationFailed)
}
