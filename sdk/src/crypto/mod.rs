//! # Cryptographic Primitives
//!
//! Everything the SDK computes that a node will later recompute and compare
//! lives here. Get one bit wrong and the node politely rejects your
//! transaction, or worse, accepts it under an address nobody controls.
//!
//! - **Curve25519** keys: Montgomery public keys, Edwards arithmetic for
//!   signing.
//! - **XEdDSA-style signatures** over canonical transaction bytes.
//! - **Blake2b-256 / Keccak-256 / SHA-256** and the secure hash built from
//!   the first two.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. The curve arithmetic comes from `curve25519-dalek`, the final
//! signature check from `ed25519-dalek`, the digests from RustCrypto. The
//! only thing assembled here is the glue the network dictates.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{blake2b256, keccak256, secure_hash, sha256, transaction_id};
pub use keys::{PrivateKey, PublicKey, Signature};
pub use signatures::{sign, verify, SignatureError};
