//! # Identity Module
//!
//! Accounts and addresses. Every participant is a Curve25519 key pair; the
//! network knows it by a 26-byte checksummed address derived from the
//! public key.
//!
//! The identity stack is layered:
//!
//! 1. **Keys** ([`crate::crypto::keys`]): raw scalar and Montgomery point.
//! 2. **Address**: version byte, network byte, key hash, checksum. This is
//!    what users see, share and paste into payment fields.
//! 3. **Account**: whatever subset of (private key, public key, address)
//!    the caller has, plus the network it belongs to. A full account signs;
//!    a public-key or address-only account can only look.
//!
//! ## Design Decisions
//!
//! - Seed derivation is fixed by the network's wallets: the same seed and
//!   nonce must produce the same address in every client, so there is
//!   nothing to tune here.
//! - Address validation is a predicate, not a parser with opinions.
//!   [`validate_address`] never fails, it only says no.

pub mod account;
pub mod address;

pub use account::Account;
pub use address::{derive_address, validate_address, validate_address_str, Address};
