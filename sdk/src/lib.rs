// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # V Systems Client SDK
//!
//! Everything a wallet needs to talk to a V Systems node without trusting
//! the node with anything it doesn't need: keys stay here, signatures leave.
//!
//! The hard part of a ledger client is not HTTP. It is producing the exact
//! bytes the node will hash and verify, for every transaction type, and
//! deriving the exact address the node expects from a key. Get either one
//! wrong and nothing fails loudly. The node just says "invalid signature"
//! and you get to play spot-the-difference with a hex dump.
//!
//! ## Architecture
//!
//! - **crypto**: Curve25519 keys, XEdDSA-style signatures, and the hash
//!   zoo (Blake2b, Keccak, SHA-256).
//! - **identity**: Accounts from seeds or keys, addresses and their
//!   validation.
//! - **transaction**: The transaction variants, their canonical byte
//!   schemas, the builder, the signer and the decoder.
//! - **chain**: A transport trait and a node client over it.
//! - **config**: Protocol constants and network tags.
//! - **error**: One error enum per concern.
//!
//! ## Design Philosophy
//!
//! 1. Bit-exact or bust. Every schema is a static table you can read top
//!    to bottom and compare against the node.
//! 2. No ambient state. Accounts, records and clients are plain values.
//! 3. Private keys never hit a log line or a `Debug` string.
//! 4. If it touches money, it has tests. Plural.
//!
//! ## Quick start
//!
//! ```rust
//! use vsys_sdk::config::{NetworkType, V_UNITY};
//! use vsys_sdk::identity::Account;
//! use vsys_sdk::transaction::{sign_transaction, TransactionBuilder};
//!
//! let account = Account::from_seed(NetworkType::Testnet, "my seed phrase", Some(0));
//! let lease = TransactionBuilder::lease("AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F", V_UNITY).build();
//!
//! let signed = sign_transaction(&account, &lease).unwrap();
//! let body = signed.to_api_request_json();
//! assert_eq!(body["amount"], V_UNITY);
//! ```

pub mod chain;
pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod transaction;

pub use error::{Error, Result};
