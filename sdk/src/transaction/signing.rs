//! Transaction signing.
//!
//! Signing is separate from building because the key may not be around at
//! construction time (cold wallets, remote signers). The signed data is the
//! canonical byte encoding; the record itself is never touched. What comes
//! back is a [`SignedTransaction`]: the record, the signer's public key and
//! the detached signature, ready to project into a broadcast body.

use serde_json::Value;

use super::{BytesSerializable, Transaction};
use crate::crypto::keys::{PublicKey, Signature};
use crate::crypto::signatures::verify;
use crate::error::Result;
use crate::identity::Account;

/// A transaction plus everything a node needs to accept it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    /// Signer's public key, Base58.
    pub public_key: String,
    /// Detached signature over the canonical bytes, Base58.
    pub signature: String,
}

impl SignedTransaction {
    /// The broadcast body for this transaction.
    pub fn to_api_request_json(&self) -> Value {
        self.transaction
            .to_api_request_json(&self.public_key, &self.signature)
    }

    /// Re-checks the signature against the embedded public key. `false` for
    /// anything malformed, including keys or signatures that don't decode.
    pub fn verify(&self) -> bool {
        let Ok(public_key) = PublicKey::from_base58(&self.public_key) else {
            return false;
        };
        let Ok(signature) = Signature::from_base58(&self.signature) else {
            return false;
        };
        match self.transaction.to_bytes() {
            Ok(bytes) => verify(&public_key, &bytes, &signature),
            Err(_) => false,
        }
    }
}

/// Signs `tx` with `account`.
///
/// Fails with a key error if the account has no private key, or with a
/// serialization error if the record has no canonical bytes.
///
/// # Example
///
/// ```rust
/// use vsys_sdk::config::NetworkType;
/// use vsys_sdk::identity::Account;
/// use vsys_sdk::transaction::{sign_transaction, TransactionBuilder};
///
/// let account = Account::from_seed(NetworkType::Testnet, "0123", Some(0));
/// let tx = TransactionBuilder::lease("AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F", 100_000_000).build();
///
/// let signed = sign_transaction(&account, &tx).unwrap();
/// assert!(signed.verify());
/// ```
pub fn sign_transaction(account: &Account, tx: &Transaction) -> Result<SignedTransaction> {
    let signature = account.sign(tx)?;
    let public_key = account.public_key()?;
    Ok(SignedTransaction {
        transaction: tx.clone(),
        public_key,
        signature,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
