//! # Accounts
//!
//! An [`Account`] holds whatever key material the caller has for one
//! network: a seed or private key gives a full signing account; a public
//! key or bare address gives a watch-only one.
//!
//! ## Seed derivation
//!
//! ```text
//! text    = decimal(nonce) ‖ seed          (nonce omitted if None)
//! scalar  = clamp(SHA256(secure_hash(UTF8(text))))
//! public  = Montgomery(scalar · B)
//! address = derive_address(public, network)
//! ```
//!
//! Wallets use nonces 0, 1, 2, ... to derive several accounts from a single
//! seed phrase.

use std::fmt;

use tracing::debug;

use crate::chain::{BalanceDetail, Blockchain};
use crate::config::NetworkType;
use crate::crypto::hash::{secure_hash, sha256};
use crate::crypto::keys::{clamp, PrivateKey, PublicKey, Signature};
use crate::crypto::signatures;
use crate::error::{AddressFormatError, KeyError, Result};
use crate::identity::address::{validate_address, Address};
use crate::transaction::{sign_transaction, BytesSerializable, Transaction};

/// A key pair (or part of one) bound to a network.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    network: NetworkType,
    private_key: Option<PrivateKey>,
    public_key: Option<PublicKey>,
    address: Option<Address>,
}

impl Account {
    /// Derives a full account from a seed phrase and optional nonce.
    ///
    /// Deterministic: the same inputs always give the same keys and
    /// address, in this SDK and in every other wallet.
    pub fn from_seed(network: NetworkType, seed: &str, nonce: Option<i32>) -> Self {
        let text = match nonce {
            Some(nonce) => format!("{}{}", nonce, seed),
            None => seed.to_string(),
        };
        let account_seed = secure_hash(text.as_bytes());
        let private_key = PrivateKey::from_bytes(clamp(sha256(&account_seed)));
        debug!(%network, nonce = ?nonce, "derived account from seed");
        Self::with_private_key(network, private_key)
    }

    /// Builds a full account from a Base58 private key.
    pub fn from_private_key(network: NetworkType, private_key: &str) -> Result<Self, KeyError> {
        let private_key = PrivateKey::from_base58(private_key)?;
        Ok(Self::with_private_key(network, private_key))
    }

    /// Builds a watch-only account from a Base58 public key.
    pub fn from_public_key(network: NetworkType, public_key: &str) -> Result<Self, KeyError> {
        let public_key = PublicKey::from_base58(public_key)?;
        Ok(Self {
            network,
            private_key: None,
            public_key: Some(public_key),
            address: Some(Address::from_public_key(&public_key, network)),
        })
    }

    /// Builds an address-only account. The address must be valid for
    /// `network`; nothing is constructed from a half-valid address.
    pub fn from_address(network: NetworkType, address: &str) -> Result<Self, AddressFormatError> {
        let address = Address::from_base58(network, address)?;
        Ok(Self {
            network,
            private_key: None,
            public_key: None,
            address: Some(address),
        })
    }

    fn with_private_key(network: NetworkType, private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self {
            network,
            private_key: Some(private_key),
            public_key: Some(public_key),
            address: Some(Address::from_public_key(&public_key, network)),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// The private key, Base58. **Handle with care.**
    pub fn private_key(&self) -> Result<String, KeyError> {
        self.private_key
            .as_ref()
            .map(PrivateKey::to_base58)
            .ok_or(KeyError::MissingPrivateKey)
    }

    pub fn public_key(&self) -> Result<String, KeyError> {
        self.public_key
            .as_ref()
            .map(PublicKey::to_base58)
            .ok_or(KeyError::MissingPublicKey)
    }

    /// The address, Base58. Derived from the public key when the account
    /// was not given one directly.
    pub fn address(&self) -> Result<String, KeyError> {
        self.address_value().map(|address| address.to_base58())
    }

    /// The typed public key, for cold-sign payloads and verification.
    pub fn public_key_value(&self) -> Result<PublicKey, KeyError> {
        self.public_key.ok_or(KeyError::MissingPublicKey)
    }

    pub fn address_value(&self) -> Result<Address, KeyError> {
        match (self.address, self.public_key) {
            (Some(address), _) => Ok(address),
            (None, Some(public_key)) => Ok(Address::from_public_key(&public_key, self.network)),
            (None, None) => Err(KeyError::MissingKeyMaterial),
        }
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Re-validates the stored address against the account's network.
    pub fn check_address(&self) -> bool {
        self.address_value()
            .map(|address| validate_address(self.network, address.as_bytes()))
            .unwrap_or(false)
    }

    // -----------------------------------------------------------------------
    // Signing
    // -----------------------------------------------------------------------

    /// Signs the canonical bytes of `record`, returning Base58.
    pub fn sign(&self, record: &impl BytesSerializable) -> Result<String> {
        // Check for the key first: a watch-only account should get a key
        // error even for a record that would not encode.
        let private_key = self.signing_key()?;
        let bytes = record.to_bytes()?;
        Ok(signatures::sign(private_key, &bytes).to_base58())
    }

    /// Signs arbitrary bytes, returning Base58.
    pub fn sign_bytes(&self, bytes: &[u8]) -> Result<String, KeyError> {
        let private_key = self.signing_key()?;
        Ok(signatures::sign(private_key, bytes).to_base58())
    }

    /// Checks a Base58 signature over `bytes` against this account's
    /// public key. Undecodable signatures are simply invalid.
    pub fn verify(&self, bytes: &[u8], signature: &str) -> Result<bool, KeyError> {
        let public_key = self.public_key_value()?;
        Ok(Signature::from_base58(signature)
            .map(|signature| signatures::verify(&public_key, bytes, &signature))
            .unwrap_or(false))
    }

    fn signing_key(&self) -> Result<&PrivateKey, KeyError> {
        self.private_key.as_ref().ok_or(KeyError::MissingPrivateKey)
    }

    // -----------------------------------------------------------------------
    // Node helpers
    // -----------------------------------------------------------------------

    /// Signs `tx` and broadcasts it, returning the node's view of the
    /// accepted transaction.
    pub async fn send_transaction(&self, chain: &Blockchain, tx: &Transaction) -> Result<Transaction> {
        let signed = sign_transaction(self, tx)?;
        Ok(chain.send_transaction(&signed).await?)
    }

    pub async fn get_balance(&self, chain: &Blockchain) -> Result<u64> {
        let address = self.address()?;
        Ok(chain.get_balance(&address).await?)
    }

    pub async fn get_balance_detail(&self, chain: &Blockchain) -> Result<BalanceDetail> {
        let address = self.address()?;
        Ok(chain.get_balance_detail(&address).await?)
    }

    pub async fn get_transaction_history(
        &self,
        chain: &Blockchain,
        num: i64,
    ) -> Result<Vec<Transaction>> {
        let address = self.address()?;
        Ok(chain.get_transaction_history(&address, num).await?)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("network", &self.network)
            .field("has_private_key", &self.private_key.is_some())
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::transaction::TransactionBuilder;

    #[test]
    fn seed_with_nonce_matches_known_vector() {
        let account = Account::from_seed(NetworkType::Testnet, "0123", Some(0));
        assert_eq!(
            account.private_key().unwrap(),
            "ZRJZmYGYe9WJJigf8VpxhhzZojuf7vJsjH36wKRAuJn"
        );
        assert_eq!(
            account.public_key().unwrap(),
            "F2xmVravRaQA55qPn6wFyorssWm7oJX4o4WNPVxgfoYN"
        );
        assert_eq!(
            account.address().unwrap(),
            "AU1VQobehRiBwqrLgvbXwKP1uMZfVJSreyJ"
        );
    }

    #[test]
    fn seed_without_nonce_matches_known_vector() {
        let account = Account::from_seed(NetworkType::Testnet, "0123", None);
        assert_eq!(
            account.private_key().unwrap(),
            "G63WUeTgksaQ9DKiFpGHZF58AjS3wV2U8GdJGSo43ecz"
        );
        assert_eq!(
            account.public_key().unwrap(),
            "48uBzGXmwRfT4HbwMJJZfHApbybUhKWy22rJZhX6NnWi"
        );
        assert_eq!(
            account.address().unwrap(),
            "AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = Account::from_seed(NetworkType::Testnet, "correct horse", Some(3));
        let b = Account::from_seed(NetworkType::Testnet, "correct horse", Some(3));
        assert_eq!(a, b);

        let c = Account::from_seed(NetworkType::Testnet, "correct horse", Some(4));
        assert_ne!(a.address().unwrap(), c.address().unwrap());
    }

    #[test]
    fn network_changes_address_not_keys() {
        let test = Account::from_seed(NetworkType::Testnet, "0123", Some(0));
        let main = Account::from_seed(NetworkType::Mainnet, "0123", Some(0));
        assert_eq!(test.public_key().unwrap(), main.public_key().unwrap());
        assert_eq!(
            main.address().unwrap(),
            "AHx3LBtCVgCc3Q1rXK7CyCFDEcxDucwn2D4"
        );
    }

    #[test]
    fn private_key_roundtrip() {
        let seeded = Account::from_seed(NetworkType::Testnet, "0123", Some(0));
        let restored =
            Account::from_private_key(NetworkType::Testnet, &seeded.private_key().unwrap())
                .unwrap();
        assert_eq!(seeded, restored);
    }

    #[test]
    fn public_key_account_is_watch_only() {
        let account = Account::from_public_key(
            NetworkType::Testnet,
            "F2xmVravRaQA55qPn6wFyorssWm7oJX4o4WNPVxgfoYN",
        )
        .unwrap();
        assert_eq!(
            account.address().unwrap(),
            "AU1VQobehRiBwqrLgvbXwKP1uMZfVJSreyJ"
        );
        assert_eq!(account.private_key(), Err(KeyError::MissingPrivateKey));
        assert_eq!(account.sign_bytes(b"x"), Err(KeyError::MissingPrivateKey));
        assert!(!account.has_private_key());
    }

    #[test]
    fn address_account_has_no_keys() {
        let account =
            Account::from_address(NetworkType::Testnet, "AU1VQobehRiBwqrLgvbXwKP1uMZfVJSreyJ")
                .unwrap();
        assert_eq!(account.public_key(), Err(KeyError::MissingPublicKey));
        assert_eq!(account.private_key(), Err(KeyError::MissingPrivateKey));
        assert_eq!(
            account.address().unwrap(),
            "AU1VQobehRiBwqrLgvbXwKP1uMZfVJSreyJ"
        );
        assert!(account.check_address());
    }

    #[test]
    fn corrupted_address_fails_construction() {
        let mut bytes = bs58::decode("AU1VQobehRiBwqrLgvbXwKP1uMZfVJSreyJ")
            .into_vec()
            .unwrap();
        bytes[24] ^= 0x10;
        let corrupted = bs58::encode(bytes).into_string();
        assert_eq!(
            Account::from_address(NetworkType::Testnet, &corrupted),
            Err(AddressFormatError::ChecksumMismatch)
        );
    }

    #[test]
    fn bad_key_material_is_rejected() {
        assert!(matches!(
            Account::from_private_key(NetworkType::Testnet, "tooshort"),
            Err(KeyError::InvalidPrivateKey(_))
        ));
        assert!(matches!(
            Account::from_public_key(NetworkType::Testnet, "0OIl"),
            Err(KeyError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn sign_and_verify_bytes() {
        let account = Account::from_seed(NetworkType::Testnet, "0123", Some(0));
        let signature = account.sign_bytes(b"hello").unwrap();
        assert!(account.verify(b"hello", &signature).unwrap());
        assert!(!account.verify(b"hullo", &signature).unwrap());
        assert!(!account.verify(b"hello", "garbage!").unwrap());
    }

    #[test]
    fn watch_only_sign_reports_key_error_first() {
        let account =
            Account::from_address(NetworkType::Testnet, "AU1VQobehRiBwqrLgvbXwKP1uMZfVJSreyJ")
                .unwrap();
        let tx = TransactionBuilder::lease("not base58!", 1).build();
        assert!(matches!(
            account.sign(&tx),
            Err(Error::Key(KeyError::MissingPrivateKey))
        ));
    }

    #[test]
    fn debug_does_not_leak_private_key() {
        let account = Account::from_seed(NetworkType::Testnet, "0123", Some(0));
        let debug_str = format!("{:?}", account);
        assert!(!debug_str.contains("ZRJZmYGYe9WJJigf8VpxhhzZojuf7vJsjH36wKRAuJn"));
        assert!(debug_str.contains("has_private_key: true"));
    }

    #[test]
    fn empty_account_reports_missing_key_material() {
        let account = Account {
            network: NetworkType::Testnet,
            private_key: None,
            public_key: None,
            address: None,
        };
        assert_eq!(account.address(), Err(KeyError::MissingKeyMaterial));
        assert_eq!(account.public_key(), Err(KeyError::MissingPublicKey));
        assert!(!account.check_address());
    }
}
