//! # SDK Configuration & Constants
//!
//! Every magic number the SDK depends on lives here. Most of them are not
//! ours to choose: they are baked into the V Systems node, and changing any
//! of them locally just produces addresses and signatures nobody accepts.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Address Format
// ---------------------------------------------------------------------------

/// Version byte at offset 0 of every address.
pub const ADDRESS_VERSION: u8 = 5;

/// Total address length: version + network + 20-byte key hash + 4-byte checksum.
pub const ADDRESS_LENGTH: usize = 26;

/// Length of the public key hash embedded in an address.
pub const ADDRESS_HASH_LENGTH: usize = 20;

/// Length of the trailing address checksum.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 4;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Curve25519 private scalar length in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Curve25519 (Montgomery u-coordinate) public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Detached signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Proof type reported by the node for account signatures.
pub const PROOF_TYPE_CURVE25519: &str = "Curve25519";

// ---------------------------------------------------------------------------
// Amounts & Fees
// ---------------------------------------------------------------------------

/// One VSYS expressed in the smallest unit. Eight decimals, like everyone else.
pub const V_UNITY: u64 = 100_000_000;

/// Default fee for payment, lease and cancel-lease transactions (0.1 VSYS).
pub const DEFAULT_TX_FEE: u64 = 10_000_000;

/// Fee scale the node currently accepts. Anything else is rejected.
pub const DEFAULT_FEE_SCALE: u16 = 100;

/// Upper bound the node enforces on transaction history queries.
pub const TX_MAX_LIMIT: usize = 10_000;

// ---------------------------------------------------------------------------
// Cold Signing
// ---------------------------------------------------------------------------

/// Protocol name advertised in cold-sign payloads.
pub const COLD_SIGN_PROTOCOL: &str = "v.systems";

/// Operation code for transaction cold-sign payloads.
pub const COLD_SIGN_OPC_TRANSACTION: &str = "transaction";

/// Amounts above this value cannot be represented exactly as an IEEE-754
/// double (2^53 - 1), which is what JavaScript cold wallets parse JSON
/// numbers into. Such payloads are tagged with the newer API version.
pub const COLD_SIGN_V2_AMOUNT_THRESHOLD: u64 = 9_007_199_254_740_991;

/// Cold-sign API version for ordinary payloads.
pub const COLD_SIGN_API_V1: u8 = 1;

/// Cold-sign API version for payloads with amounts above the threshold.
pub const COLD_SIGN_API_V2: u8 = 2;

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Default request timeout for the HTTP transport.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default node endpoint used by the CLI when nothing else is configured.
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:9922";

// ---------------------------------------------------------------------------
// NetworkType
// ---------------------------------------------------------------------------

/// The network an account or address belongs to.
///
/// The network byte sits at offset 1 of every address, so an address minted
/// for testnet can never validate on mainnet and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    /// Public test network (`'T'`).
    Testnet,
    /// Main network (`';'`).
    Mainnet,
    /// A private or development network identified by its raw byte.
    Custom(u8),
}

impl NetworkType {
    /// The byte embedded in every address derived for this network.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Testnet => b'T',
            Self::Mainnet => b';',
            Self::Custom(byte) => byte,
        }
    }

    /// Maps a raw network byte back to a network. Unknown bytes become
    /// [`NetworkType::Custom`] rather than an error.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'T' => Self::Testnet,
            b';' => Self::Mainnet,
            other => Self::Custom(other),
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Testnet => write!(f, "testnet"),
            Self::Mainnet => write!(f, "mainnet"),
            Self::Custom(byte) => write!(f, "custom(0x{:02X})", byte),
        }
    }
}

impl FromStr for NetworkType {
    type Err = String;

    /// Accepts `testnet`, `mainnet` (case-insensitive) or a single ASCII
    /// character used verbatim as the network byte.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "testnet" => Ok(Self::Testnet),
            "mainnet" => Ok(Self::Mainnet),
            _ if s.len() == 1 && s.is_ascii() => Ok(Self::from_byte(s.as_bytes()[0])),
            _ => Err(format!("unknown network: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Client Configuration
// ---------------------------------------------------------------------------

/// Settings for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Per-request timeout. There is no retry; a timed out request fails.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: format!("vsys-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Everything needed to talk to one node on one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub network: NetworkType,
    /// Base URL of the node API, without a trailing slash.
    pub node_url: String,
    pub transport: TransportConfig,
}

impl ClientConfig {
    /// Creates a config for `node_url`, trimming any trailing slashes so
    /// route formatting never produces `//`.
    pub fn new(network: NetworkType, node_url: &str) -> Self {
        Self {
            network,
            node_url: node_url.trim_end_matches('/').to_string(),
            transport: TransportConfig::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(NetworkType::Testnet, DEFAULT_NODE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_bytes_are_distinct() {
        assert_ne!(NetworkType::Testnet.to_byte(), NetworkType::Mainnet.to_byte());
        assert_eq!(NetworkType::Testnet.to_byte(), b'T');
    }

    #[test]
    fn network_byte_roundtrip() {
        for network in [
            NetworkType::Testnet,
            NetworkType::Mainnet,
            NetworkType::Custom(b'D'),
        ] {
            assert_eq!(NetworkType::from_byte(network.to_byte()), network);
        }
    }

    #[test]
    fn network_from_str() {
        assert_eq!("testnet".parse::<NetworkType>(), Ok(NetworkType::Testnet));
        assert_eq!("MAINNET".parse::<NetworkType>(), Ok(NetworkType::Mainnet));
        assert_eq!("T".parse::<NetworkType>(), Ok(NetworkType::Testnet));
        assert_eq!("D".parse::<NetworkType>(), Ok(NetworkType::Custom(b'D')));
        assert!("devnet-ish".parse::<NetworkType>().is_err());
    }

    #[test]
    fn address_layout_adds_up() {
        assert_eq!(
            2 + ADDRESS_HASH_LENGTH + ADDRESS_CHECKSUM_LENGTH,
            ADDRESS_LENGTH
        );
    }

    #[test]
    fn cold_sign_threshold_is_max_safe_integer() {
        assert_eq!(COLD_SIGN_V2_AMOUNT_THRESHOLD, (1u64 << 53) - 1);
    }

    #[test]
    fn client_config_trims_trailing_slash() {
        let config = ClientConfig::new(NetworkType::Mainnet, "https://node.example/api//");
        assert_eq!(config.node_url, "https://node.example/api");
        assert_eq!(config.transport.timeout, DEFAULT_REQUEST_TIMEOUT);
    }
}
