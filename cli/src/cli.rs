//! # CLI Interface
//!
//! Argument structure for the `vsys` binary, `clap` derive. Node, network
//! and key material can come from flags or from `VSYS_*` environment
//! variables.

use clap::{Args, Parser, Subcommand};

use vsys_sdk::config::{NetworkType, DEFAULT_FEE_SCALE, DEFAULT_NODE_URL, DEFAULT_TX_FEE};

/// V Systems wallet companion.
///
/// Derives accounts, validates addresses, signs transactions offline and
/// talks to a node.
#[derive(Parser, Debug)]
#[command(
    name = "vsys",
    about = "V Systems client: accounts, signing and node queries",
    version,
    propagate_version = true
)]
pub struct VsysCli {
    /// Base URL of the node API.
    #[arg(long, global = true, env = "VSYS_NODE_URL", default_value = DEFAULT_NODE_URL)]
    pub node_url: String,

    /// Network: testnet, mainnet, or a single character used as the raw
    /// network byte.
    #[arg(long, global = true, env = "VSYS_NETWORK", default_value = "testnet")]
    pub network: NetworkType,

    /// Log format: pretty or json.
    #[arg(long, global = true, env = "VSYS_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive an account and print its keys and address.
    Account(AccountArgs),
    /// Address utilities.
    #[command(subcommand)]
    Address(AddressCommand),
    /// Sign a transaction offline and print the broadcast body and the
    /// cold-sign payload.
    Sign(SignArgs),
    /// Sign a transaction and broadcast it.
    Send(SignArgs),
    /// Look up a transaction by id.
    Tx(TxArgs),
    /// Query the balance of an address.
    Balance(BalanceArgs),
    /// List recent transactions of an address.
    History(HistoryArgs),
    /// Print the node's current block height.
    Height,
}

/// Where the signing key comes from. Exactly one of `--seed` or
/// `--private-key`.
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// Seed phrase.
    #[arg(long, env = "VSYS_SEED", hide_env_values = true, conflicts_with = "private_key")]
    pub seed: Option<String>,

    /// Account nonce for seed derivation.
    #[arg(long, requires = "seed")]
    pub nonce: Option<i32>,

    /// Base58 private key.
    #[arg(long, env = "VSYS_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,
}

#[derive(Args, Debug)]
pub struct AccountArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Include the private key in the output.
    #[arg(long)]
    pub show_private: bool,
}

#[derive(Subcommand, Debug)]
pub enum AddressCommand {
    /// Check an address against the selected network. Exits non-zero when
    /// invalid.
    Validate {
        /// Base58 address.
        address: String,
    },
}

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    #[command(subcommand)]
    pub tx: TxCommand,
}

#[derive(Subcommand, Debug)]
pub enum TxCommand {
    /// Transfer tokens.
    Payment(PaymentArgs),
    /// Lease tokens to a minting node.
    Lease(LeaseArgs),
    /// Cancel an earlier lease.
    Cancel(CancelArgs),
}

/// Fee and timestamp shared by every signed transaction.
#[derive(Args, Debug, Clone)]
pub struct FeeArgs {
    /// Fee in minimal units.
    #[arg(long, default_value_t = DEFAULT_TX_FEE)]
    pub fee: u64,

    #[arg(long, default_value_t = DEFAULT_FEE_SCALE)]
    pub fee_scale: u16,

    /// Timestamp in nanoseconds. Defaults to now.
    #[arg(long)]
    pub timestamp: Option<i64>,
}

#[derive(Args, Debug)]
pub struct PaymentArgs {
    /// Recipient address.
    pub recipient: String,

    /// Amount in minimal units (1 VSYS = 100000000).
    pub amount: u64,

    /// Base58 attachment.
    #[arg(long)]
    pub attachment: Option<String>,

    #[command(flatten)]
    pub fee: FeeArgs,
}

#[derive(Args, Debug)]
pub struct LeaseArgs {
    /// Address of the minting node.
    pub recipient: String,

    /// Amount in minimal units.
    pub amount: u64,

    #[command(flatten)]
    pub fee: FeeArgs,
}

#[derive(Args, Debug)]
pub struct CancelArgs {
    /// Id of the lease transaction to cancel.
    pub lease_id: String,

    #[command(flatten)]
    pub fee: FeeArgs,
}

#[derive(Args, Debug)]
pub struct TxArgs {
    /// Transaction id.
    pub id: String,

    /// Look in the node's pool of unconfirmed transactions.
    #[arg(long)]
    pub unconfirmed: bool,
}

#[derive(Args, Debug)]
pub struct BalanceArgs {
    pub address: String,

    /// Print regular, available and effective balances.
    #[arg(long)]
    pub detail: bool,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    pub address: String,

    /// Number of transactions to fetch.
    #[arg(long, default_value_t = 20)]
    pub limit: i64,
}
