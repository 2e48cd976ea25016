// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # vsys
//!
//! Entry point for the `vsys` binary. Parses CLI arguments, initializes
//! logging, and runs one command against the SDK.
//!
//! - `account`         : derive keys and address from a seed or private key
//! - `address validate`: check an address for the selected network
//! - `sign`            : sign a payment, lease or cancel offline
//! - `send`            : sign and broadcast
//! - `tx`, `balance`, `history`, `height`: node queries
//!
//! Results go to stdout as JSON; logs go to stderr.

mod cli;
mod logging;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;

use vsys_sdk::chain::Blockchain;
use vsys_sdk::config::{ClientConfig, NetworkType};
use vsys_sdk::identity::{validate_address_str, Account};
use vsys_sdk::transaction::{sign_transaction, Transaction, TransactionBuilder};

use cli::{Commands, FeeArgs, KeyArgs, TxCommand, VsysCli};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = VsysCli::parse();
    logging::init_logging(
        "vsys=info,vsys_sdk=info",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match &cli.command {
        Commands::Account(args) => {
            let account = load_account(cli.network, &args.key)?;
            let mut out = json!({
                "network": cli.network.to_string(),
                "address": account.address()?,
                "publicKey": account.public_key()?,
            });
            if args.show_private {
                out["privateKey"] = json!(account.private_key()?);
            }
            print_json(&out)
        }
        Commands::Address(cli::AddressCommand::Validate { address }) => {
            let valid = validate_address_str(cli.network, address);
            print_json(&json!({
                "address": address,
                "network": cli.network.to_string(),
                "valid": valid,
            }))?;
            if !valid {
                bail!("address {} is not valid on {}", address, cli.network);
            }
            Ok(())
        }
        Commands::Sign(args) => {
            let account = load_account(cli.network, &args.key)?;
            let tx = build_transaction(&args.tx);
            let signed = sign_transaction(&account, &tx).context("failed to sign transaction")?;
            let public_key = account.public_key_value()?;

            tracing::info!(tx_type = tx.type_tag(), "transaction signed");
            print_json(&json!({
                "id": tx.id()?,
                "signature": signed.signature,
                "request": signed.to_api_request_json(),
                "coldSign": tx.to_cold_sign_json(&public_key, cli.network),
            }))
        }
        Commands::Send(args) => {
            let account = load_account(cli.network, &args.key)?;
            let tx = build_transaction(&args.tx);
            let chain = connect(&cli)?;

            tracing::info!(node = chain.node_url(), tx_type = tx.type_tag(), "broadcasting");
            let accepted = account
                .send_transaction(&chain, &tx)
                .await
                .context("broadcast failed")?;
            print_json(&accepted)
        }
        Commands::Tx(args) => {
            let chain = connect(&cli)?;
            let tx = if args.unconfirmed {
                chain.get_unconfirmed_transaction_by_id(&args.id).await
            } else {
                chain.get_transaction_by_id(&args.id).await
            }
            .with_context(|| format!("failed to fetch transaction {}", args.id))?;
            print_json(&tx)
        }
        Commands::Balance(args) => {
            let chain = connect(&cli)?;
            if args.detail {
                let detail = chain
                    .get_balance_detail(&args.address)
                    .await
                    .with_context(|| format!("failed to fetch balance of {}", args.address))?;
                print_json(&detail)
            } else {
                let balance = chain
                    .get_balance(&args.address)
                    .await
                    .with_context(|| format!("failed to fetch balance of {}", args.address))?;
                print_json(&json!({ "address": args.address, "balance": balance }))
            }
        }
        Commands::History(args) => {
            let chain = connect(&cli)?;
            let history = chain
                .get_transaction_history(&args.address, args.limit)
                .await
                .with_context(|| format!("failed to fetch history of {}", args.address))?;
            print_json(&history)
        }
        Commands::Height => {
            let chain = connect(&cli)?;
            let height = chain.get_height().await.context("failed to fetch height")?;
            print_json(&json!({ "height": height }))
        }
    }
}

/// Seed wins over private key; clap already rejects both at once.
fn load_account(network: NetworkType, key: &KeyArgs) -> Result<Account> {
    match (&key.seed, &key.private_key) {
        (Some(seed), _) => Ok(Account::from_seed(network, seed, key.nonce)),
        (None, Some(private_key)) => {
            Account::from_private_key(network, private_key).context("invalid private key")
        }
        (None, None) => bail!("either --seed or --private-key is required"),
    }
}

fn build_transaction(cmd: &TxCommand) -> Transaction {
    let (builder, fee) = match cmd {
        TxCommand::Payment(args) => {
            let mut builder = TransactionBuilder::payment(&args.recipient, args.amount);
            if let Some(attachment) = &args.attachment {
                builder = builder.attachment(attachment);
            }
            (builder, &args.fee)
        }
        TxCommand::Lease(args) => (
            TransactionBuilder::lease(&args.recipient, args.amount),
            &args.fee,
        ),
        TxCommand::Cancel(args) => (TransactionBuilder::cancel_lease(&args.lease_id), &args.fee),
    };
    apply_fee(builder, fee).build()
}

fn apply_fee(builder: TransactionBuilder, fee: &FeeArgs) -> TransactionBuilder {
    let builder = builder.fee(fee.fee).fee_scale(fee.fee_scale);
    match fee.timestamp {
        Some(timestamp) => builder.timestamp(timestamp),
        None => builder,
    }
}

fn connect(cli: &VsysCli) -> Result<Blockchain> {
    let mut config = ClientConfig::new(cli.network, &cli.node_url);
    config.transport.timeout = Duration::from_secs(cli.timeout_secs);
    Blockchain::from_config(&config).context("failed to build HTTP client")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{}", out);
    Ok(())
}
