// Signing, encoding & derivation benchmarks for the V Systems SDK.
//
// Covers seed-to-account derivation, canonical encoding, single-message
// signing and verification, and full transaction signing across variants.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use vsys_sdk::config::{NetworkType, V_UNITY};
use vsys_sdk::crypto::keys::{clamp, PrivateKey};
use vsys_sdk::crypto::signatures::{sign, sign_with_random, verify};
use vsys_sdk::identity::{validate_address_str, Account};
use vsys_sdk::transaction::{sign_transaction, BytesSerializable, TransactionBuilder};

const RECIPIENT: &str = "AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F";

fn bench_account_from_seed(c: &mut Criterion) {
    c.bench_function("account/from_seed", |b| {
        b.iter(|| Account::from_seed(NetworkType::Testnet, "bench seed phrase", Some(0)));
    });
}

fn bench_validate_address(c: &mut Criterion) {
    c.bench_function("address/validate", |b| {
        b.iter(|| validate_address_str(NetworkType::Testnet, RECIPIENT));
    });
}

fn bench_encode_lease(c: &mut Criterion) {
    let tx = TransactionBuilder::lease(RECIPIENT, V_UNITY)
        .timestamp(1_700_000_000_000_000_000)
        .build();

    c.bench_function("encode/lease", |b| {
        b.iter(|| tx.to_bytes().unwrap());
    });
}

fn bench_sign_message(c: &mut Criterion) {
    let key = PrivateKey::from_bytes(clamp([42u8; 32]));
    let message = b"lease 1 VSYS to AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F";

    c.bench_function("curve25519/sign_message", |b| {
        b.iter(|| sign(&key, message));
    });
}

fn bench_verify_signature(c: &mut Criterion) {
    let key = PrivateKey::from_bytes(clamp([42u8; 32]));
    let message = b"lease 1 VSYS to AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F";
    let signature = sign_with_random(&key, message, &[7u8; 64]);
    let public_key = key.public_key();

    c.bench_function("curve25519/verify_signature", |b| {
        b.iter(|| verify(&public_key, message, &signature));
    });
}

fn bench_sign_transaction(c: &mut Criterion) {
    let account = Account::from_seed(NetworkType::Testnet, "bench seed phrase", Some(0));
    let mut group = c.benchmark_group("curve25519/sign_transaction");

    let txs = [
        (
            "payment",
            TransactionBuilder::payment(RECIPIENT, V_UNITY)
                .attachment("3yZe7d")
                .timestamp(1_700_000_000_000_000_000)
                .build(),
        ),
        (
            "lease",
            TransactionBuilder::lease(RECIPIENT, V_UNITY)
                .timestamp(1_700_000_000_000_000_000)
                .build(),
        ),
        (
            "cancel_lease",
            TransactionBuilder::cancel_lease("3yZe7d")
                .timestamp(1_700_000_000_000_000_000)
                .build(),
        ),
    ];

    for (name, tx) in &txs {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(name), tx, |b, tx| {
            b.iter(|| sign_transaction(&account, tx).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_account_from_seed,
    bench_validate_address,
    bench_encode_lease,
    bench_sign_message,
    bench_verify_signature,
    bench_sign_transaction,
);
criterion_main!(benches);
