//! # Asset Registry Benchmarks
//!
//! Issue and transfer throughput against the in-memory ledger.
//!
//! | Group | Measures |
//! |-------|----------|
//! | issue | `IssueAsset` + commit |
//! | transfer | `TransferAsset` + commit, one hop |
//! | read | `ReadAsset` on a populated partition |
//! | marker | Ownership marker key derivation |

use asset_registry::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use registry_tests::fixtures::{issue_invocation, issue_widget, transfer_invocation, widget_json};
use std::time::Duration;

fn bench_issue(c: &mut Criterion) {
    let mut group = c.benchmark_group("issue");
    group.measurement_time(Duration::from_secs(5));

    let ledger = InMemoryLedger::new();
    let service = create_test_service("Org1MSP");
    let payload = widget_json("Org1MSP");

    group.throughput(Throughput::Elements(1));
    group.bench_function("issue_and_commit", |b| {
        b.iter(|| {
            let tx = ledger.begin(issue_invocation("Org1MSP", "Org1MSP", &payload));
            let bytes = service.issue_asset(&tx).unwrap_or_default();
            black_box(tx.commit().is_ok());
            black_box(bytes)
        })
    });

    group.finish();
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");
    group.measurement_time(Duration::from_secs(5));

    let seller = create_test_service("Org1MSP");

    for batch in [1usize, 10, 100] {
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::new("transfer_batch", batch), &batch, |b, &n| {
            b.iter_batched(
                || {
                    let ledger = InMemoryLedger::new();
                    let assets: Vec<Asset> = (0..n)
                        .filter_map(|_| issue_widget(&ledger, "Org1MSP").ok())
                        .collect();
                    (ledger, assets)
                },
                |(ledger, assets)| {
                    let mut committed = 0u32;
                    for asset in &assets {
                        let tx = ledger.begin(transfer_invocation(
                            "Org1MSP", "Org1MSP", asset, "Org2MSP",
                        ));
                        if seller.transfer_asset(&tx).is_ok() && tx.commit().is_ok() {
                            committed += 1;
                        }
                    }
                    black_box(committed)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");

    let ledger = InMemoryLedger::new();
    let keys: Vec<AssetKey> = (0..1_000)
        .filter_map(|_| issue_widget(&ledger, "Org1MSP").ok())
        .map(|asset| asset.asset_key)
        .collect();
    let service = create_test_service("Org1MSP");

    group.bench_function("read_populated_partition", |b| {
        let mut i = 0usize;
        b.iter(|| {
            let tx = ledger.begin(Invocation::new("Org1MSP", "Org1MSP"));
            let key = &keys[i % keys.len()];
            i += 1;
            black_box(service.read_asset(&tx, key.as_str()).ok())
        })
    });

    group.finish();
}

fn bench_marker_key(c: &mut Criterion) {
    let key = AssetKey::new("widget_9b2f6c1e-8d4a-4f7b-a3e5-0c1d2e3f4a5b_1700000000000000000");
    c.bench_function("marker/state_key", |b| {
        b.iter(|| black_box(OwnershipMarker::state_key(black_box(&key))))
    });
}

criterion_group!(
    benches,
    bench_issue,
    bench_transfer,
    bench_read,
    bench_marker_key
);
criterion_main!(benches);
