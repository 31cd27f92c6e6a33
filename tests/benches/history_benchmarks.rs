//! # Cell History Benchmarks
//!
//! | Area | Operation | Scales with |
//! |------|-----------|-------------|
//! | Pagination | slice candidate list | page size |
//! | Balance | net value of one transaction | cell count |
//! | Engine | one history page end to end | matching transactions (candidate list) |

use std::collections::BTreeSet;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use history_tests::fixtures::{self, OWNER_LOCK};
use shared_types::OutPoint;
use tx_history::{
    paginate, transaction_value, DaoIndex, OutputRecord, OwnershipCriteria, PageRequest,
    TransactionHistoryApi,
};

fn bench_pagination(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");

    let candidates: Vec<_> = (0..100_000).map(fixtures::tx_hash).collect();
    for page_size in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(page_size as u64));
        group.bench_with_input(
            BenchmarkId::new("last_page", page_size),
            &page_size,
            |b, &page_size| {
                let page = PageRequest::new(candidates.len() / page_size, page_size);
                b.iter(|| black_box(paginate(&candidates, &page)))
            },
        );
    }

    group.finish();
}

fn bench_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance");
    let owned = BTreeSet::from([OWNER_LOCK]);

    for cells in [2usize, 64, 1024] {
        let mut record = fixtures::transaction(1);
        let template = record.outputs[0].clone();
        record.outputs = (0..cells)
            .map(|i| OutputRecord {
                out_point: OutPoint::new(record.hash, i as u32),
                lock_hash: if i % 2 == 0 { OWNER_LOCK } else { [0; 32] },
                ..template.clone()
            })
            .collect();

        group.throughput(Throughput::Elements(cells as u64));
        group.bench_with_input(BenchmarkId::new("transaction_value", cells), &record, |b, r| {
            b.iter(|| black_box(transaction_value(&r.inputs, &r.outputs, &owned)))
        });
    }

    let deposits: Vec<_> = (0..10_000u32)
        .step_by(4)
        .flat_map(|n| fixtures::transaction(n).outputs)
        .collect();
    group.bench_function("dao_index_build_10k", |b| {
        b.iter(|| black_box(DaoIndex::from_outputs(&deposits)))
    });

    group.finish();
}

fn bench_engine_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.measurement_time(Duration::from_secs(10));

    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let criteria = OwnershipCriteria::LockHashes(vec![OWNER_LOCK]);

    for ledger_size in [100u32, 1_000, 10_000] {
        let (service, _) = fixtures::service(ledger_size);
        group.bench_with_input(
            BenchmarkId::new("first_page_of_20", ledger_size),
            &ledger_size,
            |b, _| {
                b.to_async(&runtime).iter(|| async {
                    black_box(
                        service
                            .get_transactions(&criteria, PageRequest::new(1, 20), "")
                            .await
                            .expect("page"),
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pagination, bench_balance, bench_engine_page);
criterion_main!(benches);
