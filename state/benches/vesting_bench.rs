use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use nis_state::WeightedBalances;
use nis_types::{Amount, BlockHeight};

fn make_ledger(days: u64) -> WeightedBalances {
    let mut wb = WeightedBalances::default();
    wb.add_receive(BlockHeight::ONE, Amount::from_nem(1_000_000)).unwrap();
    for day in 1..=days {
        wb.add_send(BlockHeight::new(day * 1440 + 1), Amount::from_nem(1)).unwrap();
    }
    wb
}

fn bench_get_unvested(c: &mut Criterion) {
    let mut group = c.benchmark_group("vesting_get_unvested");

    for days in [1u64, 10, 100, 365] {
        let wb = make_ledger(days);
        let height = BlockHeight::new(days * 1440 + 720);

        group.bench_with_input(BenchmarkId::new("entries", wb.size()), &days, |b, _| {
            b.iter(|| black_box(wb.get_unvested(black_box(height))));
        });
    }

    group.finish();
}

fn bench_receive_after_idle(c: &mut Criterion) {
    let mut group = c.benchmark_group("vesting_receive_after_idle");

    for idle_days in [1u64, 30, 365] {
        group.bench_with_input(BenchmarkId::new("days", idle_days), &idle_days, |b, &idle| {
            b.iter(|| {
                let mut wb = make_ledger(0);
                wb.add_receive(BlockHeight::new(idle * 1440 + 1), Amount::from_nem(1)).unwrap();
                black_box(wb)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_get_unvested, bench_receive_after_idle);
criterion_main!(benches);
