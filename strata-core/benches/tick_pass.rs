#![allow(missing_docs)]
//! Benchmarks for simulation passes.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use strata_core::test_support::TestWorld;
use strata_registry::{BlockInstance, FluidInstance};
use strata_utils::BlockPos;

/// A stone floor with a square lake of full water cells on top, all awake.
fn lake(size: i32) -> TestWorld {
    let mut test = TestWorld::new();
    let stone = BlockInstance::new(test.stone);
    for x in -1..=size {
        for z in -1..=size {
            test.put_block(BlockPos::new(x, 0, z), stone);
        }
    }
    for x in 0..size {
        for z in 0..size {
            let pos = BlockPos::new(x, 1, z);
            test.put_fluid(pos, FluidInstance::new(test.water, 7));
            test.world.tick_soon(test.water, pos, true);
        }
    }
    test
}

fn bench_lake_spreading(c: &mut Criterion) {
    let mut group = c.benchmark_group("lake_spreading");

    for size in [4, 8, 16] {
        group.bench_with_input(BenchmarkId::new("passes_10", size), &size, |b, &size| {
            b.iter_batched(
                || lake(size),
                |mut test| {
                    for _ in 0..10 {
                        black_box(test.world.tick());
                    }
                    test
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_idle_pass(c: &mut Criterion) {
    let mut test = TestWorld::new();
    c.bench_function("idle_pass", |b| {
        b.iter(|| black_box(test.world.tick()));
    });
}

criterion_group!(benches, bench_lake_spreading, bench_idle_pass);
criterion_main!(benches);
