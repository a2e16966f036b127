//! Benchmarks for the parallel turn engine.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};

use parallel_life::{
    Distributor, Grid, RunParams,
    compute::{ALIVE, DEAD},
};

/// Random soup with roughly 30% live cells.
fn soup(width: usize, height: usize) -> Grid {
    let mut rng = StdRng::seed_from_u64(42);
    let cells = (0..width * height)
        .map(|_| if rng.gen_bool(0.3) { ALIVE } else { DEAD })
        .collect();
    Grid::from_cells(width, height, cells).expect("cell count matches dimensions")
}

fn params(size: usize, threads: usize) -> RunParams {
    RunParams {
        image_width: size,
        image_height: size,
        turns: 1,
        threads,
    }
}

fn bench_next_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_generation");

    for size in [64, 128, 256, 512] {
        let distributor = Distributor::new(params(size, 1)).expect("valid params");
        let mut world = soup(size, size);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    world = distributor.next_generation(black_box(&world), |_| {});
                });
            },
        );
    }

    group.finish();
}

fn bench_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("threads");

    for threads in [1, 2, 4, 8, 16] {
        let distributor = Distributor::new(params(512, threads)).expect("valid params");
        let mut world = soup(512, 512);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_threads", threads)),
            &threads,
            |b, _| {
                b.iter(|| {
                    world = distributor.next_generation(black_box(&world), |_| {});
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_next_generation, bench_threads);
criterion_main!(benches);
