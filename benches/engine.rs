use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};
use torlife::Grid;

fn make_grid(rows: usize, cols: usize) -> Grid {
    let mut grid = Grid::new(rows, cols);
    grid.randomize(1.0 / 6.0, &mut StdRng::seed_from_u64(0));
    grid
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    for size in [50, 128, 256] {
        let grid = make_grid(size, size);

        group.bench_with_input(BenchmarkId::new("serial", size), &grid, |b, grid| {
            b.iter_batched(
                || grid.clone(),
                |mut grid| grid.step(),
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &grid, |b, grid| {
            b.iter_batched(
                || grid.clone(),
                |mut grid| grid.step_parallel(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
