use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{AstarSearch, CellBoard, Frontier, Grid, GridConfig};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn random_grids(n: usize, count: usize) -> Vec<Grid> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..count)
        .map(|_| GridConfig::new(n, n).build(&mut rng).unwrap())
        .collect()
}

fn search_bench(c: &mut Criterion) {
    for n in [16, 64, 128] {
        let mut grids = random_grids(n, 8);
        c.bench_function(format!("astar, {n}x{n} random").as_str(), |b| {
            b.iter(|| {
                for grid in grids.iter_mut() {
                    let (start, goal) = (grid.top_left(), grid.bottom_right());
                    let mut search = AstarSearch::new(grid, start, goal).unwrap();
                    black_box(search.run().unwrap());
                }
            })
        });
    }
}

fn observed_search_bench(c: &mut Criterion) {
    let mut grids = random_grids(64, 8);
    c.bench_function("astar with board, 64x64 random", |b| {
        b.iter(|| {
            for grid in grids.iter_mut() {
                let (start, goal) = (grid.top_left(), grid.bottom_right());
                let mut search =
                    AstarSearch::with_observer(grid, start, goal, CellBoard::new()).unwrap();
                black_box(search.run().unwrap());
            }
        })
    });
}

fn frontier_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let keys = (0..4096)
        .map(|_| rng.gen_range(0.0..100.0))
        .collect::<Vec<f64>>();
    let grid = Grid::build(64, 64, |_, _| true).unwrap();
    let ids = grid
        .cells()
        .map(|cell| grid.id_of(cell.point()).unwrap())
        .collect::<Vec<_>>();
    c.bench_function("frontier insert/extract 4096", |b| {
        b.iter(|| {
            let mut frontier = Frontier::with_capacity(ids.len());
            for (&id, &key) in ids.iter().zip(keys.iter()) {
                frontier.insert(id, key);
            }
            while let Some(id) = frontier.pop_min() {
                black_box(id);
            }
        })
    });
}

criterion_group!(
    benches,
    search_bench,
    observed_search_bench,
    frontier_bench
);
criterion_main!(benches);
