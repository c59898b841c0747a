/// Fuzzes the search by checking on many random grids that a path is found exactly when the goal
/// lies on the same connected component as the start, and that found paths are valid and optimal.
use grid_astar::{distance, AstarSearch, CellBoard, CellId, Grid, GridConfig, Point, SearchState};
use rand::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

fn random_grid(n: usize, rng: &mut StdRng) -> Grid {
    GridConfig::new(n, n).build(rng).unwrap()
}

fn visualize_grid(grid: &Grid, board: &CellBoard) {
    println!("{}", grid);
    println!("{}", board.render(grid));
}

#[derive(PartialEq)]
struct Entry(f64, CellId);

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.total_cmp(&self.0)
    }
}

/// Uniform-cost search with the same edge costs, used as reference distance.
fn dijkstra_cost(grid: &Grid, start: Point, goal: Point) -> Option<f64> {
    let start = grid.id_of(start).unwrap();
    let goal = grid.id_of(goal).unwrap();
    let mut best = vec![f64::INFINITY; grid.len()];
    let mut heap = BinaryHeap::new();
    best[start.index()] = 0.0;
    heap.push(Entry(0.0, start));
    while let Some(Entry(cost, id)) = heap.pop() {
        if id == goal {
            return Some(cost);
        }
        if cost > best[id.index()] {
            continue;
        }
        let p = grid.cell(id).point();
        for &n in grid.neighbors_of(id) {
            let cell = grid.cell(n);
            if !cell.is_passable() {
                continue;
            }
            let next = cost + distance(p, cell.point());
            if next < best[n.index()] {
                best[n.index()] = next;
                heap.push(Entry(next, n));
            }
        }
    }
    None
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng);
        let start = grid.top_left();
        let end = grid.bottom_right();
        grid.force_passable(start).unwrap();
        grid.force_passable(end).unwrap();
        let reachable = grid.reachable(start, end);
        let blocked = grid
            .cells()
            .filter(|c| !c.is_passable())
            .map(|c| c.point())
            .collect::<Vec<_>>();

        let mut search =
            AstarSearch::with_observer(&mut grid, start, end, CellBoard::new()).unwrap();
        let outcome = search.run().unwrap();
        let path = outcome.path();
        // Show the grid if the outcome disagrees with the components
        if path.is_some() != reachable {
            visualize_grid(search.grid(), search.observer());
        }
        assert_eq!(path.is_some(), reachable);
        assert!(search.extractions() <= N * N);
        match path {
            Some(path) => {
                assert_eq!(search.state(), SearchState::Succeeded);
                assert_eq!(path.start(), start);
                assert_eq!(path.goal(), end);
                assert!(path.is_connected());
                assert!(path.points().iter().all(|p| !blocked.contains(p)));
                let reference = dijkstra_cost(search.grid(), start, end).unwrap();
                assert!((path.cost() - reference).abs() < 1e-9);
            }
            None => assert_eq!(search.state(), SearchState::Failed),
        }
    }
}

#[test]
fn fuzz_random_endpoints() {
    const N: usize = 8;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng);
        let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let mut search = AstarSearch::new(&mut grid, start, end).unwrap();
        let path = search.run().unwrap().into_path();
        let reachable = search.grid().reachable(start, end);
        assert_eq!(path.is_some(), reachable);
        if let Some(path) = path {
            assert!(path.is_connected());
            if start == end {
                assert_eq!(path.len(), 1);
                assert_eq!(path.cost(), 0.0);
            }
        }
    }
}

/// Costs never increase between steps and predecessor chains always lead back to the start.
#[test]
fn costs_are_monotone_and_chains_acyclic() {
    const N: usize = 12;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..50 {
        let mut grid = random_grid(N, &mut rng);
        let (start, end) = (grid.top_left(), grid.bottom_right());
        let mut search = AstarSearch::new(&mut grid, start, end).unwrap();
        let start_id = search.grid().id_of(start).unwrap();
        let mut previous = search
            .grid()
            .cells()
            .map(|c| c.cost_so_far())
            .collect::<Vec<_>>();
        while !search.step().is_terminal() {
            let grid = search.grid();
            for (cell, &before) in grid.cells().zip(previous.iter()) {
                assert!(cell.cost_so_far() <= before);
                assert!(cell.estimated_total() >= cell.cost_so_far());
            }
            for cell in grid.cells().filter(|c| c.is_discovered()) {
                let mut id = grid.id_of(cell.point()).unwrap();
                let mut hops = 0;
                while let Some(p) = grid.cell(id).predecessor() {
                    id = p;
                    hops += 1;
                    assert!(hops < grid.len());
                }
                assert_eq!(id, start_id);
            }
            previous = grid.cells().map(|c| c.cost_so_far()).collect();
        }
        assert!(search.extractions() <= N * N);
    }
}
