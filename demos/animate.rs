use grid_astar::{AstarSearch, CellBoard, GridConfig, SearchState};
use rand::{rngs::StdRng, SeedableRng};
use std::env;
use std::thread;
use std::time::Duration;

// Animates a search on a random grid in the terminal. Legend:
// - # marks an obstacle
// - o marks a frontier cell
// - x marks a visited cell
// - * marks the final path
//
// Usage: cargo run --example animate [seed] [size]
fn main() {
    let mut args = env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    let size = args.next().and_then(|s| s.parse().ok()).unwrap_or(20);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = match GridConfig::new(size, size).build(&mut rng) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    let (start, goal) = (grid.top_left(), grid.bottom_right());
    let mut search = match AstarSearch::with_observer(&mut grid, start, goal, CellBoard::new()) {
        Ok(search) => search,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    loop {
        let state = search.step();
        // Clear the screen and move the cursor home
        print!("\x1B[2J\x1B[H");
        println!("{}", search.observer().render(search.grid()));
        println!("step {} ({:?})", search.steps(), state);
        if state.is_terminal() {
            break;
        }
        thread::sleep(Duration::from_millis(30));
    }

    match search.state() {
        SearchState::Succeeded => {
            if let Some(path) = search.path() {
                println!("Path of {} cells, cost {:.3}:", path.len(), path.cost());
                for p in path.start_to_goal() {
                    println!("{:?}", p);
                }
            }
        }
        _ => println!("No path from {} to {}", start, goal),
    }
}
