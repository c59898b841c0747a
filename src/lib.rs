//! # grid_astar
//!
//! Step-wise [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search on an
//! 8-connected grid. The search advances one frontier extraction at a time and
//! reports every change of a cell's visual state (entering the frontier,
//! leaving it, lying on the final path) to a [SearchObserver], so that a
//! renderer can animate it without the engine knowing about any surface.
//!
//! Moving between two cells costs `sqrt(|dx| + |dy|)` (see [distance]); the same
//! function serves as heuristic. It is the square root of the Manhattan
//! distance, not the Euclidean distance.
//!
//! ```
//! use grid_astar::{find_path, Grid};
//!
//! let mut grid = Grid::from_rows(&["...", ".#.", "..."]).unwrap();
//! let (start, goal) = (grid.top_left(), grid.bottom_right());
//! let path = find_path(&mut grid, start, goal).unwrap().unwrap();
//! assert_eq!(path.len(), 4);
//! ```
pub mod cell;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod observer;
pub mod path;
pub mod search;

pub use grid_util::point::Point;
use rand::Rng;

pub use crate::cell::{Cell, CellId};
pub use crate::error::GridError;
pub use crate::frontier::Frontier;
pub use crate::grid::Grid;
pub use crate::observer::{
    CellBoard, CellMark, EventLog, NoopObserver, SearchEvent, SearchObserver,
};
pub use crate::path::Path;
pub use crate::search::{AstarSearch, CancelToken, SearchOutcome, SearchState};

pub const N_SMALLVEC_SIZE: usize = 8;
pub const DEFAULT_OBSTACLE_PROBABILITY: f64 = 0.4;
const DEFAULT_SIZE: usize = 25;

/// Cost of moving between two cells, also used as heuristic towards the goal.
pub fn distance(a: Point, b: Point) -> f64 {
    (((a.x - b.x).abs() + (a.y - b.y).abs()) as f64).sqrt()
}

/// Runs a search to completion without an observer. Returns [None] if the goal
/// cannot be reached.
pub fn find_path(grid: &mut Grid, start: Point, goal: Point) -> Result<Option<Path>, GridError> {
    let mut search = AstarSearch::new(grid, start, goal)?;
    Ok(search.run()?.into_path())
}

/// Dimensions and obstacle density of a randomly generated grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub obstacle_probability: f64,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            rows: DEFAULT_SIZE,
            cols: DEFAULT_SIZE,
            obstacle_probability: DEFAULT_OBSTACLE_PROBABILITY,
        }
    }
}

impl GridConfig {
    pub fn new(rows: usize, cols: usize) -> GridConfig {
        GridConfig {
            rows,
            cols,
            ..GridConfig::default()
        }
    }

    pub fn with_obstacle_probability(mut self, obstacle_probability: f64) -> GridConfig {
        self.obstacle_probability = obstacle_probability;
        self
    }

    pub fn build<R>(&self, rng: &mut R) -> Result<Grid, GridError>
    where
        R: Rng,
    {
        Grid::random(self.rows, self.cols, self.obstacle_probability, rng)
    }
}
