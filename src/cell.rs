use core::fmt;
use grid_util::point::Point;
use smallvec::SmallVec;

use crate::N_SMALLVEC_SIZE;

/// Dense index of a [Cell] inside its [Grid](crate::grid::Grid), `row * cols + col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single grid position together with the bookkeeping A* keeps for it.
///
/// The costs start out infinite and only ever decrease during one search; the
/// predecessor is only replaced together with a strict cost improvement, which
/// keeps the predecessor chain acyclic.
#[derive(Clone, Debug)]
pub struct Cell {
    row: usize,
    col: usize,
    pub(crate) passable: bool,
    pub(crate) cost_so_far: f64,
    pub(crate) estimated_total: f64,
    pub(crate) predecessor: Option<CellId>,
    pub(crate) finalized: bool,
    pub(crate) neighbors: SmallVec<[CellId; N_SMALLVEC_SIZE]>,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize, passable: bool) -> Cell {
        Cell {
            row,
            col,
            passable,
            cost_so_far: f64::INFINITY,
            estimated_total: f64::INFINITY,
            predecessor: None,
            finalized: false,
            neighbors: SmallVec::new(),
        }
    }
    pub fn row(&self) -> usize {
        self.row
    }
    pub fn col(&self) -> usize {
        self.col
    }
    /// Position of the cell, with `x` the column and `y` the row.
    pub fn point(&self) -> Point {
        Point::new(self.col as i32, self.row as i32)
    }
    pub fn is_passable(&self) -> bool {
        self.passable
    }
    /// Cost of the best known route from the start (g), infinite if undiscovered.
    pub fn cost_so_far(&self) -> f64 {
        self.cost_so_far
    }
    /// Cost so far plus heuristic estimate to the goal (f).
    pub fn estimated_total(&self) -> f64 {
        self.estimated_total
    }
    pub fn predecessor(&self) -> Option<CellId> {
        self.predecessor
    }
    /// Whether the search has extracted this cell from the frontier.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
    pub fn is_discovered(&self) -> bool {
        self.cost_so_far.is_finite()
    }
    /// Adjacent cells in row-major order of the surrounding 3x3 block.
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }

    /// Records a strictly better route through `predecessor`.
    pub(crate) fn relax(&mut self, cost_so_far: f64, estimated_total: f64, predecessor: CellId) {
        debug_assert!(cost_so_far < self.cost_so_far);
        self.cost_so_far = cost_so_far;
        self.estimated_total = estimated_total;
        self.predecessor = Some(predecessor);
    }

    pub(crate) fn reset(&mut self) {
        self.cost_so_far = f64::INFINITY;
        self.estimated_total = f64::INFINITY;
        self.predecessor = None;
        self.finalized = false;
    }
}
