use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

use crate::cell::{Cell, CellId};
use crate::error::GridError;
use crate::N_SMALLVEC_SIZE;

const MAX_DIMENSION: usize = i32::MAX as usize;

/// [Grid] owns a dense, row-major collection of [Cell]s linked to their up to 8
/// surrounding cells. In addition it maintains the connected components of
/// passable cells in a [UnionFind] structure so that reachability can be
/// answered without searching.
///
/// Points address cells with `x` as the column and `y` as the row.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    components: UnionFind<usize>,
}

impl Grid {
    /// Builds a `rows x cols` grid, asking `passable(row, col)` for every cell.
    /// Neighbour links are resolved only after all cells exist. Both dimensions
    /// must fit the `i32` coordinates of [Point].
    pub fn build<F>(rows: usize, cols: usize, mut passable: F) -> Result<Grid, GridError>
    where
        F: FnMut(usize, usize) -> bool,
    {
        if rows == 0 || cols == 0 || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let cells = iproduct!(0..rows, 0..cols)
            .map(|(row, col)| Cell::new(row, col, passable(row, col)))
            .collect::<Vec<Cell>>();
        let mut grid = Grid {
            rows,
            cols,
            cells,
            components: UnionFind::new(rows * cols),
        };
        grid.link_neighbors();
        grid.generate_components();
        debug!(
            "Built {}x{} grid with {} blocked cells",
            rows,
            cols,
            grid.cells.iter().filter(|c| !c.passable).count()
        );
        Ok(grid)
    }

    /// Marks every cell impassable with probability `obstacle_probability`.
    pub fn random<R>(
        rows: usize,
        cols: usize,
        obstacle_probability: f64,
        rng: &mut R,
    ) -> Result<Grid, GridError>
    where
        R: Rng,
    {
        if !(0.0..=1.0).contains(&obstacle_probability) {
            return Err(GridError::InvalidProbability(obstacle_probability));
        }
        Grid::build(rows, cols, |_, _| !rng.gen_bool(obstacle_probability))
    }

    /// Builds a grid from a [BoolGrid] in which [true] marks a blocked cell.
    pub fn from_mask(mask: &BoolGrid) -> Result<Grid, GridError> {
        Grid::build(mask.height(), mask.width(), |row, col| {
            !mask.get(col as i32, row as i32)
        })
    }

    /// Builds a grid from ASCII rows where `#` marks a blocked cell and any
    /// other character an open one.
    pub fn from_rows(lines: &[&str]) -> Result<Grid, GridError> {
        let rows = lines
            .iter()
            .map(|line| line.chars().map(|c| c != '#').collect::<Vec<bool>>())
            .collect::<Vec<_>>();
        let cols = rows.first().map_or(0, |r| r.len());
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(GridError::MaskSizeMismatch {
                row,
                expected: cols,
                actual: r.len(),
            });
        }
        Grid::build(rows.len(), cols, |row, col| rows[row][col])
    }

    /// Exports passability as a [BoolGrid] in which [true] marks a blocked cell.
    pub fn to_mask(&self) -> BoolGrid {
        let mut mask = BoolGrid::new(self.cols, self.rows, false);
        for cell in &self.cells {
            let p = cell.point();
            mask.set(p.x, p.y, !cell.passable);
        }
        mask
    }

    fn link_neighbors(&mut self) {
        for ix in 0..self.cells.len() {
            let neighbors = self
                .neighborhood(ix / self.cols, ix % self.cols)
                .collect::<SmallVec<[CellId; N_SMALLVEC_SIZE]>>();
            self.cells[ix].neighbors = neighbors;
        }
    }

    fn neighborhood(&self, row: usize, col: usize) -> impl Iterator<Item = CellId> + '_ {
        iproduct!(-1..=1, -1..=1)
            .filter(|&delta| delta != (0, 0))
            .filter_map(move |(d_row, d_col)| {
                self.index_of(Point::new(col as i32 + d_col, row as i32 + d_row))
            })
    }

    fn index_of(&self, point: Point) -> Option<CellId> {
        self.in_bounds(point)
            .then(|| CellId(point.y as usize * self.cols + point.x as usize))
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols
            && (point.y as usize) < self.rows
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always [false]: grids have at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The default start position.
    pub fn top_left(&self) -> Point {
        Point::new(0, 0)
    }

    /// The default goal position.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.cols as i32 - 1, self.rows as i32 - 1)
    }

    /// Resolves a point to its cell id.
    pub fn id_of(&self, point: Point) -> Result<CellId, GridError> {
        self.index_of(point).ok_or(GridError::InvalidCoordinate {
            point,
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell, GridError> {
        if row >= self.rows || col >= self.cols {
            // Saturate so that coordinates beyond i32 are not reported wrapped
            let clamp = |v: usize| i32::try_from(v).unwrap_or(i32::MAX);
            return Err(GridError::InvalidCoordinate {
                point: Point::new(clamp(col), clamp(row)),
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(&self.cells[row * self.cols + col])
    }

    /// Looks up a cell by id. Ids are only handed out by this grid, so they are
    /// always in range.
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn neighbors_of(&self, id: CellId) -> &[CellId] {
        self.cell(id).neighbors()
    }

    pub fn is_passable(&self, point: Point) -> bool {
        self.index_of(point)
            .is_some_and(|id| self.cell(id).passable)
    }

    /// Opens up a cell and joins it with the components of its passable
    /// neighbours.
    pub fn force_passable(&mut self, point: Point) -> Result<(), GridError> {
        let id = self.id_of(point)?;
        if self.cell(id).passable {
            return Ok(());
        }
        debug!("Forcing {} passable", point);
        self.cell_mut(id).passable = true;
        for ix in 0..self.cell(id).neighbors.len() {
            let n = self.cell(id).neighbors[ix];
            if self.cell(n).passable {
                self.components.union(id.0, n.0);
            }
        }
        Ok(())
    }

    /// Clears the bookkeeping of a previous search.
    pub fn reset_search_state(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours
    /// to the same components.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components");
        self.components = UnionFind::new(self.cells.len());
        for cell in self.cells.iter().filter(|c| c.passable) {
            let ix = cell.row() * self.cols + cell.col();
            for n in cell.neighbors.iter().filter(|n| self.cells[n.0].passable) {
                self.components.union(ix, n.0);
            }
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn component(&self, point: Point) -> Result<usize, GridError> {
        self.id_of(point).map(|id| self.components.find(id.0))
    }

    /// Checks if both points are passable and on the same component.
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        match (self.index_of(start), self.index_of(goal)) {
            (Some(s), Some(g)) => {
                self.cell(s).passable
                    && self.cell(g).passable
                    && self.components.equiv(s.0, g.0)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line = row
                .iter()
                .map(|c| if c.passable { '.' } else { '#' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
