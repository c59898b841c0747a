//! Notifications the search emits for whatever draws it.
use core::fmt;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;

use crate::grid::Grid;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// A change in the visual state of a cell, emitted synchronously by the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchEvent {
    EnteredFrontier(Point),
    LeftFrontier(Point),
    OnFinalPath(Point),
}

impl SearchEvent {
    pub fn point(&self) -> Point {
        match *self {
            SearchEvent::EnteredFrontier(p)
            | SearchEvent::LeftFrontier(p)
            | SearchEvent::OnFinalPath(p) => p,
        }
    }
}

pub trait SearchObserver {
    fn on_event(&mut self, event: SearchEvent);
}

impl<F> SearchObserver for F
where
    F: FnMut(SearchEvent),
{
    fn on_event(&mut self, event: SearchEvent) {
        self(event)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_event(&mut self, _: SearchEvent) {}
}

/// Records every event in emission order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<SearchEvent>,
}

impl EventLog {
    pub fn new() -> EventLog {
        EventLog::default()
    }

    pub fn frontier_entries(&self) -> impl Iterator<Item = Point> + '_ {
        self.events.iter().filter_map(|e| match e {
            SearchEvent::EnteredFrontier(p) => Some(*p),
            _ => None,
        })
    }

    pub fn frontier_exits(&self) -> impl Iterator<Item = Point> + '_ {
        self.events.iter().filter_map(|e| match e {
            SearchEvent::LeftFrontier(p) => Some(*p),
            _ => None,
        })
    }

    pub fn final_path(&self) -> impl Iterator<Item = Point> + '_ {
        self.events.iter().filter_map(|e| match e {
            SearchEvent::OnFinalPath(p) => Some(*p),
            _ => None,
        })
    }
}

impl SearchObserver for EventLog {
    fn on_event(&mut self, event: SearchEvent) {
        self.events.push(event);
    }
}

/// What a renderer would currently show for a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellMark {
    Frontier,
    Visited,
    Path,
}

impl CellMark {
    pub fn symbol(self) -> char {
        match self {
            CellMark::Frontier => 'o',
            CellMark::Visited => 'x',
            CellMark::Path => '*',
        }
    }
}

/// Keeps the latest [CellMark] of every cell the search touched, in the order
/// the cells were first touched. Stands in for a visual surface.
#[derive(Clone, Debug, Default)]
pub struct CellBoard {
    marks: FxIndexMap<Point, CellMark>,
}

impl CellBoard {
    pub fn new() -> CellBoard {
        CellBoard::default()
    }

    pub fn mark(&self, point: Point) -> Option<CellMark> {
        self.marks.get(&point).copied()
    }

    /// Touched cells with their marks, in first-touch order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellMark)> + '_ {
        self.marks.iter().map(|(p, m)| (*p, *m))
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn count(&self, mark: CellMark) -> usize {
        self.marks.values().filter(|&&m| m == mark).count()
    }

    /// Draws the board over the grid's obstacles.
    pub fn render<'a>(&'a self, grid: &'a Grid) -> BoardView<'a> {
        BoardView { board: self, grid }
    }
}

impl SearchObserver for CellBoard {
    fn on_event(&mut self, event: SearchEvent) {
        let mark = match event {
            SearchEvent::EnteredFrontier(_) => CellMark::Frontier,
            SearchEvent::LeftFrontier(_) => CellMark::Visited,
            SearchEvent::OnFinalPath(_) => CellMark::Path,
        };
        self.marks.insert(event.point(), mark);
    }
}

/// ASCII rendering of a [CellBoard]: `#` blocked, `.` untouched, `o` frontier,
/// `x` visited, `*` path.
pub struct BoardView<'a> {
    board: &'a CellBoard,
    grid: &'a Grid,
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.grid.rows() as i32 {
            let line = (0..self.grid.cols() as i32)
                .map(|col| {
                    let p = Point::new(col, row);
                    match self.board.mark(p) {
                        Some(mark) => mark.symbol(),
                        None if self.grid.is_passable(p) => '.',
                        None => '#',
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
