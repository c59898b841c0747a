//! Step-wise A* over a [Grid].
//!
//! A search advances one frontier extraction per [step](AstarSearch::step) so
//! that an observer can render the frontier between steps; [run](AstarSearch::run)
//! drives it to a terminal state in one go with identical results.
use grid_util::point::Point;
use log::{info, trace, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cell::CellId;
use crate::distance;
use crate::error::GridError;
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::observer::{NoopObserver, SearchEvent, SearchObserver};
use crate::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchState {
    NotStarted,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SearchState::Succeeded | SearchState::Failed | SearchState::Cancelled
        )
    }
}

/// How a search that ran to completion ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    Found(Path),
    NoPath,
    Cancelled,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Shared flag that stops a search at its next step.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A* from `start` to `goal` over a borrowed grid, reporting frontier changes
/// and the final path to an observer.
pub struct AstarSearch<'g, O = NoopObserver> {
    grid: &'g mut Grid,
    start: CellId,
    goal: CellId,
    frontier: Frontier,
    observer: O,
    state: SearchState,
    steps: usize,
    extractions: usize,
    step_limit: Option<usize>,
    cancel: CancelToken,
}

impl<'g> AstarSearch<'g, NoopObserver> {
    pub fn new(grid: &'g mut Grid, start: Point, goal: Point) -> Result<Self, GridError> {
        AstarSearch::with_observer(grid, start, goal, NoopObserver)
    }
}

impl<'g, O: SearchObserver> AstarSearch<'g, O> {
    /// Prepares a search: validates the endpoints, clears bookkeeping left over
    /// from an earlier search on the same grid and forces both endpoints
    /// passable.
    pub fn with_observer(
        grid: &'g mut Grid,
        start: Point,
        goal: Point,
        observer: O,
    ) -> Result<Self, GridError> {
        let start_id = grid.id_of(start)?;
        let goal_id = grid.id_of(goal)?;
        grid.reset_search_state();
        grid.force_passable(start)?;
        grid.force_passable(goal)?;
        let capacity = grid.len();
        Ok(AstarSearch {
            grid,
            start: start_id,
            goal: goal_id,
            frontier: Frontier::with_capacity(capacity),
            observer,
            state: SearchState::NotStarted,
            steps: 0,
            extractions: 0,
            step_limit: None,
            cancel: CancelToken::new(),
        })
    }

    /// Caps the number of steps [run](Self::run) may take.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Uses an externally created token for cancellation.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn start(&self) -> Point {
        self.grid.cell(self.start).point()
    }

    pub fn goal(&self) -> Point {
        self.grid.cell(self.goal).point()
    }

    /// Number of [step](Self::step) calls that did work.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of cells taken out of the frontier so far.
    pub fn extractions(&self) -> usize {
        self.extractions
    }

    /// Advances the search by one step and returns the new state. The first
    /// step seeds the frontier with the start cell; every later step finalizes
    /// one cell. Terminal states are left untouched.
    pub fn step(&mut self) -> SearchState {
        if self.state.is_terminal() {
            return self.state;
        }
        self.steps += 1;
        if self.cancel.is_cancelled() {
            info!("Search from {} to {} cancelled", self.start(), self.goal());
            self.state = SearchState::Cancelled;
            return self.state;
        }
        match self.state {
            SearchState::NotStarted => self.initialize(),
            _ => self.expand_next(),
        }
        self.state
    }

    /// Steps until the search terminates.
    pub fn run(&mut self) -> Result<SearchOutcome, GridError> {
        // One seeding step plus at most one extraction per cell and a final
        // empty-frontier check.
        let budget = self.grid.len() + 2;
        let limit = self.step_limit.map_or(budget, |l| l.min(budget));
        loop {
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }
            if self.steps >= limit {
                warn!(
                    "Search from {} to {} did not terminate within {} steps",
                    self.start(),
                    self.goal(),
                    limit
                );
                return Err(GridError::StepBudgetExhausted { limit });
            }
            self.step();
        }
    }

    /// The outcome of a terminated search, [None] while it has not finished.
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.state {
            SearchState::NotStarted | SearchState::Running => None,
            SearchState::Succeeded => self.path().map(SearchOutcome::Found),
            SearchState::Failed => Some(SearchOutcome::NoPath),
            SearchState::Cancelled => Some(SearchOutcome::Cancelled),
        }
    }

    /// Walks the predecessor links back from the goal. Only available once the
    /// search succeeded; repeated calls return the same path.
    pub fn path(&self) -> Option<Path> {
        if self.state != SearchState::Succeeded {
            return None;
        }
        Some(self.reconstruct_path())
    }

    fn reconstruct_path(&self) -> Path {
        let points = std::iter::successors(Some(self.goal), |&id| {
            self.grid.cell(id).predecessor()
        })
        .take(self.grid.len())
        .map(|id| self.grid.cell(id).point())
        .collect::<Vec<Point>>();
        Path::new(points, self.grid.cell(self.goal).cost_so_far())
    }

    fn emit(&mut self, event: SearchEvent) {
        self.observer.on_event(event);
    }

    fn initialize(&mut self) {
        let (start, goal) = (self.start(), self.goal());
        info!("Searching for a path from {} to {}", start, goal);
        let estimated_total = distance(start, goal);
        let cell = self.grid.cell_mut(self.start);
        cell.cost_so_far = 0.0;
        cell.estimated_total = estimated_total;
        self.frontier.insert(self.start, estimated_total);
        self.emit(SearchEvent::EnteredFrontier(start));
        self.state = SearchState::Running;
    }

    fn expand_next(&mut self) {
        let Some(current) = self.frontier.pop_min() else {
            info!("{} is not reachable from {}", self.goal(), self.start());
            self.state = SearchState::Failed;
            return;
        };
        self.extractions += 1;
        let current_point = self.grid.cell(current).point();
        self.emit(SearchEvent::LeftFrontier(current_point));
        self.grid.cell_mut(current).finalized = true;
        trace!(
            "Finalized {} with cost {}",
            current_point,
            self.grid.cell(current).cost_so_far()
        );

        if current == self.goal {
            let path = self.reconstruct_path();
            info!(
                "Found path of {} cells with cost {} after {} extractions",
                path.len(),
                path.cost(),
                self.extractions
            );
            for &p in path.points() {
                self.emit(SearchEvent::OnFinalPath(p));
            }
            self.state = SearchState::Succeeded;
            return;
        }

        let goal_point = self.goal();
        let current_cost = self.grid.cell(current).cost_so_far();
        let neighbors = self.grid.cell(current).neighbors.clone();
        for neighbor in neighbors {
            let cell = self.grid.cell(neighbor);
            if !cell.passable || cell.finalized {
                continue;
            }
            let neighbor_point = cell.point();
            let tentative_cost = current_cost + distance(current_point, neighbor_point);
            if tentative_cost >= cell.cost_so_far {
                continue;
            }
            let estimated_total = tentative_cost + distance(neighbor_point, goal_point);
            self.grid
                .cell_mut(neighbor)
                .relax(tentative_cost, estimated_total, current);
            if self.frontier.contains(neighbor) {
                self.frontier.decrease_key(neighbor, estimated_total);
            } else {
                self.frontier.insert(neighbor, estimated_total);
                self.emit(SearchEvent::EnteredFrontier(neighbor_point));
            }
        }
    }
}
