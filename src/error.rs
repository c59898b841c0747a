use grid_util::point::Point;
use thiserror::Error;

/// Errors reported by grid construction, lookups and the search engine.
///
/// An unreachable goal is not an error: it is the
/// [Failed](crate::search::SearchState::Failed) terminal state of a search.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GridError {
    /// A coordinate outside `[0, rows) x [0, cols)` was looked up.
    #[error("coordinate {point} lies outside the {rows}x{cols} grid")]
    InvalidCoordinate {
        point: Point,
        rows: usize,
        cols: usize,
    },
    /// A grid needs at least one row and one column, and at most `i32::MAX` of
    /// either.
    #[error("grid dimensions must be between 1 and i32::MAX, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    /// A row of an ASCII mask has a different width than the first row.
    #[error("mask row {row} has width {actual}, expected {expected}")]
    MaskSizeMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// Obstacle probabilities must lie in `[0, 1]`.
    #[error("obstacle probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    /// `extract_min` was called on an empty frontier. Callers check
    /// [is_empty](crate::frontier::Frontier::is_empty) first.
    #[error("cannot extract from an empty frontier")]
    EmptyFrontier,
    /// The search took more steps than its budget allows without terminating.
    #[error("search did not terminate within {limit} steps")]
    StepBudgetExhausted { limit: usize },
}
