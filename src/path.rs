use grid_util::point::Point;
use itertools::Itertools;

use crate::distance;

/// A route found by the search, stored from goal back to start as it is
/// reconstructed from predecessor links. Both endpoints are included.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    points: Vec<Point>,
    cost: f64,
}

impl Path {
    pub(crate) fn new(points: Vec<Point>, cost: f64) -> Path {
        debug_assert!(!points.is_empty());
        Path { points, cost }
    }

    /// Points ordered from goal to start.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Points ordered from start to goal.
    pub fn start_to_goal(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().rev().copied()
    }

    pub fn into_start_to_goal(mut self) -> Vec<Point> {
        self.points.reverse();
        self.points
    }

    pub fn start(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn goal(&self) -> Point {
        self.points[0]
    }

    /// Number of cells on the path, endpoints included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Cost the search settled on for the goal.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Checks that consecutive points are distinct 8-neighbours.
    pub fn is_connected(&self) -> bool {
        self.points.iter().tuple_windows().all(|(a, b)| {
            let (dx, dy) = ((a.x - b.x).abs(), (a.y - b.y).abs());
            dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
        })
    }
}

/// Sums the hop distances along a sequence of points.
pub fn path_cost(points: &[Point]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| distance(*a, *b))
        .sum()
}
