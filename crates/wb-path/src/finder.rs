//! The `PathFinder` trait and helpers shared by every algorithm.
//!
//! # Pluggability
//!
//! `wb-sim` plans routes through [`finder_for`], which maps the configured
//! [`Algorithm`] to one of the unit-struct implementations.  Callers that need
//! a custom search can implement [`PathFinder`] directly.

use rustc_hash::FxHashMap;

use wb_core::{Algorithm, Position, RobotId};
use wb_grid::{Connection, Grid};

use crate::{AStar, BreadthFirst, DepthFirst, Dijkstra, GreedyBestFirst, Path, PathError, PathResult};

/// `node → node it was reached from`.
pub type Predecessors = FxHashMap<Position, Position>;

/// A search algorithm over a [`Grid`].
pub trait PathFinder: Send + Sync {
    /// Find a route from `start` to `end`.
    ///
    /// `mover` is the robot that will walk the route, if any: cells it
    /// currently holds are treated as free.  Every other robot blocks.
    fn search(
        &self,
        grid:  &Grid,
        start: Position,
        end:   Position,
        mover: Option<RobotId>,
    ) -> PathResult<Path>;
}

/// The built-in implementation for `algorithm`.
pub fn finder_for(algorithm: Algorithm) -> &'static dyn PathFinder {
    match algorithm {
        Algorithm::AStar           => &AStar,
        Algorithm::Dijkstra        => &Dijkstra,
        Algorithm::BreadthFirst    => &BreadthFirst,
        Algorithm::DepthFirst      => &DepthFirst,
        Algorithm::GreedyBestFirst => &GreedyBestFirst,
    }
}

/// Route from `start` to `end` with `algorithm`, every robot treated as an
/// obstacle.
pub fn find_path(algorithm: Algorithm, grid: &Grid, start: Position, end: Position) -> PathResult<Path> {
    finder_for(algorithm).search(grid, start, end, None)
}

/// Walk predecessor links from `goal` back to the search origin, then reverse.
///
/// The origin is the first node without a predecessor entry.
pub fn reconstruct_path(predecessors: &Predecessors, goal: Position) -> Path {
    let mut path = vec![goal];
    let mut cur = goal;
    // A well-formed map is acyclic; the bound only guards against misuse.
    for _ in 0..=predecessors.len() {
        match predecessors.get(&cur) {
            Some(&prev) => {
                path.push(prev);
                cur = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

// ── Internals shared by the algorithm modules ─────────────────────────────────

/// Bounds checks and the trivial `start == end` case.
///
/// Returns `Ok(Some(path))` when the search is already answered.
pub(crate) fn precheck(grid: &Grid, start: Position, end: Position) -> PathResult<Option<Path>> {
    if !grid.is_within_bounds(start) {
        return Err(PathError::OutOfBounds(start));
    }
    if !grid.is_within_bounds(end) {
        return Err(PathError::OutOfBounds(end));
    }
    if start == end {
        return Ok(Some(vec![start]));
    }
    Ok(None)
}

/// Outgoing connections of `node` whose destination is passable for `mover`.
pub(crate) fn open_connections<'g>(
    grid:  &'g Grid,
    node:  Position,
    mover: Option<RobotId>,
) -> impl Iterator<Item = &'g Connection> + 'g {
    grid.connections(node)
        .iter()
        .filter(move |c| grid.is_passable_for(c.to, mover))
}
