//! Depth-first search: first route found, not the shortest.

use rustc_hash::FxHashSet;

use wb_core::{Position, RobotId};
use wb_grid::Grid;

use crate::finder::{open_connections, precheck};
use crate::{reconstruct_path, Path, PathFinder, PathResult, Predecessors};

/// Stack-driven exploration.  Connections are tried in insertion order.
pub struct DepthFirst;

impl PathFinder for DepthFirst {
    fn search(&self, grid: &Grid, start: Position, end: Position, mover: Option<RobotId>) -> PathResult<Path> {
        if let Some(trivial) = precheck(grid, start, end)? {
            return Ok(trivial);
        }

        let mut predecessors = Predecessors::default();
        let mut visited: FxHashSet<Position> = FxHashSet::default();
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            if node == end {
                return Ok(reconstruct_path(&predecessors, end));
            }
            if !visited.insert(node) {
                continue;
            }
            // Reverse push so the first connection is explored first.  A later
            // push overwrites the predecessor, matching LIFO pop order.
            let next: Vec<Position> = open_connections(grid, node, mover)
                .map(|c| c.to)
                .filter(|to| !visited.contains(to))
                .collect();
            for to in next.into_iter().rev() {
                predecessors.insert(to, node);
                stack.push(to);
            }
        }

        Ok(Vec::new())
    }
}
