//! Breadth-first search: fewest hops, weights ignored.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use wb_core::{Position, RobotId};
use wb_grid::Grid;

use crate::finder::{open_connections, precheck};
use crate::{reconstruct_path, Path, PathFinder, PathResult, Predecessors};

/// Shortest route by hop count.  Matches A*/Dijkstra only on uniform weights.
pub struct BreadthFirst;

impl PathFinder for BreadthFirst {
    fn search(&self, grid: &Grid, start: Position, end: Position, mover: Option<RobotId>) -> PathResult<Path> {
        if let Some(trivial) = precheck(grid, start, end)? {
            return Ok(trivial);
        }

        let mut predecessors = Predecessors::default();
        let mut seen: FxHashSet<Position> = FxHashSet::default();
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            for conn in open_connections(grid, node, mover) {
                if !seen.insert(conn.to) {
                    continue;
                }
                predecessors.insert(conn.to, node);
                if conn.to == end {
                    return Ok(reconstruct_path(&predecessors, end));
                }
                queue.push_back(conn.to);
            }
        }

        Ok(Vec::new())
    }
}
