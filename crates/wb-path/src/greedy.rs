//! Greedy best-first search.
//!
//! Priority is the Manhattan distance to `end` alone; path cost is never
//! accumulated.  Each cell is enqueued at most once, so the search terminates
//! on cyclic maps and finds a route whenever one exists, though not
//! necessarily the cheapest.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;

use wb_core::{Position, RobotId};
use wb_grid::Grid;

use crate::finder::{open_connections, precheck};
use crate::{reconstruct_path, Path, PathFinder, PathResult, Predecessors};

pub struct GreedyBestFirst;

impl PathFinder for GreedyBestFirst {
    fn search(&self, grid: &Grid, start: Position, end: Position, mover: Option<RobotId>) -> PathResult<Path> {
        if let Some(trivial) = precheck(grid, start, end)? {
            return Ok(trivial);
        }

        let mut predecessors = Predecessors::default();
        let mut seen: FxHashSet<Position> = FxHashSet::default();
        let mut seq: u64 = 0;
        let mut open: BinaryHeap<Reverse<(u32, u64, Position)>> = BinaryHeap::new();

        seen.insert(start);
        open.push(Reverse((start.manhattan(end), seq, start)));

        while let Some(Reverse((_, _, node))) = open.pop() {
            if node == end {
                return Ok(reconstruct_path(&predecessors, end));
            }
            for conn in open_connections(grid, node, mover) {
                if !seen.insert(conn.to) {
                    continue;
                }
                predecessors.insert(conn.to, node);
                seq += 1;
                open.push(Reverse((conn.to.manhattan(end), seq, conn.to)));
            }
        }

        Ok(Vec::new())
    }
}
