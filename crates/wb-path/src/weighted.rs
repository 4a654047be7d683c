//! Cost-ordered searches: A* and Dijkstra.
//!
//! Both share one loop.  The open set is a min-heap keyed by
//! `(priority, insertion sequence)`, so equal priorities pop in FIFO order and
//! the result is reproducible.  Stale heap entries are skipped through the
//! closed set.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use wb_core::{Position, RobotId};
use wb_grid::Grid;

use crate::finder::{open_connections, precheck};
use crate::{reconstruct_path, Path, PathFinder, PathResult, Predecessors};

/// A* with the Manhattan-distance heuristic.
///
/// The heuristic is admissible and consistent for cardinal moves of weight
/// `>= 1`, so the first time `end` is popped its cost is minimal.
pub struct AStar;

/// Dijkstra: A* with a zero heuristic.
pub struct Dijkstra;

impl PathFinder for AStar {
    fn search(&self, grid: &Grid, start: Position, end: Position, mover: Option<RobotId>) -> PathResult<Path> {
        if let Some(trivial) = precheck(grid, start, end)? {
            return Ok(trivial);
        }
        Ok(weighted_search(grid, start, end, mover, |p| u64::from(p.manhattan(end))))
    }
}

impl PathFinder for Dijkstra {
    fn search(&self, grid: &Grid, start: Position, end: Position, mover: Option<RobotId>) -> PathResult<Path> {
        if let Some(trivial) = precheck(grid, start, end)? {
            return Ok(trivial);
        }
        Ok(weighted_search(grid, start, end, mover, |_| 0))
    }
}

fn weighted_search<H>(
    grid:      &Grid,
    start:     Position,
    end:       Position,
    mover:     Option<RobotId>,
    heuristic: H,
) -> Path
where
    H: Fn(Position) -> u64,
{
    // g[v] = best known cost from start to v.
    let mut g: FxHashMap<Position, u64> = FxHashMap::default();
    let mut predecessors = Predecessors::default();
    let mut closed: FxHashSet<Position> = FxHashSet::default();

    let mut seq: u64 = 0;
    let mut open: BinaryHeap<Reverse<(u64, u64, Position)>> = BinaryHeap::new();

    g.insert(start, 0);
    open.push(Reverse((heuristic(start), seq, start)));

    while let Some(Reverse((_, _, node))) = open.pop() {
        if node == end {
            return reconstruct_path(&predecessors, end);
        }
        if !closed.insert(node) {
            continue;
        }
        let g_node = g.get(&node).copied().unwrap_or(u64::MAX);

        for conn in open_connections(grid, node, mover) {
            if closed.contains(&conn.to) {
                continue;
            }
            let tentative = g_node.saturating_add(u64::from(conn.weight));
            if tentative < g.get(&conn.to).copied().unwrap_or(u64::MAX) {
                g.insert(conn.to, tentative);
                predecessors.insert(conn.to, node);
                seq += 1;
                open.push(Reverse((tentative.saturating_add(heuristic(conn.to)), seq, conn.to)));
            }
        }
    }

    Vec::new()
}
