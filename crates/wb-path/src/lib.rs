//! `wb-path`: single-source search over the cell graph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`finder`]   | `PathFinder` trait, `find_path`, `reconstruct_path`         |
//! | [`weighted`] | `AStar`, `Dijkstra`                                         |
//! | [`bfs`]      | `BreadthFirst`                                              |
//! | [`dfs`]      | `DepthFirst`                                                |
//! | [`greedy`]   | `GreedyBestFirst`                                           |
//! | [`route`]    | `Path` helpers: cost, connectivity, segment joining         |
//! | [`error`]    | `PathError`, `PathResult<T>`                                |
//!
//! # Contract shared by every algorithm
//!
//! - The result runs from `start` to `end` inclusive.
//! - `start == end` yields `[start]`.
//! - An unreachable `end` yields an empty path, not an error.
//! - A start or end outside the grid is [`PathError::OutOfBounds`].
//! - Neighbours come from the cell's outgoing connections; a neighbour holding
//!   a robot is skipped.  Occupancy is read once per expansion and never
//!   re-validated.

pub mod bfs;
pub mod dfs;
pub mod error;
pub mod finder;
pub mod greedy;
pub mod route;
pub mod weighted;


pub use bfs::BreadthFirst;
pub use dfs::DepthFirst;
pub use error::{PathError, PathResult};
pub use finder::{find_path, finder_for, reconstruct_path, PathFinder, Predecessors};
pub use greedy::GreedyBestFirst;
pub use route::{append_segment, is_connected_route, path_cost, Path};
pub use weighted::{AStar, Dijkstra};
