//! Pathfinding algorithm selector shared by `wb-path` and `wb-sim`.

use std::str::FromStr;

use crate::CoreError;

/// The search algorithm used to plan robot routes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    /// Weighted search guided by the Manhattan heuristic.
    #[default]
    AStar,
    /// Weighted search without a heuristic.
    Dijkstra,
    /// Fewest hops; ignores weights.
    BreadthFirst,
    /// First route found by stack exploration.
    DepthFirst,
    /// Heuristic-only best-first search.
    GreedyBestFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::GreedyBestFirst,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::AStar           => "a_star",
            Algorithm::Dijkstra        => "dijkstra",
            Algorithm::BreadthFirst    => "breadth_first",
            Algorithm::DepthFirst      => "depth_first",
            Algorithm::GreedyBestFirst => "greedy_best_first",
        }
    }
}

impl FromStr for Algorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "a_star" | "astar"  => Ok(Algorithm::AStar),
            "dijkstra"          => Ok(Algorithm::Dijkstra),
            "breadth_first"     => Ok(Algorithm::BreadthFirst),
            "depth_first"       => Ok(Algorithm::DepthFirst),
            "greedy_best_first" => Ok(Algorithm::GreedyBestFirst),
            other => Err(CoreError::Parse(format!("unknown algorithm {other:?}"))),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
