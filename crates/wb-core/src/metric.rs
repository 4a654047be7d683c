//! Distance comparators for nearest-package and nearest-goal searches.
//!
//! Historical revisions of the planner disagreed on which distance to use:
//! some compared plain Manhattan distance, others the square root of the
//! Manhattan sum.  Both are exposed here as explicit choices, together with
//! true Euclidean distance, instead of silently picking one.
//!
//! `Manhattan` and `SqrtManhattan` always produce the same ranking (the square
//! root is monotonic); `Euclidean` can rank differently.

use std::str::FromStr;

use crate::{CoreError, Position};

/// Comparator used to rank candidates by distance.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistanceMetric {
    /// `|dx| + |dy|`.
    #[default]
    Manhattan,
    /// `sqrt(|dx| + |dy|)`.
    SqrtManhattan,
    /// `sqrt(dx² + dy²)`.
    Euclidean,
}

impl DistanceMetric {
    pub fn distance(self, a: Position, b: Position) -> f64 {
        match self {
            DistanceMetric::Manhattan     => f64::from(a.manhattan(b)),
            DistanceMetric::SqrtManhattan => f64::from(a.manhattan(b)).sqrt(),
            DistanceMetric::Euclidean     => a.euclidean(b),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMetric::Manhattan     => "manhattan",
            DistanceMetric::SqrtManhattan => "sqrt_manhattan",
            DistanceMetric::Euclidean     => "euclidean",
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "manhattan"      => Ok(DistanceMetric::Manhattan),
            "sqrt_manhattan" => Ok(DistanceMetric::SqrtManhattan),
            "euclidean"      => Ok(DistanceMetric::Euclidean),
            other => Err(CoreError::Parse(format!("unknown distance metric {other:?}"))),
        }
    }
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
