//! Top-level simulation configuration.
//!
//! Loaded from a JSON file by `wb-sim::config` or built in code.  Missing
//! fields fall back to [`SimConfig::default`].

use crate::{Algorithm, CoreError, CoreResult, DistanceMetric};

/// Robot capacity used when neither the config nor a map overrides it.
pub const DEFAULT_MAX_PACKAGES: usize = 5;

/// Consecutive blocked ticks tolerated before a robot is flagged agitated.
pub const DEFAULT_MAX_BLOCKED_TICKS: u32 = 10;

/// Package capacity of a cell built without an explicit `max_load`.
pub const DEFAULT_MAX_LOAD: usize = 10;

/// Tunables for the scheduler.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SimConfig {
    /// Packages a newly created robot can carry at once.
    pub max_packages: usize,

    /// A robot whose block counter exceeds this value turns agitated and the
    /// counter restarts from zero.
    pub max_blocked_ticks: u32,

    /// Package capacity for cells created by `GridBuilder` without a map.
    pub default_max_load: usize,

    /// Search used for every route the scheduler plans.
    pub algorithm: Algorithm,

    /// Comparator for "nearest searchable package".
    pub package_metric: DistanceMetric,

    /// Comparator for "nearest goal".
    pub goal_metric: DistanceMetric,

    /// Keep collecting nearby packages before heading to a goal, while a
    /// package is strictly closer than the nearest goal and capacity remains.
    pub chain_pickups: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_packages:      DEFAULT_MAX_PACKAGES,
            max_blocked_ticks: DEFAULT_MAX_BLOCKED_TICKS,
            default_max_load:  DEFAULT_MAX_LOAD,
            algorithm:         Algorithm::AStar,
            package_metric:    DistanceMetric::Manhattan,
            goal_metric:       DistanceMetric::Manhattan,
            chain_pickups:     false,
        }
    }
}

impl SimConfig {
    /// Reject values the scheduler cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_packages == 0 {
            return Err(CoreError::Config("max_packages must be at least 1".into()));
        }
        if self.default_max_load == 0 {
            return Err(CoreError::Config("default_max_load must be at least 1".into()));
        }
        Ok(())
    }
}
