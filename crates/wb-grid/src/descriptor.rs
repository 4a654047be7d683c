//! JSON map descriptors.
//!
//! # Format
//!
//! ```json
//! {
//!   "width": 2,
//!   "height": 1,
//!   "cells": [
//!     {
//!       "position": { "x": 0, "y": 0 },
//!       "connections": [ { "to_cell": { "x": 1, "y": 0 }, "weight": 1 } ],
//!       "robot": { "id": 0 },
//!       "goal": null,
//!       "max_load": 10,
//!       "packages": []
//!     }
//!   ]
//! }
//! ```
//!
//! The map generator historically wrote `toCell` and `maxLoad`; both
//! spellings are accepted.  Cells absent from `cells` exist with no
//! connections and the default capacity.
//!
//! Entities listed in the map are not placed on the grid here.  They come back
//! as [`Placements`] so the scheduler can create the entity records and the
//! grid occupancy together.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use wb_core::config::DEFAULT_MAX_LOAD;
use wb_core::{GoalId, PackageId, Position, RobotId};

use crate::{Grid, GridBuilder, GridError, GridResult};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapDescriptor {
    pub width:  u32,
    pub height: u32,
    #[serde(default)]
    pub cells:  Vec<CellRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub position: Position,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
    #[serde(default)]
    pub robot: Option<RobotRecord>,
    #[serde(default)]
    pub goal: Option<GoalRecord>,
    #[serde(default = "default_max_load", alias = "maxLoad")]
    pub max_load: usize,
    #[serde(default)]
    pub packages: Vec<PackageRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    #[serde(alias = "toCell")]
    pub to_cell: Position,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RobotRecord {
    pub id: u32,
    /// Per-robot capacity; the simulation default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_packages: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub id: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub id: u32,
}

fn default_max_load() -> usize {
    DEFAULT_MAX_LOAD
}

fn default_weight() -> u32 {
    1
}

/// Entities declared by a map, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placements {
    pub robots:   Vec<(RobotId, Position, Option<usize>)>,
    pub packages: Vec<(PackageId, Position)>,
    pub goals:    Vec<(GoalId, Position)>,
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load a [`MapDescriptor`] from a JSON file.
///
/// A missing or unreadable file is reported as [`GridError::Io`].
pub fn load_map_json(path: &Path) -> GridResult<MapDescriptor> {
    let file = std::fs::File::open(path)?;
    let map = load_map_reader(file)?;
    log::info!(
        "loaded map {} ({}x{}, {} cell records)",
        path.display(),
        map.width,
        map.height,
        map.cells.len()
    );
    Ok(map)
}

/// Like [`load_map_json`] but accepts any `Read` source.
pub fn load_map_reader<R: Read>(reader: R) -> GridResult<MapDescriptor> {
    serde_json::from_reader(reader).map_err(|e| GridError::Parse(e.to_string()))
}

impl MapDescriptor {
    pub fn from_json_str(s: &str) -> GridResult<Self> {
        serde_json::from_str(s).map_err(|e| GridError::Parse(e.to_string()))
    }

    pub fn to_json_string(&self) -> GridResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GridError::Parse(e.to_string()))
    }

    /// Generate an empty map whose cells link to their 4-neighbourhood in both
    /// directions with weight 1, every cell holding up to 10 packages.
    pub fn cardinal(width: u32, height: u32) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let here = Position::new(x, y);
                let connections = here
                    .cardinal_neighbors()
                    .into_iter()
                    .filter(|p| p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height)
                    .map(|to_cell| ConnectionRecord { to_cell, weight: 1 })
                    .collect();
                cells.push(CellRecord {
                    position: here,
                    connections,
                    robot: None,
                    goal: None,
                    max_load: DEFAULT_MAX_LOAD,
                    packages: Vec::new(),
                });
            }
        }
        Self { width, height, cells }
    }

    /// Mutable access to the record for `pos`, if the map lists it.
    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut CellRecord> {
        self.cells.iter_mut().find(|c| c.position == pos)
    }

    /// Validate the descriptor and build the grid.
    ///
    /// # Errors
    ///
    /// [`GridError::Validation`] naming the offending cell when a record lies
    /// outside the grid, appears twice, has zero capacity, or connects to a
    /// cell that does not exist.
    pub fn into_grid(self) -> GridResult<(Grid, Placements)> {
        let mut builder = GridBuilder::new(self.width, self.height);
        let mut placements = Placements::default();
        let mut seen: HashSet<Position> = HashSet::with_capacity(self.cells.len());

        let in_bounds = |p: Position| {
            p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
        };

        for record in self.cells {
            let cell = record.position;
            if !in_bounds(cell) {
                return Err(GridError::Validation {
                    cell,
                    reason: format!("cell lies outside the {}x{} grid", self.width, self.height),
                });
            }
            if !seen.insert(cell) {
                return Err(GridError::Validation { cell, reason: "duplicate cell record".into() });
            }
            if record.max_load == 0 {
                return Err(GridError::Validation { cell, reason: "max_load must be at least 1".into() });
            }
            builder.cell_max_load(cell, record.max_load);

            for conn in record.connections {
                if !in_bounds(conn.to_cell) {
                    return Err(GridError::Validation {
                        cell,
                        reason: format!("connection target {} does not exist", conn.to_cell),
                    });
                }
                if conn.weight == 0 {
                    return Err(GridError::Validation {
                        cell,
                        reason: format!("connection to {} has weight 0", conn.to_cell),
                    });
                }
                builder.add_directed_edge(cell, conn.to_cell, conn.weight);
            }

            if let Some(robot) = record.robot {
                placements.robots.push((RobotId(robot.id), cell, robot.max_packages));
            }
            if let Some(goal) = record.goal {
                placements.goals.push((GoalId(goal.id), cell));
            }
            for package in record.packages {
                placements.packages.push((PackageId(package.id), cell));
            }
        }

        Ok((builder.build()?, placements))
    }
}
