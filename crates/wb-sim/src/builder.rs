//! Fluent builder for constructing a [`Sim`].

use std::time::Instant;

use wb_core::{Position, SimConfig, Tick};
use wb_entity::{EntityStore, Goal, Package, Robot};
use wb_grid::{Grid, GridBuilder, MapDescriptor, Placements};

use crate::{Sim, SimError, SimResult};

/// Where the grid comes from.
enum GridSource {
    Ready(Grid),
    /// Built at `build()` time so the cell capacity follows the final config.
    Cardinal { width: u32, height: u32 },
}

/// Fluent builder for [`Sim`].
///
/// # Inputs
///
/// | Method                       | Default               |
/// |------------------------------|-----------------------|
/// | `new(grid)` / `cardinal(w,h)` / `from_map(map)` | required (pick one) |
/// | `.config(c)`                 | `SimConfig::default()`|
///
/// # Example
///
/// ```rust,ignore
/// let map = MapDescriptor::from_json_str(json)?;
/// let mut sim = SimBuilder::from_map(map)?
///     .config(SimConfig { chain_pickups: true, ..SimConfig::default() })
///     .build()?;
/// ```
pub struct SimBuilder {
    grid:       GridSource,
    placements: Placements,
    config:     SimConfig,
}

impl SimBuilder {
    /// Start from an already built (and empty) grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid:       GridSource::Ready(grid),
            placements: Placements::default(),
            config:     SimConfig::default(),
        }
    }

    /// A `width × height` 4-neighbour grid with unit weights; every cell holds
    /// up to `config.default_max_load` packages.
    pub fn cardinal(width: u32, height: u32) -> Self {
        Self {
            grid:       GridSource::Cardinal { width, height },
            placements: Placements::default(),
            config:     SimConfig::default(),
        }
    }

    /// Build the grid described by `map` and queue its robots, packages and
    /// goals for placement.
    pub fn from_map(map: MapDescriptor) -> SimResult<Self> {
        let (grid, placements) = map.into_grid()?;
        Ok(Self {
            grid: GridSource::Ready(grid),
            placements,
            config: SimConfig::default(),
        })
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the config, place every queued entity, and return a ready
    /// [`Sim`].  Any placement that conflicts with the grid is an error.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let mut grid = match self.grid {
            GridSource::Ready(grid) => grid,
            GridSource::Cardinal { width, height } => GridBuilder::cardinal(width, height)
                .max_load(self.config.default_max_load)
                .build()?,
        };

        let mut entities = EntityStore::new();
        place_all(&mut grid, &mut entities, &self.config, self.placements)?;

        log::info!(
            "sim ready: {}x{} grid, {} robot(s), {} package(s), {} goal(s)",
            grid.width(),
            grid.height(),
            entities.robot_count(),
            entities.package_count(),
            entities.goal_count(),
        );

        Ok(Sim {
            config: self.config,
            grid,
            entities,
            tick: Tick::ZERO,
        })
    }
}

// ── Placement ─────────────────────────────────────────────────────────────────

fn place_all(
    grid:       &mut Grid,
    entities:   &mut EntityStore,
    config:     &SimConfig,
    placements: Placements,
) -> SimResult<()> {
    let now = Instant::now();

    for (id, pos, capacity) in placements.robots {
        let max_packages = match capacity {
            Some(0) => {
                log::warn!("{id} at {pos} declares capacity 0, using {}", config.max_packages);
                config.max_packages
            }
            Some(n) => n,
            None => config.max_packages,
        };
        if !entities.insert_robot(Robot::new(id, pos, max_packages, config.max_blocked_ticks, now)) {
            return Err(conflict(id, pos, "id already in use"));
        }
        if !grid.add_robot(pos, id) {
            return Err(conflict(id, pos, "cell already holds a robot"));
        }
    }

    for (id, pos) in placements.goals {
        if !entities.insert_goal(Goal::new(id, pos)) {
            return Err(conflict(id, pos, "id already in use"));
        }
        if !grid.add_goal(pos, id) {
            return Err(conflict(id, pos, "cell already holds a goal"));
        }
    }

    for (id, pos) in placements.packages {
        if !entities.insert_package(Package::new(id, pos)) {
            return Err(conflict(id, pos, "id already in use"));
        }
        if !grid.add_package(pos, id) {
            return Err(conflict(id, pos, "cell is at max_load"));
        }
    }

    Ok(())
}

fn conflict(what: impl std::fmt::Display, position: Position, reason: &'static str) -> SimError {
    SimError::Placement { what: what.to_string(), position, reason }
}
