//! The `Sim` struct, its public surface, and the tick driver.

use std::time::Instant;

use wb_core::{GoalId, PackageId, Position, RobotId, SimConfig, Tick};
use wb_entity::{EntityStore, Goal, Package, PackageState, Robot, RobotStatus};
use wb_grid::{Cell, Grid};

use crate::{assign, NoopObserver, SimError, SimObserver, SimResult, TickSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The warehouse simulation.
///
/// `Sim` owns the grid and every entity on it.  Cells and entity records are
/// kept in step by the methods below; nothing else writes to either, so a
/// renderer may read [`grid`](Sim::grid) and [`entities`](Sim::entities)
/// between ticks and always see a consistent picture.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub(crate) config:   SimConfig,
    pub(crate) grid:     Grid,
    pub(crate) entities: EntityStore,
    pub(crate) tick:     Tick,
}

impl Sim {
    // ── Read access ───────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// The tick the next `run_tick*` call will process.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn get_cell(&self, pos: Position) -> SimResult<&Cell> {
        Ok(self.grid.get_cell(pos)?)
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        self.grid.is_within_bounds(pos)
    }

    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.entities.robot(id)
    }

    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.entities.package(id)
    }

    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.entities.goal(id)
    }

    pub fn robot_count(&self) -> usize {
        self.entities.robot_count()
    }

    pub fn package_count(&self) -> usize {
        self.entities.package_count()
    }

    pub fn goal_count(&self) -> usize {
        self.entities.goal_count()
    }

    /// Total packages handed to goals since the last reset.
    pub fn delivered_count(&self) -> usize {
        self.entities.delivered_count()
    }

    /// Fails with [`SimError::NotReady`] unless there is at least one robot,
    /// one package still on the grid and one goal.
    pub fn check_ready(&self) -> SimResult<()> {
        let (robots, packages, goals) = (
            self.entities.robot_count(),
            self.entities.grid_package_count(),
            self.entities.goal_count(),
        );
        if robots == 0 || packages == 0 || goals == 0 {
            return Err(SimError::NotReady { robots, packages, goals });
        }
        Ok(())
    }

    // ── Placement ─────────────────────────────────────────────────────────
    //
    // Failures are `None`/`false`, never errors: the caller may simply try
    // again next tick.

    /// Put a new robot with the configured capacity on `pos`.
    pub fn add_robot(&mut self, pos: Position) -> Option<RobotId> {
        self.add_robot_with_capacity(pos, self.config.max_packages)
    }

    pub fn add_robot_with_capacity(&mut self, pos: Position, max_packages: usize) -> Option<RobotId> {
        if max_packages == 0 || !self.grid.is_passable(pos) {
            return None;
        }
        let id = self.entities.spawn_robot(
            pos,
            max_packages,
            self.config.max_blocked_ticks,
            Instant::now(),
        );
        self.grid.add_robot(pos, id);
        Some(id)
    }

    /// Take the robot off `pos`.
    ///
    /// Its cargo is put down on `pos` while the cell has room; anything that
    /// does not fit is discarded.  Its reservations are released.
    pub fn remove_robot(&mut self, pos: Position) -> bool {
        let Some(id) = self.grid.remove_robot(pos) else {
            return false;
        };
        self.entities.release_targets(id);
        let Some(mut robot) = self.entities.remove_robot(id) else {
            return true;
        };
        for pkg in robot.take_carried() {
            if self.grid.add_package(pos, pkg) {
                if let Some(p) = self.entities.package_mut(pkg) {
                    p.drop_at(pos);
                }
            } else {
                log::warn!("{id} removed at {pos}: no room for {pkg}, discarding it");
                self.entities.remove_package(pkg);
            }
        }
        true
    }

    pub fn add_package(&mut self, pos: Position) -> Option<PackageId> {
        let room = self.grid.get_cell(pos).is_ok_and(Cell::can_load_package);
        if !room {
            return None;
        }
        let id = self.entities.spawn_package(pos);
        self.grid.add_package(pos, id);
        Some(id)
    }

    /// Remove the oldest package resting on `pos`.  A robot that had it
    /// reserved forgets about it.
    pub fn remove_package(&mut self, pos: Position) -> bool {
        let Some(id) = self.grid.pop_package(pos) else {
            return false;
        };
        let reserved_by = self.entities.remove_package(id).and_then(|p| match p.state() {
            PackageState::Reserved(by) => Some(by),
            _ => None,
        });
        if let Some(robot) = reserved_by.and_then(|by| self.entities.robot_mut(by)) {
            robot.forget_target(id);
        }
        true
    }

    pub fn add_goal(&mut self, pos: Position) -> Option<GoalId> {
        let free = self.grid.get_cell(pos).is_ok_and(|c| !c.has_goal());
        if !free {
            return None;
        }
        let id = self.entities.spawn_goal(pos);
        self.grid.add_goal(pos, id);
        Some(id)
    }

    pub fn remove_goal(&mut self, pos: Position) -> bool {
        let Some(id) = self.grid.remove_goal(pos) else {
            return false;
        };
        self.entities.remove_goal(id);
        true
    }

    /// Switch a robot on or off.  An `Off` robot keeps its cell and cargo
    /// and is skipped by the scheduler.  Switching off drops its path and
    /// hands its reservations back, so other robots may collect them.
    pub fn set_robot_enabled(&mut self, id: RobotId, enabled: bool, now: Instant) -> bool {
        if !enabled {
            let released = self.entities.release_targets(id);
            if !released.is_empty() {
                log::debug!("{id}: switched off, {} reservation(s) released", released.len());
            }
        }
        let Some(robot) = self.entities.robot_mut(id) else {
            return false;
        };
        match (enabled, robot.status()) {
            (true, RobotStatus::Off) => robot.set_status(RobotStatus::Idle, now),
            (false, _) => {
                robot.clear_path();
                robot.set_status(RobotStatus::Off, now);
            }
            _ => {}
        }
        true
    }

    // ── Graph edits ───────────────────────────────────────────────────────

    pub fn connect(&mut self, from: Position, to: Position, weight: u32) -> SimResult<()> {
        Ok(self.grid.connect(from, to, weight)?)
    }

    /// Remove `from → to`.  Robots whose path uses it find out when they try
    /// to take that step.
    pub fn disconnect(&mut self, from: Position, to: Position) -> SimResult<bool> {
        Ok(self.grid.disconnect(from, to)?)
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Clear every robot, package and goal and rewind to tick zero.
    /// Connections are kept.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.entities.clear();
        self.tick = Tick::ZERO;
        log::info!("simulation reset");
    }

    /// One tick stamped with the current wall-clock time.
    pub fn run_tick(&mut self) -> SimResult<TickSummary> {
        self.run_tick_at(Instant::now())
    }

    /// One tick, with status time accounted against `now`.
    pub fn run_tick_at(&mut self, now: Instant) -> SimResult<TickSummary> {
        self.step(now, &mut NoopObserver)
    }

    /// Run exactly `n` ticks, reporting to `observer`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(Instant::now(), observer)?;
        }
        Ok(())
    }

    /// Process one tick against `now`, reporting to `observer`.
    pub fn step<O: SimObserver>(&mut self, now: Instant, observer: &mut O) -> SimResult<TickSummary> {
        let tick = self.tick;
        observer.on_tick_start(tick);

        let mut summary = TickSummary::default();

        // Ascending id: lower ids claim contested cells first.
        for id in self.entities.robot_ids() {
            let Some(robot) = self.entities.robot(id) else {
                continue;
            };
            if robot.status() == RobotStatus::Off {
                continue;
            }

            // ── Assign ────────────────────────────────────────────────────
            if robot.is_idle_without_task() {
                if let Some(task) = assign::plan(&self.grid, &self.entities, &self.config, robot)? {
                    self.apply_assignment(id, task);
                    summary.assigned += 1;
                }
            }

            // ── Move & interact ───────────────────────────────────────────
            let has_task = self.entities.robot(id).is_some_and(Robot::has_task);
            if has_task {
                self.advance_robot(id, tick, now, observer, &mut summary);
            } else if let Some(robot) = self.entities.robot_mut(id) {
                robot.set_status(RobotStatus::Idle, now);
            }
        }

        observer.on_tick_end(tick, &summary);
        self.tick = tick.next();
        Ok(summary)
    }

    fn apply_assignment(&mut self, id: RobotId, task: assign::Assignment) {
        let reserved = self.entities.reserve_for(id, &task.targets);
        log::debug!(
            "{id}: assigned {} pickup(s) then {} over {} step(s)",
            reserved.len(),
            task.goal,
            task.path.len(),
        );
        if let Some(robot) = self.entities.robot_mut(id) {
            robot.set_path(task.path);
        }
    }
}
