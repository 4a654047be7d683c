//! One robot's step along its path, and what it does on arrival.

use std::time::Instant;

use wb_core::{PackageId, Position, RobotId, Tick};
use wb_entity::RobotStatus;

use crate::{Sim, SimObserver, TickSummary};

/// What the front waypoint allows this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum StepOutcome {
    /// The waypoint is the robot's own cell: act here without moving.
    Stay,
    /// The cell is free and connected.
    Move,
    /// Another robot holds the cell.
    Blocked,
    /// No connection leads there any more.
    Broken,
}

impl Sim {
    /// Advance `id` by at most one waypoint, then handle pickups/deliveries at
    /// wherever it ends up.
    pub(crate) fn advance_robot<O: SimObserver>(
        &mut self,
        id:       RobotId,
        tick:     Tick,
        now:      Instant,
        observer: &mut O,
        summary:  &mut TickSummary,
    ) {
        let Some(robot) = self.entities.robot(id) else {
            return;
        };
        let current = robot.position;
        let Some(next) = robot.next_step() else {
            return;
        };

        match self.classify_step(id, current, next) {
            StepOutcome::Broken => {
                let released = self.entities.release_targets(id);
                if let Some(robot) = self.entities.robot_mut(id) {
                    robot.clear_path();
                    robot.set_status(RobotStatus::Idle, now);
                }
                log::debug!(
                    "{id}: no connection {current} -> {next}, dropping task ({} reservation(s) released)",
                    released.len(),
                );
            }

            StepOutcome::Blocked => {
                summary.blocked += 1;
                let Some(robot) = self.entities.robot_mut(id) else {
                    return;
                };
                robot.set_status(RobotStatus::Idle, now);
                log::debug!("{id}: blocked at {current} waiting for {next}");
                if robot.record_block() {
                    log::warn!("{id}: agitated after waiting at {current}");
                    observer.on_agitated(tick, id);
                }
            }

            StepOutcome::Stay => {
                if let Some(robot) = self.entities.robot_mut(id) {
                    robot.consume_step();
                    robot.set_status(RobotStatus::Idle, now);
                }
                self.interact(id, current, tick, observer, summary);
            }

            StepOutcome::Move => {
                self.grid.remove_robot(current);
                self.grid.add_robot(next, id);
                if let Some(robot) = self.entities.robot_mut(id) {
                    robot.position = next;
                    robot.consume_step();
                    robot.reset_blocks();
                    robot.set_status(RobotStatus::Active, now);
                }
                self.entities.sync_carried_positions(id);
                summary.moved += 1;
                self.interact(id, next, tick, observer, summary);
            }
        }

        // Reservations that outlive the path can never be collected.
        if self.entities.robot(id).is_some_and(|r| !r.has_task() && !r.targets().is_empty()) {
            self.entities.release_targets(id);
        }
    }

    fn classify_step(&self, id: RobotId, current: Position, next: Position) -> StepOutcome {
        if next == current {
            return StepOutcome::Stay;
        }
        let connected = self
            .grid
            .get_cell(current)
            .is_ok_and(|cell| cell.connection_to(next).is_some());
        if !connected || !self.grid.is_within_bounds(next) {
            return StepOutcome::Broken;
        }
        if !self.grid.is_passable_for(next, Some(id)) {
            return StepOutcome::Blocked;
        }
        StepOutcome::Move
    }

    // ── Interaction ───────────────────────────────────────────────────────

    /// Load what fits from `pos`, then unload at a goal there.
    fn interact<O: SimObserver>(
        &mut self,
        id:       RobotId,
        pos:      Position,
        tick:     Tick,
        observer: &mut O,
        summary:  &mut TickSummary,
    ) {
        for pkg in self.pickup_order(id, pos) {
            if !self.entities.load_package(id, pkg) {
                break;
            }
            self.grid.remove_package(pos, pkg);
            summary.picked_up += 1;
            log::debug!("{id}: picked up {pkg} at {pos}");
        }

        let Ok(cell) = self.grid.get_cell(pos) else {
            return;
        };
        let Some(goal) = cell.goal() else {
            return;
        };
        let delivered = self.entities.deliver_carried(id, goal);
        if delivered.is_empty() {
            return;
        }
        summary.delivered += delivered.len();
        log::debug!("{id}: delivered {} package(s) to {goal} at {pos}", delivered.len());
        observer.on_delivery(tick, id, goal, &delivered);
    }

    /// Packages at `pos` that `id` should try to load, in order: its own
    /// reservations first, then unreserved packages for whatever capacity is
    /// not promised to reservations elsewhere.
    fn pickup_order(&self, id: RobotId, pos: Position) -> Vec<PackageId> {
        let (Some(robot), Ok(cell)) = (self.entities.robot(id), self.grid.get_cell(pos)) else {
            return Vec::new();
        };
        let here = cell.packages();

        let mut order: Vec<PackageId> =
            here.iter().copied().filter(|p| robot.targets().contains(p)).collect();

        let elsewhere = robot.targets().iter().filter(|&&t| !here.contains(&t)).count();
        let spare = robot.room().saturating_sub(order.len() + elsewhere);
        order.extend(
            here.iter()
                .copied()
                .filter(|p| self.entities.package(*p).is_some_and(|pk| pk.is_searchable()))
                .take(spare),
        );
        order
    }
}
