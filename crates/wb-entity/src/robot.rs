//! Robot record, status machine, and per-status time accounting.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use wb_core::{PackageId, Position, RobotId};

use crate::Package;

// ── Status ────────────────────────────────────────────────────────────────────

/// What a robot is doing right now.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum RobotStatus {
    /// No task, waiting on a blocked cell, or just finished a task.
    #[default]
    Idle,
    /// Moved during the last tick.
    Active,
    /// Stopped by an obstacle.
    Blocked,
    /// Switched off; skipped by the scheduler.
    Off,
}

impl RobotStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RobotStatus::Idle    => "idle",
            RobotStatus::Active  => "active",
            RobotStatus::Blocked => "blocked",
            RobotStatus::Off     => "off",
        }
    }
}

impl std::fmt::Display for RobotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cumulative time spent in each status.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusTimes {
    pub idle:    Duration,
    pub active:  Duration,
    pub blocked: Duration,
    pub off:     Duration,
}

impl StatusTimes {
    pub fn get(&self, status: RobotStatus) -> Duration {
        match status {
            RobotStatus::Idle    => self.idle,
            RobotStatus::Active  => self.active,
            RobotStatus::Blocked => self.blocked,
            RobotStatus::Off     => self.off,
        }
    }

    fn slot_mut(&mut self, status: RobotStatus) -> &mut Duration {
        match status {
            RobotStatus::Idle    => &mut self.idle,
            RobotStatus::Active  => &mut self.active,
            RobotStatus::Blocked => &mut self.blocked,
            RobotStatus::Off     => &mut self.off,
        }
    }
}

// ── Robot ─────────────────────────────────────────────────────────────────────

/// A package-carrying robot.
///
/// The path never includes the cell the robot stands on, except as a
/// deliberate "act here" waypoint at the front (the scheduler then consumes it
/// without moving).  An empty path means the robot has no task.
#[derive(Clone, Debug)]
pub struct Robot {
    pub id:       RobotId,
    pub position: Position,

    status:       RobotStatus,
    status_since: Instant,
    times:        StatusTimes,

    carried:      Vec<PackageId>,
    max_packages: usize,

    path:    VecDeque<Position>,
    targets: Vec<PackageId>,

    block_count:       u32,
    max_blocked_ticks: u32,
    agitated:          bool,
}

impl Robot {
    pub fn new(
        id:                RobotId,
        position:          Position,
        max_packages:      usize,
        max_blocked_ticks: u32,
        now:               Instant,
    ) -> Self {
        Self {
            id,
            position,
            status: RobotStatus::Idle,
            status_since: now,
            times: StatusTimes::default(),
            carried: Vec::new(),
            max_packages,
            path: VecDeque::new(),
            targets: Vec::new(),
            block_count: 0,
            max_blocked_ticks,
            agitated: false,
        }
    }

    // ── Status & time ─────────────────────────────────────────────────────

    #[inline]
    pub fn status(&self) -> RobotStatus {
        self.status
    }

    /// Switch status, first crediting the time spent in the outgoing one.
    /// Setting the current status again is a no-op.
    pub fn set_status(&mut self, status: RobotStatus, now: Instant) {
        if status == self.status {
            return;
        }
        let spent = now.saturating_duration_since(self.status_since);
        *self.times.slot_mut(self.status) += spent;
        self.status = status;
        self.status_since = now;
    }

    /// Cumulative time in `status`, including the running stretch if the robot
    /// is in `status` right now.
    pub fn status_time(&self, status: RobotStatus, now: Instant) -> Duration {
        let stored = self.times.get(status);
        if status == self.status {
            stored + now.saturating_duration_since(self.status_since)
        } else {
            stored
        }
    }

    /// Stored totals only; the running stretch is not included.
    pub fn times(&self) -> &StatusTimes {
        &self.times
    }

    // ── Blocking ──────────────────────────────────────────────────────────

    #[inline]
    pub fn block_count(&self) -> u32 {
        self.block_count
    }

    #[inline]
    pub fn is_agitated(&self) -> bool {
        self.agitated
    }

    /// Count one blocked tick.  Once the counter exceeds the threshold the
    /// robot is flagged agitated and the counter restarts.
    ///
    /// Returns `true` on the call that raised the flag.
    pub fn record_block(&mut self) -> bool {
        self.block_count += 1;
        if self.block_count > self.max_blocked_ticks {
            self.agitated = true;
            self.block_count = 0;
            return true;
        }
        false
    }

    pub fn reset_blocks(&mut self) {
        self.block_count = 0;
    }

    // ── Cargo ─────────────────────────────────────────────────────────────

    /// Packages on board, in load order.
    #[inline]
    pub fn carried(&self) -> &[PackageId] {
        &self.carried
    }

    #[inline]
    pub fn max_packages(&self) -> usize {
        self.max_packages
    }

    #[inline]
    pub fn is_carrying(&self) -> bool {
        !self.carried.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.carried.len() >= self.max_packages
    }

    /// Free capacity.
    #[inline]
    pub fn room(&self) -> usize {
        self.max_packages.saturating_sub(self.carried.len())
    }

    /// Pick up `package` if there is room and it is available to this robot.
    /// A refused load leaves both records untouched.
    pub fn load(&mut self, package: &mut Package) -> bool {
        if self.is_full() || !package.is_available_to(self.id) {
            return false;
        }
        package.pick_up(self.id);
        self.carried.push(package.id);
        self.forget_target(package.id);
        true
    }

    /// Empty the cargo hold, returning what was carried.
    pub fn take_carried(&mut self) -> Vec<PackageId> {
        std::mem::take(&mut self.carried)
    }

    // ── Route & reservations ──────────────────────────────────────────────

    #[inline]
    pub fn path(&self) -> &VecDeque<Position> {
        &self.path
    }

    #[inline]
    pub fn has_task(&self) -> bool {
        !self.path.is_empty()
    }

    /// Candidate for assignment: switched on with nothing left to walk.
    #[inline]
    pub fn is_idle_without_task(&self) -> bool {
        self.status != RobotStatus::Off && self.path.is_empty()
    }

    pub fn set_path<I: IntoIterator<Item = Position>>(&mut self, path: I) {
        self.path = path.into_iter().collect();
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
    }

    /// The waypoint the robot will try next.
    #[inline]
    pub fn next_step(&self) -> Option<Position> {
        self.path.front().copied()
    }

    /// Drop the front waypoint.
    pub fn consume_step(&mut self) -> Option<Position> {
        self.path.pop_front()
    }

    /// Packages reserved for this robot but not yet picked up.
    #[inline]
    pub fn targets(&self) -> &[PackageId] {
        &self.targets
    }

    pub fn set_targets(&mut self, targets: Vec<PackageId>) {
        self.targets = targets;
    }

    /// Drop `package` from the targets without touching the package record.
    pub fn forget_target(&mut self, package: PackageId) {
        self.targets.retain(|&t| t != package);
    }

    pub fn take_targets(&mut self) -> Vec<PackageId> {
        std::mem::take(&mut self.targets)
    }
}
