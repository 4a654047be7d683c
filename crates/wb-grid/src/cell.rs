//! A single grid location and its outgoing edges.

use wb_core::{GoalId, PackageId, Position, RobotId};

/// Directed, weighted edge between two cells.
///
/// A two-way passage needs two `Connection`s, one stored on each end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub from:   Position,
    pub to:     Position,
    /// Traversal cost, always `>= 1`.
    pub weight: u32,
}

/// One grid location.
///
/// Occupancy is only mutated through [`Grid`][crate::Grid] so the
/// one-robot-per-cell and `max_load` limits hold everywhere.
#[derive(Clone, Debug)]
pub struct Cell {
    position:    Position,
    connections: Vec<Connection>,
    robot:       Option<RobotId>,
    goal:        Option<GoalId>,
    packages:    Vec<PackageId>,
    max_load:    usize,
}

impl Cell {
    pub(crate) fn new(position: Position, max_load: usize) -> Self {
        Self {
            position,
            connections: Vec::new(),
            robot: None,
            goal: None,
            packages: Vec::new(),
            max_load,
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Outgoing connections in insertion order.
    #[inline]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Destinations of the outgoing connections, in insertion order.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        self.connections.iter().map(|c| c.to)
    }

    /// The connection to `to`, if one exists.
    pub fn connection_to(&self, to: Position) -> Option<&Connection> {
        self.connections.iter().find(|c| c.to == to)
    }

    #[inline]
    pub fn robot(&self) -> Option<RobotId> {
        self.robot
    }

    #[inline]
    pub fn goal(&self) -> Option<GoalId> {
        self.goal
    }

    /// Packages resting on this cell, oldest first.
    #[inline]
    pub fn packages(&self) -> &[PackageId] {
        &self.packages
    }

    #[inline]
    pub fn max_load(&self) -> usize {
        self.max_load
    }

    #[inline]
    pub fn has_robot(&self) -> bool {
        self.robot.is_some()
    }

    #[inline]
    pub fn has_goal(&self) -> bool {
        self.goal.is_some()
    }

    #[inline]
    pub fn has_package(&self) -> bool {
        !self.packages.is_empty()
    }

    #[inline]
    pub fn can_load_package(&self) -> bool {
        self.packages.len() < self.max_load
    }

    // ── Mutation (crate-private; go through Grid) ─────────────────────────

    /// Refused when more packages than `max_load` already rest here.
    pub(crate) fn set_max_load(&mut self, max_load: usize) -> bool {
        if self.packages.len() > max_load {
            return false;
        }
        self.max_load = max_load;
        true
    }

    pub(crate) fn push_connection(&mut self, to: Position, weight: u32) {
        self.connections.push(Connection { from: self.position, to, weight });
    }

    /// Drop every connection to `to`.  Returns `true` if any was removed.
    pub(crate) fn remove_connection(&mut self, to: Position) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c.to != to);
        self.connections.len() != before
    }

    pub(crate) fn place_robot(&mut self, robot: RobotId) -> bool {
        if self.robot.is_some() {
            return false;
        }
        self.robot = Some(robot);
        true
    }

    pub(crate) fn take_robot(&mut self) -> Option<RobotId> {
        self.robot.take()
    }

    pub(crate) fn place_goal(&mut self, goal: GoalId) -> bool {
        if self.goal.is_some() {
            return false;
        }
        self.goal = Some(goal);
        true
    }

    pub(crate) fn take_goal(&mut self) -> Option<GoalId> {
        self.goal.take()
    }

    pub(crate) fn push_package(&mut self, package: PackageId) -> bool {
        if !self.can_load_package() || self.packages.contains(&package) {
            return false;
        }
        self.packages.push(package);
        true
    }

    pub(crate) fn remove_package(&mut self, package: PackageId) -> bool {
        match self.packages.iter().position(|&p| p == package) {
            Some(i) => {
                self.packages.remove(i);
                true
            }
            None => false,
        }
    }

    pub(crate) fn pop_oldest_package(&mut self) -> Option<PackageId> {
        if self.packages.is_empty() {
            None
        } else {
            Some(self.packages.remove(0))
        }
    }

    /// Clear all occupants; connections are kept.
    pub(crate) fn reset(&mut self) {
        self.robot = None;
        self.goal = None;
        self.packages.clear();
    }
}
