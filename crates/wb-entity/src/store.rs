//! `EntityStore` owns every robot, package, and goal of one simulation.
//!
//! Records live in `BTreeMap`s keyed by id so that iteration is always in
//! ascending id order.  The scheduler depends on that for deterministic tick
//! order and for nearest-neighbour tie-breaks.
//!
//! Automatic ids are allocated monotonically and never reused, even after
//! removals; explicit ids from a map file bump the allocator past them.

use std::collections::BTreeMap;
use std::time::Instant;

use wb_core::{DistanceMetric, GoalId, PackageId, Position, RobotId};

use crate::{Goal, Package, PackageState, Robot};

#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    robots:   BTreeMap<RobotId, Robot>,
    packages: BTreeMap<PackageId, Package>,
    goals:    BTreeMap<GoalId, Goal>,

    next_robot:   u32,
    next_package: u32,
    next_goal:    u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Create a robot with the next free id.
    pub fn spawn_robot(
        &mut self,
        position:          Position,
        max_packages:      usize,
        max_blocked_ticks: u32,
        now:               Instant,
    ) -> RobotId {
        let id = RobotId(self.next_robot);
        self.next_robot += 1;
        self.robots.insert(id, Robot::new(id, position, max_packages, max_blocked_ticks, now));
        id
    }

    pub fn spawn_package(&mut self, position: Position) -> PackageId {
        let id = PackageId(self.next_package);
        self.next_package += 1;
        self.packages.insert(id, Package::new(id, position));
        id
    }

    pub fn spawn_goal(&mut self, position: Position) -> GoalId {
        let id = GoalId(self.next_goal);
        self.next_goal += 1;
        self.goals.insert(id, Goal::new(id, position));
        id
    }

    /// Insert a robot under its own id.  Returns `false` (and drops nothing)
    /// if the id is taken.
    pub fn insert_robot(&mut self, robot: Robot) -> bool {
        if self.robots.contains_key(&robot.id) {
            return false;
        }
        self.next_robot = self.next_robot.max(robot.id.0.saturating_add(1));
        self.robots.insert(robot.id, robot);
        true
    }

    pub fn insert_package(&mut self, package: Package) -> bool {
        if self.packages.contains_key(&package.id) {
            return false;
        }
        self.next_package = self.next_package.max(package.id.0.saturating_add(1));
        self.packages.insert(package.id, package);
        true
    }

    pub fn insert_goal(&mut self, goal: Goal) -> bool {
        if self.goals.contains_key(&goal.id) {
            return false;
        }
        self.next_goal = self.next_goal.max(goal.id.0.saturating_add(1));
        self.goals.insert(goal.id, goal);
        true
    }

    // ── Removal ───────────────────────────────────────────────────────────

    pub fn remove_robot(&mut self, id: RobotId) -> Option<Robot> {
        self.robots.remove(&id)
    }

    pub fn remove_package(&mut self, id: PackageId) -> Option<Package> {
        self.packages.remove(&id)
    }

    pub fn remove_goal(&mut self, id: GoalId) -> Option<Goal> {
        self.goals.remove(&id)
    }

    /// Drop every record and restart id allocation from zero.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(&id)
    }

    pub fn robot_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        self.robots.get_mut(&id)
    }

    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(&id)
    }

    pub fn package_mut(&mut self, id: PackageId) -> Option<&mut Package> {
        self.packages.get_mut(&id)
    }

    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.get(&id)
    }

    pub fn goal_mut(&mut self, id: GoalId) -> Option<&mut Goal> {
        self.goals.get_mut(&id)
    }

    /// Robot ids in ascending order: the scheduler's processing order.
    pub fn robot_ids(&self) -> Vec<RobotId> {
        self.robots.keys().copied().collect()
    }

    pub fn robots(&self) -> impl Iterator<Item = &Robot> {
        self.robots.values()
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn goals(&self) -> impl Iterator<Item = &Goal> {
        self.goals.values()
    }

    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn goal_count(&self) -> usize {
        self.goals.len()
    }

    /// Packages still resting on a cell, reserved or not.
    pub fn grid_package_count(&self) -> usize {
        self.packages
            .values()
            .filter(|p| matches!(p.state(), PackageState::Waiting | PackageState::Reserved(_)))
            .count()
    }

    /// Sum of every goal's delivered count.
    pub fn delivered_count(&self) -> usize {
        self.goals.values().map(Goal::delivered_count).sum()
    }

    // ── Cross-record operations ───────────────────────────────────────────
    //
    // These touch a robot and the packages/goal it deals with in one call, so
    // callers never need two `&mut` borrows into the store at once.

    /// Reserve each package in `targets` for `robot` and record them as the
    /// robot's targets.  Packages that are no longer waiting are skipped.
    pub fn reserve_for(&mut self, robot: RobotId, targets: &[PackageId]) -> Vec<PackageId> {
        let Some(r) = self.robots.get_mut(&robot) else {
            return Vec::new();
        };
        let reserved: Vec<PackageId> = targets
            .iter()
            .copied()
            .filter(|id| self.packages.get_mut(id).is_some_and(|p| p.reserve(robot)))
            .collect();
        r.set_targets(reserved.clone());
        reserved
    }

    /// Clear `robot`'s outstanding reservations, making those packages
    /// searchable again.
    pub fn release_targets(&mut self, robot: RobotId) -> Vec<PackageId> {
        let Some(r) = self.robots.get_mut(&robot) else {
            return Vec::new();
        };
        let released = r.take_targets();
        for id in &released {
            if let Some(p) = self.packages.get_mut(id) {
                p.release();
            }
        }
        released
    }

    /// Move `package` into `robot`'s hold.  `false` if either record is
    /// missing or the robot refuses the load.
    pub fn load_package(&mut self, robot: RobotId, package: PackageId) -> bool {
        match (self.robots.get_mut(&robot), self.packages.get_mut(&package)) {
            (Some(r), Some(p)) => r.load(p),
            _ => false,
        }
    }

    /// Hand everything `robot` carries to `goal`.  Returns the delivered ids
    /// in load order; empty if either record is missing.
    pub fn deliver_carried(&mut self, robot: RobotId, goal: GoalId) -> Vec<PackageId> {
        let (Some(r), Some(g)) = (self.robots.get_mut(&robot), self.goals.get_mut(&goal)) else {
            return Vec::new();
        };
        let delivered = r.take_carried();
        for &id in &delivered {
            if let Some(p) = self.packages.get_mut(&id) {
                p.deliver(goal);
            }
            g.accept(id);
        }
        delivered
    }

    /// Keep every carried package's position in step with its carrier.
    pub fn sync_carried_positions(&mut self, robot: RobotId) {
        let Some(r) = self.robots.get(&robot) else {
            return;
        };
        for id in r.carried() {
            if let Some(p) = self.packages.get_mut(id) {
                p.position = r.position;
            }
        }
    }

    // ── Nearest-neighbour queries ─────────────────────────────────────────

    /// The searchable package closest to `from`, skipping anything in
    /// `exclude`.  Equal distances resolve to the lower id.
    pub fn nearest_searchable_package(
        &self,
        from:    Position,
        metric:  DistanceMetric,
        exclude: &[PackageId],
    ) -> Option<PackageId> {
        nearest(
            self.packages
                .values()
                .filter(|p| p.is_searchable() && !exclude.contains(&p.id))
                .map(|p| (p.id, p.position)),
            from,
            metric,
        )
        .map(|(id, _)| id)
    }

    /// The goal closest to `from`.  Equal distances resolve to the lower id.
    pub fn nearest_goal(&self, from: Position, metric: DistanceMetric) -> Option<GoalId> {
        self.nearest_goal_with_distance(from, metric).map(|(id, _)| id)
    }

    pub fn nearest_goal_with_distance(
        &self,
        from:   Position,
        metric: DistanceMetric,
    ) -> Option<(GoalId, f64)> {
        nearest(self.goals.values().map(|g| (g.id, g.position)), from, metric)
    }
}

/// Linear scan in ascending-id order; a strictly smaller distance is needed to
/// displace the current best, so the lowest id wins ties.
fn nearest<Id: Copy>(
    candidates: impl Iterator<Item = (Id, Position)>,
    from:       Position,
    metric:     DistanceMetric,
) -> Option<(Id, f64)> {
    let mut best: Option<(Id, f64)> = None;
    for (id, pos) in candidates {
        let d = metric.distance(from, pos);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((id, d)),
        }
    }
    best
}
