//! Simulation observer trait and per-tick counters.

use wb_core::{GoalId, PackageId, RobotId, Tick};

/// What happened during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Robots that advanced one cell.
    pub moved:     usize,
    /// Robots that wanted to advance but found the cell occupied.
    pub blocked:   usize,
    /// Robots that received a new task.
    pub assigned:  usize,
    /// Packages loaded onto robots.
    pub picked_up: usize,
    /// Packages handed to goals.
    pub delivered: usize,
}

/// Callbacks invoked by [`Sim`][crate::Sim] while it runs ticks.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: delivery tally
///
/// ```rust,ignore
/// struct Tally(usize);
///
/// impl SimObserver for Tally {
///     fn on_delivery(&mut self, _t: Tick, _r: RobotId, _g: GoalId, p: &[PackageId]) {
///         self.0 += p.len();
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any robot is processed.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once every robot has been processed.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// A robot unloaded `packages` at `goal`.
    fn on_delivery(
        &mut self,
        _tick:     Tick,
        _robot:    RobotId,
        _goal:     GoalId,
        _packages: &[PackageId],
    ) {}

    /// A robot's block counter crossed the threshold.
    fn on_agitated(&mut self, _tick: Tick, _robot: RobotId) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
