//! The cell arena and its occupancy API.
//!
//! # Data layout
//!
//! Cells are stored row-major in one `Vec`:
//!
//! ```text
//! cells[ y * width + x ]
//! ```
//!
//! Bounds are checked on every access; out-of-range positions are rejected
//! with [`GridError::OutOfBounds`] and never wrapped or clamped.
//!
//! # Occupancy operations
//!
//! `add_*` / `remove_*` report failure as `bool` / `Option` rather than
//! errors: an occupied slot is an expected situation callers may retry on a
//! later tick.

use wb_core::{GoalId, PackageId, Position, RobotId};

use crate::cell::{Cell, Connection};
use crate::{GridError, GridResult};

/// Rectangular grid of [`Cell`]s with directed, weighted connections.
///
/// Build with [`GridBuilder`][crate::GridBuilder] or
/// [`MapDescriptor::into_grid`][crate::MapDescriptor::into_grid].
#[derive(Clone, Debug)]
pub struct Grid {
    width:  u32,
    height: u32,
    cells:  Vec<Cell>,
}

impl Grid {
    /// A `width × height` grid with no connections and no occupants.
    pub fn new(width: u32, height: u32, max_load: usize) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                cells.push(Cell::new(Position::new(x, y), max_load));
            }
        }
        Self { width, height, cells }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Total number of directed connections.
    pub fn connection_count(&self) -> usize {
        self.cells.iter().map(|c| c.connections().len()).sum()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Arena index of `pos`, or `None` when outside the grid.
    #[inline]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if self.is_within_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    pub fn get_cell(&self, pos: Position) -> GridResult<&Cell> {
        self.index_of(pos)
            .map(|i| &self.cells[i])
            .ok_or(GridError::OutOfBounds(pos))
    }

    pub(crate) fn get_cell_mut(&mut self, pos: Position) -> GridResult<&mut Cell> {
        match self.index_of(pos) {
            Some(i) => Ok(&mut self.cells[i]),
            None    => Err(GridError::OutOfBounds(pos)),
        }
    }

    /// Iterator over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Outgoing connections of `pos`; empty when `pos` is off-grid.
    pub fn connections(&self, pos: Position) -> &[Connection] {
        match self.index_of(pos) {
            Some(i) => self.cells[i].connections(),
            None    => &[],
        }
    }

    /// Within bounds and not holding a robot.
    #[inline]
    pub fn is_passable(&self, pos: Position) -> bool {
        self.is_passable_for(pos, None)
    }

    /// Like [`is_passable`](Self::is_passable), but a cell held by `mover`
    /// itself counts as free.
    pub fn is_passable_for(&self, pos: Position, mover: Option<RobotId>) -> bool {
        match self.index_of(pos) {
            None => false,
            Some(i) => match self.cells[i].robot() {
                None          => true,
                Some(present) => Some(present) == mover,
            },
        }
    }

    // ── Connections ───────────────────────────────────────────────────────

    /// Append a directed connection `from → to`.
    ///
    /// Both ends must be inside the grid and `weight >= 1`.  Duplicates are
    /// not merged; the caller decides the topology.
    pub fn connect(&mut self, from: Position, to: Position, weight: u32) -> GridResult<()> {
        if weight == 0 {
            return Err(GridError::InvalidWeight { from, to });
        }
        if !self.is_within_bounds(to) {
            return Err(GridError::OutOfBounds(to));
        }
        self.get_cell_mut(from)?.push_connection(to, weight);
        Ok(())
    }

    /// Two directed connections, `a → b` and `b → a`, with the same weight.
    pub fn connect_both(&mut self, a: Position, b: Position, weight: u32) -> GridResult<()> {
        self.connect(a, b, weight)?;
        self.connect(b, a, weight)
    }

    /// Remove every `from → to` connection.  The reverse direction is untouched.
    ///
    /// Returns `Ok(false)` if no such connection existed.
    pub fn disconnect(&mut self, from: Position, to: Position) -> GridResult<bool> {
        Ok(self.get_cell_mut(from)?.remove_connection(to))
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Place `robot` at `pos`.  `false` if off-grid or already occupied.
    pub fn add_robot(&mut self, pos: Position, robot: RobotId) -> bool {
        match self.get_cell_mut(pos) {
            Ok(cell) => cell.place_robot(robot),
            Err(_)   => false,
        }
    }

    /// Remove and return the robot at `pos`.
    pub fn remove_robot(&mut self, pos: Position) -> Option<RobotId> {
        self.get_cell_mut(pos).ok()?.take_robot()
    }

    /// Put `package` on the cell at `pos`.  `false` if off-grid, the cell is
    /// full, or the package is already there.
    pub fn add_package(&mut self, pos: Position, package: PackageId) -> bool {
        match self.get_cell_mut(pos) {
            Ok(cell) => cell.push_package(package),
            Err(_)   => false,
        }
    }

    /// Remove a specific package from `pos`.
    pub fn remove_package(&mut self, pos: Position, package: PackageId) -> bool {
        match self.get_cell_mut(pos) {
            Ok(cell) => cell.remove_package(package),
            Err(_)   => false,
        }
    }

    /// Remove the oldest package resting at `pos` (FIFO).
    pub fn pop_package(&mut self, pos: Position) -> Option<PackageId> {
        self.get_cell_mut(pos).ok()?.pop_oldest_package()
    }

    /// Place `goal` at `pos`.  `false` if off-grid or a goal is already there.
    pub fn add_goal(&mut self, pos: Position, goal: GoalId) -> bool {
        match self.get_cell_mut(pos) {
            Ok(cell) => cell.place_goal(goal),
            Err(_)   => false,
        }
    }

    /// Remove and return the goal at `pos`.
    pub fn remove_goal(&mut self, pos: Position) -> Option<GoalId> {
        self.get_cell_mut(pos).ok()?.take_goal()
    }

    /// Override the package capacity of one cell.  The cap may not drop below
    /// the packages already resting there.
    pub fn set_max_load(&mut self, pos: Position, max_load: usize) -> GridResult<()> {
        let cell = self.get_cell_mut(pos)?;
        if !cell.set_max_load(max_load) {
            return Err(GridError::Validation {
                cell:   pos,
                reason: format!("{} package(s) already exceed max_load {max_load}", cell.packages().len()),
            });
        }
        Ok(())
    }

    /// Clear every occupant grid-wide.  Connections and capacities are kept.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }
}
