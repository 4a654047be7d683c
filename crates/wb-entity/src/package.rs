//! Package record.

use wb_core::{GoalId, PackageId, Position, RobotId};

/// Where a package is in its life.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum PackageState {
    /// On the grid and free to be assigned.
    #[default]
    Waiting,
    /// On the grid, promised to a robot that is on its way.
    Reserved(RobotId),
    /// On board a robot.
    Carried(RobotId),
    /// Handed over to a goal.
    Delivered(GoalId),
}

#[derive(Clone, Debug)]
pub struct Package {
    pub id:       PackageId,
    /// Resting cell, or the carrier's cell while carried.
    pub position: Position,
    state:        PackageState,
}

impl Package {
    pub fn new(id: PackageId, position: Position) -> Self {
        Self { id, position, state: PackageState::Waiting }
    }

    #[inline]
    pub fn state(&self) -> PackageState {
        self.state
    }

    /// Eligible as a nearest-package pick: on the grid and not reserved.
    #[inline]
    pub fn is_searchable(&self) -> bool {
        self.state == PackageState::Waiting
    }

    /// `true` while on board a robot.
    #[inline]
    pub fn is_moving(&self) -> bool {
        matches!(self.state, PackageState::Carried(_))
    }

    /// `true` if `robot` may pick this package up.
    pub fn is_available_to(&self, robot: RobotId) -> bool {
        match self.state {
            PackageState::Waiting        => true,
            PackageState::Reserved(by)   => by == robot,
            PackageState::Carried(_)
            | PackageState::Delivered(_) => false,
        }
    }

    /// Promise the package to `robot`.  Only a waiting package can be reserved.
    pub fn reserve(&mut self, robot: RobotId) -> bool {
        if self.state != PackageState::Waiting {
            return false;
        }
        self.state = PackageState::Reserved(robot);
        true
    }

    /// Undo a reservation.  No effect in any other state.
    pub fn release(&mut self) {
        if let PackageState::Reserved(_) = self.state {
            self.state = PackageState::Waiting;
        }
    }

    pub(crate) fn pick_up(&mut self, robot: RobotId) {
        self.state = PackageState::Carried(robot);
    }

    /// Put a carried package back on the grid at `pos`.
    pub fn drop_at(&mut self, pos: Position) {
        self.position = pos;
        self.state = PackageState::Waiting;
    }

    pub fn deliver(&mut self, goal: GoalId) {
        self.state = PackageState::Delivered(goal);
    }
}
