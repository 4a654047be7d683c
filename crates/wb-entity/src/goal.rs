//! Delivery goal record.

use wb_core::{GoalId, PackageId, Position};

#[derive(Clone, Debug)]
pub struct Goal {
    pub id:       GoalId,
    pub position: Position,
    delivered_count: usize,
    delivered:       Vec<PackageId>,
}

impl Goal {
    pub fn new(id: GoalId, position: Position) -> Self {
        Self { id, position, delivered_count: 0, delivered: Vec::new() }
    }

    /// Record one delivered package.
    pub fn accept(&mut self, package: PackageId) {
        self.delivered.push(package);
        self.delivered_count += 1;
    }

    #[inline]
    pub fn delivered_count(&self) -> usize {
        self.delivered_count
    }

    /// Every package handed over, in arrival order.
    #[inline]
    pub fn delivered(&self) -> &[PackageId] {
        &self.delivered
    }
}
