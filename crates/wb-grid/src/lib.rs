//! `wb-grid`: the cell graph the robots move on.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`cell`]       | `Cell`, `Connection`                                     |
//! | [`grid`]       | `Grid`: cell arena, connections, occupancy              |
//! | [`builder`]    | `GridBuilder`, including the 4-neighbour generator       |
//! | [`descriptor`] | `MapDescriptor` JSON records, `load_map_json`            |
//! | [`error`]      | `GridError`, `GridResult<T>`                             |
//!
//! # Ownership model
//!
//! Every cell lives in one `Vec<Cell>` owned by the `Grid`, indexed by
//! `y * width + x`.  Connections store the destination `Position`, never a
//! reference to the other cell, so back-and-forth links form no ownership
//! cycle.  Occupants are stored as ids; the entity records themselves live in
//! `wb-entity`.

pub mod builder;
pub mod cell;
pub mod descriptor;
pub mod error;
pub mod grid;

#[cfg(test)]
mod tests;

pub use builder::GridBuilder;
pub use cell::{Cell, Connection};
pub use descriptor::{
    load_map_json, load_map_reader, CellRecord, ConnectionRecord, GoalRecord, MapDescriptor,
    PackageRecord, Placements, RobotRecord,
};
pub use error::{GridError, GridResult};
pub use grid::Grid;
