//! `wb-entity`: the things that live on the grid.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`robot`]   | `Robot`, `RobotStatus`, `StatusTimes`                       |
//! | [`package`] | `Package`, `PackageState`                                   |
//! | [`goal`]    | `Goal`                                                      |
//! | [`store`]   | `EntityStore`, id-keyed ownership + nearest-neighbour queries |
//!
//! All entity state is owned by one `EntityStore` per simulation; there are
//! no type-level shared lists.  Cells in `wb-grid` refer to entities by id.

pub mod goal;
pub mod package;
pub mod robot;
pub mod store;

#[cfg(test)]
mod tests;

pub use goal::Goal;
pub use package::{Package, PackageState};
pub use robot::{Robot, RobotStatus, StatusTimes};
pub use store::EntityStore;
