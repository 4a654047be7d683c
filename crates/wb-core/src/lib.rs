//! `wb-core`: foundational types for the warebots simulation.
//!
//! This crate is a dependency of every other `wb-*` crate.  It has no `wb-*`
//! dependencies and a single required external one (`thiserror`), plus
//! optional `serde`.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `RobotId`, `PackageId`, `GoalId`                      |
//! | [`position`]    | `Position`, grid distance helpers                     |
//! | [`metric`]      | `DistanceMetric` for nearest-neighbour comparisons    |
//! | [`algorithm`]   | `Algorithm`, pathfinding algorithm selector          |
//! | [`time`]        | `Tick`                                                |
//! | [`config`]      | `SimConfig`                                           |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod algorithm;
pub mod config;
pub mod error;
pub mod ids;
pub mod metric;
pub mod position;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use algorithm::Algorithm;
pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{GoalId, PackageId, RobotId};
pub use metric::DistanceMetric;
pub use position::Position;
pub use time::Tick;
