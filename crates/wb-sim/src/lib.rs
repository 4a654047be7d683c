//! `wb-sim`: the warehouse scheduler.
//!
//! # Tick loop
//!
//! ```text
//! for robot in ascending RobotId order:
//!   ① Skip:      robots switched `Off` are left alone.
//!   ② Assign:    a robot with an empty path gets a task:
//!                   carrying → nearest goal
//!                   empty    → nearest package (+ chained pickups) → nearest goal
//!                 targeted packages are reserved immediately.
//!   ③ Move:      peek the next waypoint:
//!                   broken connection → drop the task, release reservations
//!                   occupied          → Idle, block counter += 1 (maybe agitated)
//!                   own cell          → consume waypoint, Idle
//!                   free              → move, Active, block counter = 0
//!   ④ Interact:  load packages on the new cell, then unload at a goal.
//! ```
//!
//! Each robot finishes all four steps before the next one starts, so a
//! lower-id robot always claims a contested cell first.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wb_grid::load_map_json;
//! use wb_sim::{NoopObserver, SimBuilder};
//!
//! let map = load_map_json("warehouse.json".as_ref())?;
//! let mut sim = SimBuilder::from_map(map)?.build()?;
//! sim.check_ready()?;
//! sim.run_ticks(100, &mut NoopObserver)?;
//! ```

pub mod assign;
pub mod builder;
pub mod config;
pub mod error;
pub mod movement;
pub mod observer;
pub mod sim;


pub use assign::Assignment;
pub use builder::SimBuilder;
pub use config::{load_config_json, load_config_reader};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
