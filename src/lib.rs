//! Terminal secure-room simulation with concurrent maze generation and pathfinding.
//!
//! The simulation models a bounded 2-D grid, the "secure room", that a generation worker
//! periodically regenerates into a new constrained random configuration while an
//! independently-paced search worker looks for a traversable path between the entry and exit
//! markers. A single mutex guards the shared grid so neither worker ever observes a
//! partially-updated room; the terminal front end renders each completed pass and handles the
//! quit key.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod app;
pub mod cli;
pub mod coordinator;
mod events;
pub mod generator;
pub mod grid;
pub mod pathfinding;
mod ui;

pub use app::App;
