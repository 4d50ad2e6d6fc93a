//! Command-line configuration for the simulation.
//!
//! This module collects and validates every precondition the core assumes satisfied: dimensions
//! large enough for meaningful border semantics, a density within `[0, 1]`, and the worker
//! cadences. Invalid values are rejected here, before any worker starts.

use std::time::Duration;

use clap::Parser;

/// Upper bound on either room dimension.
///
/// Keeps the rendered room within plausible terminal sizes and the cell-doubling width
/// arithmetic comfortably inside `u16`.
const MAX_DIMENSION: i64 = 500;

/// Validated command-line configuration for one simulation run.
#[derive(Clone, Copy, Debug, Parser)]
#[command(about = "Secure room simulation: concurrent maze generation and pathfinding.")]
pub struct Config {
    /// Number of rows in the room.
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u16).range(3..=MAX_DIMENSION))]
    pub rows: u16,

    /// Number of columns in the room.
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u16).range(3..=MAX_DIMENSION))]
    pub cols: u16,

    /// Target probability that an eligible cell becomes open, within [0, 1].
    #[arg(long, default_value_t = 0.5, value_parser = parse_density)]
    pub density: f64,

    /// Sleep interval between generation passes, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub generation_interval_ms: u64,

    /// Sleep interval between search passes, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub search_interval_ms: u64,

    /// Report worker passes while the grid lock is held instead of from a snapshot.
    #[arg(long)]
    pub render_while_locked: bool,
}

impl Config {
    /// Returns the generation worker cadence.
    pub const fn generation_cadence(&self) -> Duration {
        Duration::from_millis(self.generation_interval_ms)
    }

    /// Returns the search worker cadence.
    pub const fn search_cadence(&self) -> Duration {
        Duration::from_millis(self.search_interval_ms)
    }
}

/// Parses and validates the open-cell density.
fn parse_density(input: &str) -> Result<f64, String> {
    let value: f64 = input
        .parse()
        .map_err(|err| format!("not a number: {err}"))?;

    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("density must be within [0, 1], got {value}"))
    }
}
