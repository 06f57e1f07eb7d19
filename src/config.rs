//! Command line configuration.

use clap::{Parser, ValueEnum};

/// Default number of cells per side.
pub const DEFAULT_MAZE_SIZE: i32 = 15;

/// Default cap on the number of moves played by an automated agent.
pub const DEFAULT_MAX_STEPS: u32 = 10_000;

/// Who decides the moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    /// Moves are read from standard input.
    #[default]
    Human,
    /// Moves follow the shortest path to the exit.
    Solver,
    /// Moves are drawn at random among the legal ones.
    Random,
}

/// Fog-of-war maze explorer.
///
/// Carves a perfect maze with Hunt-and-Kill, places the exit on the cell farthest from the start
/// and lets a player or an automated agent find its way out while only seeing its surroundings.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Number of columns.
    #[arg(long, default_value_t = DEFAULT_MAZE_SIZE)]
    pub width: i32,

    /// Number of rows.
    #[arg(long, default_value_t = DEFAULT_MAZE_SIZE)]
    pub height: i32,

    /// Seed for a reproducible maze; a fresh one is drawn when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Who plays.
    #[arg(long, value_enum, default_value_t = AgentKind::Human)]
    pub agent: AgentKind,

    /// Maximum number of moves before an automated agent gives up.
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: u32,
}
