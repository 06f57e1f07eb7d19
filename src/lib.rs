//! Perfect maze generation with a fog of war.
//!
//! This crate carves perfect mazes (every cell reachable through exactly one simple path) with the
//! Hunt-and-Kill algorithm, places the exit on the cell farthest from the start and keeps track of
//! which cells an agent walking through the maze can currently see.
//!
//! The [`Maze`] owns its grid and only exposes read accessors plus [`Maze::update_visibility`], so
//! nothing outside of generation can alter the walls. [`Session`] layers a play-through on top of it
//! and [`App`] drives a session from the command line.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod agents;
mod app;
mod config;
mod events;
mod generator;
mod grid;
pub mod logging;
mod maze;
pub mod pathfinding;
mod session;
mod visibility;

pub use agents::{Agent, RandomAgent, SolverAgent};
pub use app::{App, Summary};
pub use config::{AgentKind, Config, DEFAULT_MAX_STEPS, DEFAULT_MAZE_SIZE};
pub use events::{parse_command, Command};
pub use grid::{CellState, Direction, Grid, MazeError, Position};
pub use maze::Maze;
pub use session::{MoveOutcome, Observation, ObservedCell, Session};
