//! Game session module.
//!
//! This module contains the state of a single play-through: the maze, where the agent stands, how
//! many steps it took and whether it has reached the exit. Every move is validated against the walls
//! of the maze and refreshes the fog of war.

use tracing::{info, trace};

use crate::{
    grid::{CellState, Direction, Position},
    maze::Maze,
};

/// Result of a move request.
///
/// Only [`MoveOutcome::Moved`] and [`MoveOutcome::Solved`] change the session; the other two
/// outcomes leave position, step count and history as they were.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The agent stepped into the neighbouring cell.
    Moved,
    /// A wall stands in the requested direction; nothing changed.
    Blocked,
    /// The agent stepped onto the exit.
    Solved,
    /// The maze was already solved; nothing changed.
    AlreadySolved,
}

/// Description of a cell as seen by the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObservedCell {
    /// Where the cell is.
    pub position: Position,
    /// Wall flags of the cell.
    ///
    /// Only the four wall bits are kept, generation and visibility flags are stripped.
    pub walls: CellState,
    /// Whether the cell is the start of the maze.
    pub is_start: bool,
    /// Whether the cell is the exit of the maze.
    pub is_exit: bool,
}

/// What the agent can observe from where it stands.
///
/// This is the information handed to move-suggestion sources: the current cell first, followed by
/// every neighbour reachable without crossing a wall, in north, east, south, west order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Cell the agent stands on.
    pub current: ObservedCell,
    /// Openly adjacent cells.
    pub neighbours: Vec<ObservedCell>,
}

/// A single play-through of a maze.
#[derive(Clone, Debug)]
pub struct Session {
    /// Maze being played.
    maze: Maze,
    /// Cell the agent currently stands on.
    position: Position,
    /// Number of successful moves.
    steps: u32,
    /// Positions occupied so far.
    ///
    /// This field starts with the start cell and receives one entry per successful move, so a cell
    /// entered twice appears twice. Blocked moves leave it untouched.
    history: Vec<Position>,
    /// Whether the agent has reached the exit.
    solved: bool,
}

impl Session {
    /// Starts a session with the agent on the start cell of `maze`.
    ///
    /// A one-cell maze, whose start is also its exit, starts solved.
    #[must_use]
    pub fn new(mut maze: Maze) -> Self {
        let position = maze.start();
        maze.update_visibility(position);

        Self {
            solved: position == maze.exit(),
            maze,
            position,
            steps: 0,
            history: vec![position],
        }
    }

    /// Returns the maze being played.
    #[must_use]
    pub const fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Returns the cell the agent currently stands on.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the number of successful moves so far.
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// Returns every position occupied so far, oldest first.
    ///
    /// Revisited cells are listed again each time they are entered, which makes the history a
    /// faithful replay of the walk rather than a set of explored cells.
    #[must_use]
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Returns whether the agent has reached the exit.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    /// Returns the directions the agent can currently move in, in north, east, south, west order.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| !self.maze.has_wall(self.position, direction))
            .collect()
    }

    /// Returns the Manhattan distance between the agent and the exit.
    #[must_use]
    pub const fn manhattan_to_exit(&self) -> u32 {
        self.position.manhattan(self.maze.exit())
    }

    /// Attempts to move the agent one cell towards `direction`.
    ///
    /// The move only happens when no wall stands in the way. On success the step counter grows,
    /// the position is appended to the history and the fog of war is recomputed.
    pub fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.solved {
            return MoveOutcome::AlreadySolved;
        }
        if self.maze.has_wall(self.position, direction) {
            trace!(?direction, x = self.position.x, y = self.position.y, "move blocked");
            return MoveOutcome::Blocked;
        }

        self.position = self.position.step(direction);
        self.steps += 1;
        self.history.push(self.position);
        self.maze.update_visibility(self.position);
        trace!(?direction, x = self.position.x, y = self.position.y, "moved");

        if self.position == self.maze.exit() {
            self.solved = true;
            info!(steps = self.steps, "maze solved");
            return MoveOutcome::Solved;
        }

        MoveOutcome::Moved
    }

    /// Describes what the agent can observe from its current cell.
    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation {
            current: self.observe(self.position),
            neighbours: self
                .legal_moves()
                .into_iter()
                .map(|direction| self.position.step(direction))
                .filter(|&position| self.maze.is_in_bounds(position))
                .map(|position| self.observe(position))
                .collect(),
        }
    }

    /// Describes a single cell.
    fn observe(&self, position: Position) -> ObservedCell {
        ObservedCell {
            position,
            walls: self.maze.walls_of(position),
            is_start: position == self.maze.start(),
            is_exit: position == self.maze.exit(),
        }
    }
}
