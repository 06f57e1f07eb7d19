//! Move decision sources.
//!
//! An [`Agent`] looks at a [`Session`] and proposes the next direction to move in. The session stays
//! in charge of validating the move, so an agent is free to propose a blocked direction.

use rand::{seq::IndexedRandom as _, Rng};

use crate::{grid::Direction, pathfinding, session::Session};

/// Source of move decisions.
pub trait Agent {
    /// Proposes the next move, or `None` to give up.
    fn next_move(&mut self, session: &Session) -> Option<Direction>;
}

/// Mechanical solver walking the shortest path to the exit.
///
/// The path is recomputed from the current position on every call, so the solver recovers from
/// moves it did not choose itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolverAgent;

impl Agent for SolverAgent {
    fn next_move(&mut self, session: &Session) -> Option<Direction> {
        let maze = session.maze();
        let path = pathfinding::shortest_path(maze.grid(), session.position(), maze.exit())?;
        let next = *path.get(1)?;

        Direction::ALL
            .into_iter()
            .find(|&direction| session.position().step(direction) == next)
    }
}

/// Agent picking uniformly among the legal moves.
#[derive(Clone, Debug)]
pub struct RandomAgent<R> {
    /// Source of randomness.
    rng: R,
}

impl<R: Rng> RandomAgent<R> {
    /// Wraps a random number generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn next_move(&mut self, session: &Session) -> Option<Direction> {
        session.legal_moves().choose(&mut self.rng).copied()
    }
}
