//! Maze container module.
//!
//! This module contains the [`Maze`] type, which owns a carved [`Grid`] together with its start and
//! exit cells. Once built, the only state that can change is the fog of war.

use rand::{rngs::StdRng, Rng, SeedableRng as _};
use tracing::debug;

use crate::{
    generator,
    grid::{CellState, Direction, Grid, MazeError, Position},
    pathfinding, visibility,
};

/// Perfect maze with a start, an exit and a fog of war.
///
/// Every cell is reachable from every other one through exactly one simple path. The exit is the
/// cell farthest from the start along that path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// Carved lattice, exclusively owned.
    grid: Grid,
    /// Cell chosen at random when the maze was carved.
    start: Position,
    /// Cell farthest from the start.
    exit: Position,
}

impl Maze {
    /// Builds a maze using the thread-local, process-seeded generator.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if either side is not positive or if the lattice is
    /// too large.
    pub fn new(width: i32, height: i32) -> Result<Self, MazeError> {
        Self::with_rng(width, height, &mut rand::rng())
    }

    /// Builds a reproducible maze from a seed.
    ///
    /// The same seed and dimensions always yield the same walls, start and exit.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] under the same conditions as [`Maze::new`].
    pub fn from_seed(width: i32, height: i32, seed: u64) -> Result<Self, MazeError> {
        Self::with_rng(width, height, &mut StdRng::seed_from_u64(seed))
    }

    /// Builds a maze drawing every random choice from `rng`.
    ///
    /// Dimensions are validated before `rng` is touched. The grid is then carved with Hunt-and-Kill
    /// and the exit is placed on the cell with the largest breadth-first distance from the start.
    /// Visibility is finally computed for an agent standing on the start cell.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] under the same conditions as [`Maze::new`].
    pub fn with_rng<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        let mut grid = Grid::new(width, height)?;
        let start = generator::hunt_and_kill(&mut grid, rng);
        let (exit, distance) = pathfinding::farthest_from(&grid, start);
        debug!(exit.x, exit.y, distance, "exit placed");

        let mut maze = Self { grid, start, exit };
        maze.update_visibility(start);
        Ok(maze)
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.grid.width()
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.grid.height()
    }

    /// Returns the start cell.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the exit cell.
    #[must_use]
    pub const fn exit(&self) -> Position {
        self.exit
    }

    /// Returns a read-only view of the carved lattice.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns whether `position` lies inside the maze.
    #[must_use]
    pub const fn is_in_bounds(&self, position: Position) -> bool {
        self.grid.is_in_bounds(position)
    }

    /// Returns whether leaving `position` towards `direction` is blocked.
    ///
    /// Positions outside the maze are always walled in.
    #[must_use]
    pub fn has_wall(&self, position: Position, direction: Direction) -> bool {
        self.grid.has_wall(position, direction)
    }

    /// Returns the wall mask of `position`, or all walls when it lies outside the maze.
    #[must_use]
    pub fn walls_of(&self, position: Position) -> CellState {
        self.grid.walls_of(position)
    }

    /// Returns whether `position` is currently visible; `false` outside the maze.
    #[must_use]
    pub fn is_visible(&self, position: Position) -> bool {
        self.grid.is_visible(position)
    }

    /// Recomputes the fog of war for an agent standing on `agent`.
    ///
    /// See [`visibility::update`] for the exact rules. Only visible flags are touched.
    pub fn update_visibility(&mut self, agent: Position) {
        visibility::update(&mut self.grid, agent, self.exit);
    }

    /// Returns the hop distance between `from` and `to`, if both are inside the maze.
    #[must_use]
    pub fn distance(&self, from: Position, to: Position) -> Option<u32> {
        let path = pathfinding::shortest_path(&self.grid, from, to)?;
        u32::try_from(path.len().saturating_sub(1)).ok()
    }
}
