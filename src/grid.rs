//! Grid model module.
//!
//! This module contains the per-cell flag set, the rectangular lattice that stores it and the small
//! coordinate types used to address it. Every query on the lattice is total: positions outside of
//! it answer with closed-world defaults instead of failing.

use thiserror::Error;

/// Cardinal directions a cell can be left through.
///
/// The order of [`Direction::ALL`] is the fixed visitation order used by both generation and the
/// breadth-first searches, so changing it changes which mazes and exits a given seed produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards `y - 1`.
    North,
    /// Towards `x + 1`.
    East,
    /// Towards `y + 1`.
    South,
    /// Towards `x - 1`.
    West,
}

impl Direction {
    /// All directions in visitation order: north, east, south, west.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the `(dx, dy)` offset of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Returns the direction pointing back across the same edge.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Returns the wall flag guarding this side of a cell.
    #[must_use]
    pub const fn wall(self) -> CellState {
        match self {
            Self::North => CellState::NORTH,
            Self::East => CellState::EAST,
            Self::South => CellState::SOUTH,
            Self::West => CellState::WEST,
        }
    }

    /// Returns the lowercase name of the direction.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }

    /// Extracts a direction from a free-form move suggestion.
    ///
    /// The text is lowercased and searched for the direction names in the priority order north,
    /// east, south, west; the first name contained anywhere in the text wins. When none is
    /// contained, the first whitespace-separated word is tried as an exact name. This is what lets
    /// loosely formatted suggestions such as `"I'd go North."` resolve to a move.
    #[must_use]
    pub fn from_suggestion(text: &str) -> Option<Self> {
        let text = text.trim().to_lowercase();

        Self::ALL
            .into_iter()
            .find(|direction| text.contains(direction.name()))
            .or_else(|| {
                let first_word = text.split_whitespace().next()?;
                Self::ALL
                    .into_iter()
                    .find(|direction| direction.name() == first_word)
            })
    }
}

/// Signed lattice coordinate with `(0, 0)` at the top-left corner.
///
/// Coordinates are signed so that stepping one cell past the edge of the lattice is representable;
/// such positions are simply reported as out of bounds by the [`Grid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column, growing eastwards.
    pub x: i32,
    /// Row, growing southwards.
    pub y: i32,
}

impl Position {
    /// Builds a position from its column and row.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position one step away in `direction`.
    ///
    /// The result is not bounds-checked. Saturating arithmetic keeps it well defined at the
    /// extremes of `i32`, where it is out of bounds of any grid anyway.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Returns the Manhattan distance between two positions.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Bit-packed state of a single cell.
///
/// The low nibble stores one wall flag per side, the next two bits record whether generation has
/// visited the cell and whether the cell is currently visible. No other bits are ever set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellState(u8);

impl CellState {
    /// Wall on the northern side.
    pub const NORTH: Self = Self(0b1000);
    /// Wall on the eastern side.
    pub const EAST: Self = Self(0b0100);
    /// Wall on the southern side.
    pub const SOUTH: Self = Self(0b0010);
    /// Wall on the western side.
    pub const WEST: Self = Self(0b0001);
    /// All four walls.
    pub const ALL_WALLS: Self = Self(0b1111);
    /// Set once generation has carved into the cell.
    pub const VISITED: Self = Self(0b1_0000);
    /// Set while the cell is observable by the agent.
    pub const VISIBLE: Self = Self(0b10_0000);
    /// No flag at all.
    pub const EMPTY: Self = Self(0);

    /// Returns the raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns whether every flag of `other` is also set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns only the wall flags of this state.
    #[must_use]
    pub const fn walls(self) -> Self {
        Self(self.0 & Self::ALL_WALLS.0)
    }

    /// Sets the flags of `other`.
    const fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clears the flags of `other`.
    const fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::ALL_WALLS
    }
}

/// Failure raised when a maze cannot be built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// The requested lattice is empty or too large to be addressed.
    #[error("invalid maze dimensions {width}x{height}: both sides must be positive and their product must fit in an i32")]
    InvalidDimensions {
        /// Requested number of columns.
        width: i32,
        /// Requested number of rows.
        height: i32,
    },
}

/// Rectangular lattice of [`CellState`] values stored row-major.
///
/// Every query is total: positions outside the lattice are answered as fully walled, unvisited and
/// invisible rather than rejected. Walls are kept on both sides of an edge, and the crate only
/// removes them in pairs, so the two views of an edge always agree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns, always positive.
    width: i32,
    /// Number of rows, always positive.
    height: i32,
    /// Row-major cell storage of `width * height` entries.
    cells: Vec<CellState>,
}

impl Grid {
    /// Allocates a lattice with every wall present and no visited or visible cell.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if either side is not positive or if the number of
    /// cells does not fit in an `i32`.
    pub fn new(width: i32, height: i32) -> Result<Self, MazeError> {
        let invalid = MazeError::InvalidDimensions { width, height };
        if width <= 0 || height <= 0 {
            return Err(invalid);
        }
        let count = width.checked_mul(height).ok_or(invalid)?;
        let count = usize::try_from(count).map_err(|_err| MazeError::InvalidDimensions {
            width,
            height,
        })?;

        Ok(Self {
            width,
            height,
            cells: vec![CellState::ALL_WALLS; count],
        })
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Returns whether `position` lies on the lattice.
    #[must_use]
    pub const fn is_in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// Maps an in-bounds position to its storage index.
    fn index(&self, position: Position) -> Option<usize> {
        if !self.is_in_bounds(position) {
            return None;
        }
        usize::try_from(position.y * self.width + position.x).ok()
    }

    /// Returns the full state of the cell at `position`, if any.
    ///
    /// This is the only accessor that tells an out-of-bounds position apart from a walled cell.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<CellState> {
        self.index(position)
            .and_then(|index| self.cells.get(index))
            .copied()
    }

    /// Returns a mutable handle on the cell at `position`, if any.
    fn cell_mut(&mut self, position: Position) -> Option<&mut CellState> {
        let index = self.index(position)?;
        self.cells.get_mut(index)
    }

    /// Returns whether the side `direction` of the cell at `position` is walled.
    ///
    /// Out-of-bounds positions are always walled.
    #[must_use]
    pub fn has_wall(&self, position: Position, direction: Direction) -> bool {
        self.cell(position)
            .is_none_or(|cell| cell.contains(direction.wall()))
    }

    /// Returns the wall mask of the cell at `position`, or all walls when out of bounds.
    #[must_use]
    pub fn walls_of(&self, position: Position) -> CellState {
        self.cell(position)
            .map_or(CellState::ALL_WALLS, CellState::walls)
    }

    /// Returns whether generation has reached the cell at `position`.
    #[must_use]
    pub fn is_visited(&self, position: Position) -> bool {
        self.cell(position)
            .is_some_and(|cell| cell.contains(CellState::VISITED))
    }

    /// Returns whether the cell at `position` is currently visible; `false` when out of bounds.
    #[must_use]
    pub fn is_visible(&self, position: Position) -> bool {
        self.cell(position)
            .is_some_and(|cell| cell.contains(CellState::VISIBLE))
    }

    /// Iterates over every position in raster order: row by row, west to east.
    ///
    /// The iterator only copies the dimensions, so the grid may be mutated while positions collected
    /// from an earlier call are being processed. The hunt phase of generation relies on this order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Counts the pairs of neighbouring cells with no wall between them.
    ///
    /// Only the eastern and southern side of each cell is inspected so that every edge is counted
    /// once.
    #[must_use]
    pub fn open_adjacencies(&self) -> usize {
        self.positions()
            .map(|position| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&direction| {
                        self.is_in_bounds(position.step(direction))
                            && !self.has_wall(position, direction)
                    })
                    .count()
            })
            .sum()
    }

    /// Clears the wall between `from` and its neighbour in `direction`, on both sides of the edge.
    ///
    /// Nothing happens unless both cells are on the lattice, so a wall can never be opened on a
    /// single side. Returns whether the edge was walled before the call.
    pub(crate) fn remove_wall(&mut self, from: Position, direction: Direction) -> bool {
        let to = from.step(direction);
        if !self.is_in_bounds(from) || !self.is_in_bounds(to) {
            return false;
        }
        let was_walled = self.has_wall(from, direction);

        if let Some(cell) = self.cell_mut(from) {
            cell.remove(direction.wall());
        }
        if let Some(cell) = self.cell_mut(to) {
            cell.remove(direction.opposite().wall());
        }

        was_walled
    }

    /// Flags the cell at `position` as visited by generation.
    pub(crate) fn mark_visited(&mut self, position: Position) {
        if let Some(cell) = self.cell_mut(position) {
            cell.insert(CellState::VISITED);
        }
    }

    /// Flags the cell at `position` as visible; a no-op when out of bounds.
    pub(crate) fn mark_visible(&mut self, position: Position) {
        if let Some(cell) = self.cell_mut(position) {
            cell.insert(CellState::VISIBLE);
        }
    }

    /// Clears the visible flag of every cell.
    pub(crate) fn reset_visibility(&mut self) {
        for cell in &mut self.cells {
            cell.remove(CellState::VISIBLE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_fully_walled() {
        let grid = Grid::new(3, 2).expect("3x2 is a valid grid");

        for position in grid.positions() {
            assert_eq!(grid.walls_of(position), CellState::ALL_WALLS);
            assert!(!grid.is_visited(position));
            assert!(!grid.is_visible(position));
        }
        assert_eq!(grid.open_adjacencies(), 0);
    }

    #[test]
    fn test_new_grid_rejects_bad_dimensions() {
        assert_eq!(
            Grid::new(0, 4),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(Grid::new(4, -1).is_err());
        assert!(Grid::new(i32::MAX, 2).is_err());
    }

    #[test]
    fn test_out_of_bounds_defaults() {
        let grid = Grid::new(4, 4).expect("4x4 is a valid grid");

        assert!(grid.has_wall(Position::new(5, 5), Direction::North));
        assert!(grid.has_wall(Position::new(-1, 0), Direction::East));
        assert_eq!(grid.walls_of(Position::new(4, 0)), CellState::ALL_WALLS);
        assert!(!grid.is_visible(Position::new(-1, 0)));
        assert!(!grid.is_in_bounds(Position::new(0, 4)));
        assert!(grid.is_in_bounds(Position::new(3, 3)));
    }

    #[test]
    fn test_cell_tells_out_of_bounds_from_walled() {
        let grid = Grid::new(2, 2).expect("2x2 is a valid grid");

        assert_eq!(grid.cell(Position::new(1, 1)), Some(CellState::ALL_WALLS));
        assert_eq!(grid.cell(Position::new(2, 1)), None);
        assert_eq!(grid.cell(Position::new(0, -1)), None);
    }

    #[test]
    fn test_positions_survive_mutation() {
        let mut grid = Grid::new(3, 2).expect("3x2 is a valid grid");

        for position in grid.clone().positions() {
            grid.mark_visited(position);
            let _ = grid.remove_wall(position, Direction::East);
        }

        assert!(grid.positions().all(|position| grid.is_visited(position)));
        assert_eq!(grid.open_adjacencies(), 4);
    }

    #[test]
    fn test_remove_wall_clears_both_sides() {
        let mut grid = Grid::new(2, 2).expect("2x2 is a valid grid");
        let origin = Position::new(0, 1);

        assert!(grid.remove_wall(origin, Direction::North));
        assert!(!grid.has_wall(origin, Direction::North));
        assert!(!grid.has_wall(Position::new(0, 0), Direction::South));
        assert!(grid.has_wall(origin, Direction::East));
        assert_eq!(grid.open_adjacencies(), 1);

        assert!(!grid.remove_wall(origin, Direction::North));
        assert_eq!(grid.open_adjacencies(), 1);
    }

    #[test]
    fn test_remove_wall_refuses_the_border() {
        let mut grid = Grid::new(2, 2).expect("2x2 is a valid grid");

        assert!(!grid.remove_wall(Position::new(0, 0), Direction::West));
        assert!(!grid.remove_wall(Position::new(1, 1), Direction::South));
        assert!(grid.has_wall(Position::new(0, 0), Direction::West));
        assert_eq!(grid.walls_of(Position::new(1, 1)), CellState::ALL_WALLS);
    }

    #[test]
    fn test_visibility_flags() {
        let mut grid = Grid::new(2, 1).expect("2x1 is a valid grid");

        grid.mark_visible(Position::new(1, 0));
        grid.mark_visible(Position::new(7, 7));
        assert!(grid.is_visible(Position::new(1, 0)));
        assert!(!grid.is_visible(Position::new(0, 0)));
        assert_eq!(grid.walls_of(Position::new(1, 0)), CellState::ALL_WALLS);

        grid.reset_visibility();
        assert!(!grid.is_visible(Position::new(1, 0)));
    }

    #[test]
    fn test_positions_are_row_major() {
        let grid = Grid::new(2, 2).expect("2x2 is a valid grid");
        let positions: Vec<Position> = grid.positions().collect();

        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_direction_helpers() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.wall(), direction.opposite().wall());
            assert_eq!(Position::new(3, 3).step(direction).manhattan(Position::new(3, 3)), 1);
        }
        assert_eq!(Position::new(0, 0).step(Direction::North), Position::new(0, -1));
    }

    #[test]
    fn test_direction_from_suggestion() {
        assert_eq!(Direction::from_suggestion("north"), Some(Direction::North));
        assert_eq!(
            Direction::from_suggestion("  I would go WEST now "),
            Some(Direction::West)
        );
        assert_eq!(
            Direction::from_suggestion("south, or maybe east"),
            Some(Direction::East)
        );
        assert_eq!(Direction::from_suggestion("up"), None);
        assert_eq!(Direction::from_suggestion(""), None);
    }

    #[test]
    fn test_cell_state_bits() {
        let mut cell = CellState::default();
        cell.insert(CellState::VISITED);
        cell.remove(CellState::EAST);

        assert_eq!(cell.bits(), 0b1_1011);
        assert_eq!(cell.walls().bits(), 0b1011);
        assert!(cell.contains(CellState::VISITED));
        assert!(!cell.contains(CellState::VISIBLE));
    }
}
