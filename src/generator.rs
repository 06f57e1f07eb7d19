//! Hunt-and-Kill maze generation.
//!
//! Generation alternates two phases until every cell has been visited:
//! - the walk, a random walk that carves into unvisited neighbours until it gets stuck;
//! - the hunt, a raster scan for the first unvisited cell bordering visited territory, which is
//!   joined to one of its visited neighbours and becomes the start of the next walk.
//!
//! All randomness comes from the generator handed in by the caller, and the hunt always scans
//! row-major, so a seeded generator reproduces the same maze.

use rand::{seq::IndexedRandom as _, Rng};
use tracing::{debug, trace};

use crate::grid::{Direction, Grid, Position};

/// Carves a spanning tree into a freshly allocated grid and returns the random start cell.
///
/// The grid is expected to be fully walled with no visited cell, as returned by [`Grid::new`].
pub(crate) fn hunt_and_kill<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Position {
    let start = Position::new(
        rng.random_range(0..grid.width()),
        rng.random_range(0..grid.height()),
    );
    grid.mark_visited(start);

    let mut cursor = Some(start);
    let mut hunts = 0_usize;
    while let Some(from) = cursor {
        let _ = walk(grid, from, rng);
        cursor = hunt(grid, rng);
        if cursor.is_some() {
            hunts += 1;
        }
    }

    debug!(
        width = grid.width(),
        height = grid.height(),
        start.x,
        start.y,
        hunts,
        "maze carved"
    );

    start
}

/// Directions from `position` leading to in-bounds cells whose visited flag equals `visited`.
fn neighbours(grid: &Grid, position: Position, visited: bool) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&direction| {
            let next = position.step(direction);
            grid.is_in_bounds(next) && grid.is_visited(next) == visited
        })
        .collect()
}

/// Random walk phase.
///
/// Keeps stepping into a uniformly chosen unvisited neighbour, opening the wall behind it, until
/// the current cell has no unvisited neighbour left. Returns the cell the walk got stuck on.
fn walk<R: Rng + ?Sized>(grid: &mut Grid, from: Position, rng: &mut R) -> Position {
    let mut current = from;
    while let Some(&direction) = neighbours(grid, current, false).choose(rng) {
        let opened = grid.remove_wall(current, direction);
        debug_assert!(opened, "walk carved through an already open edge");
        current = current.step(direction);
        grid.mark_visited(current);
    }
    trace!(current.x, current.y, "walk stuck");
    current
}

/// Hunt phase.
///
/// Scans the grid row-major for the first unvisited cell with at least one visited neighbour,
/// connects it to one of those neighbours chosen at random and returns it. Returns `None` once no
/// such cell exists, which only happens when every cell is visited.
fn hunt<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<Position> {
    let (found, direction) = grid.positions().find_map(|position| {
        if grid.is_visited(position) {
            return None;
        }
        neighbours(grid, position, true)
            .choose(rng)
            .map(|&direction| (position, direction))
    })?;

    let opened = grid.remove_wall(found, direction);
    debug_assert!(opened, "hunt joined an already open edge");
    grid.mark_visited(found);
    trace!(found.x, found.y, "hunt found a cell");

    Some(found)
}
