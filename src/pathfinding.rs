//! Breadth-first search over carved passages.
//!
//! This module contains the searches run over the open adjacencies of a [`Grid`]: the hop distance
//! map used to place the exit as far as possible from the start, and the shortest path used by the
//! mechanical solver agent. Neighbours are always expanded in [`Direction::ALL`] order.

use std::collections::VecDeque;

use crate::grid::{Direction, Grid, Position};

/// Storage index of an in-bounds position.
fn slot(grid: &Grid, position: Position) -> Option<usize> {
    if !grid.is_in_bounds(position) {
        return None;
    }
    usize::try_from(position.y * grid.width() + position.x).ok()
}

/// Number of cells in the grid.
fn cell_count(grid: &Grid) -> usize {
    usize::try_from(grid.width() * grid.height()).unwrap_or_default()
}

/// Open neighbours of `position`, in visitation order.
fn passages(grid: &Grid, position: Position) -> impl Iterator<Item = Position> + '_ {
    Direction::ALL
        .into_iter()
        .filter(move |&direction| !grid.has_wall(position, direction))
        .map(move |direction| position.step(direction))
        .filter(|next| grid.is_in_bounds(*next))
}

/// Computes the hop distance from `start` to every cell reachable from it.
///
/// The returned vector is indexed row-major like the grid; unreachable cells hold `None`. When
/// `start` lies outside the grid every entry is `None`.
#[must_use]
pub fn distances_from(grid: &Grid, start: Position) -> Vec<Option<u32>> {
    let mut distances = vec![None; cell_count(grid)];
    let _ = search(grid, start, |position, distance| {
        if let Some(entry) = slot(grid, position).and_then(|index| distances.get_mut(index)) {
            *entry = Some(distance);
        }
    });
    distances
}

/// Finds the cell with the largest hop distance from `start` and returns it with that distance.
///
/// Ties go to the cell dequeued first, which is the first cell at that distance discovered by the
/// search; no further maximum is looked for. A `start` outside the grid is returned as is with
/// distance zero.
#[must_use]
pub fn farthest_from(grid: &Grid, start: Position) -> (Position, u32) {
    let mut farthest = (start, 0);
    let _ = search(grid, start, |position, distance| {
        if distance > farthest.1 {
            farthest = (position, distance);
        }
    });
    farthest
}

/// Finds the shortest sequence of moves leading from `from` to `to`.
///
/// The returned path starts with `from` and ends with `to`. Returns `None` when either end lies
/// outside of the grid or when `to` cannot be reached.
#[must_use]
pub fn shortest_path(grid: &Grid, from: Position, to: Position) -> Option<Vec<Position>> {
    let target = slot(grid, to)?;
    let parents = search(grid, from, |_, _| {})?;

    let mut path = vec![to];
    let mut index = target;
    while let Some(&Some(parent)) = parents.get(index) {
        path.push(parent);
        index = slot(grid, parent)?;
    }

    (path.last() == Some(&from)).then(|| {
        path.reverse();
        path
    })
}

/// Runs the breadth-first traversal shared by every search in this module.
///
/// `visit` is called once per reached cell, in dequeue order, with its hop distance. Returns the
/// parent of every reached cell (the root and unreached cells hold `None`), or `None` if `start`
/// is out of bounds.
fn search<F>(grid: &Grid, start: Position, mut visit: F) -> Option<Vec<Option<Position>>>
where
    F: FnMut(Position, u32),
{
    let root = slot(grid, start)?;
    let mut seen = vec![false; cell_count(grid)];
    let mut parents = vec![None; cell_count(grid)];
    if let Some(flag) = seen.get_mut(root) {
        *flag = true;
    }

    let mut frontier = VecDeque::from([(start, 0_u32)]);
    while let Some((current, distance)) = frontier.pop_front() {
        visit(current, distance);

        for next in passages(grid, current) {
            let Some(index) = slot(grid, next) else {
                continue;
            };
            if seen.get(index).copied().unwrap_or(true) {
                continue;
            }
            if let Some(flag) = seen.get_mut(index) {
                *flag = true;
            }
            if let Some(parent) = parents.get_mut(index) {
                *parent = Some(current);
            }
            frontier.push_back((next, distance + 1));
        }
    }

    Some(parents)
}
