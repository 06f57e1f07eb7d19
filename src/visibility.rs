//! Fog of war.
//!
//! Visibility is recomputed from scratch on every call: nothing seen on a previous move stays lit.

use crate::grid::{Direction, Grid, Position};

/// Rewrites the visible flags of `grid` for an agent standing on `agent`.
///
/// A cell ends up visible if and only if it is:
/// - the agent's cell;
/// - a neighbour of the agent's cell with no wall in between;
/// - the exit or one of its four neighbours, regardless of line of sight.
///
/// Positions outside the grid are skipped silently, including an out-of-bounds agent.
pub(crate) fn update(grid: &mut Grid, agent: Position, exit: Position) {
    grid.reset_visibility();

    grid.mark_visible(agent);
    for direction in Direction::ALL {
        if !grid.has_wall(agent, direction) {
            grid.mark_visible(agent.step(direction));
        }
    }

    grid.mark_visible(exit);
    for direction in Direction::ALL {
        grid.mark_visible(exit.step(direction));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(grid: &Grid) -> Vec<Position> {
        grid.positions()
            .filter(|&position| grid.is_visible(position))
            .collect()
    }

    #[test]
    fn test_agent_sees_open_neighbours_only() {
        let mut grid = Grid::new(5, 5).expect("5x5 is a valid grid");
        let agent = Position::new(1, 1);
        let _ = grid.remove_wall(agent, Direction::East);
        let _ = grid.remove_wall(agent, Direction::South);

        update(&mut grid, agent, Position::new(4, 4));

        assert!(grid.is_visible(agent));
        assert!(grid.is_visible(Position::new(2, 1)));
        assert!(grid.is_visible(Position::new(1, 2)));
        assert!(!grid.is_visible(Position::new(1, 0)));
        assert!(!grid.is_visible(Position::new(0, 1)));
    }

    #[test]
    fn test_exit_neighbourhood_is_always_visible() {
        let mut grid = Grid::new(5, 5).expect("5x5 is a valid grid");

        update(&mut grid, Position::new(0, 0), Position::new(2, 2));

        assert_eq!(
            visible(&grid),
            vec![
                Position::new(0, 0),
                Position::new(2, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(2, 3),
            ]
        );
    }

    #[test]
    fn test_exit_in_corner_is_clipped() {
        let mut grid = Grid::new(3, 3).expect("3x3 is a valid grid");

        update(&mut grid, Position::new(2, 2), Position::new(0, 0));

        assert_eq!(
            visible(&grid),
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_previous_visibility_is_cleared() {
        let mut grid = Grid::new(4, 1).expect("4x1 is a valid grid");
        let exit = Position::new(3, 0);

        update(&mut grid, Position::new(0, 0), exit);
        assert!(grid.is_visible(Position::new(0, 0)));

        update(&mut grid, Position::new(1, 0), exit);
        assert!(!grid.is_visible(Position::new(0, 0)));
        assert!(grid.is_visible(Position::new(1, 0)));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut grid = Grid::new(4, 4).expect("4x4 is a valid grid");
        let _ = grid.remove_wall(Position::new(1, 1), Direction::North);

        update(&mut grid, Position::new(1, 1), Position::new(3, 3));
        let first = grid.clone();
        update(&mut grid, Position::new(1, 1), Position::new(3, 3));

        assert_eq!(grid, first);
    }

    #[test]
    fn test_out_of_bounds_agent_is_a_noop() {
        let mut grid = Grid::new(3, 3).expect("3x3 is a valid grid");

        update(&mut grid, Position::new(-1, 7), Position::new(1, 1));

        assert_eq!(visible(&grid).len(), 5);
        assert!(!grid.is_visible(Position::new(0, 0)));
    }

    #[test]
    fn test_walls_are_untouched() {
        let mut grid = Grid::new(3, 3).expect("3x3 is a valid grid");
        let _ = grid.remove_wall(Position::new(0, 0), Direction::East);
        let walls: Vec<_> = grid.positions().map(|position| grid.walls_of(position)).collect();

        update(&mut grid, Position::new(0, 0), Position::new(2, 2));

        let after: Vec<_> = grid.positions().map(|position| grid.walls_of(position)).collect();
        assert_eq!(walls, after);
    }
}
