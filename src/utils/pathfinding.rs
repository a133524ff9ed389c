//! # Reachability
//!
//! Breadth-first search over the grid. Obstacles are impassable; every other
//! cell state (including treasures and the player) can be walked through.
//!
//! Each search visits every cell at most once, so a check costs O(N²). The
//! board generator runs one check per obstacle candidate, which makes obstacle
//! placement O(K·N²) for K candidates. That is fine for the small boards this
//! game uses but the generator must not call it more often than that.

use crate::game::{CellState, GridModel, Position};
use pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Reachability queries over a [`GridModel`].
pub struct ReachabilityChecker;

impl ReachabilityChecker {
    /// Iterates over the cells reachable from `from`, in BFS order.
    ///
    /// The start cell is always yielded, even if it holds an obstacle.
    fn reach(grid: &GridModel, from: Position) -> impl Iterator<Item = Position> + '_ {
        bfs_reach(from, move |pos: &Position| {
            grid.neighbours(*pos)
                .into_iter()
                .filter(|neighbour| {
                    grid.get_cell(*neighbour)
                        .map(CellState::is_passable)
                        .unwrap_or(false)
                })
                .collect::<Vec<_>>()
        })
    }

    /// Gets every cell reachable from `from`.
    ///
    /// Returns an empty set if `from` is off the grid.
    pub fn reachable_cells(grid: &GridModel, from: Position) -> HashSet<Position> {
        if !grid.in_bounds(from) {
            return HashSet::new();
        }
        Self::reach(grid, from).collect()
    }

    /// Counts the treasures reachable from `from`.
    pub fn reachable_treasure_count(grid: &GridModel, from: Position) -> usize {
        if !grid.in_bounds(from) {
            return 0;
        }
        Self::reach(grid, from)
            .filter(|pos| grid.get_cell(*pos) == Some(CellState::Treasure))
            .count()
    }

    /// Checks that exactly `expected_treasure_count` treasures can be reached
    /// from `player_pos`.
    ///
    /// An expected count of zero is vacuously satisfied.
    ///
    /// # Examples
    ///
    /// ```
    /// use treasure_hunt::{CellState, GridModel, Position, ReachabilityChecker};
    ///
    /// let mut grid = GridModel::new(3);
    /// grid.set_cell(Position::new(0, 0), CellState::Player).unwrap();
    /// grid.set_cell(Position::new(2, 2), CellState::Treasure).unwrap();
    /// assert!(ReachabilityChecker::all_treasures_reachable(&grid, Position::new(0, 0), 1));
    ///
    /// // Wall the treasure off.
    /// grid.set_cell(Position::new(1, 2), CellState::Obstacle).unwrap();
    /// grid.set_cell(Position::new(2, 1), CellState::Obstacle).unwrap();
    /// assert!(!ReachabilityChecker::all_treasures_reachable(&grid, Position::new(0, 0), 1));
    /// ```
    pub fn all_treasures_reachable(
        grid: &GridModel,
        player_pos: Position,
        expected_treasure_count: usize,
    ) -> bool {
        if expected_treasure_count == 0 {
            return true;
        }
        Self::reachable_treasure_count(grid, player_pos) == expected_treasure_count
    }
}
