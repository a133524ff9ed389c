//! # Grid Module
//!
//! The square board and its cell states.
//!
//! [`GridModel`] is plain data: it does not enforce game rules. The generator
//! and the session are responsible for keeping exactly one `Player` cell and
//! for clearing the previous player cell when the player moves.

use crate::game::Position;
use crate::{TreasureHuntError, TreasureResult};
use serde::{Deserialize, Serialize};

/// The state of a single grid cell. States are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Player,
    Treasure,
    Obstacle,
}

impl CellState {
    /// Whether the reachability search may step onto this cell.
    pub fn is_passable(self) -> bool {
        self != CellState::Obstacle
    }

    /// Gets the ASCII character used for this state in text dumps.
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Player => '@',
            CellState::Treasure => '$',
            CellState::Obstacle => '#',
        }
    }
}

/// A square grid of cells plus the player's position.
///
/// Cells are stored row-major: index `y * size + x`.
///
/// # Examples
///
/// ```
/// use treasure_hunt::{CellState, GridModel, Position};
///
/// let mut grid = GridModel::new(10);
/// grid.set_cell(Position::new(2, 3), CellState::Player).unwrap();
/// assert_eq!(grid.player_position(), Position::new(2, 3));
/// assert_eq!(grid.get_cell(Position::new(2, 3)), Some(CellState::Player));
/// assert_eq!(grid.empty_cells().len(), 99);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridModel {
    size: usize,
    cells: Vec<CellState>,
    player: Position,
}

impl GridModel {
    /// Creates a grid of `size` x `size` empty cells with the player at the origin.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellState::Empty; size * size],
            player: Position::origin(),
        }
    }

    /// Gets the grid dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks if a position lies on the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.size + pos.x as usize)
        } else {
            None
        }
    }

    /// Gets the state of a cell, or None if the position is off the grid.
    pub fn get_cell(&self, pos: Position) -> Option<CellState> {
        self.index(pos).map(|index| self.cells[index])
    }

    /// Sets a cell's state unconditionally.
    ///
    /// Setting [`CellState::Player`] records the new player position; the old
    /// player cell is left untouched.
    pub fn set_cell(&mut self, pos: Position, state: CellState) -> TreasureResult<()> {
        let index = self.index(pos).ok_or(TreasureHuntError::InvalidPosition {
            x: pos.x,
            y: pos.y,
            size: self.size,
        })?;

        self.cells[index] = state;
        if state == CellState::Player {
            self.player = pos;
        }

        Ok(())
    }

    /// Gets the player's position.
    pub fn player_position(&self) -> Position {
        self.player
    }

    /// Resets every cell to empty and the player to the origin.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
        self.player = Position::origin();
    }

    /// Gets all positions holding `state`, in row-major order.
    pub fn cells_with(&self, state: CellState) -> Vec<Position> {
        self.positions()
            .filter(|pos| self.get_cell(*pos) == Some(state))
            .collect()
    }

    /// Gets all empty positions, in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells_with(CellState::Empty)
    }

    /// Counts the cells holding `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    /// Iterates over every position on the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Gets the in-bounds cardinal neighbours of a position.
    pub fn neighbours(&self, pos: Position) -> Vec<Position> {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|neighbour| self.in_bounds(*neighbour))
            .collect()
    }

    /// Checks whether a cell is uncovered by the fog of war.
    pub fn is_revealed(&self, pos: Position, radius: u32) -> bool {
        self.in_bounds(pos) && self.player.chebyshev_distance(pos) <= radius
    }

    /// Renders the grid as text, one line per row.
    ///
    /// ```text
    /// @.$
    /// .#.
    /// ...
    /// ```
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in self.cells.chunks(self.size.max(1)) {
            out.extend(row.iter().map(|cell| cell.symbol()));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = GridModel::new(10);
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.count(CellState::Empty), 100);
        assert_eq!(grid.player_position(), Position::origin());
    }

    #[test]
    fn test_set_and_get_cell() {
        let mut grid = GridModel::new(4);
        grid.set_cell(Position::new(1, 2), CellState::Treasure).unwrap();
        assert_eq!(grid.get_cell(Position::new(1, 2)), Some(CellState::Treasure));
        assert_eq!(grid.get_cell(Position::new(2, 1)), Some(CellState::Empty));
        assert_eq!(grid.get_cell(Position::new(4, 0)), None);
        assert_eq!(grid.get_cell(Position::new(0, -1)), None);
    }

    #[test]
    fn test_set_cell_out_of_bounds_is_an_error() {
        let mut grid = GridModel::new(4);
        let result = grid.set_cell(Position::new(-1, 0), CellState::Obstacle);
        assert!(matches!(
            result,
            Err(TreasureHuntError::InvalidPosition { x: -1, y: 0, size: 4 })
        ));
        assert_eq!(grid.count(CellState::Obstacle), 0);
    }

    #[test]
    fn test_player_position_tracks_player_cell() {
        let mut grid = GridModel::new(5);
        grid.set_cell(Position::new(3, 1), CellState::Player).unwrap();
        assert_eq!(grid.player_position(), Position::new(3, 1));

        // Other states do not move the player.
        grid.set_cell(Position::new(0, 0), CellState::Treasure).unwrap();
        assert_eq!(grid.player_position(), Position::new(3, 1));
    }

    #[test]
    fn test_empty_cells_are_row_major() {
        let mut grid = GridModel::new(3);
        grid.set_cell(Position::new(0, 0), CellState::Player).unwrap();
        grid.set_cell(Position::new(2, 1), CellState::Obstacle).unwrap();

        let empty = grid.empty_cells();
        assert_eq!(empty.len(), 7);
        assert_eq!(empty[0], Position::new(1, 0));
        assert_eq!(empty[1], Position::new(2, 0));
        assert_eq!(empty[2], Position::new(0, 1));
        assert_eq!(empty[4], Position::new(0, 2));
    }

    #[test]
    fn test_neighbours_respect_bounds() {
        let grid = GridModel::new(3);
        assert_eq!(grid.neighbours(Position::new(0, 0)).len(), 2);
        assert_eq!(grid.neighbours(Position::new(1, 0)).len(), 3);
        assert_eq!(grid.neighbours(Position::new(1, 1)).len(), 4);
    }

    #[test]
    fn test_reveal_radius() {
        let mut grid = GridModel::new(5);
        grid.set_cell(Position::new(2, 2), CellState::Player).unwrap();
        assert!(grid.is_revealed(Position::new(1, 1), 1));
        assert!(grid.is_revealed(Position::new(3, 2), 1));
        assert!(!grid.is_revealed(Position::new(4, 2), 1));
        assert!(!grid.is_revealed(Position::new(5, 2), 10));
    }

    #[test]
    fn test_render_ascii() {
        let mut grid = GridModel::new(3);
        grid.set_cell(Position::new(0, 0), CellState::Player).unwrap();
        grid.set_cell(Position::new(2, 0), CellState::Treasure).unwrap();
        grid.set_cell(Position::new(1, 1), CellState::Obstacle).unwrap();
        assert_eq!(grid.render_ascii(), "@.$\n.#.\n...\n");
    }

    #[test]
    fn test_clear() {
        let mut grid = GridModel::new(3);
        grid.set_cell(Position::new(1, 1), CellState::Player).unwrap();
        grid.clear();
        assert_eq!(grid.count(CellState::Empty), 9);
        assert_eq!(grid.player_position(), Position::origin());
    }
}
