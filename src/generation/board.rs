//! # Board Generation
//!
//! Random placement of the player, the treasures and the obstacles.
//!
//! The generator works in three passes:
//! 1. Place the player on a uniformly random cell
//! 2. Place exactly `treasure_count` treasures on random empty cells
//! 3. Walk a shuffled pool of the remaining empty cells and keep each
//!    tentative obstacle only if every treasure is still reachable
//!
//! A rejected candidate is reverted to empty before the next one is tried and
//! is never retried. If the pool runs out before the obstacle target is met the
//! board simply has fewer obstacles.

use crate::game::{CellState, GridModel, Position};
use crate::{GenerationConfig, Generator, ReachabilityChecker, TreasureHuntError, TreasureResult};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generator for treasure hunt boards.
#[derive(Debug, Clone, Default)]
pub struct BoardGenerator;

/// Counters from one obstacle placement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObstacleReport {
    /// Obstacles requested by the random target
    pub target: usize,
    /// Obstacles kept on the board
    pub placed: usize,
    /// Candidates reverted because they cut off a treasure
    pub rejected: usize,
}

impl ObstacleReport {
    /// Checks if fewer obstacles were placed than requested.
    pub fn is_short(&self) -> bool {
        self.placed < self.target
    }
}

impl BoardGenerator {
    /// Creates a new board generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use treasure_hunt::{BoardGenerator, CellState, GenerationConfig, Generator};
    /// use treasure_hunt::generation::utils::create_rng;
    ///
    /// let config = GenerationConfig::new(7);
    /// let mut rng = create_rng(&config);
    /// let grid = BoardGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert_eq!(grid.count(CellState::Player), 1);
    /// assert_eq!(grid.count(CellState::Treasure), 7);
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Generates a board with the player on a caller-chosen cell.
    pub fn generate_with_player(
        &self,
        config: &GenerationConfig,
        player: Position,
        rng: &mut StdRng,
    ) -> TreasureResult<GridModel> {
        config.validate()?;

        let mut grid = GridModel::new(config.grid_size);
        grid.set_cell(player, CellState::Player)?;
        self.populate(&mut grid, config, rng)?;
        self.validate(&grid, config)?;
        Ok(grid)
    }

    /// Places treasures and obstacles around an already placed player.
    fn populate(
        &self,
        grid: &mut GridModel,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> TreasureResult<()> {
        self.place_treasures(grid, config, rng)?;

        let report = self.place_obstacles(grid, config, rng)?;
        if report.is_short() {
            warn!(
                "Placed {} of {} obstacles ({} candidates rejected)",
                report.placed, report.target, report.rejected
            );
        } else {
            debug!(
                "Placed {} obstacles ({} candidates rejected)",
                report.placed, report.rejected
            );
        }

        Ok(())
    }

    /// Places the player on a uniformly random cell.
    fn place_player(&self, grid: &mut GridModel, rng: &mut StdRng) -> TreasureResult<Position> {
        let size = grid.size() as i32;
        let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        grid.set_cell(pos, CellState::Player)?;
        Ok(pos)
    }

    /// Places exactly `treasure_count` treasures on empty cells.
    ///
    /// Samples uniformly random cells up to `max_placement_attempts` times; any
    /// treasures still missing after that are drawn from the shuffled list of
    /// empty cells, so a validated configuration always completes.
    fn place_treasures(
        &self,
        grid: &mut GridModel,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> TreasureResult<()> {
        let size = grid.size() as i32;
        let mut remaining = config.treasure_count;
        let mut attempts = 0;

        while remaining > 0 && attempts < config.max_placement_attempts {
            attempts += 1;
            let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if grid.get_cell(pos) == Some(CellState::Empty) {
                grid.set_cell(pos, CellState::Treasure)?;
                remaining -= 1;
            }
        }

        if remaining > 0 {
            debug!(
                "Random treasure sampling gave up after {} attempts, {} left",
                attempts, remaining
            );
            let mut empty = grid.empty_cells();
            if empty.len() < remaining {
                return Err(TreasureHuntError::GenerationFailed(format!(
                    "only {} empty cells for {} treasures",
                    empty.len(),
                    remaining
                )));
            }
            empty.shuffle(rng);
            for pos in empty.into_iter().take(remaining) {
                grid.set_cell(pos, CellState::Treasure)?;
            }
        }

        Ok(())
    }

    /// Places a random number of obstacles without cutting off any treasure.
    ///
    /// Runs one reachability check per candidate, so the cost is
    /// O(candidates · N²).
    pub fn place_obstacles(
        &self,
        grid: &mut GridModel,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> TreasureResult<ObstacleReport> {
        let target = rng.gen_range(config.min_obstacles..=config.max_obstacles);
        let expected = grid.count(CellState::Treasure);

        let mut candidates = grid.empty_cells();
        candidates.shuffle(rng);

        let mut report = ObstacleReport {
            target,
            ..ObstacleReport::default()
        };

        for pos in candidates {
            if report.placed == target {
                break;
            }
            if self.try_place_obstacle(grid, pos, expected)? {
                report.placed += 1;
            } else {
                report.rejected += 1;
            }
        }

        debug!("Obstacle pass: {:?}", report);
        Ok(report)
    }

    /// Tentatively places an obstacle and keeps it only if `expected`
    /// treasures are still reachable from the player.
    ///
    /// Returns whether the obstacle was kept. A rejected cell is restored to
    /// the state it had before the call.
    pub fn try_place_obstacle(
        &self,
        grid: &mut GridModel,
        pos: Position,
        expected: usize,
    ) -> TreasureResult<bool> {
        let previous = grid.get_cell(pos).ok_or(TreasureHuntError::InvalidPosition {
            x: pos.x,
            y: pos.y,
            size: grid.size(),
        })?;
        if previous != CellState::Empty {
            return Ok(false);
        }

        grid.set_cell(pos, CellState::Obstacle)?;
        if ReachabilityChecker::all_treasures_reachable(grid, grid.player_position(), expected) {
            Ok(true)
        } else {
            grid.set_cell(pos, previous)?;
            Ok(false)
        }
    }
}

impl Generator<GridModel> for BoardGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> TreasureResult<GridModel> {
        config.validate()?;

        let mut grid = GridModel::new(config.grid_size);
        let player = self.place_player(&mut grid, rng)?;
        debug!("Player placed at {}", player);

        self.populate(&mut grid, config, rng)?;
        self.validate(&grid, config)?;

        Ok(grid)
    }

    fn validate(&self, grid: &GridModel, config: &GenerationConfig) -> TreasureResult<()> {
        if grid.size() != config.grid_size {
            return Err(TreasureHuntError::GenerationFailed(format!(
                "grid is {}x{}, expected {}x{}",
                grid.size(),
                grid.size(),
                config.grid_size,
                config.grid_size
            )));
        }

        let players = grid.count(CellState::Player);
        if players != 1 || grid.get_cell(grid.player_position()) != Some(CellState::Player) {
            return Err(TreasureHuntError::GenerationFailed(format!(
                "expected exactly one player cell, found {}",
                players
            )));
        }

        let treasures = grid.count(CellState::Treasure);
        if treasures != config.treasure_count {
            return Err(TreasureHuntError::GenerationFailed(format!(
                "expected {} treasures, found {}",
                config.treasure_count, treasures
            )));
        }

        if !ReachabilityChecker::all_treasures_reachable(grid, grid.player_position(), treasures) {
            return Err(TreasureHuntError::GenerationFailed(
                "not every treasure is reachable from the player".to_string(),
            ));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "BoardGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;

    #[test]
    fn test_generate_standard_board() {
        let config = GenerationConfig::new(12345);
        let mut rng = create_rng(&config);
        let generator = BoardGenerator::new();
        let grid = generator.generate(&config, &mut rng).unwrap();

        assert_eq!(grid.size(), 10);
        assert_eq!(grid.count(CellState::Player), 1);
        assert_eq!(grid.count(CellState::Treasure), 7);
        assert!(grid.count(CellState::Obstacle) <= 29);
        assert!(generator.validate(&grid, &config).is_ok());
        assert_eq!(generator.generator_type(), "BoardGenerator");
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = GenerationConfig::new(99);
        let generator = BoardGenerator::new();

        let a = generator.generate(&config, &mut create_rng(&config)).unwrap();
        let b = generator.generate(&config, &mut create_rng(&config)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_with_fixed_player() {
        let config = GenerationConfig::new(3);
        let mut rng = create_rng(&config);
        let grid = BoardGenerator::new()
            .generate_with_player(&config, Position::new(3, 3), &mut rng)
            .unwrap();

        assert_eq!(grid.player_position(), Position::new(3, 3));
        assert_eq!(grid.get_cell(Position::new(3, 3)), Some(CellState::Player));
        assert_eq!(
            ReachabilityChecker::reachable_treasure_count(&grid, Position::new(3, 3)),
            7
        );
    }

    #[test]
    fn test_generate_with_player_off_grid_fails() {
        let config = GenerationConfig::new(3);
        let mut rng = create_rng(&config);
        let result =
            BoardGenerator::new().generate_with_player(&config, Position::new(10, 0), &mut rng);
        assert!(matches!(result, Err(TreasureHuntError::InvalidPosition { .. })));
    }

    #[test]
    fn test_invalid_config_fails_before_placement() {
        let mut config = GenerationConfig::new(3);
        config.grid_size = 2;
        config.treasure_count = 4;
        let mut rng = create_rng(&config);
        assert!(matches!(
            BoardGenerator::new().generate(&config, &mut rng),
            Err(TreasureHuntError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_full_board_uses_fallback() {
        // Every non-player cell must become a treasure; random sampling alone
        // would be slow to find the last few.
        let mut config = GenerationConfig::new(5);
        config.grid_size = 4;
        config.treasure_count = 15;
        config.min_obstacles = 0;
        config.max_obstacles = 3;
        config.max_placement_attempts = 5;

        let mut rng = create_rng(&config);
        let grid = BoardGenerator::new().generate(&config, &mut rng).unwrap();
        assert_eq!(grid.count(CellState::Treasure), 15);
        assert_eq!(grid.count(CellState::Obstacle), 0);
    }

    #[test]
    fn test_obstacle_shortfall_is_not_an_error() {
        let mut config = GenerationConfig::new(8);
        config.grid_size = 3;
        config.treasure_count = 1;
        config.min_obstacles = 50;
        config.max_obstacles = 50;

        let mut rng = create_rng(&config);
        let generator = BoardGenerator::new();
        let grid = generator.generate(&config, &mut rng).unwrap();
        assert!(grid.count(CellState::Obstacle) < 50);
        assert!(generator.validate(&grid, &config).is_ok());
    }

    #[test]
    fn test_try_place_obstacle_reverts_cut_cell() {
        // @ . $
        // # . #
        // . . .
        let mut grid = GridModel::new(3);
        grid.set_cell(Position::new(0, 0), CellState::Player).unwrap();
        grid.set_cell(Position::new(2, 0), CellState::Treasure).unwrap();
        grid.set_cell(Position::new(0, 1), CellState::Obstacle).unwrap();
        grid.set_cell(Position::new(2, 1), CellState::Obstacle).unwrap();

        let generator = BoardGenerator::new();
        let before = grid.clone();

        // (1, 0) is the only way to the treasure.
        assert!(!generator
            .try_place_obstacle(&mut grid, Position::new(1, 0), 1)
            .unwrap());
        assert_eq!(grid, before);

        // (1, 2) is not on any path.
        assert!(generator
            .try_place_obstacle(&mut grid, Position::new(1, 2), 1)
            .unwrap());
        assert_eq!(grid.get_cell(Position::new(1, 2)), Some(CellState::Obstacle));
    }

    #[test]
    fn test_try_place_obstacle_skips_occupied_cells() {
        let mut grid = GridModel::new(3);
        grid.set_cell(Position::new(0, 0), CellState::Player).unwrap();
        grid.set_cell(Position::new(2, 2), CellState::Treasure).unwrap();

        let generator = BoardGenerator::new();
        assert!(!generator
            .try_place_obstacle(&mut grid, Position::new(2, 2), 1)
            .unwrap());
        assert_eq!(grid.get_cell(Position::new(2, 2)), Some(CellState::Treasure));
        assert!(generator
            .try_place_obstacle(&mut grid, Position::new(5, 5), 1)
            .is_err());
    }

    #[test]
    fn test_obstacle_report_counts() {
        let config = GenerationConfig::new(21);
        let mut rng = create_rng(&config);
        let generator = BoardGenerator::new();

        let mut grid = GridModel::new(config.grid_size);
        grid.set_cell(Position::new(0, 0), CellState::Player).unwrap();
        grid.set_cell(Position::new(9, 9), CellState::Treasure).unwrap();
        let report = generator.place_obstacles(&mut grid, &config, &mut rng).unwrap();

        assert!((15..=29).contains(&report.target));
        assert_eq!(report.placed, grid.count(CellState::Obstacle));
        assert!(report.placed <= report.target);
        assert!(ReachabilityChecker::all_treasures_reachable(
            &grid,
            Position::new(0, 0),
            1
        ));
    }
}
