//! # Game Session Module
//!
//! One play-through, from board generation to a win or a loss.
//!
//! [`GameSession`] owns the grid, the session counters, the clock and the
//! seeded random number generator used for every board it generates. It is
//! the only thing that mutates the grid during play. The front-end talks to
//! it through [`GameCommand`]s and renders the [`MoveOutcome`]s it returns.

use crate::game::{CellState, Direction, GridModel, Position, SessionClock};
use crate::generation::utils::create_rng;
use crate::input::{CommandResult, GameCommand};
use crate::{BoardGenerator, GenerationConfig, Generator, TreasureHuntError, TreasureResult};
use log::{debug, info};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No board has been generated yet
    NotStarted,
    /// The player is moving around the board
    Active,
    /// Every treasure was collected
    Won,
    /// The player walked into an obstacle
    Lost,
}

/// Counters for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Successful moves so far
    pub moves_made: u32,
    /// Treasures still on the board
    pub treasures_remaining: usize,
    /// Elapsed seconds as of the last update
    pub elapsed_seconds: u64,
    /// Current lifecycle phase
    pub phase: SessionPhase,
}

impl SessionState {
    /// Creates the state of a session that has not started.
    pub fn new() -> Self {
        Self {
            moves_made: 0,
            treasures_remaining: 0,
            elapsed_seconds: 0,
            phase: SessionPhase::NotStarted,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Final figures reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub elapsed_seconds: u64,
    pub moves_made: u32,
}

/// Why a move did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    /// The target cell is off the grid
    OutOfBounds,
    /// The session is not active (not started, won or lost)
    SessionNotActive,
}

/// Result of a movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Nothing changed
    Blocked(BlockReason),
    /// The player stepped onto an empty cell
    Moved { to: Position },
    /// The player picked up a treasure. `summary` is present when it was the
    /// last one and the session is won.
    TreasureFound {
        remaining: usize,
        summary: Option<SessionSummary>,
    },
    /// The player stepped onto an empty cell of a board with no treasure
    /// left, which wins the session
    BoardCleared { to: Position, summary: SessionSummary },
    /// The player hit an obstacle and lost
    HitObstacle { summary: SessionSummary },
}

impl MoveOutcome {
    /// Checks if this outcome won the session.
    pub fn is_win(&self) -> bool {
        matches!(
            self,
            MoveOutcome::TreasureFound {
                summary: Some(_),
                ..
            } | MoveOutcome::BoardCleared { .. }
        )
    }

    /// Checks if the player actually moved.
    pub fn is_successful_move(&self) -> bool {
        matches!(
            self,
            MoveOutcome::Moved { .. }
                | MoveOutcome::TreasureFound { .. }
                | MoveOutcome::BoardCleared { .. }
        )
    }
}

/// A single play-through.
///
/// # Examples
///
/// ```
/// use treasure_hunt::{GameSession, GenerationConfig, SessionPhase};
///
/// let mut session = GameSession::new(GenerationConfig::new(7)).unwrap();
/// assert_eq!(session.state().phase, SessionPhase::NotStarted);
///
/// session.start().unwrap();
/// assert_eq!(session.state().phase, SessionPhase::Active);
/// assert_eq!(session.state().treasures_remaining, 7);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GenerationConfig,
    generator: BoardGenerator,
    rng: StdRng,
    grid: GridModel,
    state: SessionState,
    clock: SessionClock,
    sessions_started: u32,
}

impl GameSession {
    /// Creates a session from a configuration. No board is generated until
    /// [`start`](Self::start) is called.
    pub fn new(config: GenerationConfig) -> TreasureResult<Self> {
        config.validate()?;

        Ok(Self {
            grid: GridModel::new(config.grid_size),
            rng: create_rng(&config),
            generator: BoardGenerator::new(),
            state: SessionState::new(),
            clock: SessionClock::new(),
            sessions_started: 0,
            config,
        })
    }

    /// Generates a fresh board and makes the session active.
    pub fn start(&mut self) -> TreasureResult<()> {
        let grid = self.generator.generate(&self.config, &mut self.rng)?;
        self.begin(grid);
        Ok(())
    }

    /// Starts a new session on a fresh board. Valid from any phase.
    pub fn reset(&mut self) -> TreasureResult<()> {
        self.start()
    }

    /// Starts a session on a caller-built board.
    ///
    /// The board must be the configured size and contain exactly one player
    /// cell; every treasure on it counts towards `treasures_remaining`.
    pub fn start_with_grid(&mut self, grid: GridModel) -> TreasureResult<()> {
        if grid.size() != self.config.grid_size {
            return Err(TreasureHuntError::InvalidState(format!(
                "board is {}x{}, session expects {}x{}",
                grid.size(),
                grid.size(),
                self.config.grid_size,
                self.config.grid_size
            )));
        }
        if grid.count(CellState::Player) != 1
            || grid.get_cell(grid.player_position()) != Some(CellState::Player)
        {
            return Err(TreasureHuntError::InvalidState(
                "board must contain exactly one player".to_string(),
            ));
        }

        self.begin(grid);
        Ok(())
    }

    fn begin(&mut self, grid: GridModel) {
        self.state = SessionState {
            moves_made: 0,
            treasures_remaining: grid.count(CellState::Treasure),
            elapsed_seconds: 0,
            phase: SessionPhase::Active,
        };
        self.grid = grid;
        self.clock.reset();
        self.sessions_started += 1;

        info!(
            "Session {} started: player at {}, {} treasures, {} obstacles",
            self.sessions_started,
            self.grid.player_position(),
            self.state.treasures_remaining,
            self.grid.count(CellState::Obstacle)
        );
        debug!("Board:\n{}", self.grid.render_ascii());
    }

    /// Gets the board.
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Gets the session counters.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Gets the configuration boards are generated from.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Gets the number of sessions started so far.
    pub fn sessions_started(&self) -> u32 {
        self.sessions_started
    }

    /// Moves the player one cell using the current time.
    pub fn move_player(&mut self, direction: Direction) -> TreasureResult<MoveOutcome> {
        self.move_player_at(direction, Instant::now())
    }

    /// Moves the player by a raw delta.
    ///
    /// Only the four unit steps are accepted.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> TreasureResult<MoveOutcome> {
        let direction = Direction::from_delta(Position::new(dx, dy)).ok_or_else(|| {
            TreasureHuntError::InvalidAction(format!("({}, {}) is not a single step", dx, dy))
        })?;
        self.move_player(direction)
    }

    /// Moves the player one cell, with `now` as the current time.
    ///
    /// Moving does not lift a pause; only [`resume_clock`](Self::resume_clock) does.
    pub fn move_player_at(
        &mut self,
        direction: Direction,
        now: Instant,
    ) -> TreasureResult<MoveOutcome> {
        if self.state.phase != SessionPhase::Active {
            return Ok(MoveOutcome::Blocked(BlockReason::SessionNotActive));
        }

        // The clock starts with the first key press, blocked or not.
        self.clock.start(now);

        let from = self.grid.player_position();
        let to = from + direction.to_delta();

        let outcome = match self.grid.get_cell(to) {
            None => MoveOutcome::Blocked(BlockReason::OutOfBounds),
            Some(CellState::Obstacle) => {
                self.state.phase = SessionPhase::Lost;
                self.clock.stop(now);
                let summary = self.summary(now);
                info!("Hit an obstacle at {} after {} moves", to, summary.moves_made);
                MoveOutcome::HitObstacle { summary }
            }
            Some(target) => {
                let outcome = self.step(from, to, target)?;
                self.check_for_win(outcome, now)
            }
        };

        self.state.elapsed_seconds = self.clock.elapsed_seconds(now);
        Ok(outcome)
    }

    /// Moves the player from `from` onto the passable cell `to`.
    fn step(
        &mut self,
        from: Position,
        to: Position,
        target: CellState,
    ) -> TreasureResult<MoveOutcome> {
        self.grid.set_cell(from, CellState::Empty)?;
        self.grid.set_cell(to, CellState::Player)?;
        self.state.moves_made += 1;

        if target != CellState::Treasure {
            return Ok(MoveOutcome::Moved { to });
        }

        self.state.treasures_remaining = self.state.treasures_remaining.saturating_sub(1);
        debug!(
            "Treasure found at {}, {} remaining",
            to, self.state.treasures_remaining
        );
        Ok(MoveOutcome::TreasureFound {
            remaining: self.state.treasures_remaining,
            summary: None,
        })
    }

    /// Ends the session as won once no treasure is left after a successful move.
    fn check_for_win(&mut self, outcome: MoveOutcome, now: Instant) -> MoveOutcome {
        if self.state.treasures_remaining > 0 {
            return outcome;
        }

        self.state.phase = SessionPhase::Won;
        self.clock.stop(now);
        let summary = self.summary(now);
        info!(
            "All treasures found in {} seconds and {} moves",
            summary.elapsed_seconds, summary.moves_made
        );

        match outcome {
            MoveOutcome::Moved { to } => MoveOutcome::BoardCleared { to, summary },
            _ => MoveOutcome::TreasureFound {
                remaining: 0,
                summary: Some(summary),
            },
        }
    }

    /// Freezes the session clock, e.g. while a notification is shown.
    pub fn pause_clock(&mut self, now: Instant) {
        self.clock.pause(now);
        self.state.elapsed_seconds = self.clock.elapsed_seconds(now);
    }

    /// Resumes the session clock after [`pause_clock`](Self::pause_clock).
    pub fn resume_clock(&mut self, now: Instant) {
        self.clock.resume(now);
        self.state.elapsed_seconds = self.clock.elapsed_seconds(now);
    }

    /// Checks if the session clock is paused.
    pub fn is_clock_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Updates the stored elapsed seconds from a timer tick and returns them.
    pub fn tick(&mut self, now: Instant) -> u64 {
        self.state.elapsed_seconds = self.clock.elapsed_seconds(now);
        self.state.elapsed_seconds
    }

    /// Gets the elapsed seconds at `now` without updating the stored value.
    pub fn current_elapsed_seconds(&self, now: Instant) -> u64 {
        self.clock.elapsed_seconds(now)
    }

    /// Gets the elapsed time and moves so far.
    pub fn summary(&self, now: Instant) -> SessionSummary {
        SessionSummary {
            elapsed_seconds: self.clock.elapsed_seconds(now),
            moves_made: self.state.moves_made,
        }
    }

    /// Formats the status line shown above the board.
    pub fn status_line(&self, now: Instant) -> String {
        format!(
            "Time: {}s | Moves: {} | Treasures remaining: {}",
            self.current_elapsed_seconds(now),
            self.state.moves_made,
            self.state.treasures_remaining
        )
    }

    /// Executes a command from the front-end.
    pub fn execute(&mut self, command: GameCommand, now: Instant) -> TreasureResult<CommandResult> {
        match command {
            GameCommand::Move(direction) => {
                Ok(CommandResult::Moved(self.move_player_at(direction, now)?))
            }
            GameCommand::PauseClock => {
                self.pause_clock(now);
                Ok(CommandResult::ClockPaused)
            }
            GameCommand::ResumeClock => {
                self.resume_clock(now);
                Ok(CommandResult::ClockResumed)
            }
            GameCommand::Restart => {
                self.reset()?;
                Ok(CommandResult::Restarted)
            }
        }
    }
}
