//! # Treasure Hunt
//!
//! A single-player grid exploration game: collect every treasure on a small
//! grid while avoiding obstacles, in as little time and as few moves as possible.
//!
//! ## Architecture Overview
//!
//! - **Game**: the grid model, the session state machine and its clock
//! - **Generation**: random board placement, validated by reachability checks
//! - **Utils**: breadth-first reachability over the grid
//! - **Scores**: high-score entries, the sorted board and its text codec
//! - **Input / Rendering / Scenes**: a thin macroquad front-end that only reads
//!   core state and sends [`GameCommand`]s
//!
//! Everything outside `input`, `rendering` and `scenes` is synchronous,
//! single-threaded and free of presentation concerns.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod scores;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use scores::*;
pub use utils::*;

pub use game::{
    BlockReason, CellState, Direction, GameSession, GridModel, MoveOutcome, Position,
    SessionClock, SessionPhase, SessionState, SessionSummary,
};

pub use generation::{BoardGenerator, GenerationConfig, Generator};

pub use input::{CommandResult, GameCommand, InputHandler, PlayerInput};

pub use scores::{HighScoreBoard, HighScoreEntry, HighScoreStore};

/// Core error type for the treasure hunt engine.
#[derive(thiserror::Error, Debug)]
pub enum TreasureHuntError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration cannot produce a valid board
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Position lies outside the grid
    #[error("Position ({x}, {y}) is outside a {size}x{size} grid")]
    InvalidPosition { x: i32, y: i32, size: usize },

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// High-score entry or line could not be accepted
    #[error("Invalid high score: {0}")]
    InvalidHighScore(String),
}

/// Result type used throughout the treasure hunt codebase.
pub type TreasureResult<T> = Result<T, TreasureHuntError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default grid dimension (the grid is square)
    pub const DEFAULT_GRID_SIZE: usize = 10;

    /// Number of treasures placed on every board
    pub const DEFAULT_TREASURE_COUNT: usize = 7;

    /// Lower bound of the random obstacle target
    pub const DEFAULT_MIN_OBSTACLES: usize = 15;

    /// Upper bound (inclusive) of the random obstacle target
    pub const DEFAULT_MAX_OBSTACLES: usize = 29;

    /// Upper bound on random samples while placing treasures
    pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

    /// Cells within this Chebyshev distance of the player are revealed
    pub const REVEAL_RADIUS: u32 = 1;

    /// Number of high scores shown on the scoreboard screen
    pub const MAX_HIGH_SCORES_SHOWN: usize = 10;

    /// Default high-score file
    pub const DEFAULT_SCORES_FILE: &str = "highscores.txt";
}
