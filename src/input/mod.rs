//! # Input Module
//!
//! Keyboard handling and translation of key presses into session commands.

pub mod commands;

pub use commands::*;

use crate::game::{Direction, SessionPhase};
use macroquad::prelude::*;

/// Keys polled every frame, in priority order.
const POLLED_KEYS: [KeyCode; 15] = [
    KeyCode::Escape,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::S,
    KeyCode::A,
    KeyCode::D,
    KeyCode::Enter,
    KeyCode::Space,
    KeyCode::F1,
    KeyCode::H,
    KeyCode::N,
    KeyCode::Q,
];

/// Input handler for processing player key presses.
///
/// Converts raw keys into [`PlayerInput`], and player input into the
/// [`GameCommand`]s a session understands.
pub struct InputHandler {
    /// Whether WASD works alongside the arrow keys
    pub wasd_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use treasure_hunt::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.wasd_enabled);
    /// ```
    pub fn new() -> Self {
        Self { wasd_enabled: true }
    }

    /// Gets the input for the first relevant key pressed this frame.
    pub fn get_input(&self) -> Option<PlayerInput> {
        POLLED_KEYS
            .iter()
            .filter(|key| is_key_pressed(**key))
            .find_map(|key| self.key_to_input(*key))
    }

    /// Maps a single key to player input.
    pub fn key_to_input(&self, key: KeyCode) -> Option<PlayerInput> {
        match key {
            KeyCode::Escape | KeyCode::Q => Some(PlayerInput::Quit),
            KeyCode::Up => Some(PlayerInput::Move(Direction::North)),
            KeyCode::Down => Some(PlayerInput::Move(Direction::South)),
            KeyCode::Left => Some(PlayerInput::Move(Direction::West)),
            KeyCode::Right => Some(PlayerInput::Move(Direction::East)),
            KeyCode::W if self.wasd_enabled => Some(PlayerInput::Move(Direction::North)),
            KeyCode::S if self.wasd_enabled => Some(PlayerInput::Move(Direction::South)),
            KeyCode::A if self.wasd_enabled => Some(PlayerInput::Move(Direction::West)),
            KeyCode::D if self.wasd_enabled => Some(PlayerInput::Move(Direction::East)),
            KeyCode::Enter | KeyCode::Space => Some(PlayerInput::Confirm),
            KeyCode::F1 => Some(PlayerInput::Help),
            KeyCode::H => Some(PlayerInput::ShowHighScores),
            KeyCode::N => Some(PlayerInput::NewGame),
            _ => None,
        }
    }

    /// Converts player input into a session command.
    ///
    /// Movement only makes sense while the session is active; a new game can
    /// be requested from any phase.
    pub fn input_to_command(&self, input: PlayerInput, phase: SessionPhase) -> Option<GameCommand> {
        match input {
            PlayerInput::Move(direction) if phase == SessionPhase::Active => {
                Some(GameCommand::Move(direction))
            }
            PlayerInput::NewGame => Some(GameCommand::Restart),
            _ => None,
        }
    }
}

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move one cell in a direction
    Move(Direction),
    /// Confirm or dismiss the current screen
    Confirm,
    /// Show the rules
    Help,
    /// Show the high-score board
    ShowHighScores,
    /// Start a new game
    NewGame,
    /// Quit the game
    Quit,
}
