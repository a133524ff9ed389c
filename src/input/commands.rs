//! # Command Definitions
//!
//! Messages the front-end sends to a [`GameSession`](crate::GameSession) and
//! the results it gets back.

use crate::game::{Direction, MoveOutcome};
use serde::{Deserialize, Serialize};

/// A discrete request for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCommand {
    /// Move the player one cell
    Move(Direction),
    /// Freeze the session clock
    PauseClock,
    /// Unfreeze the session clock
    ResumeClock,
    /// Discard the current board and start over
    Restart,
}

/// What a [`GameCommand`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandResult {
    Moved(MoveOutcome),
    ClockPaused,
    ClockResumed,
    Restarted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_serialize() {
        let command = GameCommand::Move(Direction::North);
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"{"Move":"North"}"#);
        let back: GameCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
    }
}
