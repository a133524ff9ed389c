//! # Scene Management System
//!
//! Drives the front-end: which screen is showing, how key presses turn into
//! session commands, and what happens after a win or a loss.

use crate::game::{BlockReason, GameSession, MoveOutcome, SessionSummary};
use crate::input::{CommandResult, InputHandler, PlayerInput};
use crate::rendering::MacroquadDisplay;
use crate::scores::{HighScoreBoard, HighScoreEntry, HighScoreStore};
use crate::TreasureResult;
use log::{error, info};
use macroquad::input::clear_input_queue;
use macroquad::prelude::*;
use std::time::Instant;

/// Longest name accepted at the high-score prompt.
const MAX_NAME_LENGTH: usize = 24;

/// Appends typed characters to a name, dropping control characters and
/// anything past [`MAX_NAME_LENGTH`].
fn append_typed(name: &mut String, typed: impl IntoIterator<Item = char>) {
    for c in typed {
        if !c.is_control() && name.chars().count() < MAX_NAME_LENGTH {
            name.push(c);
        }
    }
}

/// Represents the current scene in the game
#[derive(Debug, Clone, PartialEq)]
pub enum SceneType {
    /// Main menu
    Menu,
    /// Rules screen
    Rules,
    /// Normal gameplay
    Playing,
    /// Modal shown after picking up a treasure; the clock is paused
    TreasureFound { remaining: usize },
    /// Name prompt after a win
    EnterName { summary: SessionSummary, name: String },
    /// Win or loss screen
    GameOver { won: bool, summary: SessionSummary },
    /// Scoreboard
    HighScores,
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    session: GameSession,
    display: MacroquadDisplay,
    input_handler: InputHandler,
    store: HighScoreStore,
    high_scores: HighScoreBoard,
}

impl SceneManager {
    /// Creates a scene manager showing the main menu.
    pub fn new(
        session: GameSession,
        input_handler: InputHandler,
        store: HighScoreStore,
    ) -> Self {
        // An unreadable score file must not keep the game from starting.
        let high_scores = store.load().unwrap_or_else(|e| {
            error!("Failed to load high scores from {:?}: {}", store.path(), e);
            HighScoreBoard::new()
        });

        Self {
            current_scene: SceneType::Menu,
            session,
            display: MacroquadDisplay::new(),
            input_handler,
            store,
            high_scores,
        }
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> TreasureResult<()> {
        loop {
            let now = Instant::now();
            let exit = match self.current_scene.clone() {
                SceneType::Menu => self.update_menu()?,
                SceneType::Rules => self.update_rules(),
                SceneType::Playing => self.update_playing(now)?,
                SceneType::TreasureFound { remaining } => self.update_treasure_found(remaining, now),
                SceneType::EnterName { summary, name } => self.update_enter_name(summary, name),
                SceneType::GameOver { won, summary } => self.update_game_over(won, summary)?,
                SceneType::HighScores => self.update_high_scores(),
            };
            if exit {
                break;
            }
            next_frame().await;
        }

        info!("Game loop ended");
        Ok(())
    }

    fn start_session(&mut self) -> TreasureResult<()> {
        self.session.reset()?;
        self.display.clear_messages();
        self.display
            .add_message("Find every treasure. Arrow keys or WASD to move.".to_string());
        self.current_scene = SceneType::Playing;
        Ok(())
    }

    /// Updates the main menu, returns true if exit is requested
    fn update_menu(&mut self) -> TreasureResult<bool> {
        self.display.ui.render_menu();

        match self.input_handler.get_input() {
            Some(PlayerInput::Confirm) | Some(PlayerInput::NewGame) => self.start_session()?,
            Some(PlayerInput::Help) => self.current_scene = SceneType::Rules,
            Some(PlayerInput::ShowHighScores) => self.current_scene = SceneType::HighScores,
            Some(PlayerInput::Quit) => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    fn update_rules(&mut self) -> bool {
        self.display.ui.render_rules();

        if matches!(
            self.input_handler.get_input(),
            Some(PlayerInput::Confirm) | Some(PlayerInput::Quit)
        ) {
            self.current_scene = SceneType::Menu;
        }
        false
    }

    /// Updates the playing scene, returns true if exit is requested
    fn update_playing(&mut self, now: Instant) -> TreasureResult<bool> {
        self.session.tick(now);

        if let Some(input) = self.input_handler.get_input() {
            match input {
                PlayerInput::Quit => self.current_scene = SceneType::Menu,
                PlayerInput::Help => self.display.add_message(
                    "Arrow keys/WASD move, N restarts, Esc returns to the menu".to_string(),
                ),
                other => {
                    if let Some(command) =
                        self.input_handler.input_to_command(other, self.session.state().phase)
                    {
                        match self.session.execute(command, now)? {
                            CommandResult::Moved(outcome) => self.handle_outcome(outcome, now),
                            CommandResult::Restarted => {
                                self.display.add_message("New board generated.".to_string())
                            }
                            CommandResult::ClockPaused | CommandResult::ClockResumed => {}
                        }
                    }
                }
            }
        }

        if self.current_scene == SceneType::Playing {
            self.display.render_game(&self.session, now);
        }
        Ok(false)
    }

    fn handle_outcome(&mut self, outcome: MoveOutcome, now: Instant) {
        match outcome {
            MoveOutcome::Blocked(BlockReason::OutOfBounds) => self
                .display
                .add_message("You can't move outside the grid!".to_string()),
            MoveOutcome::Blocked(BlockReason::SessionNotActive) | MoveOutcome::Moved { .. } => {}
            MoveOutcome::TreasureFound {
                summary: Some(summary),
                ..
            }
            | MoveOutcome::BoardCleared { summary, .. } => self.prompt_for_name(summary),
            MoveOutcome::TreasureFound {
                remaining,
                summary: None,
            } => {
                self.session.pause_clock(now);
                self.current_scene = SceneType::TreasureFound { remaining };
            }
            MoveOutcome::HitObstacle { summary } => {
                self.current_scene = SceneType::GameOver {
                    won: false,
                    summary,
                };
            }
        }
    }

    /// Opens the name prompt with an empty name.
    ///
    /// Characters typed during play stay in macroquad's queue until read, so
    /// the queue is dropped before the prompt starts reading from it.
    fn prompt_for_name(&mut self, summary: SessionSummary) {
        clear_input_queue();
        self.current_scene = SceneType::EnterName {
            summary,
            name: String::new(),
        };
    }

    fn update_treasure_found(&mut self, remaining: usize, now: Instant) -> bool {
        self.display.render_game(&self.session, now);
        self.display.ui.render_treasure_found(remaining);

        if self.input_handler.get_input() == Some(PlayerInput::Confirm) {
            self.session.resume_clock(now);
            self.current_scene = SceneType::Playing;
        }
        false
    }

    /// Collects typed characters for the high-score name.
    fn update_enter_name(&mut self, summary: SessionSummary, mut name: String) -> bool {
        append_typed(&mut name, std::iter::from_fn(get_char_pressed));
        if is_key_pressed(KeyCode::Backspace) {
            name.pop();
        }

        self.display.ui.render_name_entry(&summary, &name);

        if is_key_pressed(KeyCode::Enter) {
            self.current_scene = if self.save_high_score(&name, summary) {
                SceneType::HighScores
            } else {
                SceneType::GameOver { won: true, summary }
            };
        } else if is_key_pressed(KeyCode::Escape) {
            self.current_scene = SceneType::GameOver { won: true, summary };
        } else {
            self.current_scene = SceneType::EnterName { summary, name };
        }
        false
    }

    /// Records a win and returns whether it was saved. Blank names are not recorded.
    fn save_high_score(&mut self, name: &str, summary: SessionSummary) -> bool {
        let entry = match HighScoreEntry::new(name, summary.elapsed_seconds, summary.moves_made) {
            Ok(entry) => entry,
            Err(_) => return false,
        };

        match self.store.record(entry) {
            Ok((board, rank)) => {
                self.high_scores = board;
                self.display
                    .add_message(format!("High score saved at rank {}.", rank));
                true
            }
            Err(e) => {
                error!("Failed to save high score to {:?}: {}", self.store.path(), e);
                self.display
                    .add_message(format!("Could not save the high score: {}", e));
                false
            }
        }
    }

    fn update_game_over(&mut self, won: bool, summary: SessionSummary) -> TreasureResult<bool> {
        self.display.render_game(&self.session, Instant::now());
        self.display.ui.render_game_over(won, &summary);

        match self.input_handler.get_input() {
            Some(PlayerInput::NewGame) | Some(PlayerInput::Confirm) => self.start_session()?,
            Some(PlayerInput::ShowHighScores) => self.current_scene = SceneType::HighScores,
            Some(PlayerInput::Quit) => self.current_scene = SceneType::Menu,
            _ => {}
        }
        Ok(false)
    }

    fn update_high_scores(&mut self) -> bool {
        self.display.ui.render_high_scores(&self.high_scores);

        if matches!(
            self.input_handler.get_input(),
            Some(PlayerInput::Confirm) | Some(PlayerInput::Quit)
        ) {
            self.current_scene = SceneType::Menu;
        }
        false
    }
}
