//! # User Interface Elements
//!
//! Full-screen menus and modal overlays drawn on top of the board.

use crate::config;
use crate::game::SessionSummary;
use crate::scores::HighScoreBoard;
use macroquad::prelude::*;

/// Rules shown from the main menu.
pub const RULES_TEXT: [&str; 4] = [
    "1. Use the arrow keys (or WASD) to move the player (P).",
    "2. Find all the treasures (T) to win.",
    "3. Avoid all obstacles (X). Walking into one ends the game.",
    "4. Collect all treasures in the least possible time to win.",
];

/// Screen-level UI drawing.
pub struct UI {
    /// Font size for titles
    pub title_size: f32,
    /// Font size for body text
    pub body_size: f32,
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI {
    /// Creates a new UI instance.
    pub fn new() -> Self {
        Self {
            title_size: 40.0,
            body_size: 22.0,
        }
    }

    /// Draws `text` horizontally centred at height `y`.
    fn draw_centered(&self, text: &str, y: f32, font_size: f32, color: Color) {
        let dimensions = measure_text(text, None, font_size as u16, 1.0);
        draw_text(text, (screen_width() - dimensions.width) / 2.0, y, font_size, color);
    }

    /// Draws a dimmed backdrop and a centred panel, returning the panel's top.
    fn draw_panel(&self, lines: usize) -> f32 {
        draw_rectangle(
            0.0,
            0.0,
            screen_width(),
            screen_height(),
            Color::new(0.0, 0.0, 0.0, 0.6),
        );

        let height = 90.0 + lines as f32 * (self.body_size + 8.0);
        let width = (screen_width() * 0.8).min(640.0);
        let x = (screen_width() - width) / 2.0;
        let y = (screen_height() - height) / 2.0;
        draw_rectangle(x, y, width, height, Color::new(0.1, 0.1, 0.15, 0.95));
        draw_rectangle_lines(x, y, width, height, 2.0, GOLD);
        y
    }

    /// Renders the main menu.
    pub fn render_menu(&self) {
        clear_background(BLACK);
        let top = screen_height() / 3.0;
        self.draw_centered("Treasure Hunt Adventure", top, self.title_size, GOLD);
        self.draw_centered("Enter - Play", top + 70.0, self.body_size, WHITE);
        self.draw_centered("F1 - Rules", top + 105.0, self.body_size, WHITE);
        self.draw_centered("H - High scores", top + 140.0, self.body_size, WHITE);
        self.draw_centered("Esc - Quit", top + 175.0, self.body_size, WHITE);
    }

    /// Renders the rules screen.
    pub fn render_rules(&self) {
        clear_background(BLACK);
        draw_text("Rules:", 40.0, 80.0, self.title_size, GOLD);
        for (i, line) in RULES_TEXT.iter().enumerate() {
            draw_text(line, 40.0, 130.0 + i as f32 * 32.0, self.body_size, WHITE);
        }
        draw_text(
            "Press Enter to go back",
            40.0,
            130.0 + RULES_TEXT.len() as f32 * 32.0 + 30.0,
            self.body_size,
            GRAY,
        );
    }

    /// Renders a modal notice over the current screen.
    pub fn render_notice(&self, title: &str, lines: &[String]) {
        let top = self.draw_panel(lines.len() + 1);
        self.draw_centered(title, top + 45.0, self.title_size * 0.8, GOLD);
        for (i, line) in lines.iter().enumerate() {
            self.draw_centered(
                line,
                top + 85.0 + i as f32 * (self.body_size + 8.0),
                self.body_size,
                WHITE,
            );
        }
    }

    /// Renders the "treasure found" modal.
    pub fn render_treasure_found(&self, remaining: usize) {
        self.render_notice(
            "You found a treasure!",
            &[
                format!("Treasures remaining: {}", remaining),
                "Press Enter to continue".to_string(),
            ],
        );
    }

    /// Renders the win or loss screen.
    pub fn render_game_over(&self, won: bool, summary: &SessionSummary) {
        let (title, detail) = if won {
            (
                "Congratulations, you win!",
                format!(
                    "All treasure found in {} seconds and {} moves",
                    summary.elapsed_seconds, summary.moves_made
                ),
            )
        } else {
            (
                "Game over",
                format!(
                    "You hit an obstacle after {} seconds",
                    summary.elapsed_seconds
                ),
            )
        };

        self.render_notice(
            title,
            &[
                detail,
                "N / Enter - play again".to_string(),
                "H - high scores   Esc - menu".to_string(),
            ],
        );
    }

    /// Renders the name prompt shown after a win.
    pub fn render_name_entry(&self, summary: &SessionSummary, name: &str) {
        self.render_notice(
            "You found all the treasure!",
            &[
                format!(
                    "{} seconds and {} moves. Enter your name:",
                    summary.elapsed_seconds, summary.moves_made
                ),
                format!("> {}_", name),
                "Enter - save   Esc - skip".to_string(),
            ],
        );
    }

    /// Renders the high-score board.
    pub fn render_high_scores(&self, board: &HighScoreBoard) {
        clear_background(BLACK);
        draw_text("High Scores:", 40.0, 80.0, self.title_size, GOLD);

        if board.is_empty() {
            draw_text("No high scores yet.", 40.0, 130.0, self.body_size, GRAY);
        }

        for (i, entry) in board
            .entries()
            .iter()
            .take(config::MAX_HIGH_SCORES_SHOWN)
            .enumerate()
        {
            let line = format!("{:>2}. {}", i + 1, entry);
            draw_text(&line, 40.0, 130.0 + i as f32 * 30.0, self.body_size, WHITE);
        }

        draw_text(
            "Press Enter to go back",
            40.0,
            screen_height() - 40.0,
            self.body_size,
            GRAY,
        );
    }
}
