//! # Display Management
//!
//! Board and status rendering using macroquad.

use crate::config;
use crate::game::{CellState, GameSession};
use crate::rendering::UI;
use macroquad::prelude::*;
use std::time::Instant;

const STATUS_BAR_HEIGHT: f32 = 40.0;
const MESSAGE_AREA_HEIGHT: f32 = 70.0;
const FOG_COLOR: Color = Color::new(0.35, 0.35, 0.35, 1.0);
const EMPTY_COLOR: Color = Color::new(0.95, 0.95, 0.92, 1.0);

/// Macroquad display manager for the game.
///
/// Draws the status line, the board with its fog of war, and the most recent
/// messages. Overlay screens are drawn by [`UI`].
pub struct MacroquadDisplay {
    /// Cells within this distance of the player are drawn
    pub reveal_radius: u32,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Menu, modal and scoreboard screens
    pub ui: UI,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadDisplay {
    /// Creates a new display manager.
    pub fn new() -> Self {
        Self {
            reveal_radius: config::REVEAL_RADIUS,
            messages: Vec::new(),
            max_messages: 100,
            ui: UI::new(),
        }
    }

    /// Gets the fill colour for a cell.
    ///
    /// Hidden cells are all drawn the same so the fog gives nothing away.
    pub fn cell_color(state: CellState, revealed: bool) -> Color {
        if !revealed {
            return FOG_COLOR;
        }
        match state {
            CellState::Empty => EMPTY_COLOR,
            CellState::Player => SKYBLUE,
            CellState::Treasure => GOLD,
            CellState::Obstacle => DARKBROWN,
        }
    }

    /// Renders the status line, the board and the message area.
    pub fn render_game(&self, session: &GameSession, now: Instant) {
        clear_background(BLACK);

        draw_text(&session.status_line(now), 10.0, 28.0, 24.0, WHITE);
        self.render_board(session);
        self.render_messages();
    }

    /// Computes the tile size and the top-left corner of the board.
    fn board_layout(&self, size: usize) -> (f32, f32, f32) {
        let available_height = screen_height() - STATUS_BAR_HEIGHT - MESSAGE_AREA_HEIGHT;
        let board_pixels = available_height.min(screen_width() - 20.0).max(0.0);
        let tile_size = board_pixels / size.max(1) as f32;
        let origin_x = (screen_width() - board_pixels) / 2.0;
        (tile_size, origin_x, STATUS_BAR_HEIGHT)
    }

    /// Renders the grid.
    fn render_board(&self, session: &GameSession) {
        let grid = session.grid();
        let (tile_size, origin_x, origin_y) = self.board_layout(grid.size());

        for pos in grid.positions() {
            let state = grid.get_cell(pos).unwrap_or(CellState::Empty);
            let revealed = grid.is_revealed(pos, self.reveal_radius);
            let x = origin_x + pos.x as f32 * tile_size;
            let y = origin_y + pos.y as f32 * tile_size;

            draw_rectangle(x, y, tile_size, tile_size, Self::cell_color(state, revealed));
            draw_rectangle_lines(x, y, tile_size, tile_size, 1.0, BLACK);

            if revealed {
                self.render_symbol(state, x, y, tile_size);
            }
        }
    }

    /// Draws the cell's symbol centred in its tile.
    fn render_symbol(&self, state: CellState, x: f32, y: f32, tile_size: f32) {
        let label = match state {
            CellState::Empty => return,
            CellState::Player => "P",
            CellState::Treasure => "T",
            CellState::Obstacle => "X",
        };
        let font_size = tile_size * 0.6;
        let dimensions = measure_text(label, None, font_size as u16, 1.0);
        draw_text(
            label,
            x + (tile_size - dimensions.width) / 2.0,
            y + (tile_size + dimensions.height) / 2.0,
            font_size,
            BLACK,
        );
    }

    /// Renders the message area.
    fn render_messages(&self) {
        let message_area_y = screen_height() - MESSAGE_AREA_HEIGHT + 18.0;
        let message_count = 3; // Show last 3 messages
        let line_height = 18.0;

        let start_index = self.messages.len().saturating_sub(message_count);
        for (i, message) in self.messages.iter().skip(start_index).enumerate() {
            let y = message_area_y + i as f32 * line_height;
            draw_text(message, 10.0, y, 18.0, LIGHTGRAY);
        }
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    /// Clears the message history.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }
}
