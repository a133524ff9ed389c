//! # Rendering Module
//!
//! Macroquad rendering for the board, the status line and the menu screens.
//! Nothing in here mutates game state.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
