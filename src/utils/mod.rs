//! # Utilities Module
//!
//! Grid search helpers shared by the generator and the tests.

pub mod pathfinding;

pub use pathfinding::*;
