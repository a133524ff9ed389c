//! # Scores Module
//!
//! High-score entries and the scoreboard.
//!
//! The board is stored as text, one entry per line:
//!
//! ```text
//! Bob - 95 seconds, 40 moves
//! Alice - 120 seconds, 30 moves
//! ```
//!
//! Entries are ordered by time, then by moves. Lines that do not parse are
//! skipped so one bad line never loses the rest of the board. See
//! [`store::HighScoreStore`] for loading and saving files.

pub mod store;

pub use store::*;

use crate::{TreasureHuntError, TreasureResult};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NAME_SEPARATOR: &str = " - ";
const FIELD_SEPARATOR: &str = ", ";
const SECONDS_SUFFIX: &str = " seconds";
const MOVES_SUFFIX: &str = " moves";

/// One finished, winning session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighScoreEntry {
    name: String,
    time_seconds: u64,
    moves_made: u32,
}

impl HighScoreEntry {
    /// Creates an entry. The name is trimmed and must be a non-empty single line.
    ///
    /// # Examples
    ///
    /// ```
    /// use treasure_hunt::HighScoreEntry;
    ///
    /// let entry = HighScoreEntry::new("  Alice ", 120, 30).unwrap();
    /// assert_eq!(entry.name(), "Alice");
    /// assert_eq!(entry.to_string(), "Alice - 120 seconds, 30 moves");
    /// assert!(HighScoreEntry::new("   ", 1, 1).is_err());
    /// ```
    pub fn new(name: &str, time_seconds: u64, moves_made: u32) -> TreasureResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TreasureHuntError::InvalidHighScore(
                "name must not be empty".to_string(),
            ));
        }
        if name.contains(['\n', '\r']) {
            return Err(TreasureHuntError::InvalidHighScore(
                "name must be a single line".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            time_seconds,
            moves_made,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn time_seconds(&self) -> u64 {
        self.time_seconds
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    /// Gets the ordering key: time first, moves as the tiebreak.
    pub fn sort_key(&self) -> (u64, u32) {
        (self.time_seconds, self.moves_made)
    }
}

impl fmt::Display for HighScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}",
            self.name,
            NAME_SEPARATOR,
            self.time_seconds,
            SECONDS_SUFFIX,
            FIELD_SEPARATOR,
            self.moves_made,
            MOVES_SUFFIX
        )
    }
}

impl FromStr for HighScoreEntry {
    type Err = TreasureHuntError;

    /// Parses `"<name> - <time> seconds, <moves> moves"`.
    ///
    /// The name is everything before the last `" - "`, so names containing
    /// the separator survive a round trip.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || TreasureHuntError::InvalidHighScore(format!("malformed line {:?}", line));

        let (name, details) = line.trim_end().rsplit_once(NAME_SEPARATOR).ok_or_else(malformed)?;
        let (time, moves) = details.split_once(FIELD_SEPARATOR).ok_or_else(malformed)?;

        let time_seconds = time
            .trim()
            .strip_suffix(SECONDS_SUFFIX)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .ok_or_else(malformed)?;
        let moves_made = moves
            .trim()
            .strip_suffix(MOVES_SUFFIX)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .ok_or_else(malformed)?;

        Self::new(name, time_seconds, moves_made)
    }
}

/// High scores sorted by `(time_seconds, moves_made)`.
///
/// Entries with equal keys keep the order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreBoard {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from entries in any order.
    pub fn from_entries(entries: Vec<HighScoreEntry>) -> Self {
        let mut board = Self { entries };
        board.sort();
        board
    }

    fn sort(&mut self) {
        self.entries.sort_by_key(HighScoreEntry::sort_key);
    }

    /// Adds an entry and returns its 1-based rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use treasure_hunt::{HighScoreBoard, HighScoreEntry};
    ///
    /// let mut board = HighScoreBoard::new();
    /// board.add(HighScoreEntry::new("Alice", 120, 30).unwrap());
    /// let rank = board.add(HighScoreEntry::new("Bob", 95, 40).unwrap());
    /// assert_eq!(rank, 1);
    /// assert_eq!(board.best().unwrap().name(), "Bob");
    /// ```
    pub fn add(&mut self, entry: HighScoreEntry) -> usize {
        let key = entry.sort_key();
        // Insert after every entry that sorts before or equal to the new one.
        let index = self.entries.partition_point(|existing| existing.sort_key() <= key);
        self.entries.insert(index, entry);
        index + 1
    }

    /// Gets the entries, best first.
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Gets the best entry.
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the board, one line per entry.
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}\n", entry))
            .collect()
    }

    /// Parses a board, skipping lines that are malformed.
    ///
    /// Returns the board and the number of skipped lines. Blank lines are
    /// ignored and not counted.
    pub fn parse(text: &str) -> (Self, usize) {
        Self::parse_bytes(text.as_bytes())
    }

    /// Parses a board from raw file contents.
    ///
    /// Each line is decoded on its own, so a line that is not valid UTF-8 is
    /// skipped like any other malformed line.
    pub fn parse_bytes(bytes: &[u8]) -> (Self, usize) {
        let mut entries = Vec::new();
        let mut skipped = 0;

        for (number, raw) in bytes.split(|&b| b == b'\n').enumerate() {
            let line = match std::str::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Skipping high score line {}: {}", number + 1, e);
                    skipped += 1;
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<HighScoreEntry>() {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!("Skipping high score line {}: {}", number + 1, e);
                    skipped += 1;
                }
            }
        }

        (Self::from_entries(entries), skipped)
    }
}
