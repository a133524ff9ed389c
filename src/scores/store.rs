//! Save and restore the high-score board.
//!
//! The file holds the text form produced by [`HighScoreBoard::to_text`].

use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::scores::{HighScoreBoard, HighScoreEntry};
use crate::TreasureResult;

/// File-backed high-score storage.
pub struct HighScoreStore {
    /// Path to the high-score file.
    path: PathBuf,
}

impl HighScoreStore {
    /// Creates a store for the given file. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!("High scores file: {path:?}");
        Self { path }
    }

    /// Gets the path of the high-score file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the board from disk.
    ///
    /// A missing file is an empty board. Malformed lines are skipped.
    pub fn load(&self) -> TreasureResult<HighScoreBoard> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("No high scores at {:?} yet", self.path);
                return Ok(HighScoreBoard::new());
            }
            Err(error) => return Err(error.into()),
        };

        let (board, skipped) = HighScoreBoard::parse_bytes(&bytes);
        debug!("Loaded {} high scores, skipped {} lines", board.len(), skipped);
        Ok(board)
    }

    /// Writes the board to disk, replacing the previous file.
    pub fn save(&self, board: &HighScoreBoard) -> TreasureResult<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(board.to_text().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Adds an entry to the board on disk.
    ///
    /// The file is reloaded first so entries written by another run are kept.
    /// Returns the updated board and the entry's 1-based rank.
    pub fn record(&self, entry: HighScoreEntry) -> TreasureResult<(HighScoreBoard, usize)> {
        let mut board = self.load()?;
        let rank = board.add(entry);
        self.save(&board)?;
        info!("High score saved at rank {} of {}", rank, board.len());
        Ok((board, rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_board() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("highscores.txt"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("highscores.txt"));
        let board = HighScoreBoard::from_entries(vec![
            HighScoreEntry::new("Alice", 120, 30).unwrap(),
            HighScoreEntry::new("Bob", 95, 40).unwrap(),
        ]);

        store.save(&board).unwrap();
        assert_eq!(store.load().unwrap(), board);
    }

    #[test]
    fn test_record_reloads_before_appending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.txt");
        std::fs::write(&path, "Alice - 120 seconds, 30 moves\nnot a score\n").unwrap();

        let store = HighScoreStore::new(&path);
        let (board, rank) = store
            .record(HighScoreEntry::new("Bob", 95, 40).unwrap())
            .unwrap();
        assert_eq!(rank, 1);
        assert_eq!(board.len(), 2);

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            on_disk,
            "Bob - 95 seconds, 40 moves\nAlice - 120 seconds, 30 moves\n"
        );
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.txt");
        std::fs::write(
            &path,
            b"Alice - 120 seconds, 30 moves\n\xff\xfe bad - 1 seconds, 1 moves\nBob - 95 seconds, 40 moves\n",
        )
        .unwrap();

        let store = HighScoreStore::new(&path);
        let board = store.load().unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board.best().unwrap().name(), "Bob");

        let (board, rank) = store
            .record(HighScoreEntry::new("Cleo", 100, 10).unwrap())
            .unwrap();
        assert_eq!(rank, 2);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file.
        let store = HighScoreStore::new(dir.path());
        assert!(store.load().is_err());
    }
}
