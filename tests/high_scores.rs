//! High-score file handling across runs.

use std::fs;
use treasure_hunt::{HighScoreEntry, HighScoreStore, TreasureResult};

#[test]
fn test_scores_sorted_by_time_then_moves() -> TreasureResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("highscores.txt");
    let store = HighScoreStore::new(&path);

    store.record(HighScoreEntry::new("Alice", 40, 30)?)?;
    let (_, rank) = store.record(HighScoreEntry::new("Bob", 40, 25)?)?;
    assert_eq!(rank, 1);

    let text = fs::read_to_string(&path)?;
    assert_eq!(
        text,
        "Bob - 40 seconds, 25 moves\nAlice - 40 seconds, 30 moves\n"
    );

    let reloaded = HighScoreStore::new(&path).load()?;
    let names: Vec<&str> = reloaded.entries().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["Bob", "Alice"]);
    Ok(())
}

#[test]
fn test_hand_edited_file_keeps_valid_lines() -> TreasureResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("highscores.txt");
    fs::write(
        &path,
        "Carol - 90 seconds, 50 moves\n\
         garbage without separators\n\
         \n\
         Dash - Dot - 12 seconds, 9 moves\n\
         Eve - soon seconds, 3 moves\n",
    )?;

    let store = HighScoreStore::new(&path);
    let board = store.load()?;
    assert_eq!(board.len(), 2);
    assert_eq!(board.best().map(|e| e.name()), Some("Dash - Dot"));

    // Recording rewrites the file without the malformed lines.
    let (board, rank) = store.record(HighScoreEntry::new("Finn", 60, 40)?)?;
    assert_eq!(rank, 2);
    assert_eq!(board.len(), 3);
    assert_eq!(
        fs::read_to_string(&path)?,
        "Dash - Dot - 12 seconds, 9 moves\n\
         Finn - 60 seconds, 40 moves\n\
         Carol - 90 seconds, 50 moves\n"
    );
    Ok(())
}

#[test]
fn test_missing_directory_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = HighScoreStore::new(dir.path().join("missing").join("highscores.txt"));
    let entry = HighScoreEntry::new("Gus", 10, 10).unwrap();

    assert!(store.record(entry).is_err());
}
