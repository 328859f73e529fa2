use std::fs;

use snooze_engine::{ensure_state_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("state");
    assert!(!new_dir.exists());
    ensure_state_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("session.ron", "first").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "first");

    let second = writer.write("session.ron", "second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "second");
}

#[test]
fn writing_into_a_file_path_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("session.ron", "data").is_err());
    assert!(!file_path.with_file_name("session.ron").exists());
}

#[test]
fn remove_tolerates_missing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    writer.remove("session.ron").unwrap();
    let path = writer.write("session.ron", "data").unwrap();
    writer.remove("session.ron").unwrap();
    assert!(!path.exists());
}
