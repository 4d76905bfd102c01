use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn contact_book(path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("contact-book").unwrap();
    cmd.arg(path)
        .env("AUTOSAVE_INTERVAL_SECS", "3600")
        .env_remove("CONTACT_BOOK_FILE");
    cmd
}

#[test]
fn saved_contacts_are_loaded_on_next_start() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    contact_book(&path)
        .write_stdin(
            "n\n\
            1\n1\nAlice\n555-1111\na@x.com\n\
            1\n2\nBob\n555-2222\nb@x.com\n\
            3\n1\n\
            5\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Contacts saved to"));

    let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, json!({ "2": ["Bob", "555-2222", "b@x.com"] }));

    contact_book(&path)
        .write_stdin("y\n2\n2\n2\n1\n6\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 1 contacts from"))
        .stdout(predicate::str::contains("Contact found: Bob 555-2222 b@x.com"))
        .stdout(predicate::str::contains("Contact not found."));
}

#[test]
fn missing_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.json");

    contact_book(&path)
        .write_stdin("y\n4\n6\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No existing file found, starting with empty contacts.",
        ))
        .stdout(predicate::str::contains("No contacts found."));
}

#[test]
fn corrupt_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, r#"{"1": ["Alice", "555-1111"]}"#).unwrap();

    contact_book(&path)
        .write_stdin("y\n4\n6\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No existing file found, starting with empty contacts.",
        ))
        .stdout(predicate::str::contains("No contacts found."));
}

#[test]
fn exit_without_saving_leaves_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    contact_book(&path)
        .write_stdin(
            "n\n\
            1\n1\nAlice\n555-1111\na@x.com\n\
            6\nn\n\
            4\n\
            6\ny\n",
        )
        .assert()
        .success()
        // Declining the confirmation returns to the menu
        .stdout(predicate::str::contains("ID: 1 | Name: Alice"))
        .stdout(predicate::str::contains("Goodbye!"));

    assert!(!path.exists());
}

#[test]
fn path_is_asked_for_when_not_given() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("asked.json");

    Command::cargo_bin("contact-book")
        .unwrap()
        .env("AUTOSAVE_INTERVAL_SECS", "3600")
        .env_remove("CONTACT_BOOK_FILE")
        .write_stdin(format!(
            "{}\nn\n1\n7\nZed\n0700\nz@x.com\n5\n",
            path.display()
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter filename for contacts"));

    let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, json!({ "7": ["Zed", "0700", "z@x.com"] }));
}

#[test]
fn path_can_come_from_environment() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("from_env.json");

    Command::cargo_bin("contact-book")
        .unwrap()
        .env("AUTOSAVE_INTERVAL_SECS", "3600")
        .env("CONTACT_BOOK_FILE", &path)
        .write_stdin("n\n1\n1\nAlice\n555-1111\na@x.com\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Using filename:"));

    assert!(path.exists());
}

#[test]
fn invalid_choices_keep_the_menu_running() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    contact_book(&path)
        .write_stdin("n\n7\nadd\n\n6\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice. Please enter 1-6.").count(3));
}

#[test]
fn closed_input_exits_cleanly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    contact_book(&path)
        .write_stdin("n\n1\n1\nAlice\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));

    assert!(!path.exists());
}

#[test]
fn invalid_autosave_interval_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    Command::cargo_bin("contact-book")
        .unwrap()
        .arg(&path)
        .env("AUTOSAVE_INTERVAL_SECS", "0")
        .write_stdin("n\n6\ny\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn closed_input_at_startup_prompts_exits_cleanly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    // Closed before "Load existing contacts?"
    contact_book(&path)
        .env_remove("RUST_LOG")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"))
        .stderr(predicate::str::is_empty());

    // Closed before the filename is given
    Command::cargo_bin("contact-book")
        .unwrap()
        .env("AUTOSAVE_INTERVAL_SECS", "3600")
        .env_remove("CONTACT_BOOK_FILE")
        .env_remove("RUST_LOG")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"))
        .stderr(predicate::str::is_empty());

    assert!(!path.exists());
}

#[test]
fn failed_save_and_exit_is_reported() {
    let dir = tempdir().unwrap();

    // The contact file path is an existing directory
    contact_book(dir.path())
        .write_stdin("n\n1\n1\nAlice\n555-1111\na@x.com\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error saving contacts!"))
        .stdout(predicate::str::contains("Contacts saved to").not())
        .stdout(predicate::str::contains("Goodbye!"));
}
