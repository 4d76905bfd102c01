use crate::prelude::{
    AppError, Autosave, AutosaveStatus, Config, Contact, ContactStore, JoinOutcome, JsonStorage,
    SharedStore,
    command::{Cli, MenuAction},
};

use super::io::{self, confirm, is_input_closed, prompt};
use clap::Parser;
use dotenv::dotenv;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const AUTOSAVE_JOIN_TIMEOUT: Duration = Duration::from_secs(1);

enum Flow {
    Continue,
    Exit,
}

pub fn run_app() -> Result<(), AppError> {
    dotenv().ok();
    let config = Config::from_cli(Cli::parse())?;

    println!("\n=== Welcome to Contact Book ===");

    let (path, store) = match open_book(config.path) {
        Ok(opened) => opened,
        // Closed stdin before the menu leaves like "exit without saving"
        Err(e) if is_input_closed(&e) => {
            println!("\nGoodbye!\n");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let store = store.shared();
    let autosave = Autosave::new(
        Arc::clone(&store),
        JsonStorage::new(&path),
        config.autosave_interval,
    )
    .spawn()?;

    let result = menu_loop(&store, &path);

    log_autosave_summary(&autosave.status());
    if autosave.stop_and_join(AUTOSAVE_JOIN_TIMEOUT) == JoinOutcome::TimedOut {
        debug!("exiting while autosave is still running");
    }
    println!("\nGoodbye!\n");

    result
}

/// Resolves the contact file and optionally loads it.
fn open_book(path: Option<PathBuf>) -> Result<(PathBuf, ContactStore), AppError> {
    let path = match path {
        Some(path) => {
            println!("Using filename: {}", path.display());
            path
        }
        None => PathBuf::from(prompt(
            "Enter filename for contacts (e.g., contacts.json): ",
        )?),
    };

    let mut store = ContactStore::new();
    if confirm("Load existing contacts? (y/n): ")? {
        match store.load(&path) {
            Ok(count) => println!("Loaded {} contacts from {}", count, path.display()),
            Err(e) => {
                debug!("{e}");
                println!("No existing file found, starting with empty contacts.");
            }
        }
    }

    Ok((path, store))
}

fn log_autosave_summary(status: &AutosaveStatus) {
    match status.last_saved_at {
        Some(at) => info!(
            "last autosave at {} ({} saves, {} failed)",
            at.format("%Y-%m-%d %H:%M:%S UTC"),
            status.saves,
            status.failures
        ),
        None => info!("no autosave this session ({} failed)", status.failures),
    }
}

fn menu_loop(store: &SharedStore, path: &Path) -> Result<(), AppError> {
    loop {
        io::show_menu();

        let step = prompt("Enter choice (1-6): ").and_then(|choice| match choice.parse() {
            Ok(action) => handle(action, store, path),
            Err(e) => {
                debug!("{e}");
                println!("Invalid choice. Please enter 1-6.");
                Ok(Flow::Continue)
            }
        });

        match step {
            Ok(Flow::Continue) => continue,
            Ok(Flow::Exit) => return Ok(()),
            // Closed stdin leaves like "exit without saving"
            Err(e) if is_input_closed(&e) => {
                println!();
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
}

fn handle(action: MenuAction, store: &SharedStore, path: &Path) -> Result<Flow, AppError> {
    match action {
        MenuAction::Add => {
            let id = prompt("Enter ID: ")?;
            let name = prompt("Enter name: ")?;
            let phone = prompt("Enter phone: ")?;
            let email = prompt("Enter email: ")?;

            match store.lock()?.add(id, Contact::new(name, phone, email)) {
                Some(_) => println!("Contact updated."),
                None => println!("Contact added."),
            }
        }

        MenuAction::Search => {
            let id = prompt("Enter ID to search: ")?;

            match store.lock()?.search(&id) {
                Ok(contact) => println!("Contact found: {}", contact),
                Err(e) => {
                    debug!("{e}");
                    println!("Contact not found.");
                }
            }
        }

        MenuAction::Delete => {
            let id = prompt("Enter ID to delete: ")?;

            match store.lock()?.delete(&id) {
                Ok(_) => println!("Contact deleted."),
                Err(e) => {
                    debug!("{e}");
                    println!("Contact not found.");
                }
            }
        }

        MenuAction::List => {
            let store = store.lock()?;
            match store.list() {
                Some(contacts) => print!("{}", io::render_contact_list(&contacts)),
                None => println!("No contacts found."),
            }
        }

        MenuAction::SaveAndExit => {
            match store.lock()?.save(path) {
                Ok(()) => println!("Contacts saved to {}", path.display()),
                Err(e) => {
                    warn!("saving to {} failed: {}", path.display(), e);
                    println!("Error saving contacts!");
                }
            }
            return Ok(Flow::Exit);
        }

        MenuAction::ExitWithoutSaving => {
            if confirm("Are you sure? Unsaved changes will be lost (y/n): ")? {
                return Ok(Flow::Exit);
            }
        }
    }

    Ok(Flow::Continue)
}
