use crate::prelude::AppError;

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "contact-book", version, about = "Simple Contact Book")]
pub struct Cli {
    /// Contact file to load from and save to (asked for when omitted)
    #[arg(env = "CONTACT_BOOK_FILE")]
    pub path: Option<PathBuf>,
}

/// Entries of the interactive menu, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    Search,
    Delete,
    List,
    SaveAndExit,
    ExitWithoutSaving,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::Add,
        MenuAction::Search,
        MenuAction::Delete,
        MenuAction::List,
        MenuAction::SaveAndExit,
        MenuAction::ExitWithoutSaving,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Add => "Add contact",
            MenuAction::Search => "Search contact",
            MenuAction::Delete => "Delete contact",
            MenuAction::List => "List all contacts",
            MenuAction::SaveAndExit => "Save and exit",
            MenuAction::ExitWithoutSaving => "Exit without saving",
        }
    }
}

impl FromStr for MenuAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuAction::Add),
            "2" => Ok(MenuAction::Search),
            "3" => Ok(MenuAction::Delete),
            "4" => Ok(MenuAction::List),
            "5" => Ok(MenuAction::SaveAndExit),
            "6" => Ok(MenuAction::ExitWithoutSaving),
            other => Err(AppError::ParseCommand(other.to_string())),
        }
    }
}
