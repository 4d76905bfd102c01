pub mod json;

use crate::prelude::{AppError, Contacts};
use std::fs;
use std::path::Path;

pub use json::JsonStorage;

/// A place the full contact collection can be written to and read back from.
pub trait ContactStorage {
    fn load(&self) -> Result<Contacts, AppError>;

    fn save(&self, contacts: &Contacts) -> Result<(), AppError>;

    /// Human readable location, used in user-facing messages.
    fn location(&self) -> String;
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
