use crate::prelude::{AppError, Contact, ContactStorage, JsonStorage};

use log::debug;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Every contact keyed by its caller-chosen id.
pub type Contacts = BTreeMap<String, Contact>;

/// Store handle shared between the interactive session and the autosave thread.
pub type SharedStore = Arc<Mutex<ContactStore>>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactStore {
    mem: Contacts,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Inserts `contact` under `id`, replacing any record already there.
    /// Returns the replaced record.
    pub fn add(&mut self, id: impl Into<String>, contact: Contact) -> Option<Contact> {
        let id = id.into();
        debug!("storing contact {id:?}");
        self.mem.insert(id, contact)
    }

    pub fn search(&self, id: &str) -> Result<&Contact, AppError> {
        self.mem
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Contact {id:?}")))
    }

    pub fn delete(&mut self, id: &str) -> Result<Contact, AppError> {
        match self.mem.remove(id) {
            Some(contact) => {
                debug!("deleted contact {id:?}");
                Ok(contact)
            }
            None => Err(AppError::NotFound(format!("Contact {id:?}"))),
        }
    }

    /// All contacts ordered by name, ignoring case. Contacts whose names compare
    /// equal stay in id order. `None` when the store is empty.
    pub fn list(&self) -> Option<Vec<(&str, &Contact)>> {
        if self.mem.is_empty() {
            return None;
        }

        let mut contacts: Vec<(&str, &Contact)> = self
            .mem
            .iter()
            .map(|(id, contact)| (id.as_str(), contact))
            .collect();
        contacts.sort_by_cached_key(|(_, c)| c.name.to_lowercase());

        Some(contacts)
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        self.save_to(&JsonStorage::new(path))
    }

    /// Replaces the whole store with the contents of `path`. On failure the
    /// store is left empty.
    pub fn load(&mut self, path: &Path) -> Result<usize, AppError> {
        self.load_from(&JsonStorage::new(path))
    }

    pub fn save_to(&self, storage: &dyn ContactStorage) -> Result<(), AppError> {
        storage.save(&self.mem)
    }

    pub fn load_from(&mut self, storage: &dyn ContactStorage) -> Result<usize, AppError> {
        match storage.load() {
            Ok(contacts) => {
                self.mem = contacts;
                debug!("loaded {} contacts from {}", self.mem.len(), storage.location());
                Ok(self.mem.len())
            }
            Err(e) => {
                self.mem.clear();
                Err(AppError::NotFoundOrCorrupt(format!(
                    "{}: {}",
                    storage.location(),
                    e
                )))
            }
        }
    }

    pub fn contacts(&self) -> &Contacts {
        &self.mem
    }

    pub fn len(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    pub fn clear(&mut self) {
        self.mem.clear();
    }
}
