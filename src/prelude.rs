pub use crate::autosave::{Autosave, AutosaveHandle, AutosaveState, AutosaveStatus, JoinOutcome};
pub use crate::cli::{command, run_app};
pub use crate::config::Config;
pub use crate::domain::{
    contact::{self, Contact},
    store::{ContactStore, Contacts, SharedStore},
};
pub use crate::errors::AppError;
pub use crate::storage::{self, ContactStorage, JsonStorage};
