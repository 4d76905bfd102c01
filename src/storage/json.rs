use super::*;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::OpenOptions;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

/// Contacts stored as a pretty-printed JSON object of `id -> [name, phone, email]`.
pub struct JsonStorage {
    pub path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContactStorage for JsonStorage {
    fn load(&self) -> Result<Contacts, AppError> {
        let mut file = OpenOptions::new().read(true).open(&self.path)?;

        let mut data = String::new();
        file.read_to_string(&mut data)?;

        // An empty file is not a valid document; serde_json reports it as EOF
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, contacts: &Contacts) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);

        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        contacts.serialize(&mut serializer)?;

        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
