use serde::{Deserialize, Serialize};
use std::fmt;

/// One contact record. Every field is free text.
///
/// On disk a contact is written as the array `[name, phone, email]`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(from = "ContactRow", into = "ContactRow")]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Serialize, Deserialize)]
struct ContactRow(String, String, String);

impl From<ContactRow> for Contact {
    fn from(ContactRow(name, phone, email): ContactRow) -> Self {
        Contact { name, phone, email }
    }
}

impl From<Contact> for ContactRow {
    fn from(contact: Contact) -> Self {
        ContactRow(contact.name, contact.phone, contact.email)
    }
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Contact {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.phone, self.email)
    }
}
