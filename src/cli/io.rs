use crate::prelude::{AppError, Contact, command::MenuAction};

use std::io::{self, ErrorKind, Write};

// OUTPUT FUNCTIONS
pub fn show_menu() {
    println!("\nMenu:");
    for (i, action) in MenuAction::ALL.iter().enumerate() {
        println!("{}. {}", i + 1, action.label());
    }
}

pub fn render_contact_list(contacts: &[(&str, &Contact)]) -> String {
    let mut output = String::from("\n--- Contacts ---\n");
    for (id, c) in contacts {
        output.push_str(&format!(
            "ID: {} | Name: {} | Phone: {} | Email: {}\n",
            id, c.name, c.phone, c.email
        ));
    }
    output.push_str("----------------\n");
    output
}

// INPUT FUNCTIONS

/// Prints `message` without a newline and reads one trimmed line.
/// A closed stdin is reported as `ErrorKind::UnexpectedEof`.
pub fn prompt(message: &str) -> Result<String, AppError> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(AppError::Io(io::Error::new(
            ErrorKind::UnexpectedEof,
            "input closed",
        )));
    }
    Ok(input.trim().to_string())
}

pub fn confirm(message: &str) -> Result<bool, AppError> {
    Ok(prompt(message)?.to_lowercase() == "y")
}

pub fn is_input_closed(err: &AppError) -> bool {
    matches!(err, AppError::Io(e) if e.kind() == ErrorKind::UnexpectedEof)
}
