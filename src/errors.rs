use core::fmt;
use std::sync::PoisonError;

#[derive(Debug)]
pub enum AppError {
    Config(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Lock(String),
    NotFound(String),
    NotFoundOrCorrupt(String),
    ParseCommand(String),
    ParseInt(std::num::ParseIntError),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::ParseInt(err)
    }
}

impl<T> From<PoisonError<T>> for AppError {
    fn from(err: PoisonError<T>) -> Self {
        AppError::Lock(err.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            AppError::Io(e) => {
                write!(f, "I/O error while accessing a file or resource: {}", e)
            }
            AppError::Json(e) => {
                write!(f, "Invalid contact data: {}", e)
            }
            AppError::Lock(msg) => {
                write!(f, "Contact store is unavailable: {}", msg)
            }
            AppError::NotFound(item) => {
                write!(f, "{} Not found", item)
            }
            AppError::NotFoundOrCorrupt(reason) => {
                write!(f, "Could not load contacts: {}", reason)
            }
            AppError::ParseCommand(cmd) => {
                write!(f, "Unrecognized command: '{}'", cmd)
            }
            AppError::ParseInt(e) => {
                write!(f, "Invalid number format: {}", e)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::ParseInt(e) => Some(e),
            _ => None,
        }
    }
}
