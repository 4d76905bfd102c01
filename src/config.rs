use crate::autosave::DEFAULT_INTERVAL;
use crate::prelude::{AppError, command::Cli};

use std::env::{self, VarError};
use std::path::PathBuf;
use std::time::Duration;

pub const AUTOSAVE_INTERVAL_VAR: &str = "AUTOSAVE_INTERVAL_SECS";

#[derive(Debug, Clone)]
pub struct Config {
    /// Contact file. `None` means the session asks for one.
    pub path: Option<PathBuf>,
    pub autosave_interval: Duration,
}

impl Config {
    /// Builds the configuration from parsed arguments and the environment.
    /// `.env` must already be loaded so clap and this function see the same values.
    pub fn from_cli(cli: Cli) -> Result<Self, AppError> {
        let autosave_interval = interval_from_env(env::var(AUTOSAVE_INTERVAL_VAR))?;

        Ok(Self {
            path: cli.path.filter(|p| !p.as_os_str().is_empty()),
            autosave_interval,
        })
    }
}

/// Interval from the raw result of looking up `AUTOSAVE_INTERVAL_SECS`.
/// Only an unset variable falls back to the default.
pub fn interval_from_env(var: Result<String, VarError>) -> Result<Duration, AppError> {
    match var {
        Ok(raw) => parse_interval(&raw),
        Err(VarError::NotPresent) => Ok(DEFAULT_INTERVAL),
        Err(VarError::NotUnicode(raw)) => Err(AppError::Config(format!(
            "{AUTOSAVE_INTERVAL_VAR} is not valid unicode: {raw:?}"
        ))),
    }
}

pub fn parse_interval(raw: &str) -> Result<Duration, AppError> {
    let secs = raw.trim().parse::<u64>()?;
    if secs == 0 {
        return Err(AppError::Config(format!(
            "{AUTOSAVE_INTERVAL_VAR} must be at least 1 second"
        )));
    }
    Ok(Duration::from_secs(secs))
}
