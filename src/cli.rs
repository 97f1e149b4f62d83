//! CLI command implementations for Sleuth.

pub(crate) mod run;
pub(crate) mod targets;
pub(crate) mod tournament;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use sleuth::board::BoardSpec;
use sleuth::game::GameSetup;
use sleuth::loader;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Where the board comes from: a layout and setup pair, or the built-in board.
#[derive(Debug, Clone, Default)]
pub(crate) struct BoardFiles {
    layout: Option<PathBuf>,
    setup: Option<PathBuf>,
}

impl BoardFiles {
    /// Create from the global `--layout` and `--setup` options.
    pub(crate) const fn new(layout: Option<PathBuf>, setup: Option<PathBuf>) -> Self {
        Self { layout, setup }
    }

    /// Human-readable name of the board source.
    pub(crate) fn describe(&self) -> String {
        match (&self.layout, &self.setup) {
            (Some(layout), Some(setup)) => format!("{} + {}", layout.display(), setup.display()),
            _ => "built-in classic board".to_string(),
        }
    }

    /// Load and parse the board.
    ///
    /// # Errors
    ///
    /// Returns an error if only one of the two files is given, or if loading
    /// fails.
    pub(crate) fn load(&self) -> Result<(BoardSpec, GameSetup), CliError> {
        let loaded = match (&self.layout, &self.setup) {
            (Some(layout), Some(setup)) => loader::load_files(layout, setup),
            (None, None) => loader::classic(),
            _ => return Err(CliError::new("--layout and --setup must be given together")),
        };
        Ok(loaded?)
    }
}

/// Seed from the clock when none was given.
pub(crate) fn seed_or_now(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| u64::try_from(d.as_nanos()).ok())
            .unwrap_or(42)
    })
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<sleuth::Error> for CliError {
    fn from(e: sleuth::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<sleuth::error::LoadError> for CliError {
    fn from(e: sleuth::error::LoadError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<sleuth::error::BoardError> for CliError {
    fn from(e: sleuth::error::BoardError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
