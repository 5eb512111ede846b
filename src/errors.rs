// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::report::FailureReport;

#[derive(Error, Debug)]
pub enum Error {
    /// Rejected before anything is launched: empty command, blank first
    /// token, or a retry matcher whose pattern does not compile.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A retry predicate was registered that cannot be serialized and so
    /// cannot travel to an isolated worker. Raised at configuration time.
    #[error("Unsupported retry predicate: {0}")]
    UnsupportedPredicate(String),

    /// The OS could not start the process at all. Never retried: there is
    /// no output to evaluate retry matchers against.
    #[error("Failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A PATH directory could not be read during command resolution.
    /// Raised before any attempt is made.
    #[error("Could not read PATH directory {dir:?}: {source}")]
    PathScan {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The command never succeeded within its attempt budget.
    #[error("{0}")]
    Failed(FailureReport),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// The failure report, when this error is a terminal exhaustion.
    pub fn failure_report(&self) -> Option<&FailureReport> {
        match self {
            Error::Failed(report) => Some(report),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
