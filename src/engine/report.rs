// src/engine/report.rs

//! The terminal failure payload handed back to the caller.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Structured description of an execution that never succeeded within its
/// attempt budget. Constructed exactly once, on terminal failure, and
/// owned by the caller afterwards.
///
/// External renderers (console message, observability payload) consume
/// [`FailureReport::header`] and [`FailureReport::body`]; `Display` joins
/// the two with a newline.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    /// Total process launches made, including the initial attempt.
    pub attempts: u32,
    /// Exit code of the last attempt.
    pub exit_code: i32,
    /// Captured output of the last attempt.
    pub output: String,
    /// Caller-supplied extra context for the header.
    pub custom_message: Option<String>,
    /// The command as launched, after PATH resolution.
    pub command: Vec<String>,
    pub working_dir: PathBuf,
    /// Opaque link to where the full output can be inspected.
    pub diagnostic_link: String,
}

impl FailureReport {
    pub fn header(&self) -> String {
        format!(
            "Task failed after {} attempts with exit code {}.\n{}",
            self.attempts,
            self.exit_code,
            self.custom_message.as_deref().unwrap_or("")
        )
    }

    pub fn body(&self) -> String {
        [
            format!("Output:\n\n{}", self.output),
            format!("Command: {:?}", self.command),
            format!("Working dir: {}", self.working_dir.display()),
            self.diagnostic_link.clone(),
        ]
        .join("\n")
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.header(), self.body())
    }
}
