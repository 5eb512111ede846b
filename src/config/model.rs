// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::retry::RetryWhen;

/// Everything one engine invocation needs, as a plain value.
///
/// A config is fully self-contained: no handles, no closures, no
/// references to outer mutable state. It serializes, so an invocation can
/// be packaged up and run on another thread, task, or worker process.
/// Immutable once execution starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecConfig {
    /// Command tokens, passed to the OS launcher as-is (no shell
    /// interpretation). The first token is the program.
    pub command: Vec<String>,

    /// Working directory for the child process.
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// Environment variables added on top of the inherited environment.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Text fed to the child's standard input. When `None`, stdin is
    /// closed.
    #[serde(default)]
    pub stdin: Option<String>,

    /// Echo captured output to the live console as it arrives.
    ///
    /// See [`crate::ci::default_show_realtime`] for the usual default.
    #[serde(default)]
    pub show_realtime_output: bool,

    /// When `false`, any exit code counts as success.
    #[serde(default = "default_check_exit_status")]
    pub check_exit_status: bool,

    /// Extra line appended to the failure-report header.
    #[serde(default)]
    pub custom_error_message: Option<String>,

    /// Number of *retries* after the initial attempt, so the total number
    /// of launches is `max_retries + 1`. `None` derives the default from
    /// the retry policy: 1 without matchers, 5 with.
    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Durable log file capturing every attempt's output. `None` disables
    /// durable logging.
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Opaque caller-supplied link rendered at the end of a failure
    /// report (e.g. a CI artifacts URL, see [`crate::ci::artifacts_url`]).
    #[serde(default)]
    pub diagnostic_link: String,

    /// Output matchers deciding whether a failed attempt is retried.
    #[serde(default)]
    pub retry_when: RetryWhen,
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_check_exit_status() -> bool {
    true
}

impl ExecConfig {
    /// A config with defaults for everything but the command: current
    /// directory, inherited environment, closed stdin, no echo, exit
    /// status checked, no retries, no durable log.
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            working_dir: default_working_dir(),
            env: BTreeMap::new(),
            stdin: None,
            show_realtime_output: false,
            check_exit_status: default_check_exit_status(),
            custom_error_message: None,
            max_retries: None,
            log_file: None,
            diagnostic_link: String::new(),
            retry_when: RetryWhen::new(),
        }
    }

    /// Effective retry budget: the caller's override, else 1 when no
    /// matcher is registered (which still yields a single launch, since an
    /// empty policy never retries), else 5.
    pub fn effective_max_retries(&self) -> u32 {
        self.max_retries
            .unwrap_or(if self.retry_when.is_empty() { 1 } else { 5 })
    }
}
