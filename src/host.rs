// src/host.rs

//! Snapshot of the ambient environment, taken once by the caller.
//!
//! The engine never reads `std::env` on its own: everything ambient (PATH,
//! CI variables, launcher behaviour) arrives through a [`HostEnv`] value.
//! That keeps an invocation a plain self-contained message — it can be
//! handed to another thread, task, or worker process — and lets tests
//! fabricate any environment without touching the real one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Immutable environment snapshot handed to the engine alongside the
/// config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostEnv {
    vars: BTreeMap<String, String>,
    launcher_searches_path: bool,
}

impl HostEnv {
    /// Snapshot the real process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
            // The macOS spawn path does not consult PATH; the first
            // command token is resolved explicitly there (exec::resolver).
            launcher_searches_path: !cfg!(target_os = "macos"),
        }
    }

    /// Build a snapshot from explicit variables (tests, remote workers).
    ///
    /// `launcher_searches_path` defaults to `true`; override with
    /// [`HostEnv::with_launcher_searches_path`] to exercise resolution.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            launcher_searches_path: true,
        }
    }

    pub fn with_launcher_searches_path(mut self, value: bool) -> Self {
        self.launcher_searches_path = value;
        self
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether this run is on CI (the `CI` variable is set at all).
    pub fn is_ci(&self) -> bool {
        self.var("CI").is_some()
    }

    /// The PATH value used for command resolution, if any.
    pub fn search_path(&self) -> Option<&str> {
        self.var("PATH")
    }

    /// Whether the OS process launcher already searches PATH itself, in
    /// which case command resolution is skipped.
    pub fn launcher_searches_path(&self) -> bool {
        self.launcher_searches_path
    }
}
