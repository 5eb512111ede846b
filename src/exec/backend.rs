// src/exec/backend.rs

//! Pluggable process-launching seam.
//!
//! The retry loop talks to a `CommandBackend` instead of calling
//! [`run_once`] directly. This makes it easy to drive the engine with a
//! scripted fake in tests while keeping the production launcher in
//! [`runner`](crate::exec::runner).
//!
//! - [`OsProcessBackend`] is the default implementation: one OS process
//!   per attempt.
//! - Tests can provide their own backend that writes canned output into
//!   the sink and returns scripted exit codes.

use std::future::Future;
use std::pin::Pin;

use crate::config::model::ExecConfig;
use crate::errors::Result;
use crate::exec::runner::{AttemptResult, run_once};
use crate::exec::sink::OutputSink;

/// Trait abstracting how a single attempt is executed.
pub trait CommandBackend: Send {
    /// Run one attempt of `command`, routing all captured bytes through
    /// `sink`, and report the exit code and captured text.
    fn run_attempt<'a>(
        &'a mut self,
        config: &'a ExecConfig,
        command: &'a [String],
        attempt: u32,
        sink: &'a mut OutputSink,
    ) -> Pin<Box<dyn Future<Output = Result<AttemptResult>> + Send + 'a>>;
}

/// Real backend used in production: launches one OS process per attempt.
pub struct OsProcessBackend;

impl CommandBackend for OsProcessBackend {
    fn run_attempt<'a>(
        &'a mut self,
        config: &'a ExecConfig,
        command: &'a [String],
        attempt: u32,
        sink: &'a mut OutputSink,
    ) -> Pin<Box<dyn Future<Output = Result<AttemptResult>> + Send + 'a>> {
        Box::pin(run_once(config, command, attempt, sink))
    }
}
