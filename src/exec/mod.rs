// src/exec/mod.rs

//! Process execution layer.
//!
//! This module owns everything between the retry loop and the OS:
//!
//! - [`resolver`] replaces the first command token with an absolute path
//!   on platforms where the launcher does not search PATH itself.
//! - [`sink`] fans captured bytes out to memory, console, and the durable
//!   log file.
//! - [`runner`] launches one process per attempt via
//!   `tokio::process::Command` and funnels its combined output through
//!   the sink.
//! - [`backend`] provides the `CommandBackend` trait the engine drives,
//!   with the real OS implementation, and which tests can replace with a
//!   scripted fake.

pub mod backend;
pub mod resolver;
pub mod runner;
pub mod sink;

pub use backend::{CommandBackend, OsProcessBackend};
pub use resolver::resolve_command;
pub use runner::{AttemptResult, run_once};
pub use sink::{DurableLog, OutputSink};
