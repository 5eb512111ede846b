// src/lib.rs

//! retryexec — run an external command, capture its combined output, and
//! retry when that output matches a configured policy.
//!
//! The caller builds an [`ExecConfig`] (plus a [`HostEnv`] snapshot of the
//! ambient environment) and hands both to [`run`]. On success nothing
//! surfaces; on exhaustion the error carries a [`FailureReport`] with the
//! full diagnostic context: attempts made, last exit code, captured
//! output, command, working directory, and a caller-supplied link to the
//! durable log.
//!
//! ```no_run
//! use retryexec::{ExecConfig, HostEnv, RetryWhen};
//!
//! # async fn example() -> retryexec::Result<()> {
//! let mut config = ExecConfig::new(vec![
//!     "cargo".into(), "test".into(),
//! ]);
//! config.retry_when = RetryWhen::new().or_contains("connection reset");
//! config.max_retries = Some(2);
//!
//! retryexec::run(config, &HostEnv::capture()).await
//! # }
//! ```

pub mod ci;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod host;
pub mod logging;

pub use config::ExecConfig;
pub use engine::{FailureReport, OutputMatcher, RetryWhen, run, run_with_backend};
pub use errors::{Error, Result};
pub use host::HostEnv;
