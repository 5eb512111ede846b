// src/engine/core.rs

//! The attempt loop.
//!
//! One invocation walks `Attempting(1) → … → Attempting(n)` until it ends
//! in either success or a [`FailureReport`]:
//!
//! - success → done, nothing else surfaces
//! - failure with a matching retry policy and budget left → a retry
//!   notice goes to the durable log and the next attempt starts
//! - failure otherwise → the report is assembled and returned as the
//!   terminal error
//!
//! The loop holds no shared mutable state: sibling invocations run
//! concurrently on the same runtime, each with its own sink, log file,
//! and child process. Attempts within one invocation are strictly
//! sequential.

use tracing::{error, info, warn};

use crate::config::model::ExecConfig;
use crate::config::validate::validate_config;
use crate::engine::report::FailureReport;
use crate::engine::retry::RetryWhen;
use crate::errors::{Error, Result};
use crate::exec::backend::{CommandBackend, OsProcessBackend};
use crate::exec::resolver::resolve_command;
use crate::exec::sink::{DurableLog, OutputSink};
use crate::host::HostEnv;

/// Run the configured command to completion, retrying failed attempts
/// whose output matches `retry_when`, up to the configured budget.
///
/// Returns `Ok(())` on success; `Error::Failed` carries the report when
/// every allowed attempt failed.
pub async fn run(config: ExecConfig, host: &HostEnv) -> Result<()> {
    run_with_backend(config, host, &mut OsProcessBackend).await
}

/// Same as [`run`], with the process-launching backend injected. Tests
/// drive the loop with a scripted backend; production code has no reason
/// to call this directly.
pub async fn run_with_backend(
    config: ExecConfig,
    host: &HostEnv,
    backend: &mut dyn CommandBackend,
) -> Result<()> {
    validate_config(&config)?;

    let command = resolve_command(
        config.command.clone(),
        host.search_path(),
        host.launcher_searches_path(),
    )?;

    let log = match &config.log_file {
        Some(target) => Some(DurableLog::create(target).await?),
        None => None,
    };
    let mut sink = OutputSink::new(config.show_realtime_output, log);

    let outcome = attempt_loop(&config, &command, backend, &mut sink).await;
    let closed = sink.close().await;

    // The engine outcome wins over a close failure; the log handle is
    // released either way.
    outcome?;
    closed
}

async fn attempt_loop(
    config: &ExecConfig,
    command: &[String],
    backend: &mut dyn CommandBackend,
    sink: &mut OutputSink,
) -> Result<()> {
    let last_attempt = config.effective_max_retries() + 1;
    let mut attempt: u32 = 1;

    loop {
        let result = backend.run_attempt(config, command, attempt, sink).await?;
        // Attempt output lands in the durable log as it streams; flushing
        // here makes each finished attempt visible to tailing observers.
        sink.flush().await?;

        if result.successful(config.check_exit_status) {
            info!(attempt, exit_code = result.exit_code, "command succeeded");
            return Ok(());
        }

        if !retry_eligible(&config.retry_when, &result.output, attempt, last_attempt) {
            let report = FailureReport {
                attempts: attempt,
                exit_code: result.exit_code,
                output: result.output,
                custom_message: config.custom_error_message.clone(),
                command: command.to_vec(),
                working_dir: config.working_dir.clone(),
                diagnostic_link: config.diagnostic_link.clone(),
            };
            error!("{report}");
            return Err(Error::Failed(report));
        }

        let notice = format!(
            "\n\nRetrying after {attempt} attempt(s) as output matches retryWhen"
        );
        sink.write_log_only(notice.as_bytes()).await?;
        sink.flush().await?;
        warn!("{}", notice.trim_start());

        attempt += 1;
    }
}

/// Retry decision for a *failed* attempt: eligible when any matcher is
/// registered, one of them matches the captured output, and the budget is
/// not yet exhausted. Pure; exposed for tests.
pub fn retry_eligible(
    retry_when: &RetryWhen,
    output: &str,
    attempt: u32,
    last_attempt: u32,
) -> bool {
    !retry_when.is_empty() && retry_when.is_satisfied_by(output) && attempt < last_attempt
}
