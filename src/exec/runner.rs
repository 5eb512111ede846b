// src/exec/runner.rs

//! Single-attempt process launcher.

use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::model::ExecConfig;
use crate::errors::{Error, Result};
use crate::exec::sink::OutputSink;

/// Outcome of one launch-to-exit cycle. A non-zero exit is data here, not
/// an error; only a failure to launch at all is.
#[derive(Debug, Clone)]
pub struct AttemptResult {
    /// 1-indexed attempt number within the invocation.
    pub attempt: u32,
    /// Child exit code; `-1` when terminated by a signal.
    pub exit_code: i32,
    /// Full captured output, stdout and stderr interleaved in arrival
    /// order.
    pub output: String,
}

impl AttemptResult {
    /// Exit-status policy: any exit code counts when checking is disabled.
    pub fn successful(&self, check_exit_status: bool) -> bool {
        !check_exit_status || self.exit_code == 0
    }
}

/// Launch the resolved command once, blocking until the child exits.
///
/// - stdout and stderr are both piped and funneled through one channel
///   into `sink`, so every destination observes the identical byte
///   sequence; interleaving across the two streams is arrival order as
///   observed here (pipe buffering makes it best-effort, but all bytes
///   from both streams appear).
/// - configured stdin text is fed from a background task, then the handle
///   drops, closing the child's stdin.
/// - a spawn failure aborts the whole invocation; nothing ran, so there
///   is no output to evaluate retry matchers against.
pub async fn run_once(
    config: &ExecConfig,
    command: &[String],
    attempt: u32,
    sink: &mut OutputSink,
) -> Result<AttemptResult> {
    let Some((program, args)) = command.split_first() else {
        return Err(Error::InvalidConfig(
            "command must contain at least one token".to_string(),
        ));
    };

    info!(cmd = %program, attempt, "starting attempt process");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(&config.working_dir)
        .envs(&config.env)
        .stdin(if config.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| Error::Launch {
        command: program.clone(),
        source,
    })?;

    if let Some(text) = config.stdin.clone() {
        if let Some(mut stdin) = child.stdin.take() {
            // Fed from its own task: a child that writes output before
            // draining stdin must not deadlock the attempt.
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(text.as_bytes()).await {
                    debug!(error = %e, "stdin writer stopped early");
                }
            });
        }
    }

    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(32);
    if let Some(stdout) = child.stdout.take() {
        spawn_pump(stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        spawn_pump(stderr, tx.clone());
    }
    drop(tx);

    // Single consumer: chunks reach the sink in one well-defined order.
    while let Some(chunk) = rx.recv().await {
        sink.write(&chunk).await?;
    }

    let status = child.wait().await?;
    let exit_code = status.code().unwrap_or(-1);

    info!(
        exit_code,
        attempt,
        success = status.success(),
        "attempt process exited"
    );

    Ok(AttemptResult {
        attempt,
        exit_code,
        output: sink.take_attempt_output(),
    })
}

/// Forward raw byte chunks from one child pipe into the funnel channel
/// until EOF.
fn spawn_pump(mut reader: impl AsyncRead + Unpin + Send + 'static, tx: mpsc::Sender<Vec<u8>>) {
    tokio::spawn(async move {
        let mut buf = [0u8; 8192];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    debug!(error = %e, "output pump read error");
                    break;
                }
            }
        }
    });
}
