// src/exec/sink.rs

//! Fan-out output destinations for a single engine invocation.
//!
//! Every byte a child process produces goes through one [`OutputSink`],
//! which fans it out to up to three destinations in the same call:
//! - an in-memory buffer (always; feeds retry matching and the report)
//! - the live console (optional realtime echo)
//! - a durable append-only log file (optional; survives across attempts)
//!
//! Because all destinations are written from the same byte slice in the
//! same call, they observe the identical sequence.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::errors::Result;

/// Buffered append-only log file, owned by one invocation for its entire
/// lifetime.
///
/// Writes are buffered for throughput; [`DurableLog::flush`] runs after
/// each attempt so a tailing observer sees progress before the final
/// outcome is known, and the engine flushes on every exit path.
#[derive(Debug)]
pub struct DurableLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl DurableLog {
    /// Open a fresh log file at `target`, creating parent directories.
    ///
    /// If `target` is left over from a prior run, a non-colliding path is
    /// probed instead of overwriting: `name.log`, `name.2.log`,
    /// `name.3.log`, … The file is opened with create-new semantics so two
    /// concurrent invocations probing the same target cannot share a file.
    pub async fn create(target: &Path) -> Result<Self> {
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut n: u32 = 2;
        let mut candidate = target.to_path_buf();
        loop {
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(file) => {
                    debug!(path = %candidate.display(), "opened durable log");
                    return Ok(Self {
                        path: candidate,
                        writer: BufWriter::new(file),
                    });
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    candidate = numbered_candidate(target, n);
                    n += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// The path actually opened, after probing.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).await?;
        Ok(())
    }

    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}

/// `target` with a numeric suffix inserted before the extension:
/// `out.log` → `out.2.log`, extensionless `out` → `out.2`.
fn numbered_candidate(target: &Path, n: u32) -> PathBuf {
    let mut name = target.file_stem().map(|s| s.to_os_string()).unwrap_or_default();
    name.push(format!(".{n}"));
    if let Some(ext) = target.extension() {
        name.push(".");
        name.push(ext);
    }
    target.with_file_name(name)
}

/// Composite output destination for one invocation.
pub struct OutputSink {
    buffer: Vec<u8>,
    echo: Option<tokio::io::Stdout>,
    log: Option<DurableLog>,
}

impl OutputSink {
    pub fn new(echo: bool, log: Option<DurableLog>) -> Self {
        Self {
            buffer: Vec::new(),
            echo: echo.then(tokio::io::stdout),
            log,
        }
    }

    /// Append `bytes` to every active destination.
    ///
    /// The console write is flushed in the same call, so the echo never
    /// lags the in-memory copy.
    pub async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(bytes);

        if let Some(out) = self.echo.as_mut() {
            out.write_all(bytes).await?;
            out.flush().await?;
        }

        if let Some(log) = self.log.as_mut() {
            log.write_all(bytes).await?;
        }

        Ok(())
    }

    /// Append `bytes` to the durable log only (retry notices between
    /// attempts; never part of an attempt's captured output).
    pub async fn write_log_only(&mut self, bytes: &[u8]) -> Result<()> {
        if let Some(log) = self.log.as_mut() {
            log.write_all(bytes).await?;
        }
        Ok(())
    }

    /// Drain the current attempt's captured output, resetting the buffer
    /// for the next attempt. Lossy UTF-8.
    pub fn take_attempt_output(&mut self) -> String {
        String::from_utf8_lossy(&std::mem::take(&mut self.buffer)).into_owned()
    }

    /// Flush the durable log so tailing observers see progress.
    pub async fn flush(&mut self) -> Result<()> {
        if let Some(log) = self.log.as_mut() {
            log.flush().await?;
        }
        Ok(())
    }

    /// The durable log path, when one is attached.
    pub fn log_path(&self) -> Option<&Path> {
        self.log.as_ref().map(DurableLog::path)
    }

    /// Flush and release the durable log handle. Must run on every exit
    /// path — success, retry exhaustion, or engine error.
    pub async fn close(mut self) -> Result<()> {
        self.flush().await
    }
}
