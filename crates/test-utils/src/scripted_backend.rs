use std::future::Future;
use std::pin::Pin;

use retryexec::config::ExecConfig;
use retryexec::errors::Result;
use retryexec::exec::{AttemptResult, CommandBackend, OutputSink};

/// A fake backend that:
/// - records how many attempts were launched
/// - writes scripted output through the sink (so durable logs and echo
///   behave as in production) and returns scripted exit codes.
///
/// The last script entry repeats when the run outlives the script, which
/// makes "always fails with matching output" one-liners easy.
pub struct ScriptedBackend {
    script: Vec<(String, i32)>,
    launches: u32,
}

impl ScriptedBackend {
    pub fn new(script: Vec<(String, i32)>) -> Self {
        assert!(!script.is_empty(), "script must have at least one entry");
        Self {
            script,
            launches: 0,
        }
    }

    /// Every attempt produces the same output and exit code.
    pub fn always(output: &str, exit_code: i32) -> Self {
        Self::new(vec![(output.to_string(), exit_code)])
    }

    /// Number of attempts the engine launched against this backend.
    pub fn launches(&self) -> u32 {
        self.launches
    }
}

impl CommandBackend for ScriptedBackend {
    fn run_attempt<'a>(
        &'a mut self,
        _config: &'a ExecConfig,
        _command: &'a [String],
        attempt: u32,
        sink: &'a mut OutputSink,
    ) -> Pin<Box<dyn Future<Output = Result<AttemptResult>> + Send + 'a>> {
        self.launches += 1;
        let idx = usize::min(self.launches as usize - 1, self.script.len() - 1);
        let (output, exit_code) = self.script[idx].clone();

        Box::pin(async move {
            sink.write(output.as_bytes()).await?;
            Ok(AttemptResult {
                attempt,
                exit_code,
                output: sink.take_attempt_output(),
            })
        })
    }
}
