#![allow(dead_code)]

use std::path::Path;

use retryexec::{ExecConfig, RetryWhen};

/// Builder for `ExecConfig` to simplify test setup.
pub struct ExecConfigBuilder {
    config: ExecConfig,
}

impl ExecConfigBuilder {
    /// A config running the given tokens directly.
    pub fn command(tokens: &[&str]) -> Self {
        Self {
            config: ExecConfig::new(tokens.iter().map(|t| t.to_string()).collect()),
        }
    }

    /// A config running `sh -c <script>`.
    pub fn sh(script: &str) -> Self {
        Self::command(&["sh", "-c", script])
    }

    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.working_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn env(mut self, name: &str, value: &str) -> Self {
        self.config.env.insert(name.to_string(), value.to_string());
        self
    }

    pub fn stdin(mut self, text: &str) -> Self {
        self.config.stdin = Some(text.to_string());
        self
    }

    pub fn show_realtime_output(mut self, val: bool) -> Self {
        self.config.show_realtime_output = val;
        self
    }

    pub fn check_exit_status(mut self, val: bool) -> Self {
        self.config.check_exit_status = val;
        self
    }

    pub fn custom_error_message(mut self, msg: &str) -> Self {
        self.config.custom_error_message = Some(msg.to_string());
        self
    }

    pub fn max_retries(mut self, val: u32) -> Self {
        self.config.max_retries = Some(val);
        self
    }

    pub fn log_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config.log_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn diagnostic_link(mut self, link: &str) -> Self {
        self.config.diagnostic_link = link.to_string();
        self
    }

    pub fn retry_when(mut self, policy: RetryWhen) -> Self {
        self.config.retry_when = policy;
        self
    }

    pub fn build(self) -> ExecConfig {
        self.config
    }
}
