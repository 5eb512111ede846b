// src/ci.rs

//! CI-derived defaults for the wiring layer.
//!
//! The engine itself only consumes plain values; these helpers compute the
//! values a CI-hosted caller would feed into an
//! [`ExecConfig`](crate::config::ExecConfig): a durable log location under
//! the artifacts directory and a "See output at" link pointing to where
//! that log can be browsed after the build.

use std::path::{Path, PathBuf};

use url::Url;

use crate::host::HostEnv;

const ARTIFACTS_DIR_VAR: &str = "CIRCLE_ARTIFACTS";
const WORKFLOW_JOB_ID_VAR: &str = "CIRCLE_WORKFLOW_JOB_ID";
const NODE_INDEX_VAR: &str = "CIRCLE_NODE_INDEX";
const HOME_DIR_VAR: &str = "CIRCLE_HOME_DIRECTORY";
const BUILD_URL_VAR: &str = "CIRCLE_BUILD_URL";

const DEFAULT_HOME_DIR: &str = "/home/circleci/";

/// Default for `show_realtime_output`: echo locally, stay quiet on CI
/// where the durable log captures everything anyway.
pub fn default_show_realtime(host: &HostEnv) -> bool {
    !host.is_ci()
}

/// Default durable-log file under the CI artifacts directory:
/// `{scope}.{task}.log`, probing `{scope}.{task}.{n}.log` for n = 2, 3, …
/// when earlier candidates already exist from a prior run.
///
/// Returns `None` when no artifacts directory is configured (local runs).
pub fn default_log_file(host: &HostEnv, scope: &str, task: &str) -> Option<PathBuf> {
    let dir = PathBuf::from(host.var(ARTIFACTS_DIR_VAR)?);

    let plain = dir.join(format!("{scope}.{task}.log"));
    if !plain.exists() {
        return Some(plain);
    }

    let mut n: u32 = 2;
    loop {
        let candidate = dir.join(format!("{scope}.{task}.{n}.log"));
        if !candidate.exists() {
            return Some(candidate);
        }
        n += 1;
    }
}

/// Browsable location of the durable log in the CI artifacts store, for
/// use as the config's `diagnostic_link`.
///
/// Empty when not on CI, when the workflow job id or node index is
/// missing, or when no log file is configured. The CI home-directory
/// prefix of the log path is rewritten to `/~/`, matching how the
/// artifacts store exposes home-relative paths.
pub fn artifacts_url(host: &HostEnv, log_file: Option<&Path>) -> String {
    let (Some(job_id), Some(node_index), Some(log_file)) = (
        host.var(WORKFLOW_JOB_ID_VAR),
        host.var(NODE_INDEX_VAR),
        log_file,
    ) else {
        return String::new();
    };

    if !host.is_ci() {
        return String::new();
    }

    let home = host.var(HOME_DIR_VAR).unwrap_or(DEFAULT_HOME_DIR);
    let domain = match host.var(BUILD_URL_VAR) {
        Some(build_url) => extract_domain(build_url),
        None => "<circle_url>".to_string(),
    };

    let log_path = log_file.to_string_lossy().replace(home, "/~/");

    format!("See output at: {domain}/output/job/{job_id}/artifacts/{node_index}{log_path}")
}

/// `{scheme}://{host}` of the given URL, or the literal `"Invalid URL"`.
pub fn extract_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => format!("{}://{}", parsed.scheme(), host),
            None => "Invalid URL".to_string(),
        },
        Err(_) => "Invalid URL".to_string(),
    }
}
