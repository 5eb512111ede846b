//! PATH resolution of the first command token.

use std::fs;

use retryexec::exec::resolve_command;
use retryexec::{HostEnv, run_with_backend};
use retryexec_test_utils::builders::ExecConfigBuilder;
use retryexec_test_utils::init_tracing;
use retryexec_test_utils::scripted_backend::ScriptedBackend;

fn tokens(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn first_token_resolves_to_the_matching_path_entry() {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("docker");
    fs::write(&bin, "#!/bin/sh\n").unwrap();

    let path = dir.path().to_string_lossy().into_owned();
    let resolved = resolve_command(tokens(&["docker", "test"]), Some(&path), false).unwrap();

    assert_eq!(resolved[0], bin.to_string_lossy());
    assert_eq!(resolved[1], "test");
}

#[test]
fn directories_are_scanned_in_listed_order() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    fs::write(first.path().join("tool"), "").unwrap();
    fs::write(second.path().join("tool"), "").unwrap();

    let path = format!("{}:{}", first.path().display(), second.path().display());
    let resolved = resolve_command(tokens(&["tool"]), Some(&path), false).unwrap();

    assert_eq!(
        resolved[0],
        first.path().join("tool").to_string_lossy()
    );
}

#[test]
fn missing_path_entries_are_skipped() {
    let real = tempfile::tempdir().unwrap();
    fs::write(real.path().join("tool"), "").unwrap();

    let path = format!("/nonexistent-dir-5a1b:{}", real.path().display());
    let resolved = resolve_command(tokens(&["tool"]), Some(&path), false).unwrap();

    assert_eq!(resolved[0], real.path().join("tool").to_string_lossy());
}

#[test]
fn relative_and_absolute_commands_are_untouched() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tool"), "").unwrap();
    let path = dir.path().to_string_lossy().into_owned();

    for prefix in ["./tool", "../tool", "/usr/bin/tool"] {
        let resolved =
            resolve_command(tokens(&[prefix, "arg"]), Some(&path), false).unwrap();
        assert_eq!(resolved[0], prefix);
    }
}

#[test]
fn searching_launcher_skips_resolution_entirely() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tool"), "").unwrap();
    let path = dir.path().to_string_lossy().into_owned();

    let resolved = resolve_command(tokens(&["tool"]), Some(&path), true).unwrap();
    assert_eq!(resolved[0], "tool");
}

#[test]
fn no_match_defers_to_the_os_launcher() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_string_lossy().into_owned();

    let resolved = resolve_command(tokens(&["absent-tool"]), Some(&path), false).unwrap();
    assert_eq!(resolved[0], "absent-tool");
}

#[test]
fn empty_command_passes_through() {
    let resolved = resolve_command(Vec::new(), Some("/usr/bin"), false).unwrap();
    assert!(resolved.is_empty());
}

#[tokio::test]
async fn failure_report_shows_the_resolved_command() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("docker");
    fs::write(&bin, "#!/bin/sh\n").unwrap();

    let host = HostEnv::from_vars([("PATH", dir.path().to_string_lossy().into_owned())])
        .with_launcher_searches_path(false);

    let config = ExecConfigBuilder::command(&["docker", "test"]).build();

    let mut backend = ScriptedBackend::always("no daemon\n", 1);
    let err = run_with_backend(config, &host, &mut backend)
        .await
        .unwrap_err();

    let report = err.failure_report().unwrap();
    assert_eq!(report.command[0], bin.to_string_lossy());
    assert!(
        report
            .body()
            .contains(&format!("Command: {:?}", report.command))
    );
}
