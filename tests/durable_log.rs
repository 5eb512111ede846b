//! Durable log and output-sink behaviour.

use std::fs;

use retryexec::exec::{DurableLog, OutputSink};
use retryexec_test_utils::init_tracing;

#[tokio::test]
async fn create_uses_the_target_when_free() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.log");

    let log = DurableLog::create(&target).await.unwrap();
    assert_eq!(log.path(), target);
}

#[tokio::test]
async fn create_probes_numbered_suffixes_when_taken() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.log");
    fs::write(&target, "prior run").unwrap();
    fs::write(dir.path().join("out.2.log"), "prior run").unwrap();

    let log = DurableLog::create(&target).await.unwrap();
    assert_eq!(log.path(), dir.path().join("out.3.log"));

    // The prior files are untouched.
    assert_eq!(fs::read_to_string(&target).unwrap(), "prior run");
}

#[tokio::test]
async fn create_probes_extensionless_targets_too() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("output");
    fs::write(&target, "prior run").unwrap();

    let log = DurableLog::create(&target).await.unwrap();
    assert_eq!(log.path(), dir.path().join("output.2"));
}

#[tokio::test]
async fn create_makes_parent_directories() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested/deeper/out.log");

    let log = DurableLog::create(&target).await.unwrap();
    assert_eq!(log.path(), target);
}

#[tokio::test]
async fn sink_buffer_and_log_observe_identical_bytes() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.log");

    let log = DurableLog::create(&target).await.unwrap();
    let mut sink = OutputSink::new(false, Some(log));

    sink.write(b"first chunk ").await.unwrap();
    sink.write(b"second chunk").await.unwrap();

    let captured = sink.take_attempt_output();
    assert_eq!(captured, "first chunk second chunk");

    sink.close().await.unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), captured);
}

#[tokio::test]
async fn log_only_writes_never_reach_the_attempt_buffer() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.log");

    let log = DurableLog::create(&target).await.unwrap();
    let mut sink = OutputSink::new(false, Some(log));

    sink.write(b"attempt output").await.unwrap();
    sink.write_log_only(b" [notice]").await.unwrap();

    assert_eq!(sink.take_attempt_output(), "attempt output");

    sink.close().await.unwrap();
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "attempt output [notice]"
    );
}

#[tokio::test]
async fn taking_the_output_resets_the_buffer_between_attempts() {
    init_tracing();
    let mut sink = OutputSink::new(false, None);

    sink.write(b"attempt one").await.unwrap();
    assert_eq!(sink.take_attempt_output(), "attempt one");

    sink.write(b"attempt two").await.unwrap();
    assert_eq!(sink.take_attempt_output(), "attempt two");
}

#[tokio::test]
async fn flush_makes_progress_visible_before_close() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.log");

    let log = DurableLog::create(&target).await.unwrap();
    let mut sink = OutputSink::new(false, Some(log));

    sink.write(b"attempt one\n").await.unwrap();
    sink.flush().await.unwrap();

    // A tailing observer sees the attempt while the sink is still open.
    assert_eq!(fs::read_to_string(&target).unwrap(), "attempt one\n");

    sink.close().await.unwrap();
}

#[tokio::test]
async fn lossy_utf8_capture_never_drops_attempts() {
    init_tracing();
    let mut sink = OutputSink::new(false, None);

    sink.write(&[b'h', b'i', 0xFF, b'!']).await.unwrap();
    let captured = sink.take_attempt_output();

    assert!(captured.starts_with("hi"));
    assert!(captured.ends_with('!'));
}
