//! Config defaults, derived retry budgets, and value serializability.

use retryexec::{ExecConfig, RetryWhen};

#[test]
fn new_config_defaults_match_the_documented_policy() {
    let config = ExecConfig::new(vec!["true".to_string()]);

    assert_eq!(config.working_dir.display().to_string(), ".");
    assert!(config.env.is_empty());
    assert!(config.stdin.is_none());
    assert!(!config.show_realtime_output);
    assert!(config.check_exit_status);
    assert!(config.custom_error_message.is_none());
    assert!(config.max_retries.is_none());
    assert!(config.log_file.is_none());
    assert_eq!(config.diagnostic_link, "");
    assert!(config.retry_when.is_empty());
}

#[test]
fn retry_budget_derives_from_the_policy_when_unset() {
    let mut config = ExecConfig::new(vec!["true".to_string()]);
    assert_eq!(config.effective_max_retries(), 1);

    config.retry_when = RetryWhen::new().or_contains("err");
    assert_eq!(config.effective_max_retries(), 5);
}

#[test]
fn caller_override_beats_the_derived_budget() {
    let mut config = ExecConfig::new(vec!["true".to_string()]);
    config.retry_when = RetryWhen::new().or_contains("err");
    config.max_retries = Some(2);
    assert_eq!(config.effective_max_retries(), 2);

    config.max_retries = Some(0);
    assert_eq!(config.effective_max_retries(), 0);
}

#[test]
fn a_config_is_a_fully_self_contained_value() {
    let mut config = ExecConfig::new(vec!["sh".to_string(), "-c".to_string(), "x".to_string()]);
    config.env.insert("KEY".to_string(), "value".to_string());
    config.stdin = Some("input".to_string());
    config.retry_when = RetryWhen::new().or_contains("err");
    config.max_retries = Some(3);
    config.diagnostic_link = "See output at: somewhere".to_string();

    // Round-trips through serde, so it can be shipped to an isolated
    // worker and run there unchanged.
    let json = serde_json::to_string(&config).unwrap();
    let back: ExecConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back.command, config.command);
    assert_eq!(back.env, config.env);
    assert_eq!(back.stdin, config.stdin);
    assert_eq!(back.max_retries, config.max_retries);
    assert_eq!(back.retry_when, config.retry_when);
    assert_eq!(back.diagnostic_link, config.diagnostic_link);
}

#[test]
fn sparse_serialized_configs_fill_in_defaults() {
    let back: ExecConfig = serde_json::from_str(r#"{"command": ["true"]}"#).unwrap();

    assert_eq!(back.command, vec!["true".to_string()]);
    assert_eq!(back.working_dir.display().to_string(), ".");
    assert!(back.check_exit_status);
    assert!(back.retry_when.is_empty());
    assert_eq!(back.effective_max_retries(), 1);
}
