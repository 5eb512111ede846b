// src/config/validate.rs

use crate::config::model::ExecConfig;
use crate::errors::{Error, Result};

/// Run fail-fast validation against a config, before anything launches.
///
/// This checks:
/// - the command has at least one token
/// - the first token is not blank
/// - every `retry_when` pattern matcher compiles
///
/// It does **not** check that the program exists or is executable — that
/// is the OS launcher's call, surfaced as a launch failure.
pub fn validate_config(config: &ExecConfig) -> Result<()> {
    ensure_has_command(config)?;
    config.retry_when.validate()?;
    Ok(())
}

fn ensure_has_command(config: &ExecConfig) -> Result<()> {
    let Some(first) = config.command.first() else {
        return Err(Error::InvalidConfig(
            "command must contain at least one token".to_string(),
        ));
    };

    if first.trim().is_empty() {
        return Err(Error::InvalidConfig(
            "first command token must not be blank".to_string(),
        ));
    }

    Ok(())
}
