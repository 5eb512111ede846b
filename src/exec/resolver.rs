// src/exec/resolver.rs

//! PATH resolution for the command's first token.
//!
//! On platforms where the OS process launcher does not consult PATH, the
//! first token is replaced with the absolute path of the first matching
//! entry found in the listed PATH directories. Resolution failure is not
//! an error — the unresolved command is handed to the launcher, whose own
//! error is more useful than anything synthesized here.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Error, Result};

/// Resolve the first command token against `search_path`.
///
/// Returns the command unchanged when:
/// - the launcher already searches PATH (`launcher_searches_path`)
/// - the command is empty
/// - the first token is already a relative (`./`, `../`) or absolute path
/// - no PATH directory contains a matching entry
pub fn resolve_command(
    command: Vec<String>,
    search_path: Option<&str>,
    launcher_searches_path: bool,
) -> Result<Vec<String>> {
    if launcher_searches_path || command.is_empty() {
        return Ok(command);
    }

    let first = &command[0];
    if first.starts_with("./") || first.starts_with("../") || first.starts_with('/') {
        return Ok(command);
    }

    let Some(search_path) = search_path else {
        return Ok(command);
    };

    match find_in_path(search_path, first)? {
        Some(path) => {
            debug!(
                command = %first,
                resolved = %path.display(),
                "resolved first command token against PATH"
            );
            let mut resolved = command;
            resolved[0] = path.to_string_lossy().into_owned();
            Ok(resolved)
        }
        None => Ok(command),
    }
}

/// First entry named `command` in the listed directories, scanned in
/// listed order. Entries that are not directories are skipped; a
/// directory that cannot be read is fatal.
fn find_in_path(search_path: &str, command: &str) -> Result<Option<PathBuf>> {
    for dir in search_path.split(':').map(Path::new) {
        if !dir.is_dir() {
            continue;
        }
        if let Some(found) = find_in_dir(dir, command)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

fn find_in_dir(dir: &Path, command: &str) -> Result<Option<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::PathScan {
        dir: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| Error::PathScan {
            dir: dir.to_path_buf(),
            source,
        })?;
        if entry.file_name() == OsStr::new(command) {
            return Ok(Some(std::path::absolute(entry.path())?));
        }
    }

    Ok(None)
}
