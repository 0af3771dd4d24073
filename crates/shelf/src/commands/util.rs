//! Shared helpers for command handlers.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use shelf_core::{Catalog, CoreError, GuardDecision, Route};

use crate::error::CliError;

/// Navigate to an admin route, refusing when the guard sends us to sign-in.
pub fn require_admin(catalog: &Catalog, path: &str) -> Result<(), CliError> {
    match catalog.navigate(&Route::admin(path)) {
        GuardDecision::Proceed => Ok(()),
        decision => Err(CliError::NotSignedIn {
            redirect: decision.destination(path),
        }),
    }
}

/// Surface a failed catalog write through the notification slot.
pub fn notify_failure<T>(
    catalog: &Catalog,
    action: &str,
    result: Result<T, CoreError>,
) -> Result<T, CoreError> {
    if result.is_err() {
        catalog.notifier().error(format!("Could not {action}"));
    }
    result
}

/// Read a full JSON payload for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}

/// Prompt on stderr and read one trimmed line from stdin.
pub fn prompt_line(prompt: &str) -> Result<String, CliError> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

/// Reject blank required values.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CliError> {
    if value.trim().is_empty() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}
