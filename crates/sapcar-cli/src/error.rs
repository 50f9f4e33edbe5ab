//! Error conversion utilities for CLI.
//!
//! Converts sapcar-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use sapcar_core::SapcarError;
use std::path::Path;

/// Converts `SapcarError` to user-friendly anyhow error with context
pub fn convert_sapcar_error(err: SapcarError, archive: &Path) -> anyhow::Error {
    match err {
        SapcarError::ArchiveNotFound { path } => {
            anyhow!(
                "The SAR file '{}' does not exist\n\
                 HINT: Check the path and that the archive is readable.",
                path.display()
            )
        }
        SapcarError::CommandFailed { code, stderr } => {
            anyhow!(
                "SAPCAR failed on '{}' (exit status {code}):\n{}",
                archive.display(),
                stderr.trim()
            )
        }
        SapcarError::Timeout { command, timeout } => {
            anyhow!(
                "SAPCAR did not finish within {}s: {command}\n\
                 HINT: Use --timeout to allow more time for large archives.",
                timeout.as_secs()
            )
        }
        SapcarError::Spawn { program, source } => {
            anyhow!(
                "Could not execute '{program}': {source}\n\
                 HINT: Install SAPCAR or point --sapcar / SAPCAR_BIN at it."
            )
        }
        SapcarError::Unavailable { reason } => {
            anyhow!(
                "SAPCAR is not available: {reason}\n\
                 HINT: Install SAPCAR or point --sapcar / SAPCAR_BIN at it."
            )
        }
        SapcarError::UnknownUser(user) => {
            anyhow!("Unknown user '{user}'\nHINT: --user must name an existing account.")
        }
        SapcarError::UnknownGroup(group) => {
            anyhow!("Unknown group '{group}'\nHINT: --group must name an existing group.")
        }
        SapcarError::Io(_) => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, SapcarError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_sapcar_error(e, archive))
}
