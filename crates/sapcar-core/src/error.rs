//! Error types for SAPCAR operations.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using `SapcarError`.
pub type Result<T> = std::result::Result<T, SapcarError>;

/// Errors that can occur while driving the SAPCAR binary.
#[derive(Error, Debug)]
pub enum SapcarError {
    /// The referenced archive is not an existing regular file.
    #[error("the SAR file '{}' does not exist", path.display())]
    ArchiveNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// SAPCAR ran and exited with a non-zero status.
    #[error("SAPCAR exited with status {code}: {}", stderr.trim())]
    CommandFailed {
        /// Exit code reported by the process.
        code: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// SAPCAR did not finish within the configured timeout and was killed.
    #[error("command '{command}' timed out after {}s", timeout.as_secs())]
    Timeout {
        /// Rendered command line.
        command: String,
        /// Timeout that expired.
        timeout: Duration,
    },

    /// The process could not be started at all.
    #[error("failed to execute '{program}': {source}")]
    Spawn {
        /// Program that was executed.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Run-as user does not exist on this host.
    #[error("unknown user: {0}")]
    UnknownUser(String),

    /// Run-as group does not exist on this host.
    #[error("unknown group: {0}")]
    UnknownGroup(String),

    /// SAPCAR cannot be used on this host.
    #[error("SAPCAR is not available: {reason}")]
    Unavailable {
        /// Why the tool is unusable.
        reason: String,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SapcarError {
    /// Returns `true` if SAPCAR itself was executed and reported failure.
    ///
    /// These are the failures the extracted state folds into a negative
    /// result instead of propagating.
    ///
    /// # Examples
    ///
    /// ```
    /// use sapcar_core::SapcarError;
    ///
    /// let err = SapcarError::CommandFailed {
    ///     code: 2,
    ///     stderr: "checksum mismatch".to_string(),
    /// };
    /// assert!(err.is_tool_failure());
    ///
    /// let err = SapcarError::UnknownUser("nobody2".to_string());
    /// assert!(!err.is_tool_failure());
    /// ```
    #[must_use]
    pub const fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            Self::CommandFailed { .. } | Self::Timeout { .. } | Self::Spawn { .. }
        )
    }

    /// Returns the captured standard error of a failed SAPCAR run.
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}
