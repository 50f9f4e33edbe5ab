//! Output formatter trait for CLI results.

use anyhow::Result;
use sapcar_core::StateResult;
use sapcar_core::StateStatus;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format archive member listing
    fn format_listing(&self, archive: &Path, files: &[String]) -> Result<()>;

    /// Format extraction result
    fn format_extraction(
        &self,
        archive: &Path,
        output_dir: Option<&Path>,
        files: &[String],
    ) -> Result<()>;

    /// Format extracted state result
    fn format_state_result(&self, result: &StateResult) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
    Pending,
}

impl From<StateStatus> for Status {
    fn from(status: StateStatus) -> Self {
        match status {
            StateStatus::Success => Self::Success,
            StateStatus::Failure => Self::Error,
            StateStatus::Unknown => Self::Pending,
        }
    }
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self::with_status(operation, Status::Success, data)
    }

    pub fn with_status(operation: impl Into<String>, status: Status, data: T) -> Self {
        Self {
            operation: operation.into(),
            status,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
