//! The `extracted` state: extract an archive only when files are missing.
//!
//! Presence is decided by relative path alone; file contents and hashes are
//! never compared.

use crate::Context;
use crate::ExtractionPlan;
use crate::Result;
use crate::archive::ExtractOptions;
use crate::archive::ListOptions;
use crate::archive::extract_archive;
use crate::archive::list_archive;
use crate::listing::list_disk_files;
use crate::runner::CommandRunner;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::error;

/// Outcome of a state evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateStatus {
    /// The destination matches the archive.
    Success,
    /// Listing or extraction failed.
    Failure,
    /// Dry run with pending changes; nothing was attempted.
    Unknown,
}

impl Serialize for StateStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Success => serializer.serialize_bool(true),
            Self::Failure => serializer.serialize_bool(false),
            Self::Unknown => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for StateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One side of a change record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChangeValue {
    /// Members that were (or would be) extracted.
    Files(Vec<String>),
    /// Free-form description.
    Summary(String),
}

/// Before/after record of a state evaluation.
///
/// Only `new` is ever populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Changes {
    /// Previous state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<ChangeValue>,
    /// Resulting state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<ChangeValue>,
}

impl Changes {
    /// Returns `true` if nothing changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.old.is_none() && self.new.is_none()
    }
}

/// Result record returned by [`extracted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateResult {
    /// Archive path the state was evaluated for.
    pub name: String,
    /// Change record.
    pub changes: Changes,
    /// Outcome.
    pub result: StateStatus,
    /// Human-readable summary.
    pub comment: String,
}

impl StateResult {
    fn new(name: &Path, result: StateStatus) -> Self {
        Self {
            name: name.display().to_string(),
            changes: Changes::default(),
            result,
            comment: String::new(),
        }
    }

    fn fail(mut self, comment: impl Into<String>) -> Self {
        self.result = StateStatus::Failure;
        self.comment = comment.into();
        self
    }
}

/// Arguments of the `extracted` state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArgs {
    /// Archive to extract.
    pub name: PathBuf,
    /// Extra SAPCAR flags for extraction.
    pub options: Option<String>,
    /// Destination; `None` is the working directory.
    pub output_dir: Option<PathBuf>,
    /// Run-as user.
    pub user: Option<String>,
    /// Run-as group.
    pub group: Option<String>,
}

impl ExtractedArgs {
    /// Creates arguments for `name` with every option unset.
    #[must_use]
    pub fn new(name: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    fn destination(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}

/// Ensures every member of an archive exists below the destination.
///
/// Lists the archive, lists the destination, and extracts only what is
/// missing: nothing if all members exist, every member (without a file
/// filter) if none do, otherwise the missing subset. In dry-run mode the
/// same decision is reported with [`StateStatus::Unknown`] and SAPCAR is
/// never asked to extract.
///
/// SAPCAR failures are logged and reported as [`StateStatus::Failure`].
///
/// # Errors
///
/// Returns an error if the archive does not exist, the run-as identity is
/// unknown, or the destination cannot be read.
pub fn extracted<R: CommandRunner>(ctx: &Context<R>, args: &ExtractedArgs) -> Result<StateResult> {
    let name = args.name.as_path();
    let dest = args.destination();
    debug!(name = %name.display(), dest = %dest.display(), dry_run = ctx.dry_run, "evaluating extracted state");

    let initial = if ctx.dry_run {
        StateStatus::Unknown
    } else {
        StateStatus::Success
    };
    let mut ret = StateResult::new(name, initial);

    debug!("Listing files of archive");
    let list_opts = ListOptions {
        options: None,
        user: args.user.clone(),
        group: args.group.clone(),
    };
    let archive_files = match list_archive(ctx, name, &list_opts) {
        Ok(files) => files,
        Err(err) if err.is_tool_failure() => {
            error!("An error occurred during list of files: {err}");
            return Ok(ret.fail("An error occurred during list of files, check the log files"));
        }
        Err(err) => return Err(err),
    };

    debug!("Listing files of target dir");
    let disk_files = list_disk_files(dest)?;

    debug!("Checking if files need to be extracted");
    let plan = ExtractionPlan::compute(&archive_files, &disk_files);
    let missing = match &plan {
        ExtractionPlan::NothingToDo => {
            debug!("All files are already extracted");
            ret.result = StateStatus::Success;
            ret.comment = "All files are already extracted".to_string();
            return Ok(ret);
        }
        ExtractionPlan::Everything => {
            debug!("All files need to be extracted");
            None
        }
        ExtractionPlan::Files(files) => Some(files),
    };

    if ctx.dry_run {
        ret.comment = format!("Extracted archive {} to {}", name.display(), dest.display());
        ret.changes.new = Some(ChangeValue::Summary(match missing {
            Some(files) => format!("Would extract the following files:\n{}", files.join("\n")),
            None => format!("Would extract all files from {}", name.display()),
        }));
        ret.result = StateStatus::Unknown;
        debug!(?ret, "returning");
        return Ok(ret);
    }

    debug!("Extracting files");
    let extract_opts = ExtractOptions {
        files: plan.file_filter().to_vec(),
        options: args.options.clone(),
        output_dir: args.output_dir.clone(),
        user: args.user.clone(),
        group: args.group.clone(),
    };
    match extract_archive(ctx, name, &extract_opts) {
        Ok(()) => {
            ret.result = StateStatus::Success;
            ret.comment = format!("Extracted archive {} to {}", name.display(), dest.display());
            ret.changes.new = Some(match missing {
                Some(files) => ChangeValue::Files(files.clone()),
                None => ChangeValue::Summary(format!("Extracted all files from {}", name.display())),
            });
        }
        Err(err) if err.is_tool_failure() => {
            error!("Could not extract archive {}: {err}", name.display());
            ret = ret.fail(format!(
                "Could not extract archive {}, check the log files",
                name.display()
            ));
        }
        Err(err) => return Err(err),
    }

    debug!(?ret, "returning");
    Ok(ret)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_ternary() {
        assert_eq!(serde_json::to_string(&StateStatus::Success).unwrap(), "true");
        assert_eq!(serde_json::to_string(&StateStatus::Failure).unwrap(), "false");
        assert_eq!(serde_json::to_string(&StateStatus::Unknown).unwrap(), "null");
    }

    #[test]
    fn test_empty_changes_serialize_to_empty_object() {
        let changes = Changes::default();
        assert!(changes.is_empty());
        assert_eq!(serde_json::to_string(&changes).unwrap(), "{}");
    }

    #[test]
    fn test_change_value_untagged() {
        let changes = Changes {
            old: None,
            new: Some(ChangeValue::Files(vec!["B.txt".into()])),
        };
        assert_eq!(serde_json::to_string(&changes).unwrap(), r#"{"new":["B.txt"]}"#);

        let changes = Changes {
            old: None,
            new: Some(ChangeValue::Summary("Extracted all files from a.sar".into())),
        };
        assert_eq!(
            serde_json::to_string(&changes).unwrap(),
            r#"{"new":"Extracted all files from a.sar"}"#
        );
    }

    #[test]
    fn test_default_destination_is_cwd() {
        let args = ExtractedArgs::new("a.sar");
        assert_eq!(args.destination(), Path::new("."));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StateStatus::Unknown.to_string(), "unknown");
    }
}
