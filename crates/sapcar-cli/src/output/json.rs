//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use sapcar_core::StateResult;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_listing(&self, archive: &Path, files: &[String]) -> Result<()> {
        #[derive(Serialize)]
        struct ListingOutput<'a> {
            archive: String,
            total_entries: usize,
            files: &'a [String],
        }

        let data = ListingOutput {
            archive: archive.display().to_string(),
            total_entries: files.len(),
            files,
        };

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_extraction(
        &self,
        archive: &Path,
        output_dir: Option<&Path>,
        files: &[String],
    ) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput<'a> {
            archive: String,
            output_dir: String,
            all_files: bool,
            files: &'a [String],
        }

        let data = ExtractionOutput {
            archive: archive.display().to_string(),
            output_dir: output_dir.unwrap_or_else(|| Path::new(".")).display().to_string(),
            all_files: files.is_empty(),
            files,
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_state_result(&self, result: &StateResult) -> Result<()> {
        let output = JsonOutput::with_status("extracted", result.result.into(), result);
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        // stdout carries exactly one document per run
        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        if let Ok(json) = serde_json::to_string(&output) {
            let _ = writeln!(io::stderr(), "{json}");
        }
    }
}
