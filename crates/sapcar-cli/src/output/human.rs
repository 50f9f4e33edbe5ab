//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use sapcar_core::StateResult;
use sapcar_core::StateStatus;
use sapcar_core::state::ChangeValue;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn status_marker(&self, status: StateStatus) -> String {
        if self.use_colors {
            match status {
                StateStatus::Success => style("✓").green().bold().to_string(),
                StateStatus::Failure => style("✗").red().bold().to_string(),
                StateStatus::Unknown => style("?").yellow().bold().to_string(),
            }
        } else {
            match status {
                StateStatus::Success => "[OK]".to_string(),
                StateStatus::Failure => "[FAILED]".to_string(),
                StateStatus::Unknown => "[PENDING]".to_string(),
            }
        }
    }

    fn change_lines(value: &ChangeValue) -> Vec<String> {
        match value {
            ChangeValue::Files(files) => files.iter().map(|f| format!("      - {f}")).collect(),
            ChangeValue::Summary(text) => text.lines().map(|l| format!("      {l}")).collect(),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_listing(&self, archive: &Path, files: &[String]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for file in files {
            let _ = self.term.write_line(file);
        }

        if self.verbose {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Total: {} members in {}",
                Self::format_number(files.len()),
                archive.display()
            ));
        }

        Ok(())
    }

    fn format_extraction(
        &self,
        archive: &Path,
        output_dir: Option<&Path>,
        files: &[String],
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let dest = output_dir.unwrap_or_else(|| Path::new("."));
        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Extraction complete",
                style("✓").green().bold()
            ));
        } else {
            let _ = self.term.write_line("Extraction complete");
        }

        let _ = self
            .term
            .write_line(&format!("  Archive: {}", archive.display()));
        let _ = self
            .term
            .write_line(&format!("  Destination: {}", dest.display()));
        if files.is_empty() {
            let _ = self.term.write_line("  Members: all");
        } else {
            let _ = self.term.write_line(&format!(
                "  Members: {}",
                Self::format_number(files.len())
            ));
            if self.verbose {
                for file in files {
                    let _ = self.term.write_line(&format!("    - {file}"));
                }
            }
        }

        Ok(())
    }

    fn format_state_result(&self, result: &StateResult) -> Result<()> {
        // Failures are shown even in quiet mode
        if self.quiet && result.result != StateStatus::Failure {
            return Ok(());
        }

        let _ = self.term.write_line(&format!(
            "{} {}",
            self.status_marker(result.result),
            result.comment
        ));
        let _ = self.term.write_line(&format!("  Name: {}", result.name));
        let _ = self.term.write_line(&format!("  Result: {}", result.result));

        if !result.changes.is_empty() {
            let _ = self.term.write_line("  Changes:");
            if let Some(old) = &result.changes.old {
                let _ = self.term.write_line("    old:");
                for line in Self::change_lines(old) {
                    let _ = self.term.write_line(&line);
                }
            }
            if let Some(new) = &result.changes.new {
                let _ = self.term.write_line("    new:");
                for line in Self::change_lines(new) {
                    let _ = self.term.write_line(&line);
                }
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}
