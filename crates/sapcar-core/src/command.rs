//! SAPCAR command line construction.
//!
//! SAPCAR's flags are a fixed external interface:
//!
//! ```text
//! SAPCAR -tf <path> [options]
//! SAPCAR -xvf <path> [options] -manifest SIGNATURE.SMF -R <output_dir> [files...]
//! ```

use crate::SapcarConfig;
use std::fmt;
use std::path::Path;

/// A program plus its argument vector.
///
/// Arguments are handed to the process directly, never through a shell.
/// `Display` renders them space-joined for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable name or path.
    pub program: String,
    /// Arguments in order.
    pub args: Vec<String>,
}

impl CommandLine {
    /// Creates a command line without arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends the whitespace-separated words of a free-form option string.
    #[must_use]
    pub fn options(self, options: Option<&str>) -> Self {
        match options {
            Some(options) => self.args(options.split_whitespace()),
            None => self,
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Builds `SAPCAR -tf <path> [options]`.
#[must_use]
pub fn list_command(config: &SapcarConfig, path: &Path, options: Option<&str>) -> CommandLine {
    CommandLine::new(config.program())
        .arg("-tf")
        .arg(path.to_string_lossy())
        .options(options)
}

/// Builds `SAPCAR -xvf <path> [options] -manifest <manifest> -R <dir> [files...]`.
///
/// Without an output directory the `-R` pair is left out and SAPCAR extracts
/// into its working directory. An empty `files` slice extracts everything.
#[must_use]
pub fn extract_command(
    config: &SapcarConfig,
    path: &Path,
    files: &[String],
    options: Option<&str>,
    output_dir: Option<&Path>,
) -> CommandLine {
    let mut cmd = CommandLine::new(config.program())
        .arg("-xvf")
        .arg(path.to_string_lossy())
        .options(options)
        .arg("-manifest")
        .arg(config.manifest.as_str());
    if let Some(dir) = output_dir {
        cmd = cmd.arg("-R").arg(dir.to_string_lossy());
    }
    cmd.args(files.iter().cloned())
}
