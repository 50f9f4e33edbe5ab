//! List and extract operations against the SAPCAR binary.

use crate::Context;
use crate::Result;
use crate::SapcarError;
use crate::command::CommandLine;
use crate::command::extract_command;
use crate::command::list_command;
use crate::listing::parse_list_output;
use crate::runner::CommandResult;
use crate::runner::CommandRunner;
use crate::runner::CommandSpec;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::error;

/// Optional arguments of [`list_archive`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Extra SAPCAR flags, whitespace separated.
    pub options: Option<String>,
    /// Run-as user; defaults to the context identity.
    pub user: Option<String>,
    /// Run-as group; defaults to the context identity.
    pub group: Option<String>,
}

/// Optional arguments of [`extract_archive`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Archive members to extract. Empty extracts everything.
    pub files: Vec<String>,
    /// Extra SAPCAR flags, whitespace separated.
    pub options: Option<String>,
    /// Target directory. `None` extracts into the working directory.
    pub output_dir: Option<PathBuf>,
    /// Run-as user; defaults to the context identity.
    pub user: Option<String>,
    /// Run-as group; defaults to the context identity.
    pub group: Option<String>,
}

/// Lists the members of a SAR/CAR archive.
///
/// Runs `SAPCAR -tf <path> [options]` and returns the member paths in the
/// order SAPCAR reports them.
///
/// # Errors
///
/// - [`SapcarError::ArchiveNotFound`] if `path` is not an existing file
/// - [`SapcarError::CommandFailed`] if SAPCAR exits non-zero; its standard
///   error is logged
/// - [`SapcarError::Timeout`] / [`SapcarError::Spawn`] from the runner
///
/// # Examples
///
/// ```no_run
/// use sapcar_core::Context;
/// use sapcar_core::SapcarConfig;
/// use sapcar_core::archive::ListOptions;
/// use sapcar_core::list_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ctx = Context::system(SapcarConfig::default())?;
/// let files = list_archive(&ctx, "/mnt/nfs/kernel.sar", &ListOptions::default())?;
/// for file in files {
///     println!("{file}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_archive<R, P>(ctx: &Context<R>, path: P, opts: &ListOptions) -> Result<Vec<String>>
where
    R: CommandRunner,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!(path = %path.display(), "listing archive");
    ensure_archive(path)?;

    let command = list_command(&ctx.config, path, opts.options.as_deref());
    let result = run(ctx, command, opts.user.as_deref(), opts.group.as_deref())?;
    if !result.is_success() {
        let stderr = result.stderr.trim();
        error!("Could not list files of archive {}:\n{stderr}", path.display());
        return Err(SapcarError::CommandFailed {
            code: result.code,
            stderr: result.stderr,
        });
    }

    Ok(parse_list_output(&result.stdout))
}

/// Extracts a SAR/CAR archive, verifying its signature manifest.
///
/// Runs `SAPCAR -xvf <path> [options] -manifest SIGNATURE.SMF -R <dir>
/// [files...]`.
///
/// # Errors
///
/// Same as [`list_archive`].
pub fn extract_archive<R, P>(ctx: &Context<R>, path: P, opts: &ExtractOptions) -> Result<()>
where
    R: CommandRunner,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!(path = %path.display(), files = opts.files.len(), "extracting archive");
    ensure_archive(path)?;

    let command = extract_command(
        &ctx.config,
        path,
        &opts.files,
        opts.options.as_deref(),
        opts.output_dir.as_deref(),
    );
    let result = run(ctx, command, opts.user.as_deref(), opts.group.as_deref())?;
    if !result.is_success() {
        let stderr = result.stderr.trim();
        error!("Could not extract {}:\n{stderr}", path.display());
        return Err(SapcarError::CommandFailed {
            code: result.code,
            stderr: result.stderr,
        });
    }

    Ok(())
}

fn ensure_archive(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(SapcarError::ArchiveNotFound {
            path: path.to_path_buf(),
        })
    }
}

fn run<R: CommandRunner>(
    ctx: &Context<R>,
    command: CommandLine,
    user: Option<&str>,
    group: Option<&str>,
) -> Result<CommandResult> {
    let spec = CommandSpec {
        command,
        run_as: ctx.identity.with_overrides(user, group),
        timeout: ctx.config.timeout,
    };
    debug!(command = %spec.command, "running SAPCAR");
    let result = ctx.runner.run(&spec)?;
    debug!("Output:\n{result:?}");
    Ok(result)
}
