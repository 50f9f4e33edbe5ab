//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "sap-car")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// SAPCAR executable (name on PATH or path)
    #[arg(long, global = true, env = "SAPCAR_BIN", default_value = "SAPCAR")]
    pub sapcar: PathBuf,

    /// Timeout per SAPCAR invocation (e.g. 600, 90s, 10m, 1h)
    #[arg(long, global = true, default_value = "600", value_parser = parse_timeout)]
    pub timeout: Duration,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the members of a SAR/CAR archive
    List(ListArgs),
    /// Extract a SAR/CAR archive
    Extract(ExtractArgs),
    /// Extract an archive only where files are missing in the destination
    Extracted(ExtractedArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Identity and extra flags shared by every SAPCAR subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Additional SAPCAR options, whitespace separated
    #[arg(long, allow_hyphen_values = true, value_name = "OPTIONS")]
    pub options: Option<String>,

    /// User to run SAPCAR as (default: current user)
    #[arg(long)]
    pub user: Option<String>,

    /// Group to run SAPCAR as (default: current group)
    #[arg(long)]
    pub group: Option<String>,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the SAR/CAR archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the SAR/CAR archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Archive member to extract (can be repeated; default: all)
    #[arg(long = "file", short = 'f', value_name = "MEMBER")]
    pub files: Vec<String>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(clap::Args)]
pub struct ExtractedArgs {
    /// Path to the SAR/CAR archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report what would be extracted without extracting
    #[arg(short, long)]
    pub test: bool,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Parse a timeout with optional suffix (s, m, h); bare numbers are seconds
#[allow(clippy::option_if_let_else)]
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty timeout".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('h') {
        (stripped, 3600)
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, 60)
    } else if let Some(stripped) = s.strip_suffix('s') {
        (stripped, 1)
    } else {
        (s, 1)
    };

    let secs = num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid timeout: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("timeout overflow: {s}"))
        })?;

    if secs == 0 {
        return Err("timeout must be greater than zero".to_string());
    }
    Ok(Duration::from_secs(secs))
}
