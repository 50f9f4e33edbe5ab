//! Extracted (idempotent extraction) command implementation.

use crate::cli::ExtractedArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use sapcar_core::Context;
use sapcar_core::StateStatus;
use sapcar_core::extracted;
use sapcar_core::state;
use std::process::ExitCode;

pub fn execute(
    args: &ExtractedArgs,
    ctx: Context,
    formatter: &dyn OutputFormatter,
) -> Result<ExitCode> {
    let ctx = ctx.with_dry_run(args.test);
    let state_args = state::ExtractedArgs {
        name: args.archive.clone(),
        options: args.run.options.clone(),
        output_dir: args.output_dir.clone(),
        user: args.run.user.clone(),
        group: args.run.group.clone(),
    };

    let result = add_archive_context(extracted(&ctx, &state_args), &args.archive)?;

    formatter.format_state_result(&result)?;

    // Dry runs with pending changes still exit 0
    Ok(match result.result {
        StateStatus::Success | StateStatus::Unknown => ExitCode::SUCCESS,
        StateStatus::Failure => ExitCode::FAILURE,
    })
}
