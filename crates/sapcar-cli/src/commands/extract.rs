//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use sapcar_core::Context;
use sapcar_core::archive::ExtractOptions;
use sapcar_core::extract_archive;

pub fn execute(args: &ExtractArgs, ctx: &Context, formatter: &dyn OutputFormatter) -> Result<()> {
    let opts = ExtractOptions {
        files: args.files.clone(),
        options: args.run.options.clone(),
        output_dir: args.output_dir.clone(),
        user: args.run.user.clone(),
        group: args.run.group.clone(),
    };

    add_archive_context(extract_archive(ctx, &args.archive, &opts), &args.archive)?;

    formatter.format_extraction(&args.archive, args.output_dir.as_deref(), &args.files)?;

    Ok(())
}
