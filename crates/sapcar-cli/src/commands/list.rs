//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use sapcar_core::Context;
use sapcar_core::archive::ListOptions;
use sapcar_core::list_archive;

pub fn execute(args: &ListArgs, ctx: &Context, formatter: &dyn OutputFormatter) -> Result<()> {
    let opts = ListOptions {
        options: args.run.options.clone(),
        user: args.run.user.clone(),
        group: args.run.group.clone(),
    };

    let files = add_archive_context(list_archive(ctx, &args.archive, &opts), &args.archive)?;

    if files.is_empty() {
        formatter.format_warning(&format!(
            "Archive '{}' has no members",
            args.archive.display()
        ));
    }
    formatter.format_listing(&args.archive, &files)?;

    Ok(())
}
