use crate::cli::GlobalFlags;
use crate::cli::root_commands::HistoryArgs;
use crate::context::AppContext;
use crate::output::output_rows;

/// Handle `hitos history`.
pub async fn handle(args: &HistoryArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = ctx.service.completion_history(args.id, args.limit).await;
    output_rows(&records, flags.format)
}
