use crate::cli::GlobalFlags;
use crate::cli::root_commands::TemplatesArgs;
use crate::context::AppContext;
use crate::output::output_rows;

/// Handle `hitos templates`.
pub async fn handle(
    args: &TemplatesArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.load(None).await;
    let templates = ctx
        .service
        .catalog()
        .templates_for_process(args.process, ctx.today)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    output_rows(&templates, flags.format)
}
