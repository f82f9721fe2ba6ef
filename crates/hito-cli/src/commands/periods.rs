use crate::cli::GlobalFlags;
use crate::commands::shared::views::PeriodLine;
use crate::context::AppContext;
use crate::output::output_rows;

/// Handle `hitos periods`.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.load(None).await;
    let rows = ctx
        .service
        .periods()
        .into_iter()
        .map(|(period, processes)| PeriodLine { period, processes })
        .collect::<Vec<_>>();
    output_rows(&rows, flags.format)
}
