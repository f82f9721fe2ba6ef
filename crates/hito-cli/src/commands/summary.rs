use hito_core::enums::DisplayStatus;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PeriodArgs;
use crate::commands::shared::parse::parse_period;
use crate::commands::shared::views::StatusCount;
use crate::context::AppContext;
use crate::output::output_rows;

/// Handle `hitos summary`.
pub async fn handle(args: &PeriodArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.load(parse_period(args.period.as_deref())?).await;
    let counts = ctx.service.status_counts(ctx.today);

    let rows = DisplayStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: counts.get(&status).copied().unwrap_or(0),
        })
        .collect::<Vec<_>>();
    output_rows(&rows, flags.format)
}
