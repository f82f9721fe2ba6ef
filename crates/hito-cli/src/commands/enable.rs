use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EnableArgs;
use crate::commands::shared::parse::parse_period;
use crate::commands::shared::views::CalendarLine;
use crate::context::AppContext;
use crate::output::output;

/// Handle `hitos enable`.
pub async fn handle(args: &EnableArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let period = ctx.load(parse_period(args.period.period.as_deref())?).await;
    ctx.service
        .set_enabled(args.id, true)
        .await
        .with_context(|| format!("cannot enable milestone {} in {period}", args.id))?;
    ctx.save().await?;

    let row = ctx
        .service
        .row(args.id)
        .with_context(|| format!("milestone {} vanished after enabling", args.id))?;
    output(&CalendarLine::from_row(row, ctx.today), flags.format)
}
