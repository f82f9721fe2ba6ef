use anyhow::Context;
use hito_engine::changes::DeadlineEdit;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RescheduleArgs;
use crate::commands::shared::batch::save_and_report;
use crate::commands::shared::parse::{parse_date_arg, parse_period, parse_reason, parse_time_arg};
use crate::context::AppContext;

/// Handle `hitos reschedule`.
pub async fn handle(
    args: &RescheduleArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_identity()?;
    let reason = parse_reason(args.reason)?;
    let mut edits = Vec::new();
    if let Some(raw) = args.date.as_deref() {
        edits.push(DeadlineEdit::Date(Some(parse_date_arg(raw, "date")?)));
    }
    if let Some(raw) = args.time.as_deref() {
        edits.push(DeadlineEdit::Time(Some(parse_time_arg(raw)?)));
    }
    if args.clear_time {
        edits.push(DeadlineEdit::Time(None));
    }

    let period = ctx.load(parse_period(args.period.period.as_deref())?).await;
    for edit in edits {
        ctx.service
            .stage_edit(args.id, edit)
            .with_context(|| format!("cannot reschedule milestone {} in {period}", args.id))?;
    }

    let outcome = ctx.service.commit(reason, args.note.as_deref()).await?;
    save_and_report(&outcome, ctx, flags).await
}
