use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TouchArgs;
use crate::commands::shared::batch::save_and_report;
use crate::commands::shared::parse::{parse_period, parse_reason};
use crate::context::AppContext;

/// Handle `hitos touch`.
pub async fn handle(args: &TouchArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_identity()?;
    let reason = parse_reason(args.reason)?;
    let period = ctx.load(parse_period(args.period.period.as_deref())?).await;

    ctx.service
        .touch(args.id)
        .with_context(|| format!("cannot touch milestone {} in {period}", args.id))?;
    let outcome = ctx.service.commit(reason, args.note.as_deref()).await?;
    save_and_report(&outcome, ctx, flags).await
}
