use hito_engine::outcome::{BatchOutcome, BatchSummary};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::views::OutcomeView;
use crate::context::AppContext;
use crate::output::output;

/// Persist the snapshot after a batch and print its outcome.
///
/// A batch where every item failed is an error once printed.
pub async fn save_and_report(
    outcome: &BatchOutcome,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if outcome.attempted > 0 {
        ctx.save().await?;
    }

    match flags.format {
        OutputFormat::Json => output(outcome, OutputFormat::Json)?,
        OutputFormat::Table => {
            output(&OutcomeView::from(outcome), OutputFormat::Table)?;
            if !flags.quiet {
                for failure in &outcome.failures {
                    eprintln!("failed: {}", failure.error);
                }
            }
        }
    }

    if outcome.summary() == BatchSummary::Failure {
        anyhow::bail!("all {} item(s) of the batch failed", outcome.attempted);
    }
    Ok(())
}
