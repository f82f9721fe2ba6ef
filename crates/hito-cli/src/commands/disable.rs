use std::collections::BTreeSet;

use hito_engine::cascade::DisableSelection;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DisableArgs;
use crate::commands::shared::batch::save_and_report;
use crate::commands::shared::parse::{parse_date_arg, parse_period};
use crate::context::AppContext;

/// Handle `hitos disable`.
pub async fn handle(args: &DisableArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let cutoff = parse_date_arg(&args.from, "from")?;
    let selection = selection_from(args);
    ctx.load(parse_period(args.period.period.as_deref())?).await;

    let outcome = ctx.service.disable_from(&selection, cutoff).await?;
    save_and_report(&outcome, ctx, flags).await
}

fn selection_from(args: &DisableArgs) -> DisableSelection {
    if args.template.is_empty() {
        DisableSelection::ProcessInstances(args.process.iter().copied().collect::<BTreeSet<_>>())
    } else {
        DisableSelection::Templates(args.template.iter().copied().collect::<BTreeSet<_>>())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use clap::Parser;
    use hito_engine::cascade::DisableSelection;
    use pretty_assertions::assert_eq;

    use super::selection_from;
    use crate::cli::{Cli, Commands};

    fn selection(argv: &[&str]) -> DisableSelection {
        let cli = Cli::try_parse_from(argv).expect("disable should parse");
        let Commands::Disable(args) = cli.command else {
            panic!("expected disable");
        };
        selection_from(&args)
    }

    #[test]
    fn templates_are_deduplicated() {
        assert_eq!(
            selection(&["hitos", "disable", "--template", "8,7,8", "--from", "2025-06-01"]),
            DisableSelection::Templates(BTreeSet::from([7, 8]))
        );
    }

    #[test]
    fn processes_select_by_instance() {
        assert_eq!(
            selection(&["hitos", "disable", "--process", "40", "--from", "2025-06-01"]),
            DisableSelection::ProcessInstances(BTreeSet::from([40]))
        );
    }
}
