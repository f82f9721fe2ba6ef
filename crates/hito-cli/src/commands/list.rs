use hito_core::enums::{DisplayStatus, MilestoneKind};
use hito_engine::pipeline::{CalendarFilter, SortDirection, SortSpec, ViewState};

use crate::cli::root_commands::ListArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::limit::effective_page_size;
use crate::commands::shared::parse::{parse_date_arg, parse_enum, parse_period};
use crate::commands::shared::views::{CalendarLine, PageView};
use crate::context::AppContext;
use crate::output::{output, output_rows};

/// Handle `hitos list`.
pub async fn handle(args: &ListArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = build_filter(args)?;
    let period = ctx.load(parse_period(args.period.period.as_deref())?).await;

    let mut view = ViewState::new(effective_page_size(
        args.page_size,
        ctx.config.general.page_size,
    ));
    view.set_filter(filter);
    view.set_sort(SortSpec {
        key: args.sort.into(),
        direction: if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    });
    view.set_page(args.page.saturating_sub(1));

    let today = ctx.today;
    let page = ctx.service.page(&view, today);
    let items = page
        .items
        .iter()
        .map(|row| CalendarLine::from_row(row, today))
        .collect::<Vec<_>>();

    match flags.format {
        OutputFormat::Json => output(
            &PageView {
                period,
                page: page.page + 1,
                page_count: page.page_count,
                total: page.total,
                items,
            },
            OutputFormat::Json,
        ),
        OutputFormat::Table => {
            output_rows(&items, OutputFormat::Table)?;
            if !flags.quiet {
                println!(
                    "{period}: page {}/{}, {} matching milestone(s)",
                    page.page + 1,
                    page.page_count,
                    page.total
                );
            }
            Ok(())
        }
    }
}

fn build_filter(args: &ListArgs) -> anyhow::Result<CalendarFilter> {
    Ok(CalendarFilter {
        text: args.search.clone(),
        milestone_template_id: args.template,
        process_name: args.process.clone(),
        statuses: args
            .status
            .iter()
            .map(|raw| parse_enum::<DisplayStatus>(raw, "status"))
            .collect::<anyhow::Result<_>>()?,
        kinds: args
            .kind
            .iter()
            .map(|raw| parse_enum::<MilestoneKind>(raw, "kind"))
            .collect::<anyhow::Result<_>>()?,
        deadline_from: args
            .from
            .as_deref()
            .map(|raw| parse_date_arg(raw, "from"))
            .transpose()?,
        deadline_to: args
            .to
            .as_deref()
            .map(|raw| parse_date_arg(raw, "to"))
            .transpose()?,
    })
}
