use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::List(args) => commands::list::handle(&args, ctx, flags).await,
        Commands::Summary(args) => commands::summary::handle(&args, ctx, flags).await,
        Commands::Periods => commands::periods::handle(ctx, flags).await,
        Commands::Templates(args) => commands::templates::handle(&args, ctx, flags).await,
        Commands::Reschedule(args) => commands::reschedule::handle(&args, ctx, flags).await,
        Commands::Touch(args) => commands::touch::handle(&args, ctx, flags).await,
        Commands::Disable(args) => commands::disable::handle(&args, ctx, flags).await,
        Commands::Enable(args) => commands::enable::handle(&args, ctx, flags).await,
        Commands::History(args) => commands::history::handle(&args, ctx, flags).await,
        Commands::Audit => commands::audit::handle(ctx, flags).await,
    }
}
