use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Predict(args) => commands::predict::handle(&args, ctx, flags).await,
        Commands::Scan(args) => commands::scan::handle(&args, ctx, flags).await,
        Commands::Submit(args) => commands::submit::handle(&args, ctx, flags).await,
        Commands::Leaderboard(args) => commands::leaderboard::handle(&args, ctx, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
