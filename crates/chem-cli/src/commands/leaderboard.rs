use crate::cli::GlobalFlags;
use crate::cli::root_commands::LeaderboardArgs;
use crate::context::{AppContext, LabController};
use crate::editor::MolFileEditor;
use crate::output::output_leaderboard;

/// Handle `cclab leaderboard`.
pub async fn handle(
    args: &LeaderboardArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let controller = ctx.controller(MolFileEditor::detached());
    let limit = super::row_limit(flags);
    let preview_len = ctx.preview_len(args.full);

    controller.refresh_leaderboard().await?;
    output_leaderboard(&controller.standings(limit), flags.format, preview_len)?;
    if !args.watch {
        return Ok(());
    }

    let mut interval = tokio::time::interval(ctx.config.leaderboard.poll_interval());
    // The first tick completes immediately; the initial read is already shown.
    interval.tick().await;
    loop {
        tokio::select! {
            _ = interval.tick() => poll(&controller, limit, flags, preview_len).await?,
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

/// One polling round. A failed read is logged and the previous standings
/// are kept on screen.
async fn poll(
    controller: &LabController,
    limit: Option<usize>,
    flags: &GlobalFlags,
    preview_len: Option<usize>,
) -> anyhow::Result<()> {
    if let Err(error) = controller.refresh_leaderboard().await {
        tracing::warn!(%error, "leaderboard refresh failed");
        return Ok(());
    }
    println!();
    output_leaderboard(&controller.standings(limit), flags.format, preview_len)
}
