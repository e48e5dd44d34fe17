use anyhow::bail;
use chem_core::enums::{Phase, StructureFormat};
use chem_core::leaderboard::rank;
use chem_core::responses::{LeaderboardResponse, SubmitResponse};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SubmitArgs;
use crate::context::AppContext;
use crate::editor::MolFileEditor;
use crate::output::output_submission;
use crate::progress::Progress;

/// Handle `cclab submit`: read the canvas, predict, submit, show standings.
pub async fn handle(
    args: &SubmitArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    super::require_canvas(&args.canvas, StructureFormat::Mol)?;
    let editor = MolFileEditor::open(&args.canvas).clear_on_reset(args.clear);
    let controller = ctx.controller(editor);
    if controller.sync_from_editor().await == Phase::Empty {
        bail!("no structure found in {}", args.canvas.display());
    }

    let progress = Progress::spinner("predicting IC50...");
    let predicted = controller
        .on_predict_requested()
        .await
        .map_err(anyhow::Error::from)
        .and_then(super::applied);
    if let Err(error) = &predicted {
        progress.finish_err(&error.to_string());
    }
    predicted?;

    progress.set_message("submitting...");
    let receipt = match controller.on_submit_requested(&args.nickname).await {
        Ok(receipt) => receipt,
        Err(error) => {
            progress.finish_err("submission failed");
            return Err(error.into());
        }
    };
    progress.finish_clear();

    if !receipt.refreshed {
        tracing::warn!("leaderboard could not be refreshed; showing the submission only");
    }

    let position = rank(&receipt.leaderboard)
        .iter()
        .find(|ranked| ranked.entry.id == receipt.entry.id)
        .map(|ranked| ranked.position);
    let limit = super::row_limit(flags);
    let response = SubmitResponse {
        leaderboard: LeaderboardResponse::from_entries(&receipt.leaderboard, limit),
        position,
        submitted: receipt.entry,
    };
    output_submission(&response, flags.format, ctx.preview_len(false))
}
