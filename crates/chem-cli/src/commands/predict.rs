use anyhow::bail;
use chem_core::enums::{Phase, StructureFormat};
use chem_core::responses::PredictResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PredictArgs;
use crate::context::AppContext;
use crate::editor::MolFileEditor;
use crate::output::output;
use crate::progress::Progress;

/// Handle `cclab predict`.
pub async fn handle(
    args: &PredictArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    super::require_canvas(&args.canvas, StructureFormat::Mol)?;
    let controller = ctx.controller(MolFileEditor::open(&args.canvas));
    if controller.sync_from_editor().await == Phase::Empty {
        bail!("no structure found in {}", args.canvas.display());
    }

    let progress = Progress::spinner("predicting IC50...");
    let outcome = match controller.on_predict_requested().await {
        Ok(outcome) => outcome,
        Err(error) => {
            progress.finish_err("prediction failed");
            return Err(error.into());
        }
    };
    progress.finish_clear();

    let prediction = super::applied(outcome)?;
    output(
        &PredictResponse {
            phase: controller.phase(),
            prediction,
        },
        flags.format,
    )
}
