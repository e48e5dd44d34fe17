use anyhow::Context;
use chem_core::entities::ScanResult;
use chem_core::enums::StructureFormat;
use chem_core::responses::ScanResponse;
use chem_core::traits::ImageUpload;
use chem_workflow::{ScanOutcome, WorkflowError};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScanArgs;
use crate::context::AppContext;
use crate::editor::MolFileEditor;
use crate::output::output;
use crate::progress::Progress;

/// Handle `cclab scan`.
///
/// A structure that is recognized but not scored is still printed (and
/// saved with `--save`) before the failure is reported.
pub async fn handle(
    args: &ScanArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let Some(save) = &args.save {
        super::require_canvas(save, StructureFormat::Smiles)?;
    }
    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("failed to read image {}", args.image.display()))?;
    let file_name = args
        .image
        .file_name()
        .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned());

    let editor = args
        .save
        .as_ref()
        .map_or_else(MolFileEditor::detached, MolFileEditor::open);
    let controller = ctx.controller(editor);

    let progress = Progress::spinner("recognizing structure...");
    let result = controller
        .on_image_scanned(ImageUpload { file_name, bytes })
        .await;
    progress.finish_clear();

    let scan = match result {
        Ok(ScanOutcome::Scored(prediction)) => ScanResult {
            smiles: prediction.smiles,
            ic50: Some(prediction.ic50),
        },
        Ok(ScanOutcome::Recognized(scan)) => scan,
        Ok(ScanOutcome::Superseded) => anyhow::bail!("scan was superseded; try again"),
        Err(error @ WorkflowError::PredictionFailed(_)) => {
            let session = controller.session();
            if let Some(smiles) = session.structure() {
                output(
                    &ScanResponse {
                        phase: session.phase(),
                        scan: ScanResult {
                            smiles: smiles.to_string(),
                            ic50: None,
                        },
                    },
                    flags.format,
                )?;
            }
            return Err(error.into());
        }
        Err(error) => return Err(error.into()),
    };

    output(
        &ScanResponse {
            phase: controller.phase(),
            scan,
        },
        flags.format,
    )
}
