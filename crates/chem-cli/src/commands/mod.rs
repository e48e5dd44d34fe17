pub mod dispatch;
pub mod leaderboard;
pub mod predict;
pub mod scan;
pub mod schema;
pub mod submit;

use std::path::Path;

use chem_core::entities::Prediction;
use chem_core::enums::StructureFormat;
use chem_workflow::PredictOutcome;

use crate::cli::GlobalFlags;
use crate::editor::canvas_format;

/// The applied prediction, or an error when a newer request won. A CLI run
/// issues one request, so this only trips if the canvas file changed
/// mid-flight.
fn applied(outcome: PredictOutcome) -> anyhow::Result<Prediction> {
    match outcome {
        PredictOutcome::Scored(prediction) => Ok(prediction),
        PredictOutcome::Superseded => anyhow::bail!("prediction was superseded; try again"),
    }
}

/// Fail early when `path` is not a `format` canvas.
fn require_canvas(path: &Path, format: StructureFormat) -> anyhow::Result<()> {
    let found = canvas_format(path);
    if found != format {
        let hint = match format {
            StructureFormat::Mol => "use a .mol file",
            StructureFormat::Smiles => "use a .smi or .smiles file",
        };
        anyhow::bail!("{} is a {found} file, expected {format}; {hint}", path.display());
    }
    Ok(())
}

/// Global `--limit` as a row count.
fn row_limit(flags: &GlobalFlags) -> Option<usize> {
    flags.limit.and_then(|limit| usize::try_from(limit).ok())
}
