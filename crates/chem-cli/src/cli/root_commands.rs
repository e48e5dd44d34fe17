use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Predict IC50 for the structure in a MOL file.
    Predict(PredictArgs),
    /// Recognize a structure (and its IC50) from an image.
    Scan(ScanArgs),
    /// Predict and submit the structure in a MOL file to the leaderboard.
    Submit(SubmitArgs),
    /// Show the ranked leaderboard.
    Leaderboard(LeaderboardArgs),
    /// Print the JSON Schema for a response type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PredictArgs {
    /// MOL file holding the drawn structure.
    pub canvas: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ScanArgs {
    /// Image of a drawn or printed structure.
    pub image: PathBuf,

    /// Write the recognized SMILES to this `.smi` or `.smiles` file.
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SubmitArgs {
    /// MOL file holding the drawn structure.
    pub canvas: PathBuf,

    /// Name shown on the leaderboard.
    #[arg(short, long)]
    pub nickname: String,

    /// Empty the MOL file after a successful submission.
    #[arg(long)]
    pub clear: bool,
}

#[derive(Clone, Debug, Args)]
pub struct LeaderboardArgs {
    /// Re-read the leaderboard on the configured poll interval.
    #[arg(short, long)]
    pub watch: bool,

    /// Show full notation instead of a truncated preview.
    #[arg(long)]
    pub full: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: compound-entry, leaderboard, predict, scan, submit.
    pub type_name: String,
}
