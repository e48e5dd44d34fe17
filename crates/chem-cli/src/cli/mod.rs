use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `cclab` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cclab",
    version,
    about = "CyberChem Lab - predict IC50 for your molecules and climb the leaderboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Max leaderboard rows to show
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only, no spinners)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Color table output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Use the local leaderboard file instead of the backend
    #[arg(long, global = true)]
    pub local: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            local: self.local,
        }
    }
}
